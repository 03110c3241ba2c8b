//! Aggregation over a filtered subset: grouped counts, grouped means,
//! token explosion for the list-valued fields, and the screen-time
//! correlations. Every procedure treats an empty subset as "no data"
//! and returns an empty table or `None` instead of failing.

use crate::models::{Record, SCREEN_TIME_ORDER, screen_time_ordinal};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Strategy tokens that are placeholders or split-off boilerplate
/// fragments rather than actual strategies.
const UNWANTED_STRATEGY_TOKENS: [&str; 3] =
    ["Na", "which is often on-screen", "recenter on chosen task"];

/// Strategy tokens this long or longer are unsplit free-text remnants,
/// not labels; they are excluded from the effectiveness ranking.
const STRATEGY_MAX_CHARS: usize = 35;

/// One category with its record (or observation) count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

/// One category with the mean of a rating over its observations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeanEntry {
    pub label: String,
    pub mean: f64,
    pub count: usize,
}

/// Mean distraction for one screen-time bucket, in fixed bucket order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BucketStat {
    pub bucket: String,
    pub mean_distraction: f64,
    pub count: usize,
}

/// Age-group and occupation breakdowns of the subset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Demographics {
    pub age_groups: Vec<CountEntry>,
    pub occupations: Vec<CountEntry>,
}

/// Pearson correlation of ordinal screen time vs the two ratings.
/// `None` means not computable (fewer than 2 points or zero variance).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Correlations {
    pub attention: Option<f64>,
    pub distraction: Option<f64>,
}

/// Split a delimited list field into trimmed, non-empty tokens. One
/// record with k tokens contributes k observations downstream, each
/// inheriting the record's other field values.
pub fn split_tokens(field: &str) -> Vec<String> {
    field
        .split([',', ';'])
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Ranking order used everywhere: count/mean descending, ties broken by
/// lexicographically smaller label. Arg-max lookups take the first
/// element of the resulting table.
fn ranked(map: BTreeMap<String, usize>) -> Vec<CountEntry> {
    let mut out: Vec<CountEntry> = map
        .into_iter()
        .map(|(label, count)| CountEntry { label, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    out
}

fn count_by<'a, F>(records: &'a [Record], f: F) -> Vec<CountEntry>
where
    F: Fn(&'a Record) -> &'a str,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for r in records {
        let label = f(r).trim();
        if !label.is_empty() {
            *counts.entry(label.to_string()).or_default() += 1;
        }
    }
    ranked(counts)
}

/// Count per age group and per occupation.
pub fn demographics(records: &[Record]) -> Demographics {
    Demographics {
        age_groups: count_by(records, |r| &r.age_group),
        occupations: count_by(records, |r| &r.occupation),
    }
}

/// Frequency of exploded platform tokens, excluding catch-all entries
/// containing "etc.".
pub fn platform_counts(records: &[Record]) -> Vec<CountEntry> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for r in records {
        for token in split_tokens(&r.platforms_used) {
            if token.contains("etc.") {
                continue;
            }
            *counts.entry(token).or_default() += 1;
        }
    }
    ranked(counts)
}

/// Raw screen-time value counts. Count-based view: values outside the
/// fixed bucket set are retained here (only ordinal analyses drop them).
pub fn screen_time_counts(records: &[Record]) -> Vec<CountEntry> {
    count_by(records, |r| &r.screen_time)
}

/// Mean distraction per screen-time bucket, fixed bucket order, buckets
/// with zero rated records omitted.
pub fn distraction_by_screen_time(records: &[Record]) -> Vec<BucketStat> {
    let mut out = Vec::new();
    for bucket in SCREEN_TIME_ORDER {
        let vals: Vec<f64> = records
            .iter()
            .filter(|r| r.screen_time == bucket)
            .filter_map(|r| r.distraction_rating)
            .collect();
        if vals.is_empty() {
            continue;
        }
        out.push(BucketStat {
            bucket: bucket.to_string(),
            mean_distraction: vals.iter().sum::<f64>() / vals.len() as f64,
            count: vals.len(),
        });
    }
    out
}

/// Whether an exploded strategy token takes part in the ranking.
fn usable_strategy(token: &str) -> bool {
    !UNWANTED_STRATEGY_TOKENS.contains(&token) && token.chars().count() < STRATEGY_MAX_CHARS
}

/// Mean effectiveness per exploded strategy token, descending by mean.
/// The record-level effectiveness rating is inherited by every token of
/// that record (a modeling approximation, not a per-strategy rating).
pub fn strategy_effectiveness(records: &[Record]) -> Vec<MeanEntry> {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for r in records {
        let Some(effectiveness) = r.strategy_effectiveness else {
            continue;
        };
        for token in split_tokens(&r.coping_strategies) {
            if !usable_strategy(&token) {
                continue;
            }
            let slot = sums.entry(token).or_insert((0.0, 0));
            slot.0 += effectiveness;
            slot.1 += 1;
        }
    }
    let mut out: Vec<MeanEntry> = sums
        .into_iter()
        .map(|(label, (sum, count))| MeanEntry {
            label,
            mean: sum / count as f64,
            count,
        })
        .collect();
    out.sort_by(|a, b| {
        b.mean
            .partial_cmp(&a.mean)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });
    out
}

/// Word frequencies over the concatenated free-text answers, whitespace
/// tokenized, case preserved. Deliberately no stemming, stopwords, or
/// collocation merging.
pub fn word_frequencies(records: &[Record]) -> Vec<CountEntry> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for r in records {
        for word in r.tech_relationship.split_whitespace() {
            *counts.entry(word.to_string()).or_default() += 1;
        }
    }
    ranked(counts)
}

/// Value counts over one of the optional categorical columns. `None`
/// when the column carries no values in this subset (feature
/// unavailable), so the dependent insight is omitted rather than wrong.
pub fn optional_counts<F>(records: &[Record], f: F) -> Option<Vec<CountEntry>>
where
    F: Fn(&Record) -> Option<&String>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for r in records {
        if let Some(v) = f(r) {
            *counts.entry(v.clone()).or_default() += 1;
        }
    }
    if counts.is_empty() {
        None
    } else {
        Some(ranked(counts))
    }
}

/// Arithmetic mean of one rating over the subset; `None` when no record
/// carries a value.
pub fn mean_rating<F>(records: &[Record], f: F) -> Option<f64>
where
    F: Fn(&Record) -> Option<f64>,
{
    let vals: Vec<f64> = records.iter().filter_map(|r| f(r)).collect();
    if vals.is_empty() {
        None
    } else {
        Some(vals.iter().sum::<f64>() / vals.len() as f64)
    }
}

/// Pearson correlation coefficient. `None` for fewer than 2 points or
/// zero variance in either variable.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / nf;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// Correlate ordinal screen time (1..=4 over the fixed buckets) with the
/// attention and distraction ratings. Records whose screen time is not
/// one of the four known buckets are excluded.
pub fn screen_time_correlations(records: &[Record]) -> Correlations {
    let pairs_for = |rating: fn(&Record) -> Option<f64>| -> Vec<(f64, f64)> {
        records
            .iter()
            .filter_map(|r| {
                let ord = screen_time_ordinal(&r.screen_time)?;
                let y = rating(r)?;
                Some((ord as f64, y))
            })
            .collect()
    };
    Correlations {
        attention: pearson(&pairs_for(|r| r.attention_rating)),
        distraction: pearson(&pairs_for(|r| r.distraction_rating)),
    }
}
