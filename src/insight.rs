//! Canned natural-language insights over aggregation results.
//!
//! All functions are pure. Threshold ladders are data — ordered
//! `(threshold, label)` tables walked top-down — so the cut points can
//! change without touching the formatting code. Every function returns
//! its documented sentinel (or `None` for the optional insights) instead
//! of failing on empty input.

use crate::models::{HIGH_SCREEN_TIME, Record};
use crate::stats::{self, BucketStat, CountEntry, Demographics, MeanEntry};

/// Sentinel for an empty filtered subset.
pub const NO_DATA: &str = "No data available for selected filters.";
pub const NO_PLATFORM_DATA: &str = "No platform data available.";
pub const NO_STRATEGY_DATA: &str = "No strategy data available.";
/// Sentinel for a zero mean distraction in the focus-balance ratio.
pub const BALANCE_NOT_COMPUTABLE: &str = "Focus balance is not computable for this selection.";

type Band = (f64, &'static str);

/// Attention classification, `value >= threshold`, walked top-down.
const ATTENTION_BANDS: [Band; 2] = [(4.0, "high"), (3.0, "moderate")];
/// Distraction classification, `value <= threshold`, walked top-down.
const DISTRACTION_BANDS: [Band; 2] = [(2.0, "low"), (3.0, "moderate")];
/// Focus-balance ratio classification, `value > threshold`, walked top-down.
const BALANCE_BANDS: [Band; 2] = [(1.2, "positive"), (0.8, "balanced")];

fn first_at_least(value: f64, ladder: &[Band], fallback: &'static str) -> &'static str {
    ladder
        .iter()
        .find(|(t, _)| value >= *t)
        .map_or(fallback, |(_, label)| label)
}

fn first_at_most(value: f64, ladder: &[Band], fallback: &'static str) -> &'static str {
    ladder
        .iter()
        .find(|(t, _)| value <= *t)
        .map_or(fallback, |(_, label)| label)
}

fn first_above(value: f64, ladder: &[Band], fallback: &'static str) -> &'static str {
    ladder
        .iter()
        .find(|(t, _)| value > *t)
        .map_or(fallback, |(_, label)| label)
}

/// Classify the subset's mean attention rating.
pub fn attention_insight(records: &[Record]) -> String {
    let Some(avg) = stats::mean_rating(records, |r| r.attention_rating) else {
        return NO_DATA.to_string();
    };
    match first_at_least(avg, &ATTENTION_BANDS, "low") {
        "high" => format!("High average attention rating: {avg:.1}/5."),
        "moderate" => format!("Moderate average attention rating: {avg:.1}/5."),
        _ => format!(
            "Low average attention rating: {avg:.1}/5. Consider exploring coping strategies."
        ),
    }
}

/// Classify the subset's mean distraction rating.
pub fn distraction_insight(records: &[Record]) -> String {
    let Some(avg) = stats::mean_rating(records, |r| r.distraction_rating) else {
        return NO_DATA.to_string();
    };
    match first_at_most(avg, &DISTRACTION_BANDS, "high") {
        "low" => format!("Low distraction: {avg:.1}/5."),
        "moderate" => format!("Moderate distraction: {avg:.1}/5."),
        _ => format!("High distraction: {avg:.1}/5."),
    }
}

/// Report the most common screen-time bucket and its count.
pub fn screen_time_insight(counts: &[CountEntry]) -> String {
    match counts.first() {
        Some(top) => format!(
            "Most common screen time: {} ({} respondents)",
            top.label, top.count
        ),
        None => NO_DATA.to_string(),
    }
}

/// Report the most used platform and its frequency.
pub fn platform_insight(counts: &[CountEntry]) -> String {
    match counts.first() {
        Some(top) => format!("Most popular platform: {} ({} users)", top.label, top.count),
        None => NO_PLATFORM_DATA.to_string(),
    }
}

/// Report overall mean effectiveness (weighted over all exploded
/// observations) and the top-rated strategy.
pub fn strategy_insight(entries: &[MeanEntry]) -> String {
    let Some(top) = entries.first() else {
        return NO_STRATEGY_DATA.to_string();
    };
    let total: usize = entries.iter().map(|e| e.count).sum();
    let overall: f64 =
        entries.iter().map(|e| e.mean * e.count as f64).sum::<f64>() / total as f64;
    format!(
        "Average effectiveness is {overall:.1}/5. '{}' is rated most effective.",
        top.label
    )
}

/// Classify the ratio of mean attention to mean distraction.
pub fn focus_balance_insight(
    mean_attention: Option<f64>,
    mean_distraction: Option<f64>,
) -> String {
    let (Some(att), Some(dis)) = (mean_attention, mean_distraction) else {
        return NO_DATA.to_string();
    };
    if dis == 0.0 {
        return BALANCE_NOT_COMPUTABLE.to_string();
    }
    match first_above(att / dis, &BALANCE_BANDS, "negative") {
        "positive" => "Positive focus balance: Attention rating exceeds distraction rating, \
                       indicating good digital wellness."
            .to_string(),
        "balanced" => "Moderate focus challenge: Attention and distraction are closely \
                       balanced, suggesting room for improvement."
            .to_string(),
        _ => "Focus challenge: Distraction rating exceeds attention rating, indicating \
              significant digital wellness concerns."
            .to_string(),
    }
}

/// Two framings for the heaviest-usage bucket; omitted when no record
/// in the subset falls into it.
pub fn high_screen_time_insight(records: &[Record]) -> Option<String> {
    let vals: Vec<f64> = records
        .iter()
        .filter(|r| r.screen_time == HIGH_SCREEN_TIME)
        .filter_map(|r| r.distraction_rating)
        .collect();
    if vals.is_empty() {
        return None;
    }
    let avg = vals.iter().sum::<f64>() / vals.len() as f64;
    Some(if avg > 3.0 {
        format!(
            "Screen Time Impact: Users with 9+ hours screen time report high distraction \
             ({avg:.1}/5), suggesting excessive usage affects focus."
        )
    } else {
        format!(
            "Screen Time Management: Users with 9+ hours screen time manage distraction well \
             ({avg:.1}/5), indicating effective coping strategies."
        )
    })
}

/// The dominant age-group/occupation combination.
pub fn demographic_insight(demographics: &Demographics) -> Option<String> {
    let age = demographics.age_groups.first()?;
    let occupation = demographics.occupations.first()?;
    Some(format!(
        "The {} age group and {} occupation combination represents the largest segment in \
         your selected data.",
        age.label, occupation.label
    ))
}

/// The bucket with the highest mean distraction, reported only when at
/// least two buckets have data. Ties keep the earlier bucket in the
/// fixed order.
pub fn screen_time_trend_insight(buckets: &[BucketStat]) -> Option<String> {
    if buckets.len() < 2 {
        return None;
    }
    let mut best = &buckets[0];
    for b in &buckets[1..] {
        if b.mean_distraction > best.mean_distraction {
            best = b;
        }
    }
    Some(format!(
        "Users with \"{}\" screen time report the highest average distraction rating \
         ({:.1}/5).",
        best.bucket, best.mean_distraction
    ))
}

/// The single most effective strategy, as a recommendation line.
pub fn best_strategy_insight(entries: &[MeanEntry]) -> Option<String> {
    let top = entries.first()?;
    Some(format!(
        "Top recommendation: \"{}\" is rated most effective ({:.1}/5) among your selected \
         group.",
        top.label, top.mean
    ))
}

/// Caption for one screen-time correlation.
pub fn correlation_insight(against: &str, r: Option<f64>) -> String {
    match r {
        Some(v) => format!("Correlation (screen time vs {against}): {v:.2}"),
        None => format!("Correlation (screen time vs {against}): not computable"),
    }
}

fn top_value_line(prefix: &str, counts: Option<&[CountEntry]>) -> Option<String> {
    let top = counts?.first()?;
    Some(format!("{prefix}: {}", top.label))
}

/// Most common focus duration; omitted when the column is unavailable.
pub fn focus_duration_insight(counts: Option<&[CountEntry]>) -> Option<String> {
    top_value_line("Most common focus duration", counts)
}

/// Most common digital-guilt frequency; omitted when unavailable.
pub fn digital_guilt_insight(counts: Option<&[CountEntry]>) -> Option<String> {
    top_value_line("Most common digital guilt frequency", counts)
}

/// Most cited emotional impact; omitted when unavailable.
pub fn emotional_impact_insight(counts: Option<&[CountEntry]>) -> Option<String> {
    top_value_line("Most cited emotional impacts", counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_walkers_respect_boundaries() {
        assert_eq!(first_at_least(4.0, &ATTENTION_BANDS, "low"), "high");
        assert_eq!(first_at_least(3.999, &ATTENTION_BANDS, "low"), "moderate");
        assert_eq!(first_at_least(3.0, &ATTENTION_BANDS, "low"), "moderate");
        assert_eq!(first_at_least(2.999, &ATTENTION_BANDS, "low"), "low");

        assert_eq!(first_at_most(2.0, &DISTRACTION_BANDS, "high"), "low");
        assert_eq!(first_at_most(2.001, &DISTRACTION_BANDS, "high"), "moderate");
        assert_eq!(first_at_most(3.0, &DISTRACTION_BANDS, "high"), "moderate");
        assert_eq!(first_at_most(3.001, &DISTRACTION_BANDS, "high"), "high");

        assert_eq!(first_above(1.201, &BALANCE_BANDS, "negative"), "positive");
        assert_eq!(first_above(1.2, &BALANCE_BANDS, "negative"), "balanced");
        assert_eq!(first_above(0.801, &BALANCE_BANDS, "negative"), "balanced");
        assert_eq!(first_above(0.8, &BALANCE_BANDS, "negative"), "negative");
    }
}
