//! One-pass assembly of everything the presentation layer consumes:
//! KPIs, the per-topic aggregate tables (chart-ready), and the insight
//! strings. The whole report serializes to JSON.

use crate::insight;
use crate::models::Record;
use crate::stats::{self, BucketStat, CountEntry, Correlations, Demographics, MeanEntry};
use serde::{Deserialize, Serialize};

/// All canned-text outputs. Optional entries are omitted (not errors)
/// when their inputs are unavailable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insights {
    pub attention: String,
    pub distraction: String,
    pub screen_time: String,
    pub platform: String,
    pub strategy: String,
    pub focus_balance: String,
    pub correlation_attention: String,
    pub correlation_distraction: String,
    pub high_screen_time: Option<String>,
    pub demographic: Option<String>,
    pub screen_time_trend: Option<String>,
    pub best_strategy: Option<String>,
    pub focus_duration: Option<String>,
    pub digital_guilt: Option<String>,
    pub emotional_impact: Option<String>,
}

/// The full dashboard payload for one filtered subset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub respondents: usize,
    pub mean_attention: Option<f64>,
    pub mean_distraction: Option<f64>,
    pub demographics: Demographics,
    pub screen_time_counts: Vec<CountEntry>,
    pub platforms: Vec<CountEntry>,
    pub distraction_by_screen_time: Vec<BucketStat>,
    pub strategies: Vec<MeanEntry>,
    pub words: Vec<CountEntry>,
    pub correlations: Correlations,
    pub focus_durations: Option<Vec<CountEntry>>,
    pub digital_guilt: Option<Vec<CountEntry>>,
    pub emotional_impact: Option<Vec<CountEntry>>,
    pub insights: Insights,
}

impl Report {
    /// Aggregate the subset and derive every insight. An empty subset
    /// yields empty tables, `None` KPIs, and the sentinel strings.
    pub fn build(subset: &[Record]) -> Self {
        let mean_attention = stats::mean_rating(subset, |r| r.attention_rating);
        let mean_distraction = stats::mean_rating(subset, |r| r.distraction_rating);
        let demographics = stats::demographics(subset);
        let screen_time_counts = stats::screen_time_counts(subset);
        let platforms = stats::platform_counts(subset);
        let distraction_by_screen_time = stats::distraction_by_screen_time(subset);
        let strategies = stats::strategy_effectiveness(subset);
        let words = stats::word_frequencies(subset);
        let correlations = stats::screen_time_correlations(subset);
        let focus_durations = stats::optional_counts(subset, |r| r.focus_duration.as_ref());
        let digital_guilt = stats::optional_counts(subset, |r| r.digital_guilt.as_ref());
        let emotional_impact = stats::optional_counts(subset, |r| r.emotional_impact.as_ref());

        let insights = Insights {
            attention: insight::attention_insight(subset),
            distraction: insight::distraction_insight(subset),
            screen_time: insight::screen_time_insight(&screen_time_counts),
            platform: insight::platform_insight(&platforms),
            strategy: insight::strategy_insight(&strategies),
            focus_balance: insight::focus_balance_insight(mean_attention, mean_distraction),
            correlation_attention: insight::correlation_insight(
                "attention",
                correlations.attention,
            ),
            correlation_distraction: insight::correlation_insight(
                "distraction",
                correlations.distraction,
            ),
            high_screen_time: insight::high_screen_time_insight(subset),
            demographic: insight::demographic_insight(&demographics),
            screen_time_trend: insight::screen_time_trend_insight(&distraction_by_screen_time),
            best_strategy: insight::best_strategy_insight(&strategies),
            focus_duration: insight::focus_duration_insight(focus_durations.as_deref()),
            digital_guilt: insight::digital_guilt_insight(digital_guilt.as_deref()),
            emotional_impact: insight::emotional_impact_insight(emotional_impact.as_deref()),
        };

        Self {
            respondents: subset.len(),
            mean_attention,
            mean_distraction,
            demographics,
            screen_time_counts,
            platforms,
            distraction_by_screen_time,
            strategies,
            words,
            correlations,
            focus_durations,
            digital_guilt,
            emotional_impact,
            insights,
        }
    }
}
