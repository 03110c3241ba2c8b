use serde::{Deserialize, Serialize};

/// Fixed ordinal order of the screen-time buckets (note the en dashes,
/// exactly as they appear in the survey export).
pub const SCREEN_TIME_ORDER: [&str; 4] = [
    "Less than 3 hours",
    "3–5 hours",
    "6–8 hours",
    "9+ hours",
];

/// The bucket used by the high-screen-time impact insight.
pub const HIGH_SCREEN_TIME: &str = "9+ hours";

/// Ordinal code (1..=4) for a screen-time label, `None` for anything
/// outside the fixed four-bucket scale.
pub fn screen_time_ordinal(label: &str) -> Option<u8> {
    SCREEN_TIME_ORDER
        .iter()
        .position(|b| *b == label)
        .map(|i| i as u8 + 1)
}

/// Canonical form of a raw occupation cell. Whole-value replacement of a
/// small set of known typos/compound labels; anything else passes through
/// unchanged, so the mapping is idempotent.
pub fn canonical_occupation(raw: &str) -> &str {
    match raw {
        "Working Profesional" => "Working Professional",
        "Working Profesional, Freelancer / Self-Employed" => "Hybrid Professional",
        "Student, Freelancer / Self-Employed" => "Student & Freelancer",
        other => other,
    }
}

/// Raw CSV row. Field names are the survey export's header names, which
/// are a compatibility contract (`Screen TIme` is a typo in the data, not
/// here). The last three columns may be absent from the file entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Age Group")]
    pub age_group: String,
    #[serde(rename = "Occupation")]
    pub occupation: String,
    #[serde(rename = "Attention Rating")]
    pub attention_rating: Option<f64>,
    #[serde(rename = "Distraction Rating")]
    pub distraction_rating: Option<f64>,
    #[serde(rename = "Screen TIme")]
    pub screen_time: String,
    #[serde(rename = "Platforms used", default)]
    pub platforms_used: Option<String>,
    #[serde(rename = "Cleaned Strategies", default)]
    pub coping_strategies: Option<String>,
    #[serde(rename = "Strategy Affectiveness", default)]
    pub strategy_effectiveness: Option<f64>,
    #[serde(rename = "Tech Relationship", default)]
    pub tech_relationship: Option<String>,
    #[serde(rename = "Focus Duration", default)]
    pub focus_duration: Option<String>,
    #[serde(rename = "Digital Guilt", default)]
    pub digital_guilt: Option<String>,
    #[serde(rename = "Emotional Impact", default)]
    pub emotional_impact: Option<String>,
}

/// Tidy structure used by this crate (one row = one survey response).
///
/// Ratings are `None` when the cell was empty. `focus_duration`,
/// `digital_guilt` and `emotional_impact` are `None` when the column is
/// missing or the cell is empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub age_group: String,
    pub occupation: String,
    pub attention_rating: Option<f64>,
    pub distraction_rating: Option<f64>,
    pub screen_time: String,
    pub platforms_used: String,
    pub coping_strategies: String,
    pub strategy_effectiveness: Option<f64>,
    pub tech_relationship: String,
    pub focus_duration: Option<String>,
    pub digital_guilt: Option<String>,
    pub emotional_impact: Option<String>,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

impl From<RawRecord> for Record {
    fn from(r: RawRecord) -> Self {
        Self {
            age_group: r.age_group,
            occupation: canonical_occupation(&r.occupation).to_string(),
            attention_rating: r.attention_rating,
            distraction_rating: r.distraction_rating,
            screen_time: r.screen_time,
            platforms_used: r.platforms_used.unwrap_or_default(),
            coping_strategies: r.coping_strategies.unwrap_or_default(),
            strategy_effectiveness: r.strategy_effectiveness,
            tech_relationship: r.tech_relationship.unwrap_or_default(),
            focus_duration: non_empty(r.focus_duration),
            digital_guilt: non_empty(r.digital_guilt),
            emotional_impact: non_empty(r.emotional_impact),
        }
    }
}
