//! dfd_rs
//!
//! A lightweight Rust library for loading, filtering, summarizing, and
//! deriving insights from digital-focus survey data. Pairs with the
//! `dfd` CLI.
//!
//! ### Features
//! - Load and normalize the survey CSV export (cached per path)
//! - Filter by age group and occupation
//! - Grouped counts, means, token explosion, and Pearson correlations
//! - Canned natural-language insights with documented thresholds
//! - CSV/JSON export and SVG/PNG bar charts
//!
//! ### Example
//! ```no_run
//! use dfd_rs::{Report, Selection};
//!
//! let records = dfd_rs::loader::load_cached("survey.csv")?;
//! let subset = dfd_rs::filter::apply(&records, &Selection::all(&records))?;
//! let report = Report::build(&subset);
//! println!("{}", report.insights.attention);
//! dfd_rs::storage::save_report_json(&report, "report.json")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod filter;
pub mod insight;
pub mod loader;
pub mod models;
pub mod report;
pub mod stats;
pub mod storage;
pub mod viz;

pub use filter::Selection;
pub use models::Record;
pub use report::Report;
