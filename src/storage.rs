use crate::report::Report;
use crate::stats::{BucketStat, CountEntry, MeanEntry};
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save a ranked count table as CSV with header.
pub fn save_counts_csv<P: AsRef<Path>>(
    entries: &[CountEntry],
    label_header: &str,
    path: P,
) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((label_header, "count"))?;
    for e in entries {
        wtr.serialize((&e.label, e.count))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a ranked mean table as CSV with header.
pub fn save_means_csv<P: AsRef<Path>>(
    entries: &[MeanEntry],
    label_header: &str,
    path: P,
) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((label_header, "mean", "count"))?;
    for e in entries {
        wtr.serialize((&e.label, e.mean, e.count))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the screen-time bucket means as CSV with header.
pub fn save_buckets_csv<P: AsRef<Path>>(stats: &[BucketStat], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("screen_time", "mean_distraction", "count"))?;
    for s in stats {
        wtr.serialize((&s.bucket, s.mean_distraction, s.count))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the full report as pretty JSON.
pub fn save_report_json<P: AsRef<Path>>(report: &Report, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(report)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
