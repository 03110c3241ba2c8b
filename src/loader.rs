//! CSV ingestion and normalization for the survey export.
//!
//! `load` reads and cleans one file; `load_cached` is the memoized
//! accessor the rest of the pipeline should use, keyed by canonical path
//! and invalidated when the file's modification time changes. The loaded
//! dataset is immutable (`Arc<Vec<Record>>`), so repeated filter
//! interactions never re-read or re-parse the source.

use crate::models::{RawRecord, Record};
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::SystemTime;
use thiserror::Error;

/// Columns that must be present in the header row. The remaining three
/// (`Focus Duration`, `Digital Guilt`, `Emotional Impact`) are optional;
/// their insights are simply omitted when the column is absent.
const REQUIRED_COLUMNS: [&str; 9] = [
    "Age Group",
    "Occupation",
    "Attention Rating",
    "Distraction Rating",
    "Screen TIme",
    "Platforms used",
    "Cleaned Strategies",
    "Strategy Affectiveness",
    "Tech Relationship",
];

#[derive(Debug, Error)]
pub enum LoadError {
    /// The survey file does not exist. Non-recoverable for the session;
    /// callers surface it and stop before any aggregation.
    #[error("survey data file not found: {0}")]
    NotFound(PathBuf),
    #[error("survey data file is missing required column {0:?}")]
    MissingColumn(String),
    #[error("failed to read survey data: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse survey data: {0}")]
    Csv(#[from] csv::Error),
}

/// Load and clean one survey CSV.
///
/// Header names are trimmed of surrounding whitespace, occupations pass
/// through the canonicalization map, and rows with an empty `Age Group`
/// or `Occupation` are dropped (they could never match a filter
/// selection). A row that fails to decode is skipped with a warning;
/// it does not abort the load.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, LoadError> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(e),
    })?;

    let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(file);

    let headers = rdr.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col.to_string()));
        }
    }

    let mut out: Vec<Record> = Vec::new();
    for (idx, row) in rdr.deserialize::<RawRecord>().enumerate() {
        // Header is line 1, so the first data row is line 2.
        let line = idx + 2;
        match row {
            Ok(raw) => {
                let rec = Record::from(raw);
                if rec.age_group.trim().is_empty() || rec.occupation.trim().is_empty() {
                    log::debug!("line {line}: empty filter dimension, row dropped");
                    continue;
                }
                out.push(rec);
            }
            Err(e) => log::warn!("line {line}: skipping undecodable row: {e}"),
        }
    }

    log::debug!("loaded {} records from {}", out.len(), path.display());
    Ok(out)
}

struct CacheEntry {
    modified: Option<SystemTime>,
    records: Arc<Vec<Record>>,
}

static CACHE: OnceLock<Mutex<HashMap<PathBuf, CacheEntry>>> = OnceLock::new();

/// Memoized [`load`]. Returns a shared, read-only dataset; the cache is
/// keyed by canonical path and an entry is reused as long as the file's
/// modification time is unchanged.
pub fn load_cached<P: AsRef<Path>>(path: P) -> Result<Arc<Vec<Record>>, LoadError> {
    let path = path.as_ref();
    let modified = fs::metadata(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Io(e),
        })?
        .modified()
        .ok();
    let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    let mut cache = match CACHE.get_or_init(Default::default).lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(entry) = cache.get(&key) {
        if entry.modified == modified {
            log::debug!("cache hit for {}", key.display());
            return Ok(Arc::clone(&entry.records));
        }
    }

    let records = Arc::new(load(path)?);
    cache.insert(
        key,
        CacheEntry {
            modified,
            records: Arc::clone(&records),
        },
    );
    Ok(records)
}
