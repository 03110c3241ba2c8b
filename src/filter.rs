//! Demographic filtering: AND across dimensions, OR across the selected
//! values within a dimension.

use crate::models::Record;
use std::collections::BTreeSet;
use thiserror::Error;

/// A filter selection: which age groups and which occupations to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub age_groups: BTreeSet<String>,
    pub occupations: BTreeSet<String>,
}

/// An empty dimension is a usage-precondition violation (the dashboard
/// prompts for at least one value), not an internal error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("please select at least one age group")]
    NoAgeGroups,
    #[error("please select at least one occupation")]
    NoOccupations,
}

impl Selection {
    pub fn new<I, J, S, T>(age_groups: I, occupations: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            age_groups: age_groups.into_iter().map(Into::into).collect(),
            occupations: occupations.into_iter().map(Into::into).collect(),
        }
    }

    /// The dashboard default: every distinct value of both dimensions.
    pub fn all(records: &[Record]) -> Self {
        Self {
            age_groups: records.iter().map(|r| r.age_group.clone()).collect(),
            occupations: records.iter().map(|r| r.occupation.clone()).collect(),
        }
    }
}

/// Return the subset of `records` matching the selection. Pure and
/// linear in the dataset size; safe to run on every interaction.
pub fn apply(records: &[Record], selection: &Selection) -> Result<Vec<Record>, SelectionError> {
    if selection.age_groups.is_empty() {
        return Err(SelectionError::NoAgeGroups);
    }
    if selection.occupations.is_empty() {
        return Err(SelectionError::NoOccupations);
    }
    Ok(records
        .iter()
        .filter(|r| {
            selection.age_groups.contains(&r.age_group)
                && selection.occupations.contains(&r.occupation)
        })
        .cloned()
        .collect())
}
