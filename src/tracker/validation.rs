use std::{error::Error, fmt::Display, num::IntErrorKind, sync::Arc};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{
    entities::{RawEntry, WorkoutRecord, DEFAULT_CATEGORY},
    store::CategoryLayout,
};

/// Longest single session accepted, one full day.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// Reasons a form entry is turned down. The [Display] output is what the user gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryError {
    MissingInput,
    InvalidDuration,
    NonPositiveDuration,
    DurationTooLong,
}

impl Display for EntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryError::MissingInput => write!(f, "Please enter both exercise and duration."),
            EntryError::InvalidDuration => write!(f, "Duration must be a number."),
            EntryError::NonPositiveDuration => {
                write!(f, "Duration must be a positive number of minutes.")
            }
            EntryError::DurationTooLong => {
                write!(f, "Duration must be at most {MAX_DURATION_MINUTES} minutes.")
            }
        }
    }
}

impl Error for EntryError {}

/// Turns [RawEntry] values into [WorkoutRecord]s.
///
/// Checks run in a fixed order: blank fields first, then integer parsing, then the range of the
/// duration. The first failing check decides the error.
#[derive(Debug, Clone)]
pub struct EntryValidator {
    layout: CategoryLayout,
}

impl EntryValidator {
    pub fn new(layout: CategoryLayout) -> Self {
        Self { layout }
    }

    pub fn validate(
        &self,
        entry: &RawEntry,
        now: DateTime<Utc>,
    ) -> Result<WorkoutRecord, EntryError> {
        let exercise = entry.exercise.trim();
        let duration = entry.duration.trim();

        if exercise.is_empty() || duration.is_empty() {
            return Err(EntryError::MissingInput);
        }

        let duration = duration.parse::<i64>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow => EntryError::DurationTooLong,
            IntErrorKind::NegOverflow => EntryError::NonPositiveDuration,
            _ => EntryError::InvalidDuration,
        })?;

        if duration <= 0 {
            return Err(EntryError::NonPositiveDuration);
        }
        if duration > MAX_DURATION_MINUTES {
            return Err(EntryError::DurationTooLong);
        }

        let category = self.resolve_category(&entry.category);
        debug!("Validated {exercise} for {duration} minutes under {category}");

        Ok(WorkoutRecord {
            exercise: exercise.into(),
            duration,
            category,
            timestamp: now,
        })
    }

    fn resolve_category(&self, raw: &str) -> Arc<str> {
        let raw = raw.trim();
        match &self.layout {
            CategoryLayout::Categorized(_) if !raw.is_empty() => raw.into(),
            CategoryLayout::Categorized(_) | CategoryLayout::Flat => DEFAULT_CATEGORY.into(),
        }
    }
}
