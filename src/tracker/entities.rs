use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label used when categories are disabled, or when the form sends an empty category.
pub const DEFAULT_CATEGORY: &str = "Workout";

/// Categories offered by the form when nothing else is configured. Their order is the display
/// order of summaries and progress charts.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Warm-up", "Workout", "Cool-down"];

/// Raw, unvalidated form input exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub exercise: String,
    pub duration: String,
    pub category: String,
}

impl RawEntry {
    pub fn new(
        exercise: impl Into<String>,
        duration: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            exercise: exercise.into(),
            duration: duration.into(),
            category: category.into(),
        }
    }
}

/// A single logged workout. Only constructed by
/// [EntryValidator](super::validation::EntryValidator), so a value of this type has always
/// passed validation.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct WorkoutRecord {
    pub exercise: Arc<str>,
    /// Minutes.
    pub duration: i64,
    pub category: Arc<str>,
    pub timestamp: DateTime<Utc>,
}

/// Anything that can be kept in a [RecordStore](super::store::RecordStore).
pub trait StoredRecord {
    /// Category the record wants to be filed under. `None` means the store decides.
    fn category(&self) -> Option<&str>;
}

impl StoredRecord for WorkoutRecord {
    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}

/// Records posted to the web API are kept verbatim. A `category` string field is honoured when
/// the store is configured with categories.
impl StoredRecord for serde_json::Value {
    fn category(&self) -> Option<&str> {
        self.get("category").and_then(serde_json::Value::as_str)
    }
}
