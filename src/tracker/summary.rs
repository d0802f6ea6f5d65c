use std::sync::Arc;

use super::{entities::WorkoutRecord, store::RecordStore};

/// Shown instead of a report while the store holds nothing.
pub const NO_WORKOUTS_MESSAGE: &str = "No workouts recorded yet.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Arc<str>,
    pub count: usize,
    /// Sum of durations in minutes.
    pub minutes: i64,
}

/// Totals clamp at [i64::MAX] instead of wrapping.
fn total_minutes<'a>(records: impl IntoIterator<Item = &'a WorkoutRecord>) -> i64 {
    records
        .into_iter()
        .fold(0, |total, v| total.saturating_add(v.duration))
}

/// Returns per category statistics in display order. Empty categories are included with zero
/// totals.
pub fn category_totals(store: &RecordStore<WorkoutRecord>) -> Vec<CategoryTotal> {
    store
        .list_all()
        .iter()
        .map(|group| CategoryTotal {
            category: group.category.clone(),
            count: group.records.len(),
            minutes: total_minutes(&group.records),
        })
        .collect()
}

pub fn overall_minutes(store: &RecordStore<WorkoutRecord>) -> i64 {
    total_minutes(store.records())
}

/// Renders the summary dialog text.
pub fn render_summary(store: &RecordStore<WorkoutRecord>) -> String {
    if store.is_empty() {
        return NO_WORKOUTS_MESSAGE.to_string();
    }

    let mut text = String::new();
    for group in store.list_all() {
        text.push_str(&format!(
            "{} ({} sessions):\n",
            group.category,
            group.records.len()
        ));
        if group.records.is_empty() {
            text.push_str("  No sessions\n");
        }
        for record in &group.records {
            text.push_str(&format!(
                "  - {}: {} min ({})\n",
                record.exercise,
                record.duration,
                record.timestamp.format("%Y-%m-%d %H:%M")
            ));
        }
        text.push_str(&format!(
            "  Total: {} min\n\n",
            total_minutes(&group.records)
        ));
    }
    text.push_str(&format!("Overall total: {} min", overall_minutes(store)));
    text
}
