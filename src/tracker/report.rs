use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use super::{entities::WorkoutRecord, profile::UserProfile, store::RecordStore, summary};

/// Builds the plain text of the exported report.
pub fn render_report(
    store: &RecordStore<WorkoutRecord>,
    profile: Option<&UserProfile>,
    generated_at: DateTime<Utc>,
) -> String {
    let mut text = format!(
        "ACEest Fitness report\nGenerated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    match profile {
        Some(profile) => text.push_str(&format!(
            "Name: {}\nRegistration: {}\nAge: {}  Gender: {}\nHeight: {} cm  Weight: {} kg\n\
             BMI: {:.1}  BMR: {:.0} kcal/day\n",
            profile.name,
            profile.registration_id,
            profile.age,
            profile.gender,
            profile.height,
            profile.weight,
            profile.bmi,
            profile.bmr
        )),
        None => text.push_str("No profile saved.\n"),
    }
    text.push('\n');

    text.push_str(&summary::render_summary(store));
    text.push('\n');
    text
}

/// Writes the report to `path`, replacing whatever was there.
pub fn export_report(
    path: &Path,
    store: &RecordStore<WorkoutRecord>,
    profile: Option<&UserProfile>,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let text = render_report(store, profile, generated_at);
    std::fs::write(path, text).with_context(|| format!("Failed to write report to {path:?}"))?;
    info!("Exported report to {path:?}");
    Ok(())
}
