//! Workout logging behind the form front end.
//!
//! The flow is always the same: a [Presenter] hands over raw text, [EntryValidator] turns it into
//! a [WorkoutRecord] or an [EntryError], valid records go into the [RecordStore], and the
//! [summary] functions read the store back for display.

pub mod entities;
pub mod presenter;
pub mod profile;
pub mod report;
pub mod store;
pub mod summary;
pub mod validation;

use std::path::Path;

use anyhow::Result;
use entities::WorkoutRecord;
use presenter::{ChartBar, Presenter};
use profile::{ProfileError, UserProfile};
use store::{CategoryLayout, RecordStore};
use tracing::{info, warn};
use validation::{EntryError, EntryValidator};

use crate::utils::clock::Clock;

/// Owns everything a single form session works with. Every action is independent of the previous
/// one, the only shared state is the store and the saved profile.
pub struct FitnessTracker {
    store: RecordStore<WorkoutRecord>,
    validator: EntryValidator,
    profile: Option<UserProfile>,
    clock: Box<dyn Clock>,
}

impl FitnessTracker {
    pub fn new(layout: CategoryLayout, clock: Box<dyn Clock>) -> Self {
        Self {
            store: RecordStore::new(layout.clone()),
            validator: EntryValidator::new(layout),
            profile: None,
            clock,
        }
    }

    pub fn store(&self) -> &RecordStore<WorkoutRecord> {
        &self.store
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Reads the workout form and stores the entry if it is valid. Validation problems are shown
    /// to the user and returned, the store stays untouched in that case.
    pub fn add_workout(&mut self, presenter: &mut dyn Presenter) -> Result<Result<(), EntryError>> {
        let entry = presenter.get_input()?;
        let record = match self.validator.validate(&entry, self.clock.time()) {
            Ok(record) => record,
            Err(e) => {
                warn!("Rejected entry {entry:?}: {e:?}");
                presenter.show_error("Error", &e.to_string());
                return Ok(Err(e));
            }
        };

        let message = format!(
            "'{}' added to {} category successfully!",
            record.exercise, record.category
        );
        info!("Adding {record:?}");
        self.store.append(record);
        presenter.show_info("Success", &message);
        presenter.clear_input();
        Ok(Ok(()))
    }

    pub fn view_summary(&self, presenter: &mut dyn Presenter) {
        presenter.show_info("Workout Summary", &summary::render_summary(&self.store));
    }

    /// Shows minutes per category as a chart.
    pub fn show_progress(&self, presenter: &mut dyn Presenter) {
        if self.store.is_empty() {
            presenter.show_info("Progress", summary::NO_WORKOUTS_MESSAGE);
            return;
        }
        let bars = summary::category_totals(&self.store)
            .into_iter()
            .map(|v| ChartBar {
                label: v.category,
                minutes: v.minutes,
            })
            .collect::<Vec<_>>();
        presenter.show_chart("Time spent per category (min)", &bars);
    }

    pub fn save_profile(
        &mut self,
        presenter: &mut dyn Presenter,
    ) -> Result<Result<(), ProfileError>> {
        let raw = presenter.get_profile_input()?;
        match UserProfile::parse(&raw) {
            Ok(profile) => {
                presenter.show_info(
                    "Profile saved",
                    &format!(
                        "{}: BMI {:.1}, BMR {:.0} kcal/day",
                        profile.name, profile.bmi, profile.bmr
                    ),
                );
                info!("Saved profile for {}", profile.registration_id);
                self.profile = Some(profile);
                Ok(Ok(()))
            }
            Err(e) => {
                presenter.show_error("Error", &e.to_string());
                Ok(Err(e))
            }
        }
    }

    pub fn export_report(&self, path: &Path, presenter: &mut dyn Presenter) -> Result<()> {
        match report::export_report(path, &self.store, self.profile(), self.clock.time()) {
            Ok(()) => {
                presenter.show_info("Export", &format!("Report saved to {}", path.display()));
                Ok(())
            }
            Err(e) => {
                presenter.show_error("Export failed", &format!("{e:#}"));
                Err(e)
            }
        }
    }
}
