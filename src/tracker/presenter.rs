use std::sync::Arc;

use anyhow::Result;

use super::{entities::RawEntry, profile::RawProfile};

/// One bar of the progress chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    pub label: Arc<str>,
    pub minutes: i64,
}

/// Contract between [FitnessTracker](super::FitnessTracker) and whatever shows it to the user.
/// The tracker never touches a widget directly: it asks for raw text and hands back messages.
#[cfg_attr(test, mockall::automock)]
pub trait Presenter {
    fn show_info(&mut self, title: &str, text: &str);

    fn show_error(&mut self, title: &str, text: &str);

    /// Current contents of the workout form.
    fn get_input(&mut self) -> Result<RawEntry>;

    fn get_profile_input(&mut self) -> Result<RawProfile>;

    /// Resets the workout form after a successful add.
    fn clear_input(&mut self);

    fn show_chart(&mut self, title: &str, bars: &[ChartBar]);
}
