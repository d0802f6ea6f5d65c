//! Small workout log. Entries come either from an interactive terminal form, which validates and
//! groups them by category, or from a JSON API that stores whatever it is given. Everything lives
//! in memory for as long as the process runs.

pub mod cli;
pub mod tracker;
pub mod utils;
pub mod web;
