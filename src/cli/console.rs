use std::{
    fmt::Arguments,
    io::{BufRead, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{anyhow, Result};
use tracing::{debug, warn};

use crate::tracker::{
    entities::{RawEntry, DEFAULT_CATEGORY},
    presenter::{ChartBar, Presenter},
    profile::RawProfile,
    FitnessTracker,
};

const CHART_WIDTH: i64 = 40;

const HELP: &str = "Commands:
  add              log a workout
  summary          show all workouts grouped by category
  progress         chart minutes per category
  profile          enter user information
  export <path>    write a text report
  help             show this message
  quit             leave";

/// Line based stand-in for the workout form. Reads from any [BufRead] and writes to any [Write],
/// so sessions can be replayed from memory.
pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
    categories: Vec<Arc<str>>,
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, output: W, categories: Vec<Arc<str>>) -> Self {
        Self {
            input,
            output,
            categories,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn emit(&mut self, args: Arguments) {
        if let Err(e) = self
            .output
            .write_fmt(args)
            .and_then(|_| self.output.flush())
        {
            warn!("Failed to write to terminal {e:?}");
        }
    }

    /// Returns `None` once input is exhausted.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        self.emit(format_args!("{label}: "));
        self.read_line()?
            .ok_or_else(|| anyhow!("Input closed while waiting for {label}"))
    }

    pub fn read_command(&mut self) -> Result<Option<String>> {
        self.emit(format_args!("> "));
        self.read_line()
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn show_info(&mut self, title: &str, text: &str) {
        self.emit(format_args!("[{title}]\n{text}\n"));
    }

    fn show_error(&mut self, title: &str, text: &str) {
        self.emit(format_args!("[{title}] {text}\n"));
    }

    fn get_input(&mut self) -> Result<RawEntry> {
        let exercise = self.prompt("Exercise")?;
        let duration = self.prompt("Duration (min)")?;
        let category = if self.categories.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            let options = self.categories.join("/");
            self.prompt(&format!("Category [{options}]"))?
        };
        Ok(RawEntry {
            exercise,
            duration,
            category,
        })
    }

    fn get_profile_input(&mut self) -> Result<RawProfile> {
        Ok(RawProfile {
            name: self.prompt("Name")?,
            registration_id: self.prompt("Registration ID")?,
            age: self.prompt("Age")?,
            gender: self.prompt("Gender (M/F)")?,
            height: self.prompt("Height (cm)")?,
            weight: self.prompt("Weight (kg)")?,
        })
    }

    fn clear_input(&mut self) {
        // Every prompt starts blank, nothing is kept between entries.
    }

    fn show_chart(&mut self, title: &str, bars: &[ChartBar]) {
        let label_width = bars.iter().map(|v| v.label.len()).max().unwrap_or(0);
        let max = bars.iter().map(|v| v.minutes).max().unwrap_or(0).max(1);
        self.emit(format_args!("[{title}]\n"));
        for bar in bars {
            // Widened so that huge totals can't overflow before the division.
            let width = (i128::from(bar.minutes.max(0)) * i128::from(CHART_WIDTH)
                / i128::from(max)) as usize;
            self.emit(format_args!(
                "{:<label_width$} | {} {}\n",
                bar.label,
                "#".repeat(width),
                bar.minutes
            ));
        }
    }
}

enum SessionCommand {
    Add,
    Summary,
    Progress,
    Profile,
    Export(PathBuf),
    Help,
    Quit,
}

impl SessionCommand {
    fn parse(line: &str) -> Option<Result<Self, &'static str>> {
        let line = line.trim();
        let (command, argument) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, a)| (c, a.trim()));
        let command = match command {
            "" => return None,
            "add" => Ok(Self::Add),
            "summary" | "view" => Ok(Self::Summary),
            "progress" | "chart" => Ok(Self::Progress),
            "profile" => Ok(Self::Profile),
            "export" if argument.is_empty() => Err("export needs a file path"),
            "export" => Ok(Self::Export(PathBuf::from(argument))),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err("Unknown command, type help"),
        };
        Some(command)
    }
}

/// Runs the interactive session until `quit` or end of input.
pub fn run_session<R: BufRead, W: Write>(
    tracker: &mut FitnessTracker,
    presenter: &mut TerminalPresenter<R, W>,
) -> Result<()> {
    presenter.show_info("ACEest Fitness Tracker", HELP);

    while let Some(line) = presenter.read_command()? {
        let Some(command) = SessionCommand::parse(&line) else {
            continue;
        };
        debug!("Session command {line:?}");
        match command {
            Ok(SessionCommand::Add) => {
                // Rejected entries were already shown to the user.
                let _ = tracker.add_workout(presenter)?;
            }
            Ok(SessionCommand::Summary) => tracker.view_summary(presenter),
            Ok(SessionCommand::Progress) => tracker.show_progress(presenter),
            Ok(SessionCommand::Profile) => {
                let _ = tracker.save_profile(presenter)?;
            }
            Ok(SessionCommand::Export(path)) => {
                if let Err(e) = tracker.export_report(&path, presenter) {
                    warn!("Export failed {e:?}");
                }
            }
            Ok(SessionCommand::Help) => presenter.show_info("Help", HELP),
            Ok(SessionCommand::Quit) => break,
            Err(message) => presenter.show_error("Error", message),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use anyhow::Result;
    use tempfile::tempdir;

    use crate::{
        cli::console::{run_session, TerminalPresenter},
        tracker::{
            presenter::{ChartBar, Presenter},
            store::CategoryLayout,
            FitnessTracker,
        },
        utils::clock::DefaultClock,
    };

    fn session(script: &str) -> Result<(FitnessTracker, String)> {
        let layout = CategoryLayout::default();
        let labels = match &layout {
            CategoryLayout::Categorized(labels) => labels.clone(),
            CategoryLayout::Flat => vec![],
        };
        let mut tracker = FitnessTracker::new(layout, Box::new(DefaultClock));
        let mut presenter =
            TerminalPresenter::new(Cursor::new(script.to_string()), Vec::new(), labels);
        run_session(&mut tracker, &mut presenter)?;
        let output = String::from_utf8(presenter.into_output())?;
        Ok((tracker, output))
    }

    #[test]
    fn test_session_add_and_summary() -> Result<()> {
        let (tracker, output) = session(
            "add\nPush-ups\n10\nWorkout\n\
             add\nSquats\n15\nWorkout\n\
             summary\nquit\n",
        )?;
        assert_eq!(tracker.store().len(), 2);
        assert!(output.contains("'Push-ups' added to Workout category successfully!"));
        assert!(output.contains("Total: 25 min"));
        Ok(())
    }

    #[test]
    fn test_session_reports_errors() -> Result<()> {
        let (tracker, output) = session("add\nRun\nabc\nWorkout\nadd\n\n5\nWorkout\ndance\n")?;
        assert!(tracker.store().is_empty());
        assert!(output.contains("Duration must be a number."));
        assert!(output.contains("Please enter both exercise and duration."));
        assert!(output.contains("Unknown command"));
        Ok(())
    }

    #[test]
    fn test_session_rejects_oversized_duration() -> Result<()> {
        let (tracker, output) =
            session("add\nRun\n999999999999999999\nWorkout\nprogress\nquit\n")?;
        assert!(tracker.store().is_empty());
        assert!(output.contains("Duration must be at most 1440 minutes."));
        assert!(output.contains("No workouts recorded yet."));
        Ok(())
    }

    #[test]
    fn test_session_stops_on_eof_mid_entry() {
        assert!(session("add\nRun\n").is_err());
    }

    #[test]
    fn test_session_export() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("report.txt");
        let (_, output) = session(&format!(
            "add\nJog\n10\nWarm-up\nexport {}\nexport\n",
            path.display()
        ))?;
        assert!(output.contains("Report saved to"));
        assert!(output.contains("export needs a file path"));
        assert!(std::fs::read_to_string(path)?.contains("Jog: 10 min"));
        Ok(())
    }

    #[test]
    fn test_chart_rendering() -> Result<()> {
        let mut presenter = TerminalPresenter::new(Cursor::new(String::new()), Vec::new(), vec![]);
        presenter.show_chart(
            "Progress",
            &[
                ChartBar {
                    label: "Warm-up".into(),
                    minutes: 10,
                },
                ChartBar {
                    label: "Workout".into(),
                    minutes: 20,
                },
            ],
        );
        let output = String::from_utf8(presenter.into_output())?;
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "[Progress]");
        assert_eq!(lines[1], format!("Warm-up | {} 10", "#".repeat(20)));
        assert_eq!(lines[2], format!("Workout | {} 20", "#".repeat(40)));
        Ok(())
    }

    #[test]
    fn test_chart_with_huge_totals() -> Result<()> {
        let mut presenter = TerminalPresenter::new(Cursor::new(String::new()), Vec::new(), vec![]);
        presenter.show_chart(
            "Progress",
            &[
                ChartBar {
                    label: "Workout".into(),
                    minutes: i64::MAX,
                },
                ChartBar {
                    label: "Rest".into(),
                    minutes: i64::MAX / 2,
                },
            ],
        );
        let output = String::from_utf8(presenter.into_output())?;
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines[1], format!("Workout | {} {}", "#".repeat(40), i64::MAX));
        assert_eq!(lines[2], format!("Rest    | {} {}", "#".repeat(19), i64::MAX / 2));
        Ok(())
    }
}
