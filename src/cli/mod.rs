pub mod console;

use std::{io, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::{run_session, TerminalPresenter};
use tokio_util::sync::CancellationToken;
use tracing::{info, level_filters::LevelFilter};

use crate::{
    tracker::{
        entities::DEFAULT_CATEGORIES,
        store::CategoryLayout,
        FitnessTracker,
    },
    utils::{
        clock::DefaultClock,
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, SERVER_PREFIX, TRACKER_PREFIX},
        runtime::single_thread_runtime,
    },
    web::{self, shutdown::detect_shutdown, ServerConfig, DEFAULT_HOST, DEFAULT_PORT},
};

#[derive(Parser, Debug)]
#[command(name = "ACEest Fitness", version, long_about = None)]
#[command(about = "Log workouts from a terminal form or a small JSON API", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable trace logging to stdout")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory for logs and reports. By default tries $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Run the workout JSON API")]
    Serve {
        #[arg(long, default_value_t = DEFAULT_HOST.to_string())]
        host: String,
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    #[command(about = "Log workouts interactively in the terminal")]
    Track {
        #[arg(long, help = "Keep every workout in a single list", conflicts_with = "categories")]
        flat: bool,
        #[arg(
            long,
            value_delimiter = ',',
            default_values_t = DEFAULT_CATEGORIES.map(String::from),
            help = "Comma separated categories, in display order"
        )]
        categories: Vec<String>,
    },
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, ensure_dir)?;

    match args.commands {
        Commands::Serve { host, port } => {
            enable_logging(SERVER_PREFIX, &app_dir, logging_level, true)?;
            single_thread_runtime()?.block_on(run_server(ServerConfig { host, port }))
        }
        Commands::Track { flat, categories } => {
            enable_logging(TRACKER_PREFIX, &app_dir, logging_level, args.log)?;
            let layout = if flat {
                CategoryLayout::Flat
            } else {
                CategoryLayout::categorized(categories)
            };
            run_tracker(layout)
        }
    }
}

async fn run_server(config: ServerConfig) -> Result<()> {
    let shutdown_token = CancellationToken::new();
    let (_, result) = tokio::join!(detect_shutdown(shutdown_token.clone()), async {
        let result = web::serve(config, shutdown_token.clone()).await;
        shutdown_token.cancel();
        result
    });
    result
}

fn run_tracker(layout: CategoryLayout) -> Result<()> {
    info!("Starting terminal tracker with {layout:?}");
    let labels = match &layout {
        CategoryLayout::Flat => vec![],
        CategoryLayout::Categorized(labels) => labels.clone(),
    };
    let mut tracker = FitnessTracker::new(layout, Box::new(DefaultClock));
    let mut presenter = TerminalPresenter::new(io::stdin().lock(), io::stdout(), labels);
    run_session(&mut tracker, &mut presenter)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Args, Commands};

    #[test]
    fn test_track_defaults() {
        let args = Args::parse_from(["aceest", "track"]);
        let Commands::Track { flat, categories } = args.commands else {
            panic!("expected track");
        };
        assert!(!flat);
        assert_eq!(categories, vec!["Warm-up", "Workout", "Cool-down"]);
    }

    #[test]
    fn test_custom_categories_and_serve() {
        let args = Args::parse_from(["aceest", "track", "--categories", "Cardio,Strength"]);
        let Commands::Track { categories, .. } = args.commands else {
            panic!("expected track");
        };
        assert_eq!(categories, vec!["Cardio", "Strength"]);

        let args = Args::parse_from(["aceest", "--log", "serve", "--port", "8080"]);
        assert!(args.log);
        let Commands::Serve { host, port } = args.commands else {
            panic!("expected serve");
        };
        assert_eq!(host, "0.0.0.0");
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_flat_conflicts_with_categories() {
        assert!(Args::try_parse_from(["aceest", "track", "--flat", "--categories", "A"]).is_err());
    }
}
