mod api;
mod cards;
mod cli_messages;
mod config;
mod consts;
mod environment;
mod events;
mod logging;
mod model;
mod network;
mod runtime;
mod session;
mod ui;

use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::session::{run_catalog_command, run_snapshot_command, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the interactive KPI dashboard
    Start {
        /// Base URL of the data API. Saved to the config file for later runs.
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,

        /// Disable background colors
        #[arg(long, default_value = "false")]
        no_background_color: bool,
    },
    /// Print the metric and segment catalogs
    Catalog {
        /// Base URL of the data API
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
    },
    /// Fetch one snapshot series and print its total and week-over-week change
    Snapshot {
        /// Metric ID
        #[arg(long, value_name = "METRIC_ID")]
        metric: String,

        /// Segment group key
        #[arg(long, value_name = "KEY")]
        segment_key: String,

        /// Segment ID within the group
        #[arg(long, value_name = "SEGMENT_ID")]
        segment_id: String,

        /// Base URL of the data API
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
    },
    /// Delete the configuration file.
    ResetConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let environment_str = std::env::var("KPI_DASH_ENVIRONMENT").unwrap_or_default();
    let default_environment = environment_str
        .parse::<Environment>()
        .unwrap_or(Environment::default());

    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Start {
            api_url,
            no_background_color,
        } => {
            let mut config = load_config(&config_path);
            if let Some(url) = &api_url {
                config.api_url = Some(url.clone());
                if let Err(e) = config.save(&config_path) {
                    print_cmd_warn!("Config not saved", "{}", e);
                }
            }
            let with_background = config.with_background_color && !no_background_color;
            let environment = config.resolve_environment(api_url, default_environment);
            let session = setup_session(&config, environment)?;
            run_tui_mode(session, with_background).await
        }
        Command::Catalog { api_url } => {
            logging::init_headless_logger();
            let config = load_config(&config_path);
            let environment = config.resolve_environment(api_url, default_environment);
            let session = setup_session(&config, environment)?;
            run_catalog_command(session).await
        }
        Command::Snapshot {
            metric,
            segment_key,
            segment_id,
            api_url,
        } => {
            logging::init_headless_logger();
            let config = load_config(&config_path);
            let environment = config.resolve_environment(api_url, default_environment);
            let session = setup_session(&config, environment)?;
            if let Err(e) = run_snapshot_command(session, &metric, &segment_key, &segment_id).await
            {
                print_cmd_error!("Snapshot failed", &e.to_string());
                std::process::exit(1);
            }
            Ok(())
        }
        Command::ResetConfig => {
            Config::clear(&config_path)?;
            print_cmd_success!("Configuration reset", "{}", config_path.display());
            Ok(())
        }
    }
}

/// Load the config file, falling back to defaults when it is missing or unreadable.
fn load_config(path: &std::path::Path) -> Config {
    match Config::load_or_default(path) {
        Ok(config) => config,
        Err(e) => {
            print_cmd_warn!("Ignoring config file", "{}: {}", path.display(), e);
            Config::default()
        }
    }
}
