#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod m3u_sync_error;
mod messaging;
mod model;
mod processing;
mod utils;

use chrono::{DateTime, Utc};
use clap::Parser;
use log::info;

use crate::messaging::LogEventListener;
use crate::processing::processor::playlist;
use crate::utils::{get_default_config_file_path, init_logger, read_config, resolve_env_var, set_sanitize_sensitive_info, HttpFetcher};

#[derive(Parser)]
#[command(name = "m3u-sync")]
#[command(version)]
#[command(about = "Keeps selected channels of a local M3U playlist in sync with upstream playlists", long_about = None)]
struct Args {
    /// The config file
    #[arg(short = 'c', long = "config")]
    config_file: Option<String>,

    /// The provider to sync, all providers if not given
    #[arg(short = 'p', long)]
    provider: Option<Vec<String>>,

    /// log level
    #[arg(short = 'l', long = "log-level", default_missing_value = "info")]
    log_level: Option<String>,

    /// Print the resulting playlist instead of writing it
    #[arg(long = "dry-run", default_value_t = false, default_missing_value = "true")]
    dry_run: bool,
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_TIMESTAMP: Option<&str> = option_env!("VERGEN_BUILD_TIMESTAMP");

fn main() {
    let args = Args::parse();

    let config_file = args.config_file.as_ref()
        .map_or_else(get_default_config_file_path, |file| resolve_env_var(file));

    init_logger(args.log_level.as_ref(), config_file.as_str());

    info!("Version: {VERSION}");
    if let Some(bts) = BUILD_TIMESTAMP.and_then(|ts| ts.parse::<DateTime<Utc>>().ok()).map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S %Z").to_string()) {
        info!("Build time: {bts}");
    }

    let cfg = read_config(config_file.as_str()).unwrap_or_else(|err| exit!("{}", err));
    set_sanitize_sensitive_info(cfg.is_sanitize_sensitive_info());
    info!("Config file: {config_file}");
    info!("Working dir: {}", cfg.working_dir);
    info!("Playlist: {}", cfg.get_playlist_path().display());

    let providers = cfg.get_providers(args.provider.as_ref()).unwrap_or_else(|err| exit!("{}", err));
    let fetcher = HttpFetcher::new(&cfg.working_dir);
    if let Err(err) = playlist::exec_processing(&cfg, &providers, &fetcher, &LogEventListener, args.dry_run) {
        exit!("{}", err);
    }
}
