use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::m3u_sync_error::{create_m3u_sync_error, create_m3u_sync_error_result, M3uSyncError, M3uSyncErrorKind};
use crate::model::Config;
use crate::utils::file::file_utils;
use crate::utils::CONSTANTS;

pub fn read_config(config_file: &str) -> Result<Config, M3uSyncError> {
    let config_path = PathBuf::from(config_file);
    match file_utils::open_file(&config_path) {
        Ok(file) => {
            match serde_yaml::from_reader::<_, Config>(file) {
                Ok(mut result) => {
                    let config_dir = config_path.parent().map_or_else(String::new, |p| p.to_string_lossy().to_string());
                    result.prepare(&config_dir)?;
                    Ok(result)
                }
                Err(e) => create_m3u_sync_error_result!(M3uSyncErrorKind::Config, "cant read config file {}: {}", config_file, e)
            }
        }
        Err(err) => create_m3u_sync_error_result!(M3uSyncErrorKind::Config, "cant open config file {}: {}", config_file, err)
    }
}

/// Reads a channel group file, a missing file is a configuration error.
pub fn read_channel_config_text(path: &Path) -> Result<String, M3uSyncError> {
    debug!("reading channel config {}", path.display());
    fs::read_to_string(path)
        .map_err(|err| create_m3u_sync_error!(M3uSyncErrorKind::Config, "cant read channel config {}: {}", path.display(), err))
}

pub fn resolve_env_var(value: &str) -> String {
    CONSTANTS.re_env_var.replace_all(value, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| format!("${{env:{var_name}}}"))
    }).to_string()
}
