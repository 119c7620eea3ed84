use crate::model::LogLevelConfig;
use crate::utils::ENV_LOG_LEVEL;
use env_logger::{Builder, Target};
use log::{error, info, LevelFilter};
use std::fs::File;

const LOG_ERROR_LEVEL_MOD: &[&str] = &[
    "reqwest::blocking",
    "reqwest::connect",
    "hyper_util::client",
    "rustls",
];

fn get_log_level(log_level: &str) -> LevelFilter {
    match log_level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

fn read_config_log_level(config_file: &str) -> Option<String> {
    File::open(config_file).ok()
        .and_then(|file| serde_yaml::from_reader::<_, LogLevelConfig>(file)
            .map_err(|e| error!("Failed to parse log config file: {e}"))
            .ok())
        .and_then(|cfg| cfg.log.and_then(|l| l.log_level))
}

/// Applies a level spec like `info` or `debug,m3u_sync::processing=trace`
/// and returns the normalized parts for the startup message.
fn apply_log_level(log_builder: &mut Builder, log_level: &str) -> Vec<String> {
    let mut log_levels = vec![];
    if log_level.contains('=') {
        for pair in log_level.split(',') {
            if pair.contains('=') {
                let mut kv_iter = pair.split('=').map(str::trim);
                if let (Some(module), Some(level)) = (kv_iter.next(), kv_iter.next()) {
                    let log_level = get_log_level(level);
                    log_levels.push(format!("{module}={log_level}"));
                    log_builder.filter_module(module, log_level);
                }
            } else {
                let level = get_log_level(pair);
                log_levels.push(level.to_string());
                log_builder.filter_level(level);
            }
        }
    } else {
        let level = get_log_level(log_level);
        log_builder.filter_level(level);
        log_levels.push(level.to_string());
    }
    log_levels
}

pub fn init_logger(user_log_level: Option<&String>, config_file: &str) {
    let env_log_level = std::env::var(ENV_LOG_LEVEL).ok();

    let mut log_builder = Builder::from_default_env();
    log_builder.target(Target::Stdout);

    // priority  CLI-Argument, Env-Var, Config, Default
    let log_level = user_log_level
        .map(std::string::ToString::to_string)
        .or(env_log_level)
        .or_else(|| read_config_log_level(config_file))
        .unwrap_or_else(|| "info".to_string());

    let log_levels = apply_log_level(&mut log_builder, &log_level);
    for module in LOG_ERROR_LEVEL_MOD {
        log_builder.filter_module(module, LevelFilter::Error);
    }
    log_builder.init();
    info!("Log Level {}", &log_levels.join(", "));
}

#[cfg(test)]
mod tests {
    use env_logger::Builder;
    use log::LevelFilter;
    use crate::utils::logging::{apply_log_level, get_log_level};

    #[test]
    fn test_get_log_level() {
        assert_eq!(get_log_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(get_log_level(" warn "), LevelFilter::Warn);
        assert_eq!(get_log_level("unknown"), LevelFilter::Info);
    }

    #[test]
    fn test_apply_module_levels() {
        let mut builder = Builder::new();
        let levels = apply_log_level(&mut builder, "warn,m3u_sync::processing=trace");
        assert_eq!(levels, vec!["WARN".to_string(), "m3u_sync::processing=TRACE".to_string()]);
    }
}
