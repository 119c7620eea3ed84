use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::path::PathBuf;

use path_clean::PathClean;

use crate::m3u_sync_error::{create_m3u_sync_error_result, M3uSyncError, M3uSyncErrorKind};
use crate::model::LogConfig;
use crate::utils::{default_as_dot, default_as_empty_map, default_as_playlist_file, default_timeout_secs, get_file_path, resolve_env_var};

/// How an `#EXTHTTP` directive that already exists on an upstream block is treated.
#[derive(Debug, Copy, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq, Default)]
pub enum ExtHttpMode {
    /// keep the existing header object and set its cookie field
    #[serde(rename = "merge")]
    #[default]
    Merge,
    /// drop the existing header object, emit a cookie-only object
    #[serde(rename = "replace")]
    Replace,
}

impl ExtHttpMode {
    const MERGE: &'static str = "merge";
    const REPLACE: &'static str = "replace";
}

impl Display for ExtHttpMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Self::Merge => Self::MERGE,
            Self::Replace => Self::REPLACE,
        })
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    pub name: String,
    pub url: String,
    pub channels: String,
    #[serde(default)]
    pub exthttp: ExtHttpMode,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_as_empty_map")]
    pub headers: HashMap<String, String>,
}

impl ProviderConfig {
    fn prepare(&mut self) -> Result<(), M3uSyncError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return create_m3u_sync_error_result!(M3uSyncErrorKind::Config, "provider name is missing");
        }
        self.url = resolve_env_var(self.url.trim());
        if self.url.is_empty() {
            return create_m3u_sync_error_result!(M3uSyncErrorKind::Config, "provider {}: url is missing", self.name);
        }
        self.channels = resolve_env_var(self.channels.trim());
        if self.channels.is_empty() {
            return create_m3u_sync_error_result!(M3uSyncErrorKind::Config, "provider {}: channels file is missing", self.name);
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
        }
        for value in self.headers.values_mut() {
            *value = resolve_env_var(value);
        }
        Ok(())
    }

    pub fn get_channels_path(&self, working_dir: &str) -> PathBuf {
        get_file_path(working_dir, Some(PathBuf::from(&self.channels))).unwrap_or_else(|| PathBuf::from(&self.channels))
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_as_dot")]
    pub working_dir: String,
    #[serde(default = "default_as_playlist_file")]
    pub playlist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<LogConfig>,
    pub providers: Vec<ProviderConfig>,
}

impl Config {
    /// Resolves paths against the config file directory and validates the providers.
    pub fn prepare(&mut self, config_dir: &str) -> Result<(), M3uSyncError> {
        let mut working_dir = PathBuf::from(resolve_env_var(&self.working_dir));
        if working_dir.is_relative() {
            working_dir = PathBuf::from(config_dir).join(working_dir).clean();
        }
        self.working_dir = working_dir.to_string_lossy().to_string();
        self.playlist = resolve_env_var(self.playlist.trim());
        if self.playlist.is_empty() {
            return create_m3u_sync_error_result!(M3uSyncErrorKind::Config, "playlist file is missing");
        }
        self.backup_dir = self.backup_dir.as_ref().map(|dir| resolve_env_var(dir.trim())).filter(|dir| !dir.is_empty());

        if self.providers.is_empty() {
            return create_m3u_sync_error_result!(M3uSyncErrorKind::Config, "at least one provider is required");
        }
        let mut names = HashSet::new();
        for provider in &mut self.providers {
            provider.prepare()?;
            if !names.insert(provider.name.clone()) {
                return create_m3u_sync_error_result!(M3uSyncErrorKind::Config, "provider names should be unique: {}", provider.name);
            }
        }
        Ok(())
    }

    pub fn get_playlist_path(&self) -> PathBuf {
        get_file_path(&self.working_dir, Some(PathBuf::from(&self.playlist))).unwrap_or_else(|| PathBuf::from(&self.playlist))
    }

    pub fn get_backup_dir(&self) -> Option<PathBuf> {
        self.backup_dir.as_ref().and_then(|dir| get_file_path(&self.working_dir, Some(PathBuf::from(dir))))
    }

    pub fn is_sanitize_sensitive_info(&self) -> bool {
        self.log.as_ref().map_or(true, |log| log.sanitize_sensitive_info)
    }

    /// Providers to process in config order, restricted to `selected` if given.
    pub fn get_providers(&self, selected: Option<&Vec<String>>) -> Result<Vec<&ProviderConfig>, M3uSyncError> {
        match selected {
            None => Ok(self.providers.iter().collect()),
            Some(names) => {
                let unknown: Vec<&str> = names.iter()
                    .filter(|name| !self.providers.iter().any(|p| &p.name == *name))
                    .map(String::as_str)
                    .collect();
                if !unknown.is_empty() {
                    return create_m3u_sync_error_result!(M3uSyncErrorKind::Config, "unknown provider(s): {}", unknown.join(", "));
                }
                Ok(self.providers.iter().filter(|p| names.contains(&p.name)).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::m3u_sync_error::M3uSyncErrorKind;
    use crate::model::{Config, ExtHttpMode};

    fn parse(text: &str) -> Config {
        serde_yaml::from_str::<Config>(text).unwrap()
    }

    #[test]
    fn test_prepare_defaults() {
        let mut cfg = parse("providers:\n  - name: sony\n    url: https://example.org/\n    channels: sonychannels.txt\n");
        cfg.prepare("/srv/m3u").unwrap();
        assert_eq!(cfg.working_dir, "/srv/m3u");
        assert_eq!(cfg.get_playlist_path().to_str(), Some("/srv/m3u/my_playlist.m3u"));
        assert_eq!(cfg.providers[0].get_channels_path(&cfg.working_dir).to_str(), Some("/srv/m3u/sonychannels.txt"));
        assert_eq!(cfg.providers[0].exthttp, ExtHttpMode::Merge);
        assert!(cfg.get_backup_dir().is_none());
        assert!(cfg.is_sanitize_sensitive_info());
    }

    #[test]
    fn test_exthttp_mode() {
        let cfg = parse("providers:\n  - name: zee\n    url: z.m3u\n    channels: z.txt\n    exthttp: replace\n");
        assert_eq!(cfg.providers[0].exthttp, ExtHttpMode::Replace);
        assert_eq!(cfg.providers[0].exthttp.to_string(), "replace");
        assert_eq!(ExtHttpMode::default().to_string(), "merge");
    }

    #[test]
    fn test_prepare_rejects_duplicate_names() {
        let mut cfg = parse("providers:
  - name: star
    url: a.m3u
    channels: a.txt
  - name: star
    url: b.m3u
    channels: b.txt
");
        let err = cfg.prepare(".").unwrap_err();
        assert_eq!(err.kind, M3uSyncErrorKind::Config);
    }

    #[test]
    fn test_prepare_rejects_empty_providers() {
        let mut cfg = parse("providers: []\n");
        assert!(cfg.prepare(".").is_err());
    }

    #[test]
    fn test_select_providers() {
        let mut cfg = parse("providers:
  - name: star
    url: a.m3u
    channels: a.txt
  - name: sony
    url: b.m3u
    channels: b.txt
");
        cfg.prepare(".").unwrap();
        let selected = vec!["sony".to_string()];
        let providers = cfg.get_providers(Some(&selected)).unwrap();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].name, "sony");
        assert_eq!(cfg.get_providers(None).unwrap().len(), 2);
        assert!(cfg.get_providers(Some(&vec!["zee".to_string()])).is_err());
    }
}
