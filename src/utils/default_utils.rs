use std::collections::HashMap;

pub fn default_as_true() -> bool { true }

pub fn default_as_dot() -> String { String::from(".") }

pub fn default_as_playlist_file() -> String { String::from(crate::utils::DEFAULT_PLAYLIST_FILE) }

pub fn default_as_empty_map<K, V>() -> HashMap<K, V> { HashMap::new() }

pub fn default_timeout_secs() -> u64 { 30 }
