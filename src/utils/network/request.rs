use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;

use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::m3u_sync_error::{create_m3u_sync_error, create_m3u_sync_error_result, M3uSyncError, M3uSyncErrorKind};
use crate::model::ProviderConfig;
use crate::utils::{debug_if_enabled, get_file_path, CONSTANTS};

pub fn set_sanitize_sensitive_info(value: bool) {
    CONSTANTS.sanitize.store(value, Ordering::Relaxed);
}

/// Masks cookies, tokens, user agents and url credentials before a value reaches a log line.
pub fn sanitize_sensitive_info(query: &str) -> Cow<'_, str> {
    if !CONSTANTS.sanitize.load(Ordering::Relaxed) {
        return Cow::Borrowed(query);
    }
    let masked = CONSTANTS.re_sensitive_query.replace_all(query, "$1***");
    let masked = CONSTANTS.re_password.replace_all(&masked, "$1***");
    let masked = CONSTANTS.re_url.replace_all(&masked, "$1***@");
    Cow::Owned(masked.into_owned())
}

/// Returns the text of an upstream playlist.
pub trait PlaylistFetcher {
    fn fetch(&self, provider: &ProviderConfig) -> Result<String, M3uSyncError>;
}

pub struct HttpFetcher {
    working_dir: String,
}

impl HttpFetcher {
    pub fn new(working_dir: &str) -> Self {
        Self { working_dir: working_dir.to_string() }
    }

    fn get_remote_content(provider: &ProviderConfig, url: &Url) -> Result<String, M3uSyncError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(provider.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|err| create_m3u_sync_error!(M3uSyncErrorKind::Fetch, "failed to create http client: {err}"))?;
        let request = client.get(url.clone()).headers(get_request_headers(&provider.headers));
        let sanitized_url = sanitize_sensitive_info(url.as_str()).to_string();
        match request.send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    response.text().map_err(|err| create_m3u_sync_error!(M3uSyncErrorKind::Fetch,
                        "failed to read response from {}: {}", sanitized_url, sanitize_sensitive_info(&err.to_string())))
                } else {
                    create_m3u_sync_error_result!(M3uSyncErrorKind::Fetch, "request failed with status {} {}", status, sanitized_url)
                }
            }
            Err(err) => {
                let reason = if err.is_timeout() { "timeout".to_string() } else { sanitize_sensitive_info(&err.to_string()).to_string() };
                create_m3u_sync_error_result!(M3uSyncErrorKind::Fetch, "request failed {} {}", sanitized_url, reason)
            }
        }
    }

    fn get_local_content(&self, file_path: PathBuf) -> Result<String, M3uSyncError> {
        let file_path = get_file_path(&self.working_dir, Some(file_path)).unwrap_or_default();
        if !file_path.is_file() {
            return create_m3u_sync_error_result!(M3uSyncErrorKind::Fetch, "cant read input file {}", file_path.display());
        }
        fs::read_to_string(&file_path)
            .map_err(|err| create_m3u_sync_error!(M3uSyncErrorKind::Fetch, "cant read input file {}: {err}", file_path.display()))
    }
}

impl PlaylistFetcher for HttpFetcher {
    fn fetch(&self, provider: &ProviderConfig) -> Result<String, M3uSyncError> {
        let url_str = provider.url.as_str();
        debug_if_enabled!("[{}] fetching upstream playlist {}", provider.name, sanitize_sensitive_info(url_str));
        let result = match url_str.parse::<Url>() {
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(file_path) => self.get_local_content(file_path),
                Err(()) => create_m3u_sync_error_result!(M3uSyncErrorKind::Fetch, "unknown file {}", sanitize_sensitive_info(url_str)),
            },
            Ok(url) => Self::get_remote_content(provider, &url),
            Err(_) => self.get_local_content(PathBuf::from(url_str)),
        };
        if let Err(err) = &result {
            error!("[{}] cant download upstream playlist: {}", provider.name, err);
        }
        result
    }
}

pub fn get_request_headers(defined_headers: &HashMap<String, String>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (key, value) in defined_headers {
        match (HeaderName::from_bytes(key.as_bytes()), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => debug!("Ignoring invalid request header {key}"),
        }
    }
    headers
}
