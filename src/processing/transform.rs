use regex::NoExpand;
use serde_json::Value;

use crate::model::{is_http_header_line, is_vlc_option_line, ChannelBlock, Credential, ExtHttpMode};
use crate::processing::credential::resolve_credential;
use crate::utils::{debug_if_enabled, CANONICAL_COOKIE_MARKER, CONSTANTS, EXTHTTP_TAG, EXTVLCOPT_TAG};

const COOKIE_FIELD: &str = "cookie";
const GROUP_TITLE_ATTRIBUTE: &str = "group-title=\"";

/// The url without credentials: cut at `|Cookie=`, otherwise at the first `?`.
pub fn get_base_url(url: &str) -> &str {
    let base = match CONSTANTS.re_url_cookie.find(url) {
        Some(marker) => &url[..marker.start()],
        None => url.split_once('?').map_or(url, |(base, _)| base),
    };
    base.trim()
}

/// `base?<cookie>&xxx=%7Ccookie=<cookie>`, the cookie is inserted verbatim twice.
pub fn get_canonical_url(url: &str, cookie: &str) -> String {
    format!("{}?{cookie}{CANONICAL_COOKIE_MARKER}{cookie}", get_base_url(url))
}

fn cookie_only_directive(cookie: &str) -> String {
    format!("{EXTHTTP_TAG}:{{\"{COOKIE_FIELD}\":\"{cookie}\"}}")
}

/// Sets the cookie field of an existing `#EXTHTTP` header object and keeps its other fields.
fn merge_cookie_into_directive(directive: &str, cookie: &str) -> String {
    let payload = directive.split_once(':').map_or("", |(_, payload)| payload).trim();
    if let Ok(Value::Object(mut fields)) = serde_json::from_str::<Value>(payload) {
        let key = fields.keys()
            .find(|key| key.eq_ignore_ascii_case(COOKIE_FIELD))
            .cloned()
            .unwrap_or_else(|| COOKIE_FIELD.to_string());
        fields.insert(key, Value::String(cookie.to_string()));
        if let Ok(json) = serde_json::to_string(&Value::Object(fields)) {
            return format!("{EXTHTTP_TAG}:{json}");
        }
    }
    // not valid json, keep the text and insert the field before the closing brace
    if payload.to_lowercase().contains(COOKIE_FIELD) {
        directive.to_string()
    } else if let Some(body) = payload.strip_suffix('}') {
        format!("{EXTHTTP_TAG}:{},\"{COOKIE_FIELD}\":\"{cookie}\"}}", body.trim_end())
    } else {
        cookie_only_directive(cookie)
    }
}

fn build_http_header_directive(existing: Option<&str>, cookie: Option<&str>, mode: ExtHttpMode) -> Option<String> {
    match (mode, existing, cookie) {
        (ExtHttpMode::Merge, Some(directive), Some(cookie)) => Some(merge_cookie_into_directive(directive, cookie)),
        (ExtHttpMode::Merge, Some(directive), None) => Some(directive.to_string()),
        (_, _, Some(cookie)) => Some(cookie_only_directive(cookie)),
        (_, _, None) => None,
    }
}

/// Rebuilds an upstream block: stale `#EXTVLCOPT`/`#EXTHTTP` lines and the url are removed,
/// then the user agent option, the header directive and the (rewritten) url are appended.
pub fn transform_block(block: &ChannelBlock, credential: &Credential, mode: ExtHttpMode) -> ChannelBlock {
    let url_index = block.url_index();
    let existing_directive = block.lines.iter().rev()
        .find(|line| is_http_header_line(line))
        .map(String::as_str);

    let mut lines: Vec<String> = block.lines.iter().enumerate()
        .filter(|(idx, line)| Some(*idx) != url_index && !is_vlc_option_line(line) && !is_http_header_line(line))
        .map(|(_, line)| line.clone())
        .collect();

    if let Some(user_agent) = credential.user_agent.as_deref() {
        lines.push(format!("{EXTVLCOPT_TAG}:http-user-agent={user_agent}"));
    }
    if let Some(directive) = build_http_header_directive(existing_directive, credential.cookie.as_deref(), mode) {
        lines.push(directive);
    }
    if let Some(url) = block.url() {
        lines.push(credential.cookie.as_deref().map_or_else(|| url.to_string(), |cookie| get_canonical_url(url, cookie)));
    }

    ChannelBlock::new(block.name.clone(), lines)
}

/// Sets or replaces the `group-title` attribute in front of the display name comma.
pub fn set_group_title(lead_line: &str, group: &str) -> String {
    match lead_line.rsplit_once(',') {
        None => lead_line.to_string(),
        Some((attributes, name)) => {
            let group_title = format!("{GROUP_TITLE_ATTRIBUTE}{group}\"");
            let attributes = if attributes.contains(GROUP_TITLE_ATTRIBUTE) {
                CONSTANTS.re_group_title.replace_all(attributes, NoExpand(&group_title)).to_string()
            } else {
                format!("{attributes} {group_title}")
            };
            format!("{attributes},{name}")
        }
    }
}

/// Upstream block ready for the local playlist: credentials normalized and group set.
pub fn prepare_upstream_block(block: &ChannelBlock, group: &str, mode: ExtHttpMode) -> ChannelBlock {
    let credential = resolve_credential(block);
    if credential.is_empty() {
        debug_if_enabled!("no credentials found for {}", block.name);
    }
    let mut result = transform_block(block, &credential, mode);
    if let Some(lead) = result.lines.first_mut() {
        *lead = set_group_title(lead, group);
    }
    result
}
