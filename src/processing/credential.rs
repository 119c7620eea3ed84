use crate::model::{is_http_header_line, is_vlc_option_line, ChannelBlock, Credential, CredentialSource};
use crate::utils::{CANONICAL_COOKIE_MARKER, CONSTANTS, HDNEA_MARKER};

/// A cookie found by one strategy. The user agent is a byproduct of splitting a piped url.
#[derive(Clone, PartialEq, Eq)]
pub struct CookieMatch {
    pub source: CredentialSource,
    pub cookie: String,
    pub user_agent: Option<String>,
}

type CookieStrategy = fn(&ChannelBlock) -> Option<CookieMatch>;

/// Tried in order, the first match ends the search.
const COOKIE_STRATEGIES: &[CookieStrategy] = &[
    cookie_from_http_header_directive,
    cookie_from_url_pipe,
    cookie_from_canonical_url,
];

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_string()) }
}

/// `#EXTHTTP:{"cookie":"..."}`, the last directive carrying a cookie wins.
pub fn cookie_from_http_header_directive(block: &ChannelBlock) -> Option<CookieMatch> {
    block.lines.iter()
        .filter(|line| is_http_header_line(line))
        .filter_map(|line| CONSTANTS.re_exthttp_cookie.captures(line))
        .last()
        .map(|caps| CookieMatch {
            source: CredentialSource::HttpHeaderDirective,
            cookie: caps[1].to_string(),
            user_agent: None,
        })
}

/// `http://host/path|Cookie=<cookie>&User-Agent=<ua>`, markers matched case insensitive.
pub fn cookie_from_url_pipe(block: &ChannelBlock) -> Option<CookieMatch> {
    let url = block.url()?;
    let mut parts = CONSTANTS.re_url_cookie.splitn(url, 2);
    let _base = parts.next()?;
    let tail = parts.next()?.trim();
    let mut tail_parts = CONSTANTS.re_url_user_agent.splitn(tail, 2);
    let cookie = tail_parts.next().unwrap_or_default().trim().to_string();
    let user_agent = tail_parts.next().and_then(non_empty);
    Some(CookieMatch { source: CredentialSource::UrlPipe, cookie, user_agent })
}

/// An already rewritten url `base?__hdnea__=...&xxx=%7Ccookie=<cookie>`.
pub fn cookie_from_canonical_url(block: &ChannelBlock) -> Option<CookieMatch> {
    let url = block.url()?;
    if !(url.contains(HDNEA_MARKER) && url.contains(CANONICAL_COOKIE_MARKER)) {
        return None;
    }
    CONSTANTS.re_canonical_cookie.captures(url).map(|caps| CookieMatch {
        source: CredentialSource::UrlCanonical,
        cookie: caps[1].to_string(),
        user_agent: None,
    })
}

/// `#EXTVLCOPT:http-user-agent=<ua>`, the last matching directive wins.
pub fn user_agent_from_vlc_option(block: &ChannelBlock) -> Option<String> {
    block.lines.iter()
        .filter(|line| is_vlc_option_line(line))
        .filter_map(|line| CONSTANTS.re_vlc_user_agent.captures(line))
        .last()
        .and_then(|caps| non_empty(&caps[1]))
}

pub fn resolve_cookie(block: &ChannelBlock) -> Option<CookieMatch> {
    COOKIE_STRATEGIES.iter().find_map(|strategy| strategy(block))
}

/// Cookie first: a user agent can only be recovered from the url while splitting off the cookie.
pub fn resolve_credential(block: &ChannelBlock) -> Credential {
    let cookie_match = resolve_cookie(block);
    let url_user_agent = cookie_match.as_ref().and_then(|m| m.user_agent.clone());
    let user_agent = user_agent_from_vlc_option(block).or(url_user_agent);
    match cookie_match {
        Some(CookieMatch { source, cookie, .. }) => Credential {
            cookie: non_empty(&cookie),
            user_agent,
            source: Some(source),
        },
        None => Credential { cookie: None, user_agent, source: None },
    }
}
