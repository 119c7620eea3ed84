use regex::Regex;
use std::sync::atomic::AtomicBool;
use std::sync::LazyLock;

pub const CONFIG_FILE: &str = "config.yml";
pub const DEFAULT_PLAYLIST_FILE: &str = "my_playlist.m3u";
pub const ENV_LOG_LEVEL: &str = "M3U_SYNC_LOG";

pub const M3U_HEADER: &str = "#EXTM3U";
pub const EXTINF_TAG: &str = "#EXTINF";
pub const EXTVLCOPT_TAG: &str = "#EXTVLCOPT";
pub const EXTHTTP_TAG: &str = "#EXTHTTP";

pub const HDNEA_MARKER: &str = "?__hdnea__=";
pub const CANONICAL_COOKIE_MARKER: &str = "&xxx=%7Ccookie=";

pub struct Constants {
    pub re_group_header: Regex,
    pub re_group_title: Regex,
    pub re_exthttp_cookie: Regex,
    pub re_vlc_user_agent: Regex,
    pub re_url_cookie: Regex,
    pub re_url_user_agent: Regex,
    pub re_canonical_cookie: Regex,
    pub re_env_var: Regex,
    pub re_sensitive_query: Regex,
    pub re_password: Regex,
    pub re_url: Regex,
    pub sanitize: AtomicBool,
}

pub static CONSTANTS: LazyLock<Constants> = LazyLock::new(||
    Constants {
        re_group_header: Regex::new(r"^([^:]+)\s*:\s*\{\s*$").unwrap(),
        re_group_title: Regex::new(r#"group-title="[^"]*""#).unwrap(),
        re_exthttp_cookie: Regex::new(r#"(?i)"cookie"\s*:\s*"([^"]+)""#).unwrap(),
        re_vlc_user_agent: Regex::new(r"(?i)http-user-agent=(.*)").unwrap(),
        re_url_cookie: Regex::new(r"(?i)\|cookie=").unwrap(),
        re_url_user_agent: Regex::new(r"(?i)&user-agent=").unwrap(),
        re_canonical_cookie: Regex::new(r"&xxx=%7Ccookie=([^&\s]+)").unwrap(),
        re_env_var: Regex::new(r"\$\{env:(?P<var>[a-zA-Z_][a-zA-Z0-9_]*)}").unwrap(),
        re_sensitive_query: Regex::new(r"(?i)((?:__hdnea__|cookie|user-agent|token|hdnea|hmac)=)[^&|\s]*").unwrap(),
        re_password: Regex::new(r"(password=)[^&]*").unwrap(),
        re_url: Regex::new(r"(.*://)[^/@]*@").unwrap(),
        sanitize: AtomicBool::new(true),
    }
);
