use crate::utils::{EXTHTTP_TAG, EXTINF_TAG, EXTVLCOPT_TAG, M3U_HEADER};

/// Identity of a channel across documents: the display name trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelKey(String);

impl ChannelKey {
    pub fn new(display_name: &str) -> Self {
        Self(display_name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[inline]
pub fn is_lead_line(line: &str) -> bool {
    line.starts_with(EXTINF_TAG)
}

#[inline]
pub fn is_vlc_option_line(line: &str) -> bool {
    line.starts_with(EXTVLCOPT_TAG)
}

#[inline]
pub fn is_http_header_line(line: &str) -> bool {
    line.starts_with(EXTHTTP_TAG)
}

/// Display name of a lead line: text after the last comma, trimmed. Empty without a comma.
pub fn get_display_name(lead_line: &str) -> String {
    lead_line.rsplit_once(',').map_or_else(String::new, |(_, name)| name.trim().to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelBlock {
    pub name: String,
    pub lines: Vec<String>,
}

impl ChannelBlock {
    pub fn new(name: String, lines: Vec<String>) -> Self {
        Self { name, lines }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        let name = lines.first().map_or_else(String::new, |lead| get_display_name(lead));
        Self { name, lines }
    }

    pub fn key(&self) -> ChannelKey {
        ChannelKey::new(&self.name)
    }

    pub fn lead_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    /// Index of the playable url: the last non empty line which is not a directive.
    pub fn url_index(&self) -> Option<usize> {
        self.lines.iter().rposition(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
    }

    pub fn url(&self) -> Option<&str> {
        self.url_index().map(|idx| self.lines[idx].trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaylistDocument {
    pub header: Vec<String>,
    pub blocks: Vec<ChannelBlock>,
}

impl PlaylistDocument {
    /// Document used when no local playlist exists yet.
    pub fn empty() -> Self {
        Self {
            header: vec![M3U_HEADER.to_string()],
            blocks: vec![],
        }
    }

    pub fn channel_count(&self) -> usize {
        self.blocks.len()
    }

    /// Header and blocks one line per entry with a trailing newline; an empty header is written as `#EXTM3U`.
    pub fn to_m3u(&self) -> String {
        let mut lines: Vec<&str> = if self.header.is_empty() {
            vec![M3U_HEADER]
        } else {
            self.header.iter().map(String::as_str).collect()
        };
        for block in &self.blocks {
            lines.extend(block.lines.iter().map(String::as_str));
        }
        let mut result = lines.join("\n");
        result.push('\n');
        result
    }
}
