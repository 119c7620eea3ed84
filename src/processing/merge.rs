use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::messaging::{SkipReason, SyncEvent, SyncEventListener};
use crate::model::{ChannelBlock, ChannelKey, ExtHttpMode, PlaylistDocument};
use crate::processing::transform::prepare_upstream_block;

/// Upstream blocks by channel key, the last block of a duplicate name wins.
pub fn create_upstream_index(upstream: PlaylistDocument) -> HashMap<ChannelKey, ChannelBlock> {
    upstream.blocks.into_iter()
        .filter(|block| !block.name.is_empty())
        .map(|block| (block.key(), block))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub replaced: usize,
    pub added: usize,
    pub missing: usize,
}

/// One merge pass of a provider.
pub struct PlaylistMerger<'a> {
    pub provider: &'a str,
    pub channel_groups: &'a IndexMap<ChannelKey, String>,
    pub upstream: &'a HashMap<ChannelKey, ChannelBlock>,
    pub exthttp: ExtHttpMode,
    pub listener: &'a dyn SyncEventListener,
}

impl PlaylistMerger<'_> {
    /// Replaces configured channels in place, keeps everything else and appends
    /// configured channels which are not in the local document yet.
    pub fn merge(&self, local: PlaylistDocument) -> (PlaylistDocument, MergeStats) {
        let mut stats = MergeStats::default();
        let mut resolved: HashSet<ChannelKey> = HashSet::new();
        let PlaylistDocument { header, blocks: local_blocks } = local;
        let mut blocks = Vec::with_capacity(local_blocks.len() + self.channel_groups.len());

        for block in local_blocks {
            let key = block.key();
            match self.get_update(&key) {
                Some((group, upstream_block)) if !resolved.contains(&key) => {
                    let mut updated = prepare_upstream_block(upstream_block, group, self.exthttp);
                    updated.name = block.name;
                    self.listener.notify(&SyncEvent::ChannelReplaced { provider: self.provider, channel: &updated.name, group });
                    stats.replaced += 1;
                    resolved.insert(key);
                    blocks.push(updated);
                }
                _ => blocks.push(block),
            }
        }

        for (key, group) in self.channel_groups {
            if resolved.contains(key) {
                continue;
            }
            if let Some(upstream_block) = self.upstream.get(key) {
                let mut added = prepare_upstream_block(upstream_block, group, self.exthttp);
                if let Some(lead) = added.lead_line() {
                    added.name = crate::model::get_display_name(lead);
                }
                self.listener.notify(&SyncEvent::ChannelAdded { provider: self.provider, channel: &added.name, group });
                stats.added += 1;
                resolved.insert(key.clone());
                blocks.push(added);
            } else {
                self.listener.notify(&SyncEvent::ChannelSkipped { provider: self.provider, channel: key.as_str(), reason: SkipReason::NotInUpstream });
                stats.missing += 1;
            }
        }

        (PlaylistDocument { header, blocks }, stats)
    }

    fn get_update(&self, key: &ChannelKey) -> Option<(&str, &ChannelBlock)> {
        let group = self.channel_groups.get(key)?;
        let block = self.upstream.get(key)?;
        Some((group.as_str(), block))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use indexmap::IndexMap;

    use crate::messaging::NoopEventListener;
    use crate::model::{ChannelBlock, ChannelKey, ExtHttpMode, PlaylistDocument};
    use crate::processing::merge::{create_upstream_index, MergeStats, PlaylistMerger};
    use crate::processing::parser::m3u::parse_m3u_text;

    fn channel_groups(entries: &[(&str, &str)]) -> IndexMap<ChannelKey, String> {
        entries.iter().map(|(channel, group)| (ChannelKey::new(channel), (*group).to_string())).collect()
    }

    fn merge(local: &str, upstream: &str, groups: &IndexMap<ChannelKey, String>) -> (PlaylistDocument, MergeStats) {
        let upstream: HashMap<ChannelKey, ChannelBlock> = create_upstream_index(parse_m3u_text(upstream));
        let merger = PlaylistMerger { provider: "test", channel_groups: groups, upstream: &upstream, exthttp: ExtHttpMode::Merge, listener: &NoopEventListener };
        merger.merge(parse_m3u_text(local))
    }

    const UPSTREAM: &str = "#EXTM3U
#EXTINF:-1 group-title=\"Jio\",Abc News
http://up/abc|Cookie=c1&User-Agent=UA1
#EXTINF:-1,Star Gold
http://up/gold.m3u8
#EXTINF:-1,Star Gold
http://up/gold2.m3u8
";

    #[test]
    fn test_upstream_index_last_wins() {
        let index = create_upstream_index(parse_m3u_text(UPSTREAM));
        assert_eq!(index.len(), 2);
        assert_eq!(index[&ChannelKey::new("star gold")].url(), Some("http://up/gold2.m3u8"));
    }

    #[test]
    fn test_replace_in_place_and_append() {
        let local = "#EXTM3U
#EXTINF:-1,Local One
http://local/one
#EXTINF:-1 group-title=\"Old\",abc news
http://old/abc
#EXTINF:-1,Local Two
http://local/two
";
        let groups = channel_groups(&[("Star Gold", "Movies"), ("ABC News", "News"), ("Missing", "News")]);
        let (doc, stats) = merge(local, UPSTREAM, &groups);
        assert_eq!(stats, MergeStats { replaced: 1, added: 1, missing: 1 });
        let names: Vec<&str> = doc.blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Local One", "abc news", "Local Two", "Star Gold"]);
        assert_eq!(doc.blocks[1].lines, vec![
            "#EXTINF:-1 group-title=\"News\",Abc News",
            "#EXTVLCOPT:http-user-agent=UA1",
            "#EXTHTTP:{\"cookie\":\"c1\"}",
            "http://up/abc?c1&xxx=%7Ccookie=c1",
        ]);
        assert_eq!(doc.blocks[3].lines, vec!["#EXTINF:-1 group-title=\"Movies\",Star Gold", "http://up/gold2.m3u8"]);
        assert_eq!(doc.blocks[0].lines, vec!["#EXTINF:-1,Local One", "http://local/one"]);
    }

    #[test]
    fn test_unconfigured_and_unavailable_channels_untouched() {
        let local = "#EXTM3U
#EXTINF:-1,Star Gold
http://local/gold
#EXTINF:-1,Missing
http://local/missing
";
        let groups = channel_groups(&[("Missing", "News")]);
        let (doc, stats) = merge(local, UPSTREAM, &groups);
        assert_eq!(stats, MergeStats { replaced: 0, added: 0, missing: 1 });
        assert_eq!(doc, parse_m3u_text(local));
    }

    #[test]
    fn test_only_first_duplicate_is_replaced() {
        let local = "#EXTINF:-1,Star Gold
http://local/a
#EXTINF:-1,STAR GOLD
http://local/b
";
        let groups = channel_groups(&[("star gold", "Movies")]);
        let (doc, stats) = merge(local, UPSTREAM, &groups);
        assert_eq!(stats.replaced, 1);
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[0].url(), Some("http://up/gold2.m3u8"));
        assert_eq!(doc.blocks[1].lines, vec!["#EXTINF:-1,STAR GOLD", "http://local/b"]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let groups = channel_groups(&[("Star Gold", "Movies"), ("ABC News", "News")]);
        let (first, _) = merge("#EXTM3U\n#EXTINF:-1,Other\nhttp://o\n", UPSTREAM, &groups);
        let (second, stats) = merge(&first.to_m3u(), UPSTREAM, &groups);
        assert_eq!(stats, MergeStats { replaced: 2, added: 0, missing: 0 });
        assert_eq!(first.to_m3u(), second.to_m3u());
    }
}
