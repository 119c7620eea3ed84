use indexmap::IndexMap;
use log::debug;

use crate::model::ChannelKey;

/// Group name to channel display names, both in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelGroupConfig {
    pub groups: IndexMap<String, Vec<String>>,
}

impl ChannelGroupConfig {
    pub fn channel_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Channel key to group in configuration order. A channel listed in several
    /// groups keeps its first position but takes the group parsed last.
    pub fn to_channel_group_map(&self) -> IndexMap<ChannelKey, String> {
        let mut result = IndexMap::with_capacity(self.channel_count());
        for (group, channels) in &self.groups {
            for channel in channels {
                let key = ChannelKey::new(channel);
                if let Some(previous) = result.insert(key, group.clone()) {
                    if &previous != group {
                        debug!("channel {channel} is configured in group {previous} and {group}, using {group}");
                    }
                }
            }
        }
        result
    }
}
