use std::fmt::{Display, Formatter};
use std::path::Path;

use log::{debug, info};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotInUpstream,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInUpstream => write!(f, "not in upstream playlist"),
        }
    }
}

/// Progress of a sync run. Only names and counts, never credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent<'a> {
    ChannelConfigLoaded { provider: &'a str, groups: usize, channels: usize },
    UpstreamLoaded { provider: &'a str, channels: usize },
    ChannelReplaced { provider: &'a str, channel: &'a str, group: &'a str },
    ChannelAdded { provider: &'a str, channel: &'a str, group: &'a str },
    ChannelSkipped { provider: &'a str, channel: &'a str, reason: SkipReason },
    ProviderFinished { provider: &'a str, replaced: usize, added: usize, missing: usize },
    PlaylistWritten { path: &'a Path, channels: usize },
}

impl Display for SyncEvent<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChannelConfigLoaded { provider, groups, channels } =>
                write!(f, "[{provider}] channel config loaded: {channels} channels in {groups} groups"),
            Self::UpstreamLoaded { provider, channels } =>
                write!(f, "[{provider}] upstream playlist loaded: {channels} channels"),
            Self::ChannelReplaced { provider, channel, group } =>
                write!(f, "[{provider}] replaced {channel} in {group}"),
            Self::ChannelAdded { provider, channel, group } =>
                write!(f, "[{provider}] added {channel} to {group}"),
            Self::ChannelSkipped { provider, channel, reason } =>
                write!(f, "[{provider}] skipped {channel}: {reason}"),
            Self::ProviderFinished { provider, replaced, added, missing } =>
                write!(f, "[{provider}] finished: {replaced} replaced, {added} added, {missing} missing"),
            Self::PlaylistWritten { path, channels } =>
                write!(f, "playlist written to {} with {channels} channels", path.display()),
        }
    }
}

pub trait SyncEventListener {
    fn notify(&self, event: &SyncEvent);
}

/// Per channel events go to debug, summaries to info.
pub struct LogEventListener;

impl SyncEventListener for LogEventListener {
    fn notify(&self, event: &SyncEvent) {
        match event {
            SyncEvent::ChannelReplaced { .. }
            | SyncEvent::ChannelAdded { .. }
            | SyncEvent::ChannelSkipped { .. } => debug!("{event}"),
            _ => info!("{event}"),
        }
    }
}

pub struct NoopEventListener;

impl SyncEventListener for NoopEventListener {
    fn notify(&self, _event: &SyncEvent) {}
}
