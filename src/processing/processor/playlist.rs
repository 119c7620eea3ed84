use std::path::{Path, PathBuf};
use std::time::Instant;

use indexmap::IndexMap;
use log::{info, warn};

use crate::m3u_sync_error::M3uSyncError;
use crate::messaging::{SyncEvent, SyncEventListener};
use crate::model::{ChannelKey, Config, PlaylistDocument, ProviderConfig};
use crate::processing::merge::{create_upstream_index, PlaylistMerger};
use crate::processing::parser::channel_groups::parse_channel_groups_text;
use crate::processing::parser::m3u::parse_m3u_text;
use crate::utils::{backup_file, debug_if_enabled, read_channel_config_text, read_playlist_text, write_playlist, PlaylistFetcher, StepMeasure};

fn load_local_playlist(path: &Path) -> Result<PlaylistDocument, M3uSyncError> {
    match read_playlist_text(path)? {
        Some(text) => Ok(parse_m3u_text(&text)),
        None => {
            info!("Local playlist {} not found, starting with an empty playlist", path.display());
            Ok(PlaylistDocument::empty())
        }
    }
}

fn load_channel_groups(cfg: &Config, provider: &ProviderConfig, listener: &dyn SyncEventListener) -> Result<IndexMap<ChannelKey, String>, M3uSyncError> {
    let channels_path = provider.get_channels_path(&cfg.working_dir);
    debug_if_enabled!("[{}] reading channel config {}", provider.name, channels_path.display());
    let channel_config = parse_channel_groups_text(&read_channel_config_text(&channels_path)?);
    if channel_config.groups.is_empty() {
        warn!("[{}] channel config {} defines no groups", provider.name, channels_path.display());
    }
    listener.notify(&SyncEvent::ChannelConfigLoaded {
        provider: &provider.name,
        groups: channel_config.groups.len(),
        channels: channel_config.channel_count(),
    });
    Ok(channel_config.to_channel_group_map())
}

/// One provider pass: the returned document is the input of the next provider.
fn process_provider(cfg: &Config, provider: &ProviderConfig, local: PlaylistDocument,
                    fetcher: &dyn PlaylistFetcher, listener: &dyn SyncEventListener) -> Result<PlaylistDocument, M3uSyncError> {
    debug_if_enabled!("[{}] processing with exthttp mode {}", provider.name, provider.exthttp);
    let mut step = StepMeasure::new(&format!("[{}]", provider.name), "channel config loaded");
    let channel_groups = load_channel_groups(cfg, provider, listener)?;

    step.tick("upstream fetched");
    let upstream_text = fetcher.fetch(provider)?;

    step.tick("upstream parsed");
    let upstream = parse_m3u_text(&upstream_text);
    listener.notify(&SyncEvent::UpstreamLoaded { provider: &provider.name, channels: upstream.channel_count() });
    let upstream_index = create_upstream_index(upstream);

    step.tick("merged");
    let merger = PlaylistMerger {
        provider: &provider.name,
        channel_groups: &channel_groups,
        upstream: &upstream_index,
        exthttp: provider.exthttp,
        listener,
    };
    let (merged, stats) = merger.merge(local);
    step.stop();

    listener.notify(&SyncEvent::ProviderFinished {
        provider: &provider.name,
        replaced: stats.replaced,
        added: stats.added,
        missing: stats.missing,
    });
    Ok(merged)
}

/// Runs the providers in order on the local playlist. Nothing is written here,
/// a failing provider leaves the local file untouched.
pub fn sync_playlists(cfg: &Config, providers: &[&ProviderConfig],
                      fetcher: &dyn PlaylistFetcher, listener: &dyn SyncEventListener) -> Result<PlaylistDocument, M3uSyncError> {
    let mut playlist = load_local_playlist(&cfg.get_playlist_path())?;
    for provider in providers {
        playlist = process_provider(cfg, provider, playlist, fetcher, listener)?;
    }
    Ok(playlist)
}

pub fn persist_playlist(cfg: &Config, playlist: &PlaylistDocument, listener: &dyn SyncEventListener) -> Result<PathBuf, M3uSyncError> {
    let path = cfg.get_playlist_path();
    if let Some(backup_dir) = cfg.get_backup_dir() {
        backup_file(&path, &backup_dir);
    }
    write_playlist(&path, &playlist.to_m3u())?;
    listener.notify(&SyncEvent::PlaylistWritten { path: &path, channels: playlist.channel_count() });
    Ok(path)
}

pub fn exec_processing(cfg: &Config, providers: &[&ProviderConfig], fetcher: &dyn PlaylistFetcher,
                       listener: &dyn SyncEventListener, dry_run: bool) -> Result<(), M3uSyncError> {
    let start_time = Instant::now();
    let playlist = sync_playlists(cfg, providers, fetcher, listener)?;
    if dry_run {
        print!("{}", playlist.to_m3u());
    } else {
        persist_playlist(cfg, &playlist, listener)?;
    }
    let elapsed = start_time.elapsed().as_millis();
    info!("Sync finished! Took {elapsed} ms.");
    Ok(())
}
