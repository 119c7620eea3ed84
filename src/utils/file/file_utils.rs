use std::fs;
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{error, info};
use path_clean::PathClean;

use crate::m3u_sync_error::{create_m3u_sync_error, M3uSyncError, M3uSyncErrorKind};
use crate::utils::CONFIG_FILE;

pub fn file_writer<W>(w: W) -> BufWriter<W>
where
    W: Write,
{
    BufWriter::with_capacity(131_072, w)
}

pub fn get_exe_path() -> PathBuf {
    let default_path = std::path::PathBuf::from("./");
    let current_exe = std::env::current_exe();
    match current_exe {
        Ok(exe) => {
            match fs::read_link(&exe) {
                Ok(f) => f.parent().map_or(default_path, std::path::Path::to_path_buf),
                Err(_) => exe.parent().map_or(default_path, std::path::Path::to_path_buf)
            }
        }
        Err(_) => default_path
    }
}

/// `config.yml` next to the executable if it exists, otherwise in the current directory.
pub fn get_default_config_file_path() -> String {
    let default_path = get_exe_path().join(CONFIG_FILE);
    String::from(if default_path.exists() {
        default_path.to_str().unwrap_or(CONFIG_FILE)
    } else {
        CONFIG_FILE
    })
}

pub fn get_file_path(wd: &str, path: Option<PathBuf>) -> Option<PathBuf> {
    path.map(|p| if p.is_relative() {
        let pb = PathBuf::from(wd);
        pb.join(&p).clean()
    } else {
        p
    })
}

#[inline]
pub fn open_file(file_name: &Path) -> Result<File, std::io::Error> {
    File::open(file_name)
}

/// Reads the local playlist; `None` if the file does not exist yet.
pub fn read_playlist_text(path: &Path) -> Result<Option<String>, M3uSyncError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(create_m3u_sync_error!(M3uSyncErrorKind::Io, "failed to read playlist {}: {}", path.display(), err)),
    }
}

pub fn write_playlist(path: &Path, content: &str) -> Result<(), M3uSyncError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|err| create_m3u_sync_error!(M3uSyncErrorKind::Io, "failed to create directory {}: {}", parent.display(), err))?;
        }
    }
    File::create(path)
        .and_then(|file| {
            let mut writer = file_writer(file);
            writer.write_all(content.as_bytes())?;
            writer.flush()
        })
        .map_err(|err| create_m3u_sync_error!(M3uSyncErrorKind::Io, "failed to write playlist {}: {}", path.display(), err))
}

/// Copies an existing playlist to `backup_dir/<file>_<timestamp>` before it is overwritten.
pub fn backup_file(path: &Path, backup_dir: &Path) -> Option<PathBuf> {
    if !path.is_file() {
        return None;
    }
    let filename = path.file_name().map_or_else(|| "playlist".to_string(), |f| f.to_string_lossy().to_string());
    let backup_path = backup_dir.join(format!("{}_{}", filename, Local::now().format("%Y%m%d_%H%M%S")));
    if let Err(err) = fs::create_dir_all(backup_dir) {
        error!("Could not create backup dir {}: {}", backup_dir.display(), err);
        return None;
    }
    match fs::copy(path, &backup_path) {
        Ok(_) => {
            info!("Backup saved to {}", backup_path.display());
            Some(backup_path)
        }
        Err(err) => {
            error!("Could not backup file {}: {}", backup_path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use crate::utils::file::file_utils::{backup_file, get_file_path, read_playlist_text, write_playlist};

    #[test]
    fn test_get_file_path() {
        assert_eq!(get_file_path("/data", Some(PathBuf::from("./lists/../my.m3u"))), Some(PathBuf::from("/data/my.m3u")));
        assert_eq!(get_file_path("/data", Some(PathBuf::from("/tmp/my.m3u"))), Some(PathBuf::from("/tmp/my.m3u")));
        assert_eq!(get_file_path("/data", None), None);
    }

    #[test]
    fn test_read_missing_playlist() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_playlist_text(&dir.path().join("missing.m3u")).unwrap(), None);
    }

    #[test]
    fn test_write_and_backup_playlist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("my.m3u");
        write_playlist(&path, "#EXTM3U\n").unwrap();
        assert_eq!(read_playlist_text(&path).unwrap().as_deref(), Some("#EXTM3U\n"));

        let backup = backup_file(&path, &dir.path().join("backup")).unwrap();
        assert!(backup.file_name().unwrap().to_string_lossy().starts_with("my.m3u_"));
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "#EXTM3U\n");
    }
}
