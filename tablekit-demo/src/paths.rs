//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "tablekit";
const APPLICATION: &str = "tablekit-demo";

/// Archived logs kept by [`rotate_logs`].
const KEEP_ARCHIVED_LOGS: usize = 10;

const LATEST_LOG: &str = "latest.log";
const ARCHIVE_PREFIX: &str = "run-";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, where logs live.
///
/// - Linux: `$XDG_CACHE_HOME/tablekit-demo` or `~/.cache/tablekit-demo`
/// - macOS: `~/Library/Caches/dev.tablekit.tablekit-demo`
/// - Windows: `C:\Users\<User>\AppData\Local\tablekit\tablekit-demo\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Moves the previous run's log aside as `run-<timestamp>.log` and keeps
/// only the newest archives.
///
/// Call before the logger opens `latest.log`.
pub fn rotate_logs() -> io::Result<()> {
    let Some(cache) = cache_dir() else {
        return Ok(());
    };
    let latest = cache.join(LATEST_LOG);
    if !latest.is_file() {
        return Ok(());
    }

    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    fs::rename(&latest, cache.join(format!("{ARCHIVE_PREFIX}{stamp}.log")))?;
    prune_archives(&cache, KEEP_ARCHIVED_LOGS)
}

/// Archive names embed a sortable timestamp, so name order is age order.
fn prune_archives(dir: &Path, keep: usize) -> io::Result<()> {
    let mut archives: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
        })
        .collect();
    archives.sort_unstable_by(|a, b| b.cmp(a));

    for stale in archives.iter().skip(keep) {
        fs::remove_file(stale)?;
    }
    Ok(())
}
