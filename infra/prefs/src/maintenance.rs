use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{error, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Removes temp files of `target` older than `threshold` left behind by interrupted writes.
pub(crate) async fn purge_tmp(target: &Path, threshold: Duration) {
    let Some(marker) = tmp_marker(target) else {
        return;
    };
    let dir = parent_dir(target);
    let now = SystemTime::now();

    match tokio::task::spawn_blocking(move || remove_stale(&dir, &marker, now, threshold)).await {
        Ok((removed, failed)) if removed > 0 || failed > 0 => {
            info!(removed, failed, "Cleaned up stale preference temp files");
        }
        Err(err) => error!(error = %err, "Preference temp cleanup task panicked"),
        _ => {}
    }
}

/// Prefix shared by every temp file written for `target`.
pub(crate) fn tmp_marker(target: &Path) -> Option<String> {
    target.file_name().and_then(|name| name.to_str()).map(|name| format!("{name}.trektmp."))
}

pub(crate) fn parent_dir(target: &Path) -> PathBuf {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn remove_stale(dir: &Path, marker: &str, now: SystemTime, threshold: Duration) -> (usize, usize) {
    let mut removed = 0;
    let mut failed = 0;

    let stale = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .flatten()
        .filter(|entry| is_tmp(entry, marker) && is_stale(entry, now, threshold));

    for entry in stale {
        match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "Temp file removal failed");
                failed += 1;
            }
        }
    }

    (removed, failed)
}

fn is_tmp(entry: &DirEntry, marker: &str) -> bool {
    entry.file_type().is_file()
        && entry.file_name().to_str().is_some_and(|name| name.starts_with(marker))
}

fn is_stale(entry: &DirEntry, now: SystemTime, threshold: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|meta| meta.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age >= threshold)
}
