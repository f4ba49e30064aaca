//! Persistence of the per-chat recommendation artifact.
//!
//! The artifact is a JSON side file next to the rendered snapshots, keyed
//! by chat ID and replaced wholesale on every summarization run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::analysis::RecommendationSet;

/// Path of the artifact for a chat within `dir`.
pub fn path_for(dir: &Path, chat_id: &str) -> PathBuf {
    dir.join(format!("{}_summary.json", chat_id))
}

/// Persist a recommendation set, overwriting any prior artifact.
pub fn store(dir: &Path, chat_id: &str, set: &RecommendationSet) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = path_for(dir, chat_id);
    let body = serde_json::to_string_pretty(set)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&path, body)?;

    debug!("Stored summary artifact at {}", path.display());
    Ok(path)
}

/// Load the latest recommendation set for a chat.
///
/// Returns `None` for a missing or unreadable artifact so callers can treat
/// it as an empty recommendation list.
pub fn load(dir: &Path, chat_id: &str) -> Option<RecommendationSet> {
    let path = path_for(dir, chat_id);

    let body = match fs::read_to_string(&path) {
        Ok(body) => body,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("Failed to read summary artifact {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&body) {
        Ok(set) => Some(set),
        Err(e) => {
            warn!("Corrupt summary artifact {}: {}", path.display(), e);
            None
        }
    }
}
