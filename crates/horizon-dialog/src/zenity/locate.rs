//! Finding a zenity-compatible executable.

use std::path::PathBuf;

use horizon_dialog_core::UnixConfig;
use horizon_dialog_core::logging::targets;

/// Resolve the tool to run.
///
/// An explicit executable wins. Otherwise the first candidate found on
/// `PATH` is used; if none is installed the first candidate name is
/// returned and the failure surfaces when the process is launched.
pub fn locate(config: &UnixConfig) -> PathBuf {
    if let Some(executable) = &config.executable {
        return executable.clone();
    }

    for candidate in &config.candidates {
        if let Ok(path) = which::which(candidate) {
            tracing::debug!(target: targets::UNIX, path = %path.display(), "found dialog tool");
            return path;
        }
    }

    let fallback = config
        .candidates
        .first()
        .map_or_else(|| PathBuf::from("zenity"), PathBuf::from);
    tracing::debug!(target: targets::UNIX, fallback = %fallback.display(), "no dialog tool on PATH");
    fallback
}
