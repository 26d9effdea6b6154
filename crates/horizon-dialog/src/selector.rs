//! Choosing the backend for the host platform.

use horizon_dialog_core::logging::targets;
use horizon_dialog_core::{DialogBackend, DialogConfig, Dialogs, Result};

use crate::osascript::OsaScriptBackend;
use crate::zenity::ZenityBackend;

/// A backend chosen at runtime.
pub type HostBackend = Box<dyn DialogBackend + Send + Sync>;

/// The available rendering facilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// A zenity-compatible subprocess.
    Zenity,
    /// JavaScript for Automation through `osascript`.
    OsaScript,
    /// The Win32 API.
    Win32,
}

impl BackendKind {
    /// The backend of the platform this crate was built for.
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::Win32
        } else if cfg!(target_os = "macos") {
            Self::OsaScript
        } else {
            Self::Zenity
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Zenity => "zenity",
            Self::OsaScript => "osascript",
            Self::Win32 => "win32",
        }
    }

    /// Build a backend of this kind.
    ///
    /// The subprocess backends build everywhere; the Win32 backend only on
    /// Windows.
    pub fn build(self, config: &DialogConfig) -> Result<HostBackend> {
        tracing::debug!(target: targets::DIALOG, backend = self.name(), "selecting backend");
        match self {
            Self::Zenity => Ok(Box::new(ZenityBackend::new(&config.unix))),
            Self::OsaScript => Ok(Box::new(OsaScriptBackend::new(&config.macos))),
            Self::Win32 => win32_backend(config),
        }
    }
}

#[cfg(windows)]
fn win32_backend(config: &DialogConfig) -> Result<HostBackend> {
    Ok(Box::new(crate::win32::Win32Backend::new(&config.windows)))
}

#[cfg(not(windows))]
fn win32_backend(_config: &DialogConfig) -> Result<HostBackend> {
    Err(horizon_dialog_core::DialogError::Unsupported("The win32 backend"))
}

/// The backend of the host platform.
pub fn host_backend(config: &DialogConfig) -> Result<HostBackend> {
    BackendKind::host().build(config)
}

/// The validating facade over the host backend.
pub fn host_dialogs(config: &DialogConfig) -> Result<Dialogs<HostBackend>> {
    host_backend(config).map(Dialogs::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_kind_matches_target() {
        let kind = BackendKind::host();
        if cfg!(windows) {
            assert_eq!(kind, BackendKind::Win32);
        } else if cfg!(target_os = "macos") {
            assert_eq!(kind, BackendKind::OsaScript);
        } else {
            assert_eq!(kind, BackendKind::Zenity);
        }
    }

    #[test]
    fn test_host_backend_builds() {
        let backend = host_backend(&DialogConfig::default()).unwrap();
        assert_eq!(backend.name(), BackendKind::host().name());
    }

    #[test]
    fn test_subprocess_backends_build_everywhere() {
        let config = DialogConfig::default();
        assert_eq!(BackendKind::Zenity.build(&config).unwrap().name(), "zenity");
        assert_eq!(BackendKind::OsaScript.build(&config).unwrap().name(), "osascript");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_win32_unsupported_elsewhere() {
        let err = BackendKind::Win32.build(&DialogConfig::default()).err().unwrap();
        assert!(matches!(err, horizon_dialog_core::DialogError::Unsupported(_)));
    }
}
