//! Native blocking dialogs for Horizon Dialog.
//!
//! One settings/result model, rendered by whatever the host provides:
//!
//! - **Unix**: a zenity-compatible subprocess ([`zenity::ZenityBackend`])
//! - **macOS**: JavaScript for Automation via `osascript`
//!   ([`osascript::OsaScriptBackend`])
//! - **Windows**: common dialogs, the shell folder picker and a small custom
//!   dialog (`win32::Win32Backend`)
//!
//! Every call blocks until the dialog is dismissed, fails, or its timeout
//! elapses. A timeout is reported as an error for which
//! [`DialogError::is_timeout`] holds.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use horizon_dialog::{MessageSettings, MessageStyle, OptionsSettings};
//!
//! let res = horizon_dialog::show_message(
//!     &MessageSettings::new("Overwrite the existing file?")
//!         .style(MessageStyle::Question)
//!         .title("Export"),
//!     None,
//! )?;
//! if res.button.is_ok() {
//!     // ...
//! }
//!
//! let picked = horizon_dialog::show_options(
//!     &OptionsSettings::new("Pick a remote", ["origin", "upstream"]).default_option(0),
//!     Some(Duration::from_secs(30)),
//! )?;
//! println!("{:?}", picked.selection);
//! # Ok::<(), horizon_dialog::DialogError>(())
//! ```

use std::time::Duration;

pub mod osascript;
pub mod selector;
pub mod win32;
pub mod zenity;

pub use horizon_dialog_core::*;
pub use selector::{BackendKind, HostBackend, host_backend, host_dialogs};

fn dialogs() -> Result<Dialogs<HostBackend>> {
    host_dialogs(&DialogConfig::default())
}

/// Show a message box on the host backend.
pub fn show_message(settings: &MessageSettings, timeout: Option<Duration>) -> Result<MessageResult> {
    dialogs()?.show_message(settings, Deadline::from_timeout(timeout))
}

/// Show an option list, or one button per option in buttons style.
pub fn show_options(settings: &OptionsSettings, timeout: Option<Duration>) -> Result<OptionsResult> {
    dialogs()?.show_options(settings, Deadline::from_timeout(timeout))
}

/// Show a text entry.
pub fn show_entry(settings: &EntrySettings, timeout: Option<Duration>) -> Result<EntryResult> {
    dialogs()?.show_entry(settings, Deadline::from_timeout(timeout))
}

/// Show a file save dialog.
pub fn show_file_save(settings: &FileSaveSettings, timeout: Option<Duration>) -> Result<FileResult> {
    dialogs()?.show_file_save(settings, Deadline::from_timeout(timeout))
}

/// Show a file (or directory) selection dialog.
pub fn show_file_selection(
    settings: &FileSelectionSettings,
    timeout: Option<Duration>,
) -> Result<FileResult> {
    dialogs()?.show_file_selection(settings, Deadline::from_timeout(timeout))
}

/// Show a notification. Notifications do not wait for the user.
pub fn show_notification(settings: &NotificationSettings) -> Result<()> {
    dialogs()?.show_notification(settings)
}
