//! Core model for Horizon Dialog.
//!
//! This crate holds everything that does not depend on the host platform:
//!
//! - **Settings** describing a dialog ([`MessageSettings`], [`OptionsSettings`], ...)
//! - **Results** with the three-state [`ButtonResult`]
//! - The **index codec** recovering button and list indices from label text
//! - **Deadlines**, the deadline-bound [`process`] runner and the
//!   [`CloseWatcher`] actor that force-closes native windows
//! - The [`DialogBackend`] trait and the [`Dialogs`] facade that validates
//!   settings before a backend is invoked
//!
//! Platform backends live in the `horizon-dialog` crate.
//!
//! # Example
//!
//! ```ignore
//! use horizon_dialog_core::{Deadline, Dialogs, MessageSettings, MessageStyle};
//!
//! let dialogs = Dialogs::new(backend);
//! let res = dialogs.show_message(
//!     &MessageSettings::new("Overwrite the file?").style(MessageStyle::Question),
//!     Deadline::none(),
//! )?;
//! if res.button.is_ok() {
//!     // ...
//! }
//! ```

mod backend;
mod buttons;
pub mod codec;
mod config;
mod deadline;
mod dialogs;
mod error;
pub mod logging;
pub mod process;
mod result;
mod settings;
pub mod validate;
pub mod watcher;

pub use backend::{DialogBackend, Limits};
pub use buttons::OptionButtons;
pub use config::{DialogConfig, MacConfig, UnixConfig, WindowsConfig};
pub use deadline::Deadline;
pub use dialogs::Dialogs;
pub use error::{DialogError, Result, ValidationError};
pub use result::{
    ButtonResult, EntryResult, FileResult, MessageResult, OptionsResult, TIMEOUT_EXIT_CODE,
    to_forward_slashes,
};
pub use settings::{
    ButtonSettings, DialogIcon, EntrySettings, FileFilter, FileSaveSettings, FileSelectionSettings,
    FileSettings, GeneralSettings, MessageSettings, MessageStyle, NotificationSettings,
    OptionsSettings, OptionsStyle, TextSettings,
};
pub use watcher::{CloseWatcher, WatchOutcome, WindowCloser, WindowHandle, WindowPublisher};
