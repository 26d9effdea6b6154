//! The seam between the shared dialog contract and a rendering facility.

use crate::deadline::Deadline;
use crate::error::Result;
use crate::result::{EntryResult, FileResult, MessageResult, OptionsResult};
use crate::settings::{
    EntrySettings, FileSaveSettings, FileSelectionSettings, MessageSettings,
    NotificationSettings, OptionsSettings,
};

/// Capabilities a backend can render.
///
/// `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limits {
    /// Extra buttons on message dialogs.
    pub message_extra_buttons: Option<usize>,
    /// Extra buttons on entry dialogs.
    pub entry_extra_buttons: Option<usize>,
    /// Extra buttons on options dialogs shown as a list.
    pub options_extra_buttons: Option<usize>,
}

impl Limits {
    /// No restrictions.
    pub const UNLIMITED: Self = Self {
        message_extra_buttons: None,
        entry_extra_buttons: None,
        options_extra_buttons: None,
    };
}

/// A strategy that renders dialogs on one platform.
///
/// Implementations receive settings that already passed validation against
/// [`DialogBackend::limits`], and an options dialog only reaches
/// [`DialogBackend::show_options`] in list form; button-style options are
/// rendered through [`DialogBackend::show_message`] by
/// [`Dialogs`](crate::Dialogs). A backend enforces the deadline itself;
/// the caller re-checks it after the backend returns.
pub trait DialogBackend {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// What this backend can render.
    fn limits(&self) -> Limits {
        Limits::UNLIMITED
    }

    /// Show a message box.
    fn show_message(&self, settings: &MessageSettings, deadline: Deadline) -> Result<MessageResult>;

    /// Show an option list.
    fn show_options(&self, settings: &OptionsSettings, deadline: Deadline) -> Result<OptionsResult>;

    /// Show a text entry.
    fn show_entry(&self, settings: &EntrySettings, deadline: Deadline) -> Result<EntryResult>;

    /// Show a file save dialog.
    fn show_file_save(&self, settings: &FileSaveSettings, deadline: Deadline) -> Result<FileResult>;

    /// Show a file open dialog.
    fn show_file_selection(
        &self,
        settings: &FileSelectionSettings,
        deadline: Deadline,
    ) -> Result<FileResult>;

    /// Show a notification. Notifications are fire-and-forget and take no deadline.
    fn show_notification(&self, settings: &NotificationSettings) -> Result<()>;
}

impl<B: DialogBackend + ?Sized> DialogBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn limits(&self) -> Limits {
        (**self).limits()
    }

    fn show_message(&self, settings: &MessageSettings, deadline: Deadline) -> Result<MessageResult> {
        (**self).show_message(settings, deadline)
    }

    fn show_options(&self, settings: &OptionsSettings, deadline: Deadline) -> Result<OptionsResult> {
        (**self).show_options(settings, deadline)
    }

    fn show_entry(&self, settings: &EntrySettings, deadline: Deadline) -> Result<EntryResult> {
        (**self).show_entry(settings, deadline)
    }

    fn show_file_save(&self, settings: &FileSaveSettings, deadline: Deadline) -> Result<FileResult> {
        (**self).show_file_save(settings, deadline)
    }

    fn show_file_selection(
        &self,
        settings: &FileSelectionSettings,
        deadline: Deadline,
    ) -> Result<FileResult> {
        (**self).show_file_selection(settings, deadline)
    }

    fn show_notification(&self, settings: &NotificationSettings) -> Result<()> {
        (**self).show_notification(settings)
    }
}
