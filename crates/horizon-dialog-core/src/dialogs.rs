//! Uniform entry point over any [`DialogBackend`].

use crate::backend::{DialogBackend, Limits};
use crate::buttons::OptionButtons;
use crate::deadline::Deadline;
use crate::error::Result;
use crate::logging::targets;
use crate::result::{EntryResult, FileResult, MessageResult, OptionsResult};
use crate::settings::{
    EntrySettings, FileSaveSettings, FileSelectionSettings, MessageSettings,
    NotificationSettings, OptionsSettings,
};
use crate::validate;

/// Shows dialogs through one backend.
///
/// Settings are validated against the backend's [`Limits`] before anything
/// is launched, button-style options are rewritten into a message dialog,
/// and the deadline is re-checked after the backend returns.
///
/// ```ignore
/// let dialogs = Dialogs::new(backend);
/// let res = dialogs.show_message(
///     &MessageSettings::new("Continue?").style(MessageStyle::Question),
///     Deadline::after(Duration::from_secs(30)),
/// )?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dialogs<B> {
    backend: B,
}

impl<B: DialogBackend> Dialogs<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Unwrap the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn limits(&self) -> Limits {
        self.backend.limits()
    }

    /// Show a message box.
    pub fn show_message(&self, settings: &MessageSettings, deadline: Deadline) -> Result<MessageResult> {
        let _span = tracing::debug_span!(target: targets::DIALOG, "message", backend = self.backend.name())
            .entered();
        validate::message(settings, &self.limits())?;
        deadline.check()?;

        let result = deadline.resolve(self.backend.show_message(settings, deadline));
        trace_outcome(&result);
        result
    }

    /// Show an options dialog.
    ///
    /// Single-selection dialogs in button style are rendered as a message
    /// with one button per option.
    pub fn show_options(&self, settings: &OptionsSettings, deadline: Deadline) -> Result<OptionsResult> {
        let _span = tracing::debug_span!(
            target: targets::DIALOG,
            "options",
            backend = self.backend.name(),
            count = settings.options.len(),
        )
        .entered();
        let limits = self.limits();
        validate::options(settings, &limits)?;

        if settings.renders_as_buttons() {
            let plan = OptionButtons::plan(settings)?;
            validate::message(plan.message(), &limits)?;
            deadline.check()?;

            tracing::debug!(target: targets::DIALOG, ok_option = plan.ok_option(), "options rendered as buttons");
            let result = deadline
                .resolve(self.backend.show_message(plan.message(), deadline))
                .map(|res| plan.resolve(res.button));
            trace_outcome(&result);
            return result;
        }

        deadline.check()?;
        let result = deadline.resolve(self.backend.show_options(settings, deadline));
        trace_outcome(&result);
        result
    }

    /// Show a text entry.
    pub fn show_entry(&self, settings: &EntrySettings, deadline: Deadline) -> Result<EntryResult> {
        let _span = tracing::debug_span!(target: targets::DIALOG, "entry", backend = self.backend.name())
            .entered();
        validate::entry(settings, &self.limits())?;
        deadline.check()?;

        let result = deadline.resolve(self.backend.show_entry(settings, deadline));
        trace_outcome(&result);
        result
    }

    /// Show a file save dialog.
    pub fn show_file_save(&self, settings: &FileSaveSettings, deadline: Deadline) -> Result<FileResult> {
        let _span = tracing::debug_span!(target: targets::DIALOG, "file_save", backend = self.backend.name())
            .entered();
        deadline.check()?;

        let result = deadline.resolve(self.backend.show_file_save(settings, deadline));
        trace_outcome(&result);
        result
    }

    /// Show a file open dialog.
    pub fn show_file_selection(
        &self,
        settings: &FileSelectionSettings,
        deadline: Deadline,
    ) -> Result<FileResult> {
        let _span = tracing::debug_span!(
            target: targets::DIALOG,
            "file_selection",
            backend = self.backend.name()
        )
        .entered();
        deadline.check()?;

        let result = deadline.resolve(self.backend.show_file_selection(settings, deadline));
        trace_outcome(&result);
        result
    }

    /// Show a notification.
    pub fn show_notification(&self, settings: &NotificationSettings) -> Result<()> {
        let _span = tracing::debug_span!(target: targets::DIALOG, "notification", backend = self.backend.name())
            .entered();
        self.backend.show_notification(settings)
    }
}

fn trace_outcome<T: std::fmt::Debug>(result: &Result<T>) {
    match result {
        Ok(res) => tracing::trace!(target: targets::DIALOG, ?res, "dialog closed"),
        Err(err) if err.is_timeout() => tracing::debug!(target: targets::DIALOG, "dialog timed out"),
        Err(err) => tracing::debug!(target: targets::DIALOG, %err, "dialog failed"),
    }
}
