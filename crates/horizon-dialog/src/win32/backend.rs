use horizon_dialog_core::logging::targets;
use horizon_dialog_core::{
    Deadline, DialogBackend, EntryResult, EntrySettings, FileResult, FileSaveSettings,
    FileSelectionSettings, Limits, MessageResult, MessageSettings, NotificationSettings,
    OptionsResult, OptionsSettings, Result, WindowsConfig,
};

use super::custom::{self, Response};
use super::folder::{self, FolderRequest};
use super::{common_dialog, layout, notify};

/// Dialogs rendered with the Win32 API.
#[derive(Debug, Clone, Default)]
pub struct Win32Backend {
    config: WindowsConfig,
}

impl Win32Backend {
    pub fn new(config: &WindowsConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

fn options_result(response: Response) -> OptionsResult {
    if response.button.is_ok() {
        OptionsResult::selected(response.selection)
    } else {
        OptionsResult::without_selection(response.button)
    }
}

fn entry_result(response: Response) -> EntryResult {
    if response.button.is_ok() {
        EntryResult::entered(response.text)
    } else {
        EntryResult::without_text(response.button)
    }
}

impl DialogBackend for Win32Backend {
    fn name(&self) -> &'static str {
        "win32"
    }

    fn limits(&self) -> Limits {
        layout::LIMITS
    }

    fn show_message(&self, settings: &MessageSettings, deadline: Deadline) -> Result<MessageResult> {
        let response = custom::run(layout::message(settings), deadline)?;
        Ok(MessageResult::new(response.button))
    }

    fn show_options(&self, settings: &OptionsSettings, deadline: Deadline) -> Result<OptionsResult> {
        custom::run(layout::options(settings), deadline).map(options_result)
    }

    fn show_entry(&self, settings: &EntrySettings, deadline: Deadline) -> Result<EntryResult> {
        custom::run(layout::entry(settings), deadline).map(entry_result)
    }

    fn show_file_save(&self, settings: &FileSaveSettings, deadline: Deadline) -> Result<FileResult> {
        if settings.file.only_directories {
            tracing::debug!(target: targets::WINDOWS, "save dialog in directory mode");
            let request = FolderRequest {
                title: &settings.general.title,
                file: &settings.file,
                multiple: false,
            };
            return folder::pick(request, deadline);
        }
        common_dialog::save(settings, &self.config, deadline)
    }

    fn show_file_selection(
        &self,
        settings: &FileSelectionSettings,
        deadline: Deadline,
    ) -> Result<FileResult> {
        if settings.file.only_directories {
            let request = FolderRequest {
                title: &settings.general.title,
                file: &settings.file,
                multiple: settings.multiple,
            };
            return folder::pick(request, deadline);
        }
        common_dialog::open(settings, &self.config, deadline)
    }

    fn show_notification(&self, settings: &NotificationSettings) -> Result<()> {
        notify::show(settings, &self.config)
    }
}

static_assertions::assert_impl_all!(Win32Backend: Send, Sync);
