//! macOS backend running JavaScript for Automation through `osascript`.
//!
//! Each dialog renders one embedded script with a JSON payload and pipes it
//! into the interpreter. Scripts exit with the host's user-canceled code
//! (-128) when the user cancels; everything they return is printed on
//! stdout, NUL-separated where there are several values.

mod data;
mod script;

use std::path::PathBuf;
use std::process::Command;

use serde::Serialize;

use horizon_dialog_core::codec::{IndexCodec, decode_button};
use horizon_dialog_core::logging::targets;
use horizon_dialog_core::process::run_with_deadline;
use horizon_dialog_core::{
    ButtonResult, Deadline, DialogBackend, DialogError, EntryResult, EntrySettings, FileResult,
    FileSaveSettings, FileSelectionSettings, Limits, MacConfig, MessageResult, MessageSettings,
    NotificationSettings, OptionsResult, OptionsSettings, Result,
};

pub use data::{DEFAULT_NOTIFICATION_TITLE, IconRef, IconResolver, file_types};
pub use script::Operation;

/// Exit code of a script canceled by the user.
pub const USER_CANCELED: i32 = -128;

/// Dialogs rendered by `osascript`.
#[derive(Debug, Clone)]
pub struct OsaScriptBackend {
    interpreter: PathBuf,
    language: String,
    icons: IconResolver,
}

enum ScriptExit {
    Ok(String),
    Canceled,
}

impl OsaScriptBackend {
    pub fn new(config: &MacConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            language: config.language.clone(),
            icons: IconResolver::new(&config.icon_directory),
        }
    }

    fn run<T: Serialize>(&self, operation: Operation, data: &T, deadline: Deadline) -> Result<ScriptExit> {
        let script = script::render(operation, data)?;
        tracing::debug!(target: targets::MACOS, operation = operation.name(), "running script");

        let mut command = Command::new(&self.interpreter);
        command.arg("-l").arg(&self.language);

        let output = run_with_deadline(&mut command, Some(script.as_bytes()), &deadline)?;
        let stderr = output.stderr_text();
        match output.code {
            Some(0) => {
                let text = output.stdout_text();
                Ok(ScriptExit::Ok(text.strip_suffix('\n').unwrap_or(&text).to_string()))
            }
            Some(code) if is_user_canceled(code, &stderr) => Ok(ScriptExit::Canceled),
            _ => Err(output.failure(&self.interpreter.to_string_lossy())),
        }
    }
}

/// The process status only keeps the low byte of -128; an uncaught
/// cancel error exits with 1 and names the code in stderr.
fn is_user_canceled(code: i32, stderr: &str) -> bool {
    code == USER_CANCELED || code == USER_CANCELED & 0xff || (code == 1 && stderr.contains("(-128)"))
}

fn decode_pressed(out: &str, extra_count: usize) -> Result<ButtonResult> {
    decode_button(out, extra_count)
        .ok_or_else(|| DialogError::output(format!("unknown button '{}'", out.trim())))
}

fn split_nul(out: &str) -> impl Iterator<Item = &str> {
    out.split('\0').filter(|v| !v.is_empty())
}

impl DialogBackend for OsaScriptBackend {
    fn name(&self) -> &'static str {
        "osascript"
    }

    /// `displayDialog` renders at most three buttons and `chooseFromList`
    /// none beyond OK and Cancel.
    fn limits(&self) -> Limits {
        Limits {
            message_extra_buttons: Some(1),
            entry_extra_buttons: Some(1),
            options_extra_buttons: Some(0),
        }
    }

    fn show_message(&self, settings: &MessageSettings, deadline: Deadline) -> Result<MessageResult> {
        let data = data::message_data(settings, &self.icons)?;
        let extra = settings.buttons.extra_buttons.len();

        match self.run(Operation::Message, &data, deadline)? {
            ScriptExit::Ok(out) => Ok(MessageResult::new(decode_pressed(&out, extra)?)),
            ScriptExit::Canceled => Ok(MessageResult::canceled()),
        }
    }

    fn show_options(&self, settings: &OptionsSettings, deadline: Deadline) -> Result<OptionsResult> {
        let data = data::options_data(settings);
        let count = settings.options.len();

        match self.run(Operation::Options, &data, deadline)? {
            ScriptExit::Ok(out) => {
                let selection = split_nul(&out)
                    .map(|item| {
                        IndexCodec::ITEMS
                            .decode(item, count)
                            .ok_or_else(|| DialogError::output(format!("unknown option '{}'", item.trim())))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(OptionsResult::selected(selection))
            }
            ScriptExit::Canceled => Ok(OptionsResult::canceled()),
        }
    }

    fn show_entry(&self, settings: &EntrySettings, deadline: Deadline) -> Result<EntryResult> {
        let data = data::entry_data(settings, &self.icons)?;
        let extra = settings.buttons.extra_buttons.len();

        match self.run(Operation::Entry, &data, deadline)? {
            ScriptExit::Ok(out) => {
                let (button, text) = out.split_once('\0').unwrap_or((out.as_str(), ""));
                Ok(match decode_pressed(button, extra)? {
                    ButtonResult::Ok => EntryResult::entered(text),
                    other => EntryResult::without_text(other),
                })
            }
            ScriptExit::Canceled => Ok(EntryResult::canceled()),
        }
    }

    fn show_file_save(&self, settings: &FileSaveSettings, deadline: Deadline) -> Result<FileResult> {
        let data = data::file_save_data(settings);
        match self.run(Operation::File, &data, deadline)? {
            ScriptExit::Ok(out) => Ok(FileResult::selected(split_nul(&out))),
            ScriptExit::Canceled => Ok(FileResult::canceled()),
        }
    }

    fn show_file_selection(
        &self,
        settings: &FileSelectionSettings,
        deadline: Deadline,
    ) -> Result<FileResult> {
        let data = data::file_selection_data(settings);
        match self.run(Operation::File, &data, deadline)? {
            ScriptExit::Ok(out) => Ok(FileResult::selected(split_nul(&out))),
            ScriptExit::Canceled => Ok(FileResult::canceled()),
        }
    }

    fn show_notification(&self, settings: &NotificationSettings) -> Result<()> {
        let data = data::notification_data(settings);
        self.run(Operation::Notify, &data, Deadline::none())?;
        Ok(())
    }
}

static_assertions::assert_impl_all!(OsaScriptBackend: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_canceled_codes() {
        assert!(is_user_canceled(-128, ""));
        assert!(is_user_canceled(128, ""));
        assert!(is_user_canceled(1, "execution error: User canceled. (-128)"));
        assert!(!is_user_canceled(1, "execution error: syntax error (-2740)"));
        assert!(!is_user_canceled(2, ""));
    }

    #[test]
    fn test_limits() {
        let backend = OsaScriptBackend::new(&MacConfig::default());
        assert_eq!(backend.limits().message_extra_buttons, Some(1));
        assert_eq!(backend.limits().options_extra_buttons, Some(0));
    }
}
