//! Unix backend driving `zenity` (or `qarma`, `matedialog`).
//!
//! Every dialog is one subprocess. Exit code 0 means OK and stdout carries
//! the payload; exit code 1 means cancel, unless stdout carries an encoded
//! extra-button label.

mod args;
mod locate;

use std::path::{Path, PathBuf};
use std::process::Command;

use horizon_dialog_core::codec::decode_button;
use horizon_dialog_core::logging::targets;
use horizon_dialog_core::process::{ProcessOutput, run_with_deadline};
use horizon_dialog_core::{
    ButtonResult, Deadline, DialogBackend, DialogError, EntryResult, EntrySettings, FileResult,
    FileSaveSettings, FileSelectionSettings, MessageResult, MessageSettings,
    NotificationSettings, OptionsResult, OptionsSettings, Result, UnixConfig,
};

pub use args::{SEPARATOR, filter_args};
pub use locate::locate;

/// Dialogs rendered by a zenity-compatible tool.
#[derive(Debug, Clone)]
pub struct ZenityBackend {
    executable: PathBuf,
}

/// How a finished process ended.
enum Exit {
    Ok(String),
    Canceled(String),
}

impl ZenityBackend {
    /// Locate the tool according to `config`.
    pub fn new(config: &UnixConfig) -> Self {
        Self::with_executable(locate(config))
    }

    /// Use a specific executable.
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// The executable in use.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn run(&self, args: &[String], cwd: Option<&Path>, deadline: Deadline) -> Result<Exit> {
        let mut command = Command::new(&self.executable);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let output = run_with_deadline(&mut command, None, &deadline)?;
        self.classify(output)
    }

    fn classify(&self, output: ProcessOutput) -> Result<Exit> {
        let text = output.stdout_text();
        // Trailing newline only; labels and paths may end in whitespace.
        let text = text.strip_suffix('\n').unwrap_or(&text).to_string();
        match output.code {
            Some(0) => Ok(Exit::Ok(text)),
            Some(1) => Ok(Exit::Canceled(text)),
            _ => Err(output.failure(&self.executable.to_string_lossy())),
        }
    }
}

/// Exit 1 with a marked label is an extra button, otherwise a cancel.
fn canceled_or_extra(out: &str, extra_count: usize) -> ButtonResult {
    if out.is_empty() {
        return ButtonResult::Canceled;
    }
    match decode_button(out, extra_count) {
        Some(ButtonResult::ExtraButton(idx)) => ButtonResult::ExtraButton(idx),
        _ => ButtonResult::Canceled,
    }
}

fn split_values(out: &str) -> impl Iterator<Item = &str> {
    out.split(SEPARATOR).filter(|v| !v.is_empty())
}

fn parse_indices(out: &str, count: usize) -> Result<Vec<usize>> {
    split_values(out.trim())
        .map(|value| {
            value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&idx| idx < count)
                .ok_or_else(|| DialogError::output(format!("invalid option index '{value}'")))
        })
        .collect()
}

impl DialogBackend for ZenityBackend {
    fn name(&self) -> &'static str {
        "zenity"
    }

    fn show_message(&self, settings: &MessageSettings, deadline: Deadline) -> Result<MessageResult> {
        let args = args::message_args(settings)?;
        let extra = settings.buttons.extra_buttons.len();

        Ok(match self.run(&args, None, deadline)? {
            Exit::Ok(_) => MessageResult::ok(),
            Exit::Canceled(out) => MessageResult::new(canceled_or_extra(&out, extra)),
        })
    }

    fn show_options(&self, settings: &OptionsSettings, deadline: Deadline) -> Result<OptionsResult> {
        let args = args::options_args(settings)?;
        let extra = settings.buttons.extra_buttons.len();

        match self.run(&args, None, deadline)? {
            Exit::Ok(out) => Ok(OptionsResult::selected(parse_indices(&out, settings.options.len())?)),
            Exit::Canceled(out) => Ok(OptionsResult::without_selection(canceled_or_extra(&out, extra))),
        }
    }

    fn show_entry(&self, settings: &EntrySettings, deadline: Deadline) -> Result<EntryResult> {
        let args = args::entry_args(settings)?;
        let extra = settings.buttons.extra_buttons.len();

        Ok(match self.run(&args, None, deadline)? {
            Exit::Ok(text) => EntryResult::entered(text),
            Exit::Canceled(out) => EntryResult::without_text(canceled_or_extra(&out, extra)),
        })
    }

    fn show_file_save(&self, settings: &FileSaveSettings, deadline: Deadline) -> Result<FileResult> {
        let args = args::file_save_args(settings);

        Ok(match self.run(&args, settings.file.root.as_deref(), deadline)? {
            Exit::Ok(out) => FileResult::selected(split_values(out.trim())),
            Exit::Canceled(_) => FileResult::canceled(),
        })
    }

    fn show_file_selection(
        &self,
        settings: &FileSelectionSettings,
        deadline: Deadline,
    ) -> Result<FileResult> {
        let args = args::file_selection_args(settings);

        Ok(match self.run(&args, None, deadline)? {
            Exit::Ok(out) => FileResult::selected(split_values(&out)),
            Exit::Canceled(_) => FileResult::canceled(),
        })
    }

    fn show_notification(&self, settings: &NotificationSettings) -> Result<()> {
        let args = args::notification_args(settings);
        match self.run(&args, None, Deadline::none())? {
            Exit::Ok(_) => Ok(()),
            Exit::Canceled(out) => {
                tracing::debug!(target: targets::UNIX, %out, "notification dismissed");
                Ok(())
            }
        }
    }
}

static_assertions::assert_impl_all!(ZenityBackend: Send, Sync);

#[cfg(test)]
mod tests {
    use horizon_dialog_core::codec::encode_extra_buttons;

    use super::*;

    #[test]
    fn test_parse_indices() {
        assert_eq!(parse_indices("1\x1e2\n", 3).unwrap(), vec![1, 2]);
        assert_eq!(parse_indices("", 3).unwrap(), Vec::<usize>::new());
        assert!(parse_indices("7", 3).is_err());
    }

    #[test]
    fn test_canceled_or_extra() {
        let encoded = encode_extra_buttons(&["Later", "Never"]).unwrap();
        assert_eq!(canceled_or_extra(&encoded[1], 2), ButtonResult::ExtraButton(1));
        assert_eq!(canceled_or_extra("", 2), ButtonResult::Canceled);
        assert_eq!(canceled_or_extra("garbage", 2), ButtonResult::Canceled);
    }
}
