//! Payloads handed to the automation scripts.
//!
//! Field names follow the parameter names of the standard-additions
//! commands the scripts call.

use std::path::{Path, PathBuf};

use serde::Serialize;

use horizon_dialog_core::codec::{IndexCodec, encode_extra_buttons, encode_ok_label};
use horizon_dialog_core::{
    ButtonSettings, DialogIcon, EntrySettings, FileFilter, FileSaveSettings,
    FileSelectionSettings, MessageSettings, MessageStyle, NotificationSettings, OptionsSettings,
    ValidationError,
};

/// Icon for `displayDialog`: an `.icns` file or a stock keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IconRef {
    File { file: String },
    Keyword(&'static str),
}

/// Maps dialog icons to the system alert icons.
#[derive(Debug, Clone)]
pub struct IconResolver {
    directory: PathBuf,
}

impl IconResolver {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The system icon file if present, else the closest stock keyword.
    pub fn resolve(&self, icon: DialogIcon) -> Option<IconRef> {
        let (file, keyword) = match icon {
            DialogIcon::Undefined => return None,
            DialogIcon::Info => ("AlertNoteIcon.icns", "note"),
            DialogIcon::Error => ("AlertStopIcon.icns", "stop"),
            DialogIcon::Warning => ("AlertCautionIcon.icns", "caution"),
            DialogIcon::Question => ("GenericQuestionMarkIcon.icns", "note"),
        };

        let path = self.directory.join(file);
        Some(if path.is_file() {
            IconRef::File {
                file: path.to_string_lossy().into_owned(),
            }
        } else {
            IconRef::Keyword(keyword)
        })
    }
}

/// `displayDialog` parameters. Button numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogData {
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub with_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_icon: Option<IconRef>,
    pub buttons: Vec<String>,
    pub default_button: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_button: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryData {
    #[serde(flatten)]
    pub dialog: DialogData,
    pub default_answer: String,
    pub hidden_answer: bool,
}

/// `chooseFromList` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsData {
    pub items: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub with_title: String,
    pub with_prompt: String,
    pub default_items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok_button_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_button_name: Option<String>,
    pub multiple_selections_allowed: bool,
    pub empty_selection_allowed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileMode {
    Open,
    Save,
    Folder,
}

/// `chooseFile`, `chooseFileName` and `chooseFolder` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub mode: FileMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_prompt: Option<String>,
    pub of_type: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_location: Option<String>,
    pub invisibles: bool,
    pub multiple_selections_allowed: bool,
    pub show_package_contents: bool,
}

/// `displayNotification` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyData {
    pub text: String,
    pub with_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// Fallback notification title; the host would otherwise print its own name.
pub const DEFAULT_NOTIFICATION_TITLE: &str = "Notification";

pub fn message_data(
    settings: &MessageSettings,
    icons: &IconResolver,
) -> Result<DialogData, ValidationError> {
    let question = settings.style == MessageStyle::Question;
    let (ok, cancel) = if question { ("Yes", "No") } else { ("OK", "") };

    let mut data = dialog_data(&settings.buttons, ok, question.then_some(cancel))?;
    data.text = settings.text.text.clone();
    data.with_title = settings.general.title.clone();
    data.with_icon = icons.resolve(settings.effective_icon());
    Ok(data)
}

pub fn entry_data(
    settings: &EntrySettings,
    icons: &IconResolver,
) -> Result<EntryData, ValidationError> {
    let mut dialog = dialog_data(&settings.buttons, "OK", Some("Cancel"))?;
    dialog.text = settings.text.text.clone();
    dialog.with_title = settings.general.title.clone();
    dialog.with_icon = icons.resolve(settings.icon);

    Ok(EntryData {
        dialog,
        default_answer: settings.default_entry.clone(),
        hidden_answer: settings.hide_entry,
    })
}

/// Buttons laid out as `[extras..., cancel, ok]`.
fn dialog_data(
    buttons: &ButtonSettings,
    default_ok: &str,
    default_cancel: Option<&str>,
) -> Result<DialogData, ValidationError> {
    let mut labels = encode_extra_buttons(&buttons.extra_buttons)?;

    let cancel_button = default_cancel.map(|fallback| {
        labels.push(non_empty_or(&buttons.cancel_label, fallback));
        labels.len()
    });
    labels.push(encode_ok_label(&non_empty_or(&buttons.ok_label, default_ok)));

    let default_button = match cancel_button {
        Some(cancel) if buttons.default_cancel => cancel,
        _ => labels.len(),
    };

    Ok(DialogData {
        text: String::new(),
        with_title: String::new(),
        with_icon: None,
        buttons: labels,
        default_button,
        cancel_button,
    })
}

pub fn options_data(settings: &OptionsSettings) -> OptionsData {
    let items = IndexCodec::ITEMS.encode_all(&settings.options);

    let mut defaults: Vec<usize> = settings
        .default_options
        .iter()
        .copied()
        .filter(|&idx| idx < items.len())
        .collect();
    if !settings.multiple {
        defaults = defaults.last().copied().into_iter().collect();
    }

    OptionsData {
        default_items: defaults.iter().map(|&idx| items[idx].clone()).collect(),
        items,
        with_title: settings.general.title.clone(),
        with_prompt: settings.text.text.clone(),
        ok_button_name: non_empty(&settings.buttons.ok_label),
        cancel_button_name: non_empty(&settings.buttons.cancel_label),
        multiple_selections_allowed: settings.multiple,
        // OK with nothing picked is an accepted, empty selection.
        empty_selection_allowed: true,
    }
}

pub fn file_save_data(settings: &FileSaveSettings) -> FileData {
    let file = &settings.file;
    FileData {
        mode: if file.only_directories {
            FileMode::Folder
        } else {
            FileMode::Save
        },
        with_prompt: non_empty(&settings.general.title),
        of_type: Vec::new(),
        default_name: non_empty(&file.filename),
        default_location: file.root.as_deref().map(path_string),
        invisibles: file.show_hidden,
        multiple_selections_allowed: false,
        show_package_contents: false,
    }
}

pub fn file_selection_data(settings: &FileSelectionSettings) -> FileData {
    let file = &settings.file;
    FileData {
        mode: if file.only_directories {
            FileMode::Folder
        } else {
            FileMode::Open
        },
        with_prompt: non_empty(&settings.general.title),
        of_type: file_types(&file.filters),
        default_name: None,
        default_location: file.root.as_deref().map(path_string),
        invisibles: file.show_hidden,
        multiple_selections_allowed: settings.multiple,
        show_package_contents: false,
    }
}

/// Split text at the first newline into subtitle and body.
pub fn notification_data(settings: &NotificationSettings) -> NotifyData {
    let (subtitle, text) = match settings.text.split_once('\n') {
        Some((subtitle, body)) => (Some(subtitle.to_string()), body.to_string()),
        None => (None, settings.text.clone()),
    };

    NotifyData {
        text,
        with_title: if settings.general.title.is_empty() {
            DEFAULT_NOTIFICATION_TITLE.to_string()
        } else {
            settings.general.title.clone()
        },
        subtitle,
    }
}

/// File extensions accepted by the picker.
///
/// A `.*` pattern anywhere disables filtering. Patterns without an
/// extension (`*`, `Makefile`) are skipped.
pub fn file_types(filters: &[FileFilter]) -> Vec<String> {
    let patterns = || filters.iter().flat_map(|f| f.patterns.iter());

    if patterns().any(|p| p == ".*") {
        return Vec::new();
    }

    let mut types: Vec<String> = Vec::new();
    for pattern in patterns() {
        let Some((_, ext)) = pattern.rsplit_once('.') else {
            continue;
        };
        if ext.is_empty() || ext.contains(['*', '?']) {
            continue;
        }
        if !types.iter().any(|t| t == ext) {
            types.push(ext.to_string());
        }
    }
    types
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn non_empty_or(s: &str, fallback: &str) -> String {
    if s.is_empty() { fallback } else { s }.to_string()
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
