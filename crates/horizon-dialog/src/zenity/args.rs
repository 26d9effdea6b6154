//! Argument vectors for zenity-compatible tools.

use horizon_dialog_core::codec::encode_extra_buttons;
use horizon_dialog_core::{
    ButtonSettings, DialogIcon, EntrySettings, FileFilter, FileSaveSettings,
    FileSelectionSettings, GeneralSettings, MessageSettings, MessageStyle, NotificationSettings,
    OptionsSettings, TextSettings, ValidationError,
};

/// Separator for multi-value output. argv cannot carry NUL, so path lists
/// use the record separator as well.
pub const SEPARATOR: &str = "\x1e";

/// `--file-filter` flags, one per filter.
///
/// Every pattern is followed by a space: `Name|*.a *.b `.
pub fn filter_args(filters: &[FileFilter]) -> Vec<String> {
    filters
        .iter()
        .map(|filter| {
            let mut flag = String::from("--file-filter=");
            if let Some(name) = filter.name.as_deref().filter(|n| !n.is_empty()) {
                flag.push_str(name);
                flag.push('|');
            }
            for pattern in &filter.patterns {
                flag.push_str(pattern);
                flag.push(' ');
            }
            flag
        })
        .collect()
}

pub fn message_args(settings: &MessageSettings) -> Result<Vec<String>, ValidationError> {
    let mut args = vec![
        match settings.style {
            MessageStyle::Question => "--question",
            MessageStyle::Info => "--info",
            MessageStyle::Warning => "--warning",
            MessageStyle::Error => "--error",
        }
        .to_string(),
    ];

    push_general(&mut args, &settings.general, true);
    push_text(&mut args, &settings.text.text);
    push_buttons(&mut args, &settings.buttons, settings.style.has_cancel())?;
    push_text_flags(&mut args, &settings.text, settings.buttons.default_cancel);

    if let Some(icon) = icon_name(settings.effective_icon()) {
        args.push(format!("--icon-name={icon}"));
    }

    Ok(args)
}

/// List dialog; the hidden first column holds the option index, which is
/// what the tool prints.
pub fn options_args(settings: &OptionsSettings) -> Result<Vec<String>, ValidationError> {
    let mut args: Vec<String> = [
        "--list",
        "--hide-header",
        "--column=id",
        "--column=",
        "--hide-column=1",
        "--print-column=1",
    ]
    .map(String::from)
    .to_vec();

    push_general(&mut args, &settings.general, true);
    push_text(&mut args, &settings.text.text);
    push_buttons(&mut args, &settings.buttons, true)?;
    push_text_flags(&mut args, &settings.text, settings.buttons.default_cancel);

    if settings.multiple {
        args.extend(["--multiple".into(), "--separator".into(), SEPARATOR.into()]);
    }

    for (idx, option) in settings.options.iter().enumerate() {
        args.push(idx.to_string());
        args.push(option.clone());
    }

    Ok(args)
}

pub fn entry_args(settings: &EntrySettings) -> Result<Vec<String>, ValidationError> {
    let mut args = vec!["--entry".to_string()];

    push_general(&mut args, &settings.general, true);
    push_text(&mut args, &settings.text.text);
    push_buttons(&mut args, &settings.buttons, true)?;
    push_text_flags(&mut args, &settings.text, settings.buttons.default_cancel);

    if !settings.default_entry.is_empty() {
        args.extend(["--entry-text".into(), settings.default_entry.clone()]);
    }
    if settings.hide_entry {
        args.push("--hide-text".into());
    }

    Ok(args)
}

/// Save dialog. The root directory is applied as the working directory of
/// the tool, so `--filename` stays relative to it.
pub fn file_save_args(settings: &FileSaveSettings) -> Vec<String> {
    let mut args = vec!["--file-selection".to_string(), "--save".to_string()];

    push_general(&mut args, &settings.general, false);

    if !settings.file.filename.is_empty() {
        args.extend(["--filename".into(), settings.file.filename.clone()]);
    }
    if settings.file.only_directories {
        args.push("--directory".into());
    }
    if settings.confirm_overwrite {
        args.push("--confirm-overwrite".into());
    }

    args.extend(filter_args(&settings.file.filters));
    args
}

pub fn file_selection_args(settings: &FileSelectionSettings) -> Vec<String> {
    let mut args = vec!["--file-selection".to_string()];

    push_general(&mut args, &settings.general, false);

    let file = &settings.file;
    if !file.filename.is_empty() || file.root.is_some() {
        let start = match &file.root {
            Some(root) => root.join(&file.filename),
            None => file.filename.clone().into(),
        };
        args.extend(["--filename".into(), start.to_string_lossy().into_owned()]);
    }
    if file.only_directories {
        args.push("--directory".into());
    }
    if settings.multiple {
        args.extend(["--multiple".into(), "--separator".into(), SEPARATOR.into()]);
    }

    args.extend(filter_args(&file.filters));
    args
}

pub fn notification_args(settings: &NotificationSettings) -> Vec<String> {
    let mut args = vec!["--notification".to_string()];

    push_general(&mut args, &settings.general, false);
    if !settings.text.is_empty() {
        push_text(&mut args, &settings.text);
    }

    args
}

fn push_general(args: &mut Vec<String>, general: &GeneralSettings, always_title: bool) {
    // The tool shows its own default title unless one is passed.
    if always_title || !general.title.is_empty() {
        args.extend(["--title".into(), general.title.clone()]);
    }
    if general.width > 0 {
        args.extend(["--width".into(), general.width.to_string()]);
    }
    if general.height > 0 {
        args.extend(["--height".into(), general.height.to_string()]);
    }
    if let Some(icon) = window_icon(general.window_icon) {
        args.push(format!("--window-icon={icon}"));
    }
}

fn push_text(args: &mut Vec<String>, text: &str) {
    args.extend(["--text".into(), text.to_string(), "--no-markup".into()]);
}

fn push_buttons(
    args: &mut Vec<String>,
    buttons: &ButtonSettings,
    has_cancel: bool,
) -> Result<(), ValidationError> {
    if !buttons.ok_label.is_empty() {
        args.extend(["--ok-label".into(), buttons.ok_label.clone()]);
    }
    if has_cancel && !buttons.cancel_label.is_empty() {
        args.extend(["--cancel-label".into(), buttons.cancel_label.clone()]);
    }
    for label in encode_extra_buttons(&buttons.extra_buttons)? {
        args.extend(["--extra-button".into(), label]);
    }
    Ok(())
}

fn push_text_flags(args: &mut Vec<String>, text: &TextSettings, default_cancel: bool) {
    if text.no_wrap {
        args.push("--no-wrap".into());
    }
    if text.ellipsize {
        args.push("--ellipsize".into());
    }
    if default_cancel {
        args.push("--default-cancel".into());
    }
}

fn window_icon(icon: DialogIcon) -> Option<&'static str> {
    match icon {
        DialogIcon::Undefined => None,
        DialogIcon::Error => Some("error"),
        DialogIcon::Warning => Some("warning"),
        DialogIcon::Info => Some("info"),
        DialogIcon::Question => Some("question"),
    }
}

fn icon_name(icon: DialogIcon) -> Option<&'static str> {
    match icon {
        DialogIcon::Undefined => None,
        DialogIcon::Error => Some("dialog-error"),
        DialogIcon::Warning => Some("dialog-warning"),
        DialogIcon::Info => Some("dialog-information"),
        DialogIcon::Question => Some("dialog-question"),
    }
}
