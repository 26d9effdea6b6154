//! File open/save through the common dialog box library.

use std::mem::size_of;

use windows::{Win32::UI::Controls::Dialogs::*, core::*};

use horizon_dialog_core::{
    Deadline, DialogError, FileResult, FileSaveSettings, FileSelectionSettings, FileSettings,
    Result, WindowsConfig, logging::targets, to_forward_slashes,
};

use super::encode::{
    default_extension, encode_filters, fill_wide, from_wide, native_root, open_flags,
    sanitize_filename, save_flags, split_selection, to_wide,
};
use super::hook::with_close_watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Save,
    Open { multiple: bool },
}

struct Request<'a> {
    title: &'a str,
    file: &'a FileSettings,
    flags: u32,
    mode: Mode,
}

pub fn save(
    settings: &FileSaveSettings,
    config: &WindowsConfig,
    deadline: Deadline,
) -> Result<FileResult> {
    let request = Request {
        title: &settings.general.title,
        file: &settings.file,
        flags: save_flags(settings),
        mode: Mode::Save,
    };
    run(&request, config, deadline)
}

pub fn open(
    settings: &FileSelectionSettings,
    config: &WindowsConfig,
    deadline: Deadline,
) -> Result<FileResult> {
    let request = Request {
        title: &settings.general.title,
        file: &settings.file,
        flags: open_flags(settings),
        mode: Mode::Open {
            multiple: settings.multiple,
        },
    };
    run(&request, config, deadline)
}

fn run(request: &Request<'_>, config: &WindowsConfig, deadline: Deadline) -> Result<FileResult> {
    let multiple = matches!(request.mode, Mode::Open { multiple: true });
    let capacity = config.max_path_chars + if multiple { config.multi_select_chars } else { 0 };

    let mut buffer = vec![0u16; capacity.max(1)];
    fill_wide(&mut buffer, &sanitize_filename(&request.file.filename));

    // Every buffer below must outlive the dialog call.
    let filters = encode_filters(&request.file.filters);
    let title = to_wide(request.title);
    let default_ext = default_extension(&request.file.filename).map(to_wide);
    let initial_dir = request.file.root.as_deref().map(|root| to_wide(&native_root(root)));

    let mut ofn = OPENFILENAMEW {
        lStructSize: size_of::<OPENFILENAMEW>() as u32,
        lpstrFile: PWSTR(buffer.as_mut_ptr()),
        nMaxFile: buffer.len() as u32,
        Flags: OPEN_FILENAME_FLAGS(request.flags),
        ..Default::default()
    };
    if !filters.is_empty() {
        ofn.lpstrFilter = PCWSTR(filters.as_ptr());
        ofn.nFilterIndex = 1;
    }
    if !request.title.is_empty() {
        ofn.lpstrTitle = PCWSTR(title.as_ptr());
    }
    if let Some(ext) = &default_ext {
        ofn.lpstrDefExt = PCWSTR(ext.as_ptr());
    }
    if let Some(dir) = &initial_dir {
        ofn.lpstrInitialDir = PCWSTR(dir.as_ptr());
    }

    tracing::debug!(
        target: targets::WINDOWS,
        mode = ?request.mode,
        flags = format_args!("{:#010x}", request.flags),
        "showing common file dialog"
    );

    let call = match request.mode {
        Mode::Save => "dialog.GetSaveFileNameW",
        Mode::Open { .. } => "dialog.GetOpenFileNameW",
    };
    let accepted = with_close_watch(deadline, || {
        let accepted = match request.mode {
            Mode::Save => unsafe { GetSaveFileNameW(&mut ofn) },
            Mode::Open { .. } => unsafe { GetOpenFileNameW(&mut ofn) },
        };
        Ok(accepted.as_bool())
    })?;

    if !accepted {
        let code = unsafe { CommDlgExtendedError() };
        if code.0 != 0 {
            return Err(DialogError::native(call, code.0));
        }
        return Ok(FileResult::canceled());
    }

    let paths = if multiple {
        split_selection(&buffer)
    } else {
        vec![from_wide(&buffer)]
    };
    Ok(FileResult::selected(paths.iter().map(|path| to_forward_slashes(path))))
}
