//! Folder selection through the shell item dialog.
//!
//! Falls back to `SHBrowseForFolderW` when the dialog object cannot be
//! created.

use std::path::Path;

use windows::{
    Win32::Foundation::*, Win32::System::Com::*, Win32::UI::Shell::*,
    Win32::UI::WindowsAndMessaging::*, core::*,
};

use horizon_dialog_core::{
    Deadline, FileResult, FileSettings, Result, logging::targets, to_forward_slashes,
};

use super::com::{ComApartment, display_path, hresult_error};
use super::encode::{HRESULT_CANCELLED, folder_options, from_wide, native_root, to_wide};
use super::hook::with_close_watch;
use super::items::collect_paths;

const BIF_RETURNONLYFSDIRS: u32 = 0x0001;
const BIF_NEWDIALOGSTYLE: u32 = 0x0040;
const BFFM_INITIALIZED: u32 = 1;
const BFFM_SETSELECTIONW: u32 = WM_USER + 103;

/// What to ask the folder picker for.
#[derive(Debug, Clone, Copy)]
pub struct FolderRequest<'a> {
    pub title: &'a str,
    pub file: &'a FileSettings,
    pub multiple: bool,
}

pub fn pick(request: FolderRequest<'_>, deadline: Deadline) -> Result<FileResult> {
    let _apartment = ComApartment::enter()?;

    let dialog: IFileOpenDialog =
        match unsafe { CoCreateInstance(&FileOpenDialog, None, CLSCTX_INPROC_SERVER) } {
            Ok(dialog) => dialog,
            Err(err) => {
                tracing::debug!(
                    target: targets::WINDOWS,
                    %err,
                    "folder dialog unavailable, using legacy browser"
                );
                return browse_legacy(request, deadline);
            }
        };

    let current = unsafe { dialog.GetOptions() }.map_err(|e| hresult_error("dialog.GetOptions", e))?;
    let options = folder_options(current.0, request.multiple, request.file.show_hidden);
    unsafe { dialog.SetOptions(FILEOPENDIALOGOPTIONS(options)) }
        .map_err(|e| hresult_error("dialog.SetOptions", e))?;

    if !request.title.is_empty() {
        let title = to_wide(request.title);
        unsafe { dialog.SetTitle(PCWSTR(title.as_ptr())) }
            .map_err(|e| hresult_error("dialog.SetTitle", e))?;
    }

    if let Some(root) = request.file.root.as_deref() {
        set_initial_folder(&dialog, root)?;
    }

    let shown = with_close_watch(deadline, || Ok(unsafe { dialog.Show(HWND::default()) }))?;
    if let Err(err) = shown {
        if err.code().0 as u32 == HRESULT_CANCELLED {
            return Ok(FileResult::canceled());
        }
        return Err(hresult_error("dialog.Show", err));
    }

    let paths = if request.multiple {
        let items = unsafe { dialog.GetResults() }.map_err(|e| hresult_error("dialog.GetResults", e))?;
        collect_paths(&items)?
    } else {
        let item = unsafe { dialog.GetResult() }.map_err(|e| hresult_error("dialog.GetResult", e))?;
        vec![to_forward_slashes(&display_path(&item)?)]
    };
    Ok(FileResult::selected(paths))
}

fn set_initial_folder(dialog: &IFileOpenDialog, root: &Path) -> Result<()> {
    let root = to_wide(&native_root(root));
    let item: IShellItem = unsafe { SHCreateItemFromParsingName(PCWSTR(root.as_ptr()), None) }
        .map_err(|e| hresult_error("shell.SHCreateItemFromParsingName", e))?;
    unsafe { dialog.SetFolder(&item) }.map_err(|e| hresult_error("dialog.SetFolder", e))
}

// ============================================================================
// Legacy Browser
// ============================================================================

fn browse_legacy(request: FolderRequest<'_>, deadline: Deadline) -> Result<FileResult> {
    let title = to_wide(request.title);
    let root = request.file.root.as_deref().map(|root| to_wide(&native_root(root)));
    let mut display = [0u16; MAX_PATH as usize];

    let info = BROWSEINFOW {
        pszDisplayName: PWSTR(display.as_mut_ptr()),
        lpszTitle: if request.title.is_empty() {
            PCWSTR::null()
        } else {
            PCWSTR(title.as_ptr())
        },
        ulFlags: BIF_RETURNONLYFSDIRS | BIF_NEWDIALOGSTYLE,
        lpfn: Some(browse_callback),
        lParam: LPARAM(root.as_ref().map_or(0, |r| r.as_ptr() as isize)),
        ..Default::default()
    };

    let pidl = with_close_watch(deadline, || Ok(unsafe { SHBrowseForFolderW(&info) }))?;
    if pidl.is_null() {
        return Ok(FileResult::canceled());
    }

    let mut path = [0u16; MAX_PATH as usize];
    let resolved = unsafe { SHGetPathFromIDListW(pidl, &mut path) }.as_bool();
    unsafe { CoTaskMemFree(Some(pidl as *const _)) };

    if !resolved {
        // Virtual folders have no filesystem path.
        return Ok(FileResult::canceled());
    }
    Ok(FileResult::selected([to_forward_slashes(&from_wide(&path))]))
}

unsafe extern "system" fn browse_callback(hwnd: HWND, msg: u32, _lparam: LPARAM, data: LPARAM) -> i32 {
    if msg == BFFM_INITIALIZED && data.0 != 0 {
        unsafe { SendMessageW(hwnd, BFFM_SETSELECTIONW, WPARAM(1), data) };
    }
    0
}
