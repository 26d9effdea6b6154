//! The custom modal dialog used for messages, entries and option lists.
//!
//! The dialog is created from an in-memory template and runs the system's
//! modal loop on the calling thread. State for the running dialog lives in
//! a thread local, so the dialog procedure needs no window user data.

use std::cell::RefCell;

use windows::{
    Win32::Foundation::*, Win32::System::LibraryLoader::GetModuleHandleW,
    Win32::UI::WindowsAndMessaging::*, core::*,
};

use horizon_dialog_core::{ButtonResult, Deadline, DialogError, DialogIcon, Result, logging::targets};

use super::com::hresult_error;
use super::encode::{from_wide, to_wide};
use super::layout::{
    Body, DialogEnd, DialogLayout, ID_EDIT, ID_ICON, ID_LIST, IDOK, TIMED_OUT_CODE, is_button_id,
};
use super::template::DialogTemplate;

const DEADLINE_TIMER: usize = 1;
const LB_ERR: isize = -1;

/// What the user left in the dialog when it closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub button: ButtonResult,
    /// Entry text, collected when OK was pressed.
    pub text: String,
    /// Selected rows, collected when OK was pressed.
    pub selection: Vec<usize>,
}

struct Session {
    layout: DialogLayout,
    timeout_ms: Option<u32>,
    text: String,
    selection: Vec<usize>,
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

/// Show the dialog and block until it ends.
pub fn run(layout: DialogLayout, deadline: Deadline) -> Result<Response> {
    let template = DialogTemplate::build(&layout).to_aligned();
    let timeout_ms = deadline
        .remaining()
        .map(|left| u32::try_from(left.as_millis()).unwrap_or(u32::MAX).max(1));

    let instance: HINSTANCE = unsafe { GetModuleHandleW(None) }
        .map_err(|e| hresult_error("module.GetModuleHandleW", e))?
        .into();

    SESSION.with(|slot| {
        *slot.borrow_mut() = Some(Session {
            layout,
            timeout_ms,
            text: String::new(),
            selection: Vec::new(),
        })
    });

    let code = unsafe {
        DialogBoxIndirectParamW(
            instance,
            template.as_ptr() as *const DLGTEMPLATE,
            HWND::default(),
            Some(dialog_proc),
            LPARAM(0),
        )
    };
    let last_error = unsafe { GetLastError() };
    let session = SESSION.with(|slot| slot.borrow_mut().take());

    tracing::debug!(target: targets::WINDOWS, code, "custom dialog ended");

    match DialogEnd::from_code(code) {
        Some(DialogEnd::TimedOut) => Err(deadline.timeout_error()),
        Some(DialogEnd::Button(button)) => {
            let (text, selection) = session
                .map(|s| (s.text, s.selection))
                .unwrap_or_default();
            Ok(Response {
                button,
                text,
                selection,
            })
        }
        None => Err(DialogError::native("dialog.DialogBoxIndirectParamW", last_error.0)),
    }
}

unsafe extern "system" fn dialog_proc(hwnd: HWND, msg: u32, wparam: WPARAM, _lparam: LPARAM) -> isize {
    match msg {
        WM_INITDIALOG => {
            SESSION.with(|slot| {
                if let Some(session) = slot.borrow().as_ref() {
                    unsafe { init_dialog(hwnd, session) };
                }
            });
            1
        }
        WM_COMMAND => {
            let id = (wparam.0 & 0xFFFF) as u16;
            let notification = ((wparam.0 >> 16) & 0xFFFF) as u32;
            let confirm = id == ID_LIST && notification == LBN_DBLCLK;
            if !is_button_id(id) && !confirm {
                return 0;
            }
            let end = if confirm { IDOK } else { id };
            if end == IDOK {
                unsafe { collect(hwnd) };
            }
            let _ = unsafe { EndDialog(hwnd, end as isize) };
            1
        }
        WM_TIMER if wparam.0 == DEADLINE_TIMER => {
            let _ = unsafe { KillTimer(hwnd, DEADLINE_TIMER) };
            let _ = unsafe { EndDialog(hwnd, TIMED_OUT_CODE) };
            1
        }
        _ => 0,
    }
}

unsafe fn init_dialog(hwnd: HWND, session: &Session) {
    if let Some(icon) = system_icon(session.layout.icon) {
        if let Ok(hicon) = unsafe { LoadIconW(None, icon) } {
            unsafe {
                SendDlgItemMessageW(
                    hwnd,
                    ID_ICON as i32,
                    STM_SETICON,
                    WPARAM(hicon.0 as usize),
                    LPARAM(0),
                )
            };
        }
    }

    match &session.layout.body {
        Body::Message => {}
        Body::Entry { initial } => {
            let text = to_wide(initial);
            let _ = unsafe { SetDlgItemTextW(hwnd, ID_EDIT as i32, PCWSTR(text.as_ptr())) };
        }
        Body::List {
            items,
            selected,
            multiple,
        } => {
            for item in items {
                let text = to_wide(item);
                unsafe {
                    SendDlgItemMessageW(
                        hwnd,
                        ID_LIST as i32,
                        LB_ADDSTRING,
                        WPARAM(0),
                        LPARAM(text.as_ptr() as isize),
                    )
                };
            }
            for &row in selected {
                if *multiple {
                    unsafe {
                        SendDlgItemMessageW(hwnd, ID_LIST as i32, LB_SETSEL, WPARAM(1), LPARAM(row as isize))
                    };
                } else {
                    unsafe {
                        SendDlgItemMessageW(hwnd, ID_LIST as i32, LB_SETCURSEL, WPARAM(row), LPARAM(0))
                    };
                }
            }
        }
    }

    if let Some(ms) = session.timeout_ms {
        unsafe { SetTimer(hwnd, DEADLINE_TIMER, ms, None) };
    }
    let _ = unsafe { SetForegroundWindow(hwnd) };
}

/// Read the entry text or list selection into the session.
unsafe fn collect(hwnd: HWND) {
    SESSION.with(|slot| {
        let mut slot = slot.borrow_mut();
        let Some(session) = slot.as_mut() else {
            return;
        };
        match &session.layout.body {
            Body::Message => {}
            Body::Entry { .. } => {
                let len = unsafe {
                    SendDlgItemMessageW(hwnd, ID_EDIT as i32, WM_GETTEXTLENGTH, WPARAM(0), LPARAM(0))
                };
                let mut buf = vec![0u16; len.0.max(0) as usize + 1];
                unsafe { GetDlgItemTextW(hwnd, ID_EDIT as i32, &mut buf) };
                session.text = from_wide(&buf);
            }
            Body::List { multiple: true, .. } => {
                let count = unsafe {
                    SendDlgItemMessageW(hwnd, ID_LIST as i32, LB_GETSELCOUNT, WPARAM(0), LPARAM(0))
                };
                if count.0 > 0 {
                    let mut rows = vec![0i32; count.0 as usize];
                    let got = unsafe {
                        SendDlgItemMessageW(
                            hwnd,
                            ID_LIST as i32,
                            LB_GETSELITEMS,
                            WPARAM(rows.len()),
                            LPARAM(rows.as_mut_ptr() as isize),
                        )
                    };
                    rows.truncate(got.0.max(0) as usize);
                    session.selection = rows.into_iter().map(|row| row as usize).collect();
                }
            }
            Body::List { multiple: false, .. } => {
                let row = unsafe {
                    SendDlgItemMessageW(hwnd, ID_LIST as i32, LB_GETCURSEL, WPARAM(0), LPARAM(0))
                };
                if row.0 != LB_ERR {
                    session.selection = vec![row.0 as usize];
                }
            }
        }
    });
}

fn system_icon(icon: DialogIcon) -> Option<PCWSTR> {
    match icon {
        DialogIcon::Undefined => None,
        DialogIcon::Error => Some(IDI_ERROR),
        DialogIcon::Warning => Some(IDI_WARNING),
        DialogIcon::Info => Some(IDI_INFORMATION),
        DialogIcon::Question => Some(IDI_QUESTION),
    }
}
