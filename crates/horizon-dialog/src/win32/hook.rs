//! Window hook publishing modal dialog windows to a [`CloseWatcher`].
//!
//! The system dialogs run their own modal loop, so the only way to reach
//! their window is a thread-local `WH_CALLWNDPROCRET` hook that sees
//! `WM_INITDIALOG` on the dialog class. The hook publishes the handle to
//! the watcher, which asks the window to close when the deadline fires.

use std::cell::RefCell;
use std::ffi::c_void;

use windows::{
    Win32::Foundation::*, Win32::System::Threading::GetCurrentThreadId,
    Win32::UI::WindowsAndMessaging::*,
};

use horizon_dialog_core::{
    CloseWatcher, Deadline, Result, WindowHandle, WindowPublisher, logging::targets,
};

use super::com::hresult_error;

/// Window class of system dialog boxes.
const DIALOG_CLASS: &str = "#32770";

thread_local! {
    static PUBLISHER: RefCell<Option<WindowPublisher>> = const { RefCell::new(None) };
}

/// Installed hook; removed on drop.
pub struct DialogHook {
    hook: HHOOK,
}

impl DialogHook {
    pub fn install(publisher: WindowPublisher) -> Result<Self> {
        PUBLISHER.with(|slot| *slot.borrow_mut() = Some(publisher));
        let hook = unsafe {
            SetWindowsHookExW(WH_CALLWNDPROCRET, Some(hook_proc), None, GetCurrentThreadId())
        };
        match hook {
            Ok(hook) => Ok(Self { hook }),
            Err(err) => {
                PUBLISHER.with(|slot| slot.borrow_mut().take());
                Err(hresult_error("hook.SetWindowsHookExW", err))
            }
        }
    }
}

impl Drop for DialogHook {
    fn drop(&mut self) {
        let _ = unsafe { UnhookWindowsHookEx(self.hook) };
        PUBLISHER.with(|slot| slot.borrow_mut().take());
    }
}

unsafe extern "system" fn hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 && lparam.0 != 0 {
        let msg = unsafe { &*(lparam.0 as *const CWPRETSTRUCT) };
        if msg.message == WM_INITDIALOG && is_top_level_dialog(msg.hwnd) {
            let _ = unsafe { SetForegroundWindow(msg.hwnd) };
            PUBLISHER.with(|slot| {
                if let Some(publisher) = slot.borrow().as_ref() {
                    publisher.opened(WindowHandle(msg.hwnd.0 as isize));
                }
            });
        }
    }
    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}

fn is_top_level_dialog(hwnd: HWND) -> bool {
    let mut name = [0u16; 16];
    let len = unsafe { GetClassNameW(hwnd, &mut name) };
    if len <= 0 || String::from_utf16_lossy(&name[..len as usize]) != DIALOG_CLASS {
        return false;
    }
    let style = unsafe { GetWindowLongW(hwnd, GWL_STYLE) } as u32;
    style & WS_CHILD.0 == 0
}

/// Ask a window to close as if its close box was pressed.
pub fn close_window(window: WindowHandle) {
    let hwnd = HWND(window.0 as *mut c_void);
    if let Err(err) =
        unsafe { PostMessageW(hwnd, WM_SYSCOMMAND, WPARAM(SC_CLOSE as usize), LPARAM(0)) }
    {
        tracing::warn!(target: targets::WINDOWS, ?window, %err, "failed to close dialog window");
    }
}

/// Run a blocking system dialog on this thread with the hook installed.
///
/// When the deadline fires the dialog window is closed and the call
/// reports a timeout regardless of what the dialog returned.
pub fn with_close_watch<T>(deadline: Deadline, show: impl FnOnce() -> Result<T>) -> Result<T> {
    let watcher = CloseWatcher::spawn(deadline, close_window);
    let hook = DialogHook::install(watcher.publisher())?;
    let outcome = show();
    drop(hook);

    if watcher.finish().fired() {
        tracing::debug!(target: targets::WINDOWS, "dialog closed by deadline");
        return Err(deadline.timeout_error());
    }
    outcome
}
