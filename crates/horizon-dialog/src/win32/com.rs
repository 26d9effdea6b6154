//! COM apartment scope and shell item access.

use std::marker::PhantomData;

use windows::{
    Win32::System::Com::*, Win32::UI::Shell::*, core::*,
};

use horizon_dialog_core::{DialogError, Result, logging::targets};

use super::encode::RPC_E_CHANGED_MODE;
use super::items::ShellItems;

/// Convert a failed COM call into a dialog error carrying its HRESULT.
pub fn hresult_error(call: &'static str, err: Error) -> DialogError {
    DialogError::native(call, err.code().0 as u32)
}

/// Apartment-threaded COM for the current thread.
///
/// An apartment already initialized with another threading model is used
/// as is and left alone on drop.
pub struct ComApartment {
    initialized: bool,
    _not_send: PhantomData<*const ()>,
}

impl ComApartment {
    pub fn enter() -> Result<Self> {
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE) };
        let initialized = if hr.is_ok() {
            true
        } else if hr.0 as u32 == RPC_E_CHANGED_MODE {
            tracing::debug!(target: targets::WINDOWS, "COM already initialized in another mode");
            false
        } else {
            return Err(DialogError::native("com.CoInitializeEx", hr.0 as u32));
        };
        Ok(Self {
            initialized,
            _not_send: PhantomData,
        })
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        if self.initialized {
            unsafe { CoUninitialize() };
        }
    }
}

/// Filesystem path of a shell item.
pub fn display_path(item: &IShellItem) -> Result<String> {
    let raw = unsafe { item.GetDisplayName(SIGDN_FILESYSPATH) }
        .map_err(|e| hresult_error("item.GetDisplayName", e))?;
    let path = unsafe { raw.to_string() }
        .map_err(|_| DialogError::output("shell item path is not valid UTF-16"));
    unsafe { CoTaskMemFree(Some(raw.0 as *const _)) };
    path
}

impl ShellItems for IShellItemArray {
    fn count(&self) -> Result<u32> {
        unsafe { self.GetCount() }.map_err(|e| hresult_error("items.GetCount", e))
    }

    fn path_at(&self, index: u32) -> Result<String> {
        let item = unsafe { self.GetItemAt(index) }.map_err(|e| hresult_error("items.GetItemAt", e))?;
        display_path(&item)
    }
}
