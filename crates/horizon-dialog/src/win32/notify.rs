//! Tray balloon notifications.

use std::mem::size_of;

use windows::{
    Win32::Foundation::*, Win32::System::RemoteDesktop::*, Win32::UI::Shell::*,
    Win32::UI::WindowsAndMessaging::*, core::*,
};

use horizon_dialog_core::{
    DialogError, DialogIcon, NotificationSettings, Result, WindowsConfig, logging::targets,
};

use super::encode::{fill_wide, to_wide};

/// Identifier of our (hidden) tray icon.
const TRAY_ICON_ID: u32 = 0x378e_b49c;
const DEFAULT_TITLE: &str = "Notification";

pub fn show(settings: &NotificationSettings, config: &WindowsConfig) -> Result<()> {
    let mut data = NOTIFYICONDATAW {
        cbSize: size_of::<NOTIFYICONDATAW>() as u32,
        uID: TRAY_ICON_ID,
        uFlags: NIF_INFO,
        dwState: NIS_HIDDEN,
        dwInfoFlags: balloon_icon(settings.general.window_icon),
        ..Default::default()
    };
    fill_wide(&mut data.szInfo, &settings.text);
    fill_wide(&mut data.szInfoTitle, &settings.general.title);

    let added = unsafe { Shell_NotifyIconW(NIM_ADD, &data) };
    if !added.as_bool() {
        let error = unsafe { GetLastError() };
        if error.0 == 0 {
            tracing::debug!(
                target: targets::WINDOWS,
                "balloon notifications unsupported, sending session message"
            );
            return session_message(settings, config);
        }
        return Err(DialogError::native("shell.Shell_NotifyIconW", error.0));
    }

    let _ = unsafe { Shell_NotifyIconW(NIM_DELETE, &data) };
    Ok(())
}

fn balloon_icon(icon: DialogIcon) -> NOTIFY_ICON_INFOTIP_FLAGS {
    match icon {
        DialogIcon::Info => NIIF_INFO,
        DialogIcon::Warning => NIIF_WARNING,
        DialogIcon::Error => NIIF_ERROR,
        DialogIcon::Undefined | DialogIcon::Question => NIIF_NONE,
    }
}

fn message_box_icon(icon: DialogIcon) -> MESSAGEBOX_STYLE {
    match icon {
        DialogIcon::Error => MB_ICONERROR,
        DialogIcon::Question => MB_ICONQUESTION,
        DialogIcon::Warning => MB_ICONWARNING,
        DialogIcon::Info => MB_ICONINFORMATION,
        DialogIcon::Undefined => MESSAGEBOX_STYLE(0),
    }
}

/// Broadcast the text as a message box in the current session.
fn session_message(settings: &NotificationSettings, config: &WindowsConfig) -> Result<()> {
    let title = if settings.general.title.is_empty() {
        DEFAULT_TITLE
    } else {
        &settings.general.title
    };
    let title = to_wide(title);
    let text = to_wide(&settings.text);
    let timeout = config.notification_timeout().as_secs().min(u32::MAX as u64) as u32;
    let mut response = MESSAGEBOX_RESULT(0);

    unsafe {
        WTSSendMessageW(
            WTS_CURRENT_SERVER_HANDLE,
            WTS_CURRENT_SESSION,
            PCWSTR(title.as_ptr()),
            (title.len() * 2) as u32,
            PCWSTR(text.as_ptr()),
            (text.len() * 2) as u32,
            message_box_icon(settings.general.window_icon),
            timeout,
            &mut response,
            BOOL::from(false),
        )
    }
    .map_err(|e| DialogError::native("wts.WTSSendMessageW", e.code().0 as u32))
}
