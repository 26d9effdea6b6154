//! Pure encodings shared by the Windows dialogs.
//!
//! Nothing here calls into the OS, so the flag arithmetic and buffer
//! formats are tested on every host.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use horizon_dialog_core::{FileFilter, FileSaveSettings, FileSelectionSettings};

// ============================================================================
// Common Dialog Flags
// ============================================================================

pub const OFN_OVERWRITEPROMPT: u32 = 0x0000_0002;
pub const OFN_NOCHANGEDIR: u32 = 0x0000_0008;
pub const OFN_ALLOWMULTISELECT: u32 = 0x0000_0200;
pub const OFN_PATHMUSTEXIST: u32 = 0x0000_0800;
pub const OFN_FILEMUSTEXIST: u32 = 0x0000_1000;
pub const OFN_CREATEPROMPT: u32 = 0x0000_2000;
pub const OFN_NOREADONLYRETURN: u32 = 0x0000_8000;
pub const OFN_EXPLORER: u32 = 0x0008_0000;
pub const OFN_FORCESHOWHIDDEN: u32 = 0x1000_0000;

pub fn save_flags(settings: &FileSaveSettings) -> u32 {
    let mut flags = OFN_NOCHANGEDIR | OFN_EXPLORER | OFN_PATHMUSTEXIST | OFN_NOREADONLYRETURN;
    if settings.confirm_overwrite {
        flags |= OFN_OVERWRITEPROMPT;
    }
    if settings.confirm_create {
        flags |= OFN_CREATEPROMPT;
    }
    if settings.file.show_hidden {
        flags |= OFN_FORCESHOWHIDDEN;
    }
    flags
}

pub fn open_flags(settings: &FileSelectionSettings) -> u32 {
    let mut flags = OFN_NOCHANGEDIR | OFN_EXPLORER | OFN_FILEMUSTEXIST;
    if settings.multiple {
        flags |= OFN_ALLOWMULTISELECT;
    }
    if settings.file.show_hidden {
        flags |= OFN_FORCESHOWHIDDEN;
    }
    flags
}

// ============================================================================
// Folder Picker Options
// ============================================================================

pub const FOS_NOCHANGEDIR: u32 = 0x0000_0008;
pub const FOS_PICKFOLDERS: u32 = 0x0000_0020;
pub const FOS_FORCEFILESYSTEM: u32 = 0x0000_0040;
pub const FOS_ALLOWMULTISELECT: u32 = 0x0000_0200;
pub const FOS_FORCESHOWHIDDEN: u32 = 0x1000_0000;

/// Folder picker options added to whatever the dialog already has set.
pub fn folder_options(current: u32, multiple: bool, show_hidden: bool) -> u32 {
    let mut options = current | FOS_NOCHANGEDIR | FOS_PICKFOLDERS | FOS_FORCEFILESYSTEM;
    if multiple {
        options |= FOS_ALLOWMULTISELECT;
    }
    if show_hidden {
        options |= FOS_FORCESHOWHIDDEN;
    }
    options
}

/// `HRESULT_FROM_WIN32(ERROR_CANCELLED)`, returned when the user cancels.
pub const HRESULT_CANCELLED: u32 = 0x8007_04C7;

/// COM was already initialized with another threading model.
pub const RPC_E_CHANGED_MODE: u32 = 0x8001_0106;

// ============================================================================
// Buffers
// ============================================================================

/// NUL-terminated UTF-16.
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decode up to the first NUL.
pub fn from_wide(buf: &[u16]) -> String {
    let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..end])
}

/// Filter list: `name\0pattern;pattern;\0` per filter, closed by an extra NUL.
///
/// Returns an empty buffer when there are no filters.
pub fn encode_filters(filters: &[FileFilter]) -> Vec<u16> {
    let mut out = String::new();
    for filter in filters {
        out.push_str(filter.name_or_empty());
        out.push('\0');
        for pattern in &filter.patterns {
            out.push_str(pattern);
            out.push(';');
        }
        out.push('\0');
    }
    if !out.is_empty() {
        out.push('\0');
    }
    out.encode_utf16().collect()
}

/// Split a multi-select result buffer.
///
/// A single selection is one NUL-terminated path. Several selections are
/// the directory followed by the leaf names, closed by a double NUL.
pub fn split_selection(buf: &[u16]) -> Vec<String> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (idx, &c) in buf.iter().enumerate() {
        if c != 0 {
            continue;
        }
        if idx == start {
            break;
        }
        parts.push(String::from_utf16_lossy(&buf[start..idx]));
        start = idx + 1;
    }

    match parts.len() {
        0 | 1 => parts,
        _ => {
            let dir = parts.remove(0);
            parts
                .into_iter()
                .map(|leaf| join_windows(&dir, &leaf))
                .collect()
        }
    }
}

fn join_windows(dir: &str, leaf: &str) -> String {
    if dir.ends_with(['\\', '/']) {
        format!("{dir}{leaf}")
    } else {
        format!("{dir}\\{leaf}")
    }
}

static FORBIDDEN_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("filename pattern is valid"));

/// Replace characters Windows forbids in file names with `-`.
pub fn sanitize_filename(filename: &str) -> String {
    FORBIDDEN_FILENAME_CHARS.replace_all(filename, "-").into_owned()
}

/// Default extension taken from the requested file name, without the dot.
pub fn default_extension(filename: &str) -> Option<&str> {
    let (stem, ext) = filename.rsplit_once('.')?;
    (!stem.is_empty() && !ext.is_empty() && !ext.contains(['/', '\\'])).then_some(ext)
}

/// Initial directory for a dialog: absolute, with backslash separators.
pub fn native_root(root: &Path) -> String {
    let absolute = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
    absolute.to_string_lossy().replace('/', "\\")
}

/// Copy `value` into a fixed-size UTF-16 field, truncating and keeping
/// the final NUL.
pub fn fill_wide(field: &mut [u16], value: &str) {
    let Some(capacity) = field.len().checked_sub(1) else {
        return;
    };
    let mut written = 0;
    for (slot, unit) in field.iter_mut().zip(value.encode_utf16().take(capacity)) {
        *slot = unit;
        written += 1;
    }
    field[written..].fill(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_save_flags() {
        let plain = save_flags(&FileSaveSettings::default());
        assert_eq!(plain, 0x0008_8808);

        let all = save_flags(
            &FileSaveSettings::default()
                .confirm_overwrite(true)
                .confirm_create(true)
                .show_hidden(true),
        );
        assert_eq!(all, plain | OFN_OVERWRITEPROMPT | OFN_CREATEPROMPT | OFN_FORCESHOWHIDDEN);
    }

    #[test]
    fn test_open_flags() {
        let flags = open_flags(&FileSelectionSettings::default().multiple(true));
        assert_eq!(flags, OFN_NOCHANGEDIR | OFN_EXPLORER | OFN_FILEMUSTEXIST | OFN_ALLOWMULTISELECT);
    }

    #[test]
    fn test_folder_options_keep_existing_bits() {
        assert_eq!(folder_options(0, false, false), 0x68);
        assert_eq!(folder_options(0x4, true, true), 0x4 | 0x68 | 0x200 | 0x1000_0000);
    }

    #[test]
    fn test_encode_filters() {
        let encoded = encode_filters(&[
            FileFilter::new("mp3", &["*.mp3", "*.jpg"]),
            FileFilter::unnamed(&["*.*"]),
        ]);
        assert_eq!(encoded, wide("mp3\0*.mp3;*.jpg;\0\0*.*;\0\0"));
        assert!(encode_filters(&[]).is_empty());
    }

    #[test]
    fn test_split_single_selection() {
        let buf = wide("C:\\data\\a.txt\0\0\0\0");
        assert_eq!(split_selection(&buf), vec!["C:\\data\\a.txt"]);
    }

    #[test]
    fn test_split_multi_selection() {
        let buf = wide("C:\\data\0a.txt\0b.txt\0\0garbage");
        assert_eq!(split_selection(&buf), vec!["C:\\data\\a.txt", "C:\\data\\b.txt"]);

        let root = wide("C:\\\0a.txt\0b.txt\0\0");
        assert_eq!(split_selection(&root), vec!["C:\\a.txt", "C:\\b.txt"]);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename(r#"a<b>c:d"e/f\g|h?i*j.txt"#), "a-b-c-d-e-f-g-h-i-j.txt");
    }

    #[test]
    fn test_default_extension() {
        assert_eq!(default_extension("song.mp3"), Some("mp3"));
        assert_eq!(default_extension("archive.tar.gz"), Some("gz"));
        assert_eq!(default_extension(".hidden"), None);
        assert_eq!(default_extension("noext"), None);
    }

    #[test]
    fn test_fill_wide_truncates() {
        let mut field = [0xFFFFu16; 4];
        fill_wide(&mut field, "abcdef");
        assert_eq!(field, [97, 98, 99, 0]);
        fill_wide(&mut field, "z");
        assert_eq!(field, [122, 0, 0, 0]);
    }

    #[test]
    fn test_native_root_is_absolute_with_backslashes() {
        let root = native_root(Path::new("some/dir"));
        assert!(!root.contains('/'));
        assert!(root.ends_with("some\\dir"));
        assert!(root.len() > "some\\dir".len());
    }

    #[test]
    fn test_wide_round_trip() {
        assert_eq!(from_wide(&to_wide("Grüße")), "Grüße");
    }
}
