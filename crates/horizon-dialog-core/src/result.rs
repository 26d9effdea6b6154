//! Outcome of a dialog.

/// Exit code an outer CLI uses for an elapsed deadline.
pub const TIMEOUT_EXIT_CODE: i32 = 5;

/// Which way the user left the dialog.
///
/// Exactly one state holds. A window closed without pressing a button is
/// [`ButtonResult::Canceled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonResult {
    /// The OK (or Yes) button.
    Ok,
    /// The cancel button, the close box or Escape.
    Canceled,
    /// The extra button with the given zero-based index.
    ExtraButton(usize),
}

impl ButtonResult {
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    pub fn is_canceled(self) -> bool {
        self == Self::Canceled
    }

    /// The extra button index, if one was pressed.
    pub fn extra_button(self) -> Option<usize> {
        match self {
            Self::ExtraButton(idx) => Some(idx),
            _ => None,
        }
    }

    /// Process exit code convention: 0 OK, 1 canceled, 2 extra button.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Canceled => 1,
            Self::ExtraButton(_) => 2,
        }
    }
}

/// Result of a message dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageResult {
    pub button: ButtonResult,
}

impl MessageResult {
    pub fn new(button: ButtonResult) -> Self {
        Self { button }
    }

    pub fn ok() -> Self {
        Self::new(ButtonResult::Ok)
    }

    pub fn canceled() -> Self {
        Self::new(ButtonResult::Canceled)
    }

    pub fn extra(index: usize) -> Self {
        Self::new(ButtonResult::ExtraButton(index))
    }
}

/// Result of an options dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsResult {
    pub button: ButtonResult,
    /// Selected option indices; only meaningful when `button` is OK.
    pub selection: Vec<usize>,
}

impl OptionsResult {
    /// An accepted selection.
    pub fn selected(selection: Vec<usize>) -> Self {
        Self {
            button: ButtonResult::Ok,
            selection,
        }
    }

    /// A result without a selection.
    pub fn without_selection(button: ButtonResult) -> Self {
        Self {
            button,
            selection: Vec::new(),
        }
    }

    pub fn canceled() -> Self {
        Self::without_selection(ButtonResult::Canceled)
    }

    pub fn extra(index: usize) -> Self {
        Self::without_selection(ButtonResult::ExtraButton(index))
    }
}

/// Result of an entry dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryResult {
    pub button: ButtonResult,
    /// The entered text; empty unless `button` is OK.
    pub text: String,
}

impl EntryResult {
    pub fn entered(text: impl Into<String>) -> Self {
        Self {
            button: ButtonResult::Ok,
            text: text.into(),
        }
    }

    pub fn without_text(button: ButtonResult) -> Self {
        Self {
            button,
            text: String::new(),
        }
    }

    pub fn canceled() -> Self {
        Self::without_text(ButtonResult::Canceled)
    }
}

/// Result of a file dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    pub button: ButtonResult,
    /// Selected paths in the order the backend returned them.
    pub paths: Vec<String>,
}

impl FileResult {
    /// Accepted paths.
    pub fn selected<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            button: ButtonResult::Ok,
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn canceled() -> Self {
        Self {
            button: ButtonResult::Canceled,
            paths: Vec::new(),
        }
    }
}

/// Replace backslash separators with forward slashes.
pub fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ButtonResult::Ok.exit_code(), 0);
        assert_eq!(ButtonResult::Canceled.exit_code(), 1);
        assert_eq!(ButtonResult::ExtraButton(3).exit_code(), 2);
        assert_ne!(TIMEOUT_EXIT_CODE, ButtonResult::ExtraButton(0).exit_code());
    }

    #[test]
    fn test_extra_button_index() {
        assert_eq!(ButtonResult::ExtraButton(1).extra_button(), Some(1));
        assert_eq!(ButtonResult::Ok.extra_button(), None);
        assert!(MessageResult::canceled().button.is_canceled());
    }

    #[test]
    fn test_forward_slashes() {
        assert_eq!(to_forward_slashes(r"C:\Users\me\a.txt"), "C:/Users/me/a.txt");
        assert_eq!(to_forward_slashes("/already/fine"), "/already/fine");
    }
}
