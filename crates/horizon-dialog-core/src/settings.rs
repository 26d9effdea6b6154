//! Plain data describing a dialog.
//!
//! Every dialog kind composes the shared building blocks
//! ([`GeneralSettings`], [`TextSettings`], [`ButtonSettings`],
//! [`FileSettings`]) and adds its own fields. The structs only carry data;
//! validation happens in [`crate::validate`] and rendering in the backends.

use std::path::PathBuf;

// ============================================================================
// Shared Types
// ============================================================================

/// Icon shown in a dialog or its window decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogIcon {
    /// No explicit icon; the backend picks.
    #[default]
    Undefined,
    /// Error icon.
    Error,
    /// Warning icon.
    Warning,
    /// Information icon.
    Info,
    /// Question icon.
    Question,
}

impl DialogIcon {
    /// Whether an explicit icon was requested.
    pub fn is_defined(self) -> bool {
        self != Self::Undefined
    }
}

/// Style of a message dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageStyle {
    /// Informational message with a single OK button.
    #[default]
    Info,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Question with Yes/No buttons.
    Question,
}

impl MessageStyle {
    /// The icon implied by this style.
    pub fn default_icon(self) -> DialogIcon {
        match self {
            Self::Info => DialogIcon::Info,
            Self::Warning => DialogIcon::Warning,
            Self::Error => DialogIcon::Error,
            Self::Question => DialogIcon::Question,
        }
    }

    /// Whether the style shows a cancel button.
    pub fn has_cancel(self) -> bool {
        self == Self::Question
    }
}

/// How an options dialog presents its choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionsStyle {
    /// A selectable list.
    #[default]
    List,
    /// One button per option (single selection only).
    Buttons,
}

/// Title, size and window icon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneralSettings {
    /// Window title.
    pub title: String,
    /// Width in pixels; 0 uses the backend default.
    pub width: u32,
    /// Height in pixels; 0 uses the backend default.
    pub height: u32,
    /// Icon of the window decoration.
    pub window_icon: DialogIcon,
}

/// Button labels and extra buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonSettings {
    /// Label of the OK button; empty uses the backend default.
    pub ok_label: String,
    /// Label of the cancel button; empty uses the backend default.
    pub cancel_label: String,
    /// Make the cancel button the default (focused) button.
    pub default_cancel: bool,
    /// Additional buttons, reported as `ExtraButton(index)`.
    pub extra_buttons: Vec<String>,
}

/// Body text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSettings {
    /// The text.
    pub text: String,
    /// Do not wrap the text.
    pub no_wrap: bool,
    /// Ellipsize the text if it does not fit.
    pub ellipsize: bool,
}

/// File name filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    /// Display name of the filter.
    pub name: Option<String>,
    /// Glob patterns, e.g. `*.mp3`.
    pub patterns: Vec<String>,
}

impl FileFilter {
    /// Create a named filter.
    pub fn new(name: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            name: Some(name.into()),
            patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    /// Create an unnamed filter.
    pub fn unnamed(patterns: &[&str]) -> Self {
        Self {
            name: None,
            patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    /// Parse the `Name|*.a *.b` notation.
    ///
    /// The name part is optional; patterns are separated by spaces.
    pub fn parse(text: &str) -> Self {
        let (name, patterns) = match text.split_once('|') {
            Some((name, rest)) => (Some(name.to_string()), rest),
            None => (None, text),
        };

        Self {
            name,
            patterns: patterns
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }

    /// The display name or an empty string.
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// File location and filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    /// Initial directory.
    pub root: Option<PathBuf>,
    /// Default file name.
    pub filename: String,
    /// Filters offered to the user.
    pub filters: Vec<FileFilter>,
    /// Show hidden files.
    pub show_hidden: bool,
    /// Select directories instead of files.
    pub only_directories: bool,
}

// ============================================================================
// Per-Kind Settings
// ============================================================================

/// A message box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageSettings {
    pub general: GeneralSettings,
    pub text: TextSettings,
    pub buttons: ButtonSettings,
    pub style: MessageStyle,
    /// Overrides the icon implied by `style`.
    pub icon: DialogIcon,
}

impl MessageSettings {
    /// Create a message with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        let mut settings = Self::default();
        settings.text.text = text.into();
        settings
    }

    /// Set the style.
    pub fn style(mut self, style: MessageStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the icon.
    pub fn icon(mut self, icon: DialogIcon) -> Self {
        self.icon = icon;
        self
    }

    /// The icon to show: the explicit icon if set, else the style's.
    pub fn effective_icon(&self) -> DialogIcon {
        if self.icon.is_defined() {
            self.icon
        } else {
            self.style.default_icon()
        }
    }
}

/// A selection among a list of options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsSettings {
    pub general: GeneralSettings,
    pub text: TextSettings,
    pub buttons: ButtonSettings,
    /// The options to choose from.
    pub options: Vec<String>,
    /// Indices selected by default.
    pub default_options: Vec<usize>,
    pub style: OptionsStyle,
    /// Allow selecting more than one option.
    pub multiple: bool,
}

impl OptionsSettings {
    /// Create an options dialog.
    pub fn new<I, S>(text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut settings = Self::default();
        settings.text.text = text.into();
        settings.options = options.into_iter().map(Into::into).collect();
        settings
    }

    /// Set the presentation style.
    pub fn style(mut self, style: OptionsStyle) -> Self {
        self.style = style;
        self
    }

    /// Allow multiple selection.
    pub fn multiple(mut self, allow: bool) -> Self {
        self.multiple = allow;
        self
    }

    /// Add a default-selected option index.
    pub fn default_option(mut self, index: usize) -> Self {
        self.default_options.push(index);
        self
    }

    /// Whether the dialog is rendered as a message with one button per option.
    pub fn renders_as_buttons(&self) -> bool {
        self.style == OptionsStyle::Buttons && !self.multiple
    }

    /// The last default option if it is a valid index.
    pub fn primary_default(&self) -> Option<usize> {
        self.default_options
            .last()
            .copied()
            .filter(|&idx| idx < self.options.len())
    }
}

/// A single-line text entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySettings {
    pub general: GeneralSettings,
    pub text: TextSettings,
    pub buttons: ButtonSettings,
    pub icon: DialogIcon,
    /// Initial content of the entry field.
    pub default_entry: String,
    /// Mask the entered text.
    pub hide_entry: bool,
}

impl EntrySettings {
    /// Create an entry dialog.
    pub fn new(text: impl Into<String>) -> Self {
        let mut settings = Self::default();
        settings.text.text = text.into();
        settings
    }

    /// Set the initial entry text.
    pub fn default_entry(mut self, entry: impl Into<String>) -> Self {
        self.default_entry = entry.into();
        self
    }

    /// Mask the entered text.
    pub fn hide_entry(mut self, hide: bool) -> Self {
        self.hide_entry = hide;
        self
    }

    /// Set the icon.
    pub fn icon(mut self, icon: DialogIcon) -> Self {
        self.icon = icon;
        self
    }
}

/// A desktop notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSettings {
    pub general: GeneralSettings,
    pub text: String,
}

impl NotificationSettings {
    /// Create a notification.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// A file save dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSaveSettings {
    pub general: GeneralSettings,
    pub file: FileSettings,
    /// Ask before overwriting an existing file.
    pub confirm_overwrite: bool,
    /// Ask before creating a new file.
    pub confirm_create: bool,
}

impl FileSaveSettings {
    /// Ask before overwriting.
    pub fn confirm_overwrite(mut self, confirm: bool) -> Self {
        self.confirm_overwrite = confirm;
        self
    }

    /// Ask before creating.
    pub fn confirm_create(mut self, confirm: bool) -> Self {
        self.confirm_create = confirm;
        self
    }
}

/// A file open dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelectionSettings {
    pub general: GeneralSettings,
    pub file: FileSettings,
    /// Allow selecting more than one path.
    pub multiple: bool,
}

impl FileSelectionSettings {
    /// Allow multiple selection.
    pub fn multiple(mut self, allow: bool) -> Self {
        self.multiple = allow;
        self
    }
}

// ============================================================================
// Shared Builders
// ============================================================================

macro_rules! impl_general_builders {
    ($($ty:ty),* $(,)?) => {$(
        impl $ty {
            /// Set the window title.
            pub fn title(mut self, title: impl Into<String>) -> Self {
                self.general.title = title.into();
                self
            }

            /// Set the window size; 0 keeps the backend default.
            pub fn size(mut self, width: u32, height: u32) -> Self {
                self.general.width = width;
                self.general.height = height;
                self
            }

            /// Set the window icon.
            pub fn window_icon(mut self, icon: DialogIcon) -> Self {
                self.general.window_icon = icon;
                self
            }
        }
    )*};
}

macro_rules! impl_button_builders {
    ($($ty:ty),* $(,)?) => {$(
        impl $ty {
            /// Set the OK button label.
            pub fn ok_label(mut self, label: impl Into<String>) -> Self {
                self.buttons.ok_label = label.into();
                self
            }

            /// Set the cancel button label.
            pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
                self.buttons.cancel_label = label.into();
                self
            }

            /// Make the cancel button the default button.
            pub fn default_cancel(mut self, default_cancel: bool) -> Self {
                self.buttons.default_cancel = default_cancel;
                self
            }

            /// Append an extra button.
            pub fn extra_button(mut self, label: impl Into<String>) -> Self {
                self.buttons.extra_buttons.push(label.into());
                self
            }

            /// Disable text wrapping.
            pub fn no_wrap(mut self, no_wrap: bool) -> Self {
                self.text.no_wrap = no_wrap;
                self
            }

            /// Ellipsize overlong text.
            pub fn ellipsize(mut self, ellipsize: bool) -> Self {
                self.text.ellipsize = ellipsize;
                self
            }
        }
    )*};
}

macro_rules! impl_file_builders {
    ($($ty:ty),* $(,)?) => {$(
        impl $ty {
            /// Set the initial directory.
            pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
                self.file.root = Some(root.into());
                self
            }

            /// Set the default file name.
            pub fn filename(mut self, filename: impl Into<String>) -> Self {
                self.file.filename = filename.into();
                self
            }

            /// Add a filter.
            pub fn filter(mut self, filter: FileFilter) -> Self {
                self.file.filters.push(filter);
                self
            }

            /// Show hidden files.
            pub fn show_hidden(mut self, show: bool) -> Self {
                self.file.show_hidden = show;
                self
            }

            /// Select directories instead of files.
            pub fn only_directories(mut self, only: bool) -> Self {
                self.file.only_directories = only;
                self
            }
        }
    )*};
}

impl_general_builders!(
    MessageSettings,
    OptionsSettings,
    EntrySettings,
    NotificationSettings,
    FileSaveSettings,
    FileSelectionSettings,
);
impl_button_builders!(MessageSettings, OptionsSettings, EntrySettings);
impl_file_builders!(FileSaveSettings, FileSelectionSettings);

static_assertions::assert_impl_all!(MessageSettings: Send, Sync);
static_assertions::assert_impl_all!(OptionsSettings: Send, Sync);
static_assertions::assert_impl_all!(EntrySettings: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_icon_prefers_explicit_icon() {
        let msg = MessageSettings::new("hi").style(MessageStyle::Warning);
        assert_eq!(msg.effective_icon(), DialogIcon::Warning);

        let msg = msg.icon(DialogIcon::Error);
        assert_eq!(msg.effective_icon(), DialogIcon::Error);
    }

    #[test]
    fn test_filter_parse() {
        let filter = FileFilter::parse("Music|*.mp3 *.ogg");
        assert_eq!(filter.name.as_deref(), Some("Music"));
        assert_eq!(filter.patterns, vec!["*.mp3", "*.ogg"]);

        let filter = FileFilter::parse(" *.txt ");
        assert_eq!(filter.name, None);
        assert_eq!(filter.patterns, vec!["*.txt"]);
    }

    #[test]
    fn test_primary_default_ignores_invalid_index() {
        let opts = OptionsSettings::new("pick", ["a", "b"]).default_option(5);
        assert_eq!(opts.primary_default(), None);

        let opts = opts.default_option(1);
        assert_eq!(opts.primary_default(), Some(1));
    }

    #[test]
    fn test_renders_as_buttons_only_for_single_selection() {
        let opts = OptionsSettings::new("pick", ["a"]).style(OptionsStyle::Buttons);
        assert!(opts.renders_as_buttons());
        assert!(!opts.multiple(true).renders_as_buttons());
    }

    #[test]
    fn test_builders() {
        let save = FileSaveSettings::default()
            .title("Save")
            .root("/tmp")
            .filename("a.txt")
            .filter(FileFilter::new("Text", &["*.txt"]))
            .confirm_overwrite(true);
        assert_eq!(save.general.title, "Save");
        assert_eq!(save.file.root, Some(PathBuf::from("/tmp")));
        assert_eq!(save.file.filters.len(), 1);
        assert!(save.confirm_overwrite);
    }
}
