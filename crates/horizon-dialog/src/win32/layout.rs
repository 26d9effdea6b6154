//! Control layout of the custom modal dialog.
//!
//! Positions are in dialog units. The layout is computed up front from the
//! settings so it can be checked without a window system; `template`
//! serializes it and `custom` drives the live controls by id.

use horizon_dialog_core::{
    ButtonResult, ButtonSettings, DialogIcon, EntrySettings, GeneralSettings, Limits,
    MessageSettings, MessageStyle, OptionsSettings, TextSettings,
};

// ============================================================================
// Control Ids and Styles
// ============================================================================

pub const IDOK: u16 = 1;
pub const IDCANCEL: u16 = 2;
/// Extra button `i` has id `EXTRA_BUTTON_BASE + i`.
pub const EXTRA_BUTTON_BASE: u16 = 100;
pub const ID_ICON: u16 = 10;
pub const ID_TEXT: u16 = 11;
pub const ID_EDIT: u16 = 12;
pub const ID_LIST: u16 = 13;

/// Extra buttons the custom dialog can render.
///
/// Every message, entry and list dialog is laid out here rather than by
/// `MessageBoxW`, so the button row takes any number of extra buttons.
pub const LIMITS: Limits = Limits::UNLIMITED;

/// Result code of a dialog ended by its deadline timer.
pub const TIMED_OUT_CODE: isize = 3;

/// How the custom dialog ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEnd {
    Button(ButtonResult),
    TimedOut,
}

impl DialogEnd {
    /// Interpret the code passed to `EndDialog`.
    pub fn from_code(code: isize) -> Option<Self> {
        match code {
            TIMED_OUT_CODE => Some(Self::TimedOut),
            c if c == IDOK as isize => Some(Self::Button(ButtonResult::Ok)),
            c if c == IDCANCEL as isize => Some(Self::Button(ButtonResult::Canceled)),
            c if c >= EXTRA_BUTTON_BASE as isize && c <= u16::MAX as isize => Some(Self::Button(
                ButtonResult::ExtraButton((c - EXTRA_BUTTON_BASE as isize) as usize),
            )),
            _ => None,
        }
    }
}

/// Whether a command id belongs to a push button that ends the dialog.
pub fn is_button_id(id: u16) -> bool {
    id == IDOK || id == IDCANCEL || id >= EXTRA_BUTTON_BASE
}

pub const WS_CHILD: u32 = 0x4000_0000;
pub const WS_VISIBLE: u32 = 0x1000_0000;
pub const WS_POPUP: u32 = 0x8000_0000;
pub const WS_CAPTION: u32 = 0x00C0_0000;
pub const WS_SYSMENU: u32 = 0x0008_0000;
pub const WS_BORDER: u32 = 0x0080_0000;
pub const WS_VSCROLL: u32 = 0x0020_0000;
pub const WS_TABSTOP: u32 = 0x0001_0000;
pub const WS_GROUP: u32 = 0x0002_0000;

pub const DS_SETFONT: u32 = 0x0040;
pub const DS_MODALFRAME: u32 = 0x0080;
pub const DS_FIXEDSYS: u32 = 0x0008;
pub const DS_CENTER: u32 = 0x0800;

pub const BS_PUSHBUTTON: u32 = 0x0000;
pub const BS_DEFPUSHBUTTON: u32 = 0x0001;
pub const ES_PASSWORD: u32 = 0x0020;
pub const ES_AUTOHSCROLL: u32 = 0x0080;
pub const SS_ICON: u32 = 0x0003;
pub const SS_LEFTNOWORDWRAP: u32 = 0x000C;
pub const SS_NOPREFIX: u32 = 0x0080;
pub const SS_ENDELLIPSIS: u32 = 0x4000;
pub const LBS_NOTIFY: u32 = 0x0001;
pub const LBS_NOINTEGRALHEIGHT: u32 = 0x0100;
pub const LBS_EXTENDEDSEL: u32 = 0x0800;

/// Style of the dialog window itself.
pub const DIALOG_STYLE: u32 =
    WS_POPUP | WS_CAPTION | WS_SYSMENU | DS_MODALFRAME | DS_SETFONT | DS_FIXEDSYS | DS_CENTER;

/// Font requested through `DS_SETFONT`.
pub const FONT_NAME: &str = "MS Shell Dlg";
pub const FONT_POINTS: u16 = 8;

// ============================================================================
// Geometry
// ============================================================================

const MARGIN: i16 = 7;
const GAP: i16 = 4;
const ICON_SIZE: i16 = 21;
const BUTTON_WIDTH: i16 = 50;
const BUTTON_HEIGHT: i16 = 14;
const EDIT_HEIGHT: i16 = 12;
const PROMPT_HEIGHT: i16 = 18;

// Horizontal and vertical base units of the 8pt shell font at 96 DPI.
const BASE_UNIT_X: u32 = 6;
const BASE_UNIT_Y: u32 = 13;

/// Window size in pixels, before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const MESSAGE: Self = Self { width: 320, height: 130 };
    pub const ENTRY: Self = Self { width: 400, height: 150 };
    pub const ENTRY_MIN: Self = Self { width: 380, height: 120 };
    pub const OPTIONS: Self = Self { width: 240, height: 240 };

    /// Requested size, each zero dimension replaced by the default and
    /// raised to the minimum.
    pub fn resolve(general: &GeneralSettings, default: Self, min: Self) -> Self {
        let pick = |requested: u32, fallback: u32, floor: u32| {
            let value = if requested == 0 { fallback } else { requested };
            value.max(floor)
        };
        Self {
            width: pick(general.width, default.width, min.width),
            height: pick(general.height, default.height, min.height),
        }
    }

    fn to_dialog_units(self) -> (i16, i16) {
        let x = self.width * 4 / BASE_UNIT_X;
        let y = self.height * 8 / BASE_UNIT_Y;
        (clamp_i16(x), clamp_i16(y))
    }
}

fn clamp_i16(value: u32) -> i16 {
    i16::try_from(value).unwrap_or(i16::MAX)
}

/// Rectangle in dialog units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub cx: i16,
    pub cy: i16,
}

impl Rect {
    pub fn new(x: i16, y: i16, cx: i16, cy: i16) -> Self {
        Self { x, y, cx: cx.max(1), cy: cy.max(1) }
    }

    pub fn right(&self) -> i16 {
        self.x + self.cx
    }

    pub fn bottom(&self) -> i16 {
        self.y + self.cy
    }
}

// ============================================================================
// Controls
// ============================================================================

/// Predefined window class of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlClass {
    Button,
    Edit,
    Static,
    ListBox,
}

impl ControlClass {
    /// Atom of the predefined class in a dialog template.
    pub fn atom(self) -> u16 {
        match self {
            Self::Button => 0x0080,
            Self::Edit => 0x0081,
            Self::Static => 0x0082,
            Self::ListBox => 0x0083,
        }
    }
}

/// One control of the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub id: u16,
    pub class: ControlClass,
    pub style: u32,
    pub text: String,
    pub rect: Rect,
}

/// What the body of the dialog holds below the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Message,
    Entry { initial: String },
    List { items: Vec<String>, selected: Vec<usize>, multiple: bool },
}

/// Complete description of a custom dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogLayout {
    pub title: String,
    pub size: (i16, i16),
    pub icon: DialogIcon,
    pub body: Body,
    pub controls: Vec<Control>,
    /// Id of the default push button.
    pub default_button: u16,
}

impl DialogLayout {
    pub fn control(&self, id: u16) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    /// Ids of all push buttons, left to right.
    pub fn button_ids(&self) -> Vec<u16> {
        let mut buttons: Vec<&Control> = self
            .controls
            .iter()
            .filter(|c| c.class == ControlClass::Button)
            .collect();
        buttons.sort_by_key(|c| c.rect.x);
        buttons.iter().map(|c| c.id).collect()
    }
}

/// Labels used when the caller leaves them empty.
fn ok_cancel_labels(buttons: &ButtonSettings, question: bool) -> (String, String) {
    let (ok, cancel) = if question { ("Yes", "No") } else { ("OK", "Cancel") };
    let pick = |label: &str, fallback: &str| {
        if label.is_empty() { fallback.to_string() } else { label.to_string() }
    };
    (pick(&buttons.ok_label, ok), pick(&buttons.cancel_label, cancel))
}

/// Extra buttons, OK and (optionally) Cancel, right-aligned on the last row.
fn button_row(
    buttons: &ButtonSettings,
    show_cancel: bool,
    question: bool,
    size: (i16, i16),
) -> (Vec<Control>, u16) {
    let (ok, cancel) = ok_cancel_labels(buttons, question);

    let mut row: Vec<(u16, String)> = buttons
        .extra_buttons
        .iter()
        .enumerate()
        .map(|(idx, label)| (EXTRA_BUTTON_BASE + idx as u16, label.clone()))
        .collect();
    row.push((IDOK, ok));
    if show_cancel {
        row.push((IDCANCEL, cancel));
    }

    let default_button = if buttons.default_cancel && show_cancel { IDCANCEL } else { IDOK };
    let y = size.1 - MARGIN - BUTTON_HEIGHT;
    let mut x = size.0 - MARGIN - BUTTON_WIDTH;
    let mut controls = Vec::with_capacity(row.len());
    for (id, label) in row.into_iter().rev() {
        let kind = if id == default_button { BS_DEFPUSHBUTTON } else { BS_PUSHBUTTON };
        controls.push(Control {
            id,
            class: ControlClass::Button,
            style: WS_CHILD | WS_VISIBLE | WS_TABSTOP | kind,
            text: label,
            rect: Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT),
        });
        x -= BUTTON_WIDTH + GAP;
    }
    controls.reverse();
    (controls, default_button)
}

fn text_style(text: &TextSettings) -> u32 {
    let mut style = WS_CHILD | WS_VISIBLE | SS_NOPREFIX;
    if text.no_wrap || text.ellipsize {
        style |= SS_LEFTNOWORDWRAP;
    }
    if text.ellipsize {
        style |= SS_ENDELLIPSIS;
    }
    style
}

/// Icon control (when an icon is shown) and the left edge of the text column.
fn icon_column(icon: DialogIcon) -> (Option<Control>, i16) {
    if !icon.is_defined() {
        return (None, MARGIN);
    }
    let control = Control {
        id: ID_ICON,
        class: ControlClass::Static,
        style: WS_CHILD | WS_VISIBLE | SS_ICON,
        text: String::new(),
        rect: Rect::new(MARGIN, MARGIN, ICON_SIZE, ICON_SIZE),
    };
    (Some(control), MARGIN + ICON_SIZE + MARGIN)
}

// ============================================================================
// Per-kind Layouts
// ============================================================================

pub fn message(settings: &MessageSettings) -> DialogLayout {
    let pixels = PixelSize::resolve(&settings.general, PixelSize::MESSAGE, PixelSize::MESSAGE);
    let size = pixels.to_dialog_units();
    let icon = settings.effective_icon();
    let question = settings.style == MessageStyle::Question;

    let (icon_control, left) = icon_column(icon);
    let (buttons, default_button) =
        button_row(&settings.buttons, settings.style.has_cancel(), question, size);
    let text_bottom = size.1 - MARGIN - BUTTON_HEIGHT - MARGIN;

    let mut controls: Vec<Control> = icon_control.into_iter().collect();
    controls.push(Control {
        id: ID_TEXT,
        class: ControlClass::Static,
        style: text_style(&settings.text),
        text: settings.text.text.clone(),
        rect: Rect::new(left, MARGIN, size.0 - left - MARGIN, text_bottom - MARGIN),
    });
    controls.extend(buttons);

    DialogLayout {
        title: settings.general.title.clone(),
        size,
        icon,
        body: Body::Message,
        controls,
        default_button,
    }
}

pub fn entry(settings: &EntrySettings) -> DialogLayout {
    let pixels = PixelSize::resolve(&settings.general, PixelSize::ENTRY, PixelSize::ENTRY_MIN);
    let size = pixels.to_dialog_units();

    let (icon_control, left) = icon_column(settings.icon);
    let (buttons, default_button) = button_row(&settings.buttons, true, false, size);
    let width = size.0 - left - MARGIN;
    let edit_y = MARGIN + PROMPT_HEIGHT + GAP;

    let mut edit_style = WS_CHILD | WS_VISIBLE | WS_BORDER | WS_TABSTOP | WS_GROUP | ES_AUTOHSCROLL;
    if settings.hide_entry {
        edit_style |= ES_PASSWORD;
    }

    let mut controls: Vec<Control> = icon_control.into_iter().collect();
    controls.push(Control {
        id: ID_TEXT,
        class: ControlClass::Static,
        style: text_style(&settings.text),
        text: settings.text.text.clone(),
        rect: Rect::new(left, MARGIN, width, PROMPT_HEIGHT),
    });
    controls.push(Control {
        id: ID_EDIT,
        class: ControlClass::Edit,
        style: edit_style,
        text: String::new(),
        rect: Rect::new(left, edit_y, width, EDIT_HEIGHT),
    });
    controls.extend(buttons);

    DialogLayout {
        title: settings.general.title.clone(),
        size,
        icon: settings.icon,
        body: Body::Entry { initial: settings.default_entry.clone() },
        controls,
        default_button,
    }
}

/// List-style options dialog.
pub fn options(settings: &OptionsSettings) -> DialogLayout {
    let pixels = PixelSize::resolve(&settings.general, PixelSize::OPTIONS, PixelSize::OPTIONS);
    let size = pixels.to_dialog_units();
    let (buttons, default_button) = button_row(&settings.buttons, true, false, size);

    let width = size.0 - 2 * MARGIN;
    let list_y = MARGIN + PROMPT_HEIGHT + GAP;
    let list_bottom = size.1 - MARGIN - BUTTON_HEIGHT - MARGIN;

    let mut list_style =
        WS_CHILD | WS_VISIBLE | WS_BORDER | WS_VSCROLL | WS_TABSTOP | WS_GROUP | LBS_NOTIFY | LBS_NOINTEGRALHEIGHT;
    if settings.multiple {
        list_style |= LBS_EXTENDEDSEL;
    }

    let selected = preselection(settings);
    let mut controls = vec![
        Control {
            id: ID_TEXT,
            class: ControlClass::Static,
            style: text_style(&settings.text),
            text: settings.text.text.clone(),
            rect: Rect::new(MARGIN, MARGIN, width, PROMPT_HEIGHT),
        },
        Control {
            id: ID_LIST,
            class: ControlClass::ListBox,
            style: list_style,
            text: String::new(),
            rect: Rect::new(MARGIN, list_y, width, list_bottom - list_y),
        },
    ];
    controls.extend(buttons);

    DialogLayout {
        title: settings.general.title.clone(),
        size,
        icon: DialogIcon::Undefined,
        body: Body::List {
            items: settings.options.clone(),
            selected,
            multiple: settings.multiple,
        },
        controls,
        default_button,
    }
}

/// Rows selected when the list opens: every valid default when multiple,
/// otherwise the last one.
fn preselection(settings: &OptionsSettings) -> Vec<usize> {
    let mut valid: Vec<usize> = settings
        .default_options
        .iter()
        .copied()
        .filter(|&idx| idx < settings.options.len())
        .collect();
    valid.dedup();
    if settings.multiple {
        valid
    } else {
        valid.last().copied().into_iter().collect()
    }
}
