//! In-memory `DLGTEMPLATE` encoding.
//!
//! The template is a packed sequence of 16-bit words: the dialog header,
//! menu and class (both none), title and font, then one `DLGITEMTEMPLATE`
//! per control starting on a 32-bit boundary. The system requires the
//! whole buffer to be 32-bit aligned, so the words are handed out packed
//! into `u32`s.

use super::layout::{DIALOG_STYLE, DialogLayout, FONT_NAME, FONT_POINTS, Rect};

/// Encoded dialog template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogTemplate {
    words: Vec<u16>,
}

impl DialogTemplate {
    pub fn build(layout: &DialogLayout) -> Self {
        let mut words = Vec::with_capacity(256);

        push_u32(&mut words, DIALOG_STYLE);
        push_u32(&mut words, 0);
        words.push(layout.controls.len() as u16);
        push_rect(&mut words, Rect::new(0, 0, layout.size.0, layout.size.1));
        words.push(0); // menu
        words.push(0); // class
        push_str(&mut words, &layout.title);
        words.push(FONT_POINTS);
        push_str(&mut words, FONT_NAME);

        for control in &layout.controls {
            align_dword(&mut words);
            push_u32(&mut words, control.style);
            push_u32(&mut words, 0);
            push_rect(&mut words, control.rect);
            words.push(control.id);
            words.push(0xFFFF);
            words.push(control.class.atom());
            push_str(&mut words, &control.text);
            words.push(0); // creation data
        }

        Self { words }
    }

    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// The template packed into a 32-bit aligned buffer.
    pub fn to_aligned(&self) -> Vec<u32> {
        self.words
            .chunks(2)
            .map(|pair| {
                let lo = pair[0] as u32;
                let hi = pair.get(1).copied().unwrap_or(0) as u32;
                lo | (hi << 16)
            })
            .collect()
    }
}

fn push_u32(words: &mut Vec<u16>, value: u32) {
    words.push(value as u16);
    words.push((value >> 16) as u16);
}

fn push_rect(words: &mut Vec<u16>, rect: Rect) {
    for value in [rect.x, rect.y, rect.cx, rect.cy] {
        words.push(value as u16);
    }
}

fn push_str(words: &mut Vec<u16>, text: &str) {
    words.extend(text.encode_utf16());
    words.push(0);
}

fn align_dword(words: &mut Vec<u16>) {
    if words.len() % 2 == 1 {
        words.push(0);
    }
}

#[cfg(test)]
mod tests {
    use horizon_dialog_core::{MessageSettings, MessageStyle};

    use super::super::layout::{self, ControlClass, IDOK};
    use super::*;

    fn u32_at(words: &[u16], idx: usize) -> u32 {
        words[idx] as u32 | ((words[idx + 1] as u32) << 16)
    }

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }

    #[test]
    fn test_header_fields() {
        let layout = layout::message(&MessageSettings::new("hello").title("Hi"));
        let template = DialogTemplate::build(&layout);
        let words = template.words();

        assert_eq!(u32_at(words, 0), DIALOG_STYLE);
        assert_eq!(u32_at(words, 2), 0);
        assert_eq!(words[4] as usize, layout.controls.len());
        assert_eq!(&words[5..9], &[0, 0, layout.size.0 as u16, layout.size.1 as u16]);
        assert_eq!(&words[9..11], &[0, 0]);

        let title = wide("Hi");
        assert_eq!(&words[11..11 + title.len()], title.as_slice());
        let font_at = 11 + title.len();
        assert_eq!(words[font_at], FONT_POINTS);
        let font = wide(FONT_NAME);
        assert_eq!(&words[font_at + 1..font_at + 1 + font.len()], font.as_slice());
    }

    #[test]
    fn test_items_start_on_dword_boundary() {
        let layout = layout::message(
            &MessageSettings::new("odd")
                .title("abc")
                .style(MessageStyle::Question)
                .extra_button("x"),
        );
        let words = DialogTemplate::build(&layout).words().to_vec();

        // Walk past the header.
        let mut pos = 11;
        pos += wide(&layout.title).len() + 1 + wide(FONT_NAME).len();

        for control in &layout.controls {
            if pos % 2 == 1 {
                assert_eq!(words[pos], 0);
                pos += 1;
            }
            assert_eq!(pos % 2, 0);
            assert_eq!(u32_at(&words, pos), control.style);
            assert_eq!(words[pos + 8], control.id);
            assert_eq!(&words[pos + 9..pos + 11], &[0xFFFF, control.class.atom()]);
            let text = wide(&control.text);
            assert_eq!(&words[pos + 11..pos + 11 + text.len()], text.as_slice());
            pos += 11 + text.len() + 1;
        }
        assert_eq!(pos, words.len());
    }

    #[test]
    fn test_ok_button_encoded_as_button_class() {
        let layout = layout::message(&MessageSettings::new("x"));
        let ok = layout.control(IDOK).unwrap();
        assert_eq!(ok.class, ControlClass::Button);
        assert_eq!(ok.class.atom(), 0x0080);
    }

    #[test]
    fn test_aligned_packing() {
        let layout = layout::message(&MessageSettings::new("pack"));
        let template = DialogTemplate::build(&layout);
        let packed = template.to_aligned();
        assert_eq!(packed.len(), template.words().len().div_ceil(2));
        assert_eq!(packed[0], DIALOG_STYLE);
        assert_eq!(packed[2] & 0xFFFF, layout.controls.len() as u32);
    }
}
