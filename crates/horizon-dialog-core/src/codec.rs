//! Invisible-marker index codec.
//!
//! Some backends only report the literal label of the pressed button or the
//! chosen list item. Before a label is handed to such a backend it is
//! prefixed with a run of [`MARKER`] characters whose length is unique per
//! candidate. The pressed index is recovered by counting the run, so labels
//! may repeat or contain anything.

use crate::error::ValidationError;
use crate::result::ButtonResult;

/// Zero-width space, invisible in every supported toolkit.
pub const MARKER: char = '\u{200B}';

/// Marker scheme with a fixed run-length offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexCodec {
    offset: usize,
}

impl IndexCodec {
    /// List items: item `i` carries `i + 1` markers.
    pub const ITEMS: Self = Self { offset: 1 };

    /// Extra buttons: one marker is reserved for the OK button, so extra
    /// button `i` carries `i + 2` markers.
    pub const BUTTONS: Self = Self { offset: 2 };

    /// Run length used for `index`.
    pub fn run_length(self, index: usize) -> usize {
        index + self.offset
    }

    /// Prefix `label` with the run for `index`.
    ///
    /// Markers already leading the label are dropped first so a label can
    /// never shift into another slot.
    pub fn encode(self, index: usize, label: &str) -> String {
        prefixed(self.run_length(index), label)
    }

    /// Encode every label with its position.
    pub fn encode_all<S: AsRef<str>>(self, labels: &[S]) -> Vec<String> {
        labels
            .iter()
            .enumerate()
            .map(|(idx, label)| self.encode(idx, label.as_ref()))
            .collect()
    }

    /// Recover the index from backend output.
    ///
    /// `count` is the number of encoded candidates; scanning stops after the
    /// longest valid run. Returns `None` if the output carries no valid run.
    pub fn decode(self, output: &str, count: usize) -> Option<usize> {
        let max = count + self.offset - 1;
        let run = count_markers(output, max);
        run.checked_sub(self.offset).filter(|&idx| idx < count)
    }
}

/// Encode the OK label with the single reserved marker.
pub fn encode_ok_label(label: &str) -> String {
    prefixed(1, label)
}

/// Encode extra button labels, rejecting empty ones.
pub fn encode_extra_buttons<S: AsRef<str>>(labels: &[S]) -> Result<Vec<String>, ValidationError> {
    if let Some(index) = labels.iter().position(|l| l.as_ref().is_empty()) {
        return Err(ValidationError::EmptyExtraButtonLabel { index });
    }
    Ok(IndexCodec::BUTTONS.encode_all(labels))
}

/// Map a pressed button label back to OK or an extra button.
///
/// `extra_count` is the number of encoded extra buttons. Returns `None` for
/// output without markers.
pub fn decode_button(output: &str, extra_count: usize) -> Option<ButtonResult> {
    match count_markers(output, extra_count + 1) {
        0 => None,
        1 => Some(ButtonResult::Ok),
        run => Some(ButtonResult::ExtraButton(run - 2)),
    }
}

/// Drop leading markers from a label.
pub fn strip_markers(label: &str) -> &str {
    label.trim_start_matches(MARKER)
}

/// Count leading markers after trimming whitespace, at most `max`.
pub fn count_markers(output: &str, max: usize) -> usize {
    output
        .trim()
        .chars()
        .take(max)
        .take_while(|&c| c == MARKER)
        .count()
}

fn prefixed(run: usize, label: &str) -> String {
    let label = strip_markers(label);
    let mut out = String::with_capacity(run * MARKER.len_utf8() + label.len());
    out.extend(std::iter::repeat_n(MARKER, run));
    out.push_str(label);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_buttons_round_trip() {
        for count in 0..8 {
            let labels: Vec<String> = (0..count).map(|i| format!("Button {i}")).collect();
            let encoded = encode_extra_buttons(&labels).unwrap();
            for (idx, label) in encoded.iter().enumerate() {
                assert_eq!(
                    decode_button(label, count),
                    Some(ButtonResult::ExtraButton(idx))
                );
                assert_eq!(IndexCodec::BUTTONS.decode(label, count), Some(idx));
            }
        }
    }

    #[test]
    fn test_ok_label_decodes_as_ok() {
        let ok = encode_ok_label("Yes");
        assert_eq!(decode_button(&ok, 3), Some(ButtonResult::Ok));
        assert_eq!(decode_button("Yes", 3), None);
    }

    #[test]
    fn test_decode_ignores_label_content() {
        let encoded = IndexCodec::ITEMS.encode(2, "whatever");
        let returned = format!("{}totally different\n", &encoded[..3 * MARKER.len_utf8()]);
        assert_eq!(IndexCodec::ITEMS.decode(&returned, 5), Some(2));
    }

    #[test]
    fn test_duplicate_labels_keep_their_index() {
        let items = IndexCodec::ITEMS.encode_all(&["a", "a", "b"]);
        assert_eq!(IndexCodec::ITEMS.decode(&items[1], 3), Some(1));
        assert_eq!(IndexCodec::ITEMS.decode(&items[0], 3), Some(0));
    }

    #[test]
    fn test_decode_is_bounded() {
        let garbled: String = std::iter::repeat_n(MARKER, 50).chain("x".chars()).collect();
        assert_eq!(count_markers(&garbled, 4), 4);
        assert_eq!(decode_button(&garbled, 2), Some(ButtonResult::ExtraButton(1)));
        assert_eq!(IndexCodec::ITEMS.decode(&garbled, 3), Some(2));
    }

    #[test]
    fn test_existing_markers_are_replaced() {
        let label = format!("{MARKER}{MARKER}{MARKER}Retry");
        let encoded = IndexCodec::BUTTONS.encode(0, &label);
        assert_eq!(count_markers(&encoded, usize::MAX), 2);
        assert!(encoded.ends_with("Retry"));
    }

    #[test]
    fn test_empty_label_rejected() {
        let err = encode_extra_buttons(&["ok", ""]).unwrap_err();
        assert_eq!(err, ValidationError::EmptyExtraButtonLabel { index: 1 });
    }
}
