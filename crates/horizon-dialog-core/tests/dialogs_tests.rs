//! Tests for the dialog facade against a recording backend.

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use horizon_dialog_core::codec::{IndexCodec, decode_button, encode_extra_buttons};
use horizon_dialog_core::logging::targets;
use horizon_dialog_core::{
    ButtonResult, Deadline, DialogBackend, DialogError, Dialogs, EntryResult, EntrySettings,
    FileResult, FileSaveSettings, FileSelectionSettings, Limits, MessageResult, MessageSettings,
    NotificationSettings, OptionsResult, OptionsSettings, OptionsStyle, Result, ValidationError,
};
use parking_lot::Mutex;

/// Records every call and answers with a scripted button.
#[derive(Default)]
struct MockBackend {
    limits: Limits,
    calls: Arc<Mutex<Vec<String>>>,
    messages: Arc<Mutex<Vec<MessageSettings>>>,
    button: Option<ButtonResult>,
    selection: Vec<usize>,
    delay: Option<Duration>,
}

impl MockBackend {
    fn answering(button: ButtonResult) -> Self {
        Self {
            button: Some(button),
            ..Default::default()
        }
    }

    fn record(&self, call: &str) -> ButtonResult {
        self.calls.lock().push(call.to_string());
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.button.unwrap_or(ButtonResult::Canceled)
    }
}

impl DialogBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn limits(&self) -> Limits {
        self.limits
    }

    fn show_message(&self, settings: &MessageSettings, _deadline: Deadline) -> Result<MessageResult> {
        self.messages.lock().push(settings.clone());
        Ok(MessageResult::new(self.record("message")))
    }

    fn show_options(&self, _settings: &OptionsSettings, _deadline: Deadline) -> Result<OptionsResult> {
        match self.record("options") {
            ButtonResult::Ok => Ok(OptionsResult::selected(self.selection.clone())),
            other => Ok(OptionsResult::without_selection(other)),
        }
    }

    fn show_entry(&self, _settings: &EntrySettings, _deadline: Deadline) -> Result<EntryResult> {
        Ok(EntryResult::without_text(self.record("entry")))
    }

    fn show_file_save(&self, _settings: &FileSaveSettings, _deadline: Deadline) -> Result<FileResult> {
        self.record("file_save");
        Ok(FileResult::selected(["/tmp/out.txt"]))
    }

    fn show_file_selection(
        &self,
        _settings: &FileSelectionSettings,
        _deadline: Deadline,
    ) -> Result<FileResult> {
        self.record("file_selection");
        Ok(FileResult::canceled())
    }

    fn show_notification(&self, _settings: &NotificationSettings) -> Result<()> {
        self.record("notification");
        Ok(())
    }
}

fn one_extra_button() -> Limits {
    Limits {
        message_extra_buttons: Some(1),
        entry_extra_buttons: Some(1),
        options_extra_buttons: Some(0),
    }
}

#[test]
fn test_message_with_two_extra_buttons_fails_before_backend() {
    let backend = MockBackend {
        limits: one_extra_button(),
        ..MockBackend::answering(ButtonResult::Ok)
    };
    let calls = Arc::clone(&backend.calls);
    let dialogs = Dialogs::new(backend);

    let settings = MessageSettings::new("hi").extra_button("A").extra_button("B");
    let err = dialogs.show_message(&settings, Deadline::none()).unwrap_err();

    assert!(matches!(
        err,
        DialogError::Invalid(ValidationError::TooManyExtraButtons { allowed: 1, given: 2 })
    ));
    assert!(calls.lock().is_empty());
}

#[test]
fn test_options_without_options_fails_before_backend() {
    let backend = MockBackend::answering(ButtonResult::Ok);
    let calls = Arc::clone(&backend.calls);
    let dialogs = Dialogs::new(backend);

    let err = dialogs
        .show_options(&OptionsSettings::new("pick", Vec::<String>::new()), Deadline::none())
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid dialog settings: You need at least one option specified."
    );
    assert!(calls.lock().is_empty());
}

#[test]
fn test_options_as_buttons_default_swapped_into_ok() {
    let backend = MockBackend::answering(ButtonResult::Ok);
    let messages = Arc::clone(&backend.messages);
    let dialogs = Dialogs::new(backend);

    let settings = OptionsSettings::new("pick", ["A", "B", "C"])
        .style(OptionsStyle::Buttons)
        .default_option(2);
    let res = dialogs.show_options(&settings, Deadline::none()).unwrap();

    assert_eq!(res.button, ButtonResult::Ok);
    assert_eq!(res.selection, vec![2]);

    let shown = messages.lock();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].buttons.ok_label, "C");
}

#[test]
fn test_options_as_buttons_respects_message_limits() {
    let backend = MockBackend {
        limits: one_extra_button(),
        ..MockBackend::answering(ButtonResult::Ok)
    };
    let calls = Arc::clone(&backend.calls);
    let dialogs = Dialogs::new(backend);

    let settings = OptionsSettings::new("pick", ["A", "B", "C"]).style(OptionsStyle::Buttons);
    let err = dialogs.show_options(&settings, Deadline::none()).unwrap_err();
    assert!(err.is_invalid());
    assert!(calls.lock().is_empty());

    let two = OptionsSettings::new("pick", ["A", "B"]).style(OptionsStyle::Buttons);
    let res = dialogs.show_options(&two, Deadline::none()).unwrap();
    assert_eq!(res.selection, vec![0]);
    assert_eq!(*calls.lock(), vec!["message"]);
}

#[test]
fn test_multiple_selection_uses_list() {
    let backend = MockBackend {
        selection: vec![0, 2],
        ..MockBackend::answering(ButtonResult::Ok)
    };
    let calls = Arc::clone(&backend.calls);
    let dialogs = Dialogs::new(backend);

    let settings = OptionsSettings::new("pick", ["a", "a", "b"])
        .style(OptionsStyle::Buttons)
        .multiple(true);
    let res = dialogs.show_options(&settings, Deadline::none()).unwrap();

    assert_eq!(res.selection, vec![0, 2]);
    assert_eq!(*calls.lock(), vec!["options"]);
}

#[test]
fn test_elapsed_deadline_is_timeout() {
    let backend = MockBackend {
        delay: Some(Duration::from_millis(100)),
        ..MockBackend::answering(ButtonResult::Ok)
    };
    let dialogs = Dialogs::new(backend);

    let err = dialogs
        .show_entry(&EntrySettings::new("name?"), Deadline::after(Duration::from_millis(20)))
        .unwrap_err();
    assert!(err.is_timeout());

    let err = dialogs
        .show_message(&MessageSettings::new("late"), Deadline::after(Duration::ZERO))
        .unwrap_err();
    assert!(err.is_timeout());
}

#[test]
fn test_extra_button_passes_through() {
    let dialogs = Dialogs::new(MockBackend::answering(ButtonResult::ExtraButton(1)));
    let settings = MessageSettings::new("hi").extra_button("A").extra_button("B");
    let res = dialogs.show_message(&settings, Deadline::none()).unwrap();
    assert_eq!(res.button.extra_button(), Some(1));
    assert_eq!(res.button.exit_code(), 2);
}

#[test]
fn test_notification_ignores_deadline() {
    let backend = MockBackend::default();
    let calls = Arc::clone(&backend.calls);
    let dialogs = Dialogs::new(backend);
    dialogs
        .show_notification(&NotificationSettings::new("done"))
        .unwrap();
    assert_eq!(*calls.lock(), vec!["notification"]);
}

#[test]
fn test_codec_recovers_duplicate_labels() {
    let items = IndexCodec::ITEMS.encode_all(&["a", "a", "b"]);
    let chosen = format!("{}\n", items[1]);
    assert_eq!(IndexCodec::ITEMS.decode(&chosen, items.len()), Some(1));

    let buttons = encode_extra_buttons(&["Same", "Same"]).unwrap();
    assert_eq!(decode_button(&buttons[1], 2), Some(ButtonResult::ExtraButton(1)));
}

// ============================================================================
// Logging
// ============================================================================

/// Formatted log output shared with the subscriber.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_facade_logs_under_dialog_target() {
    let logs = LogBuffer::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let dialogs = Dialogs::new(MockBackend::answering(ButtonResult::Ok));
        let settings = OptionsSettings::new("pick", ["A", "B"]).style(OptionsStyle::Buttons);
        dialogs.show_options(&settings, Deadline::none()).unwrap();

        let slow = Dialogs::new(MockBackend {
            delay: Some(Duration::from_millis(100)),
            ..MockBackend::answering(ButtonResult::Ok)
        });
        let err = slow
            .show_message(&MessageSettings::new("late"), Deadline::after(Duration::from_millis(20)))
            .unwrap_err();
        assert!(err.is_timeout());
    });

    let output = logs.contents();
    assert!(output.contains(targets::DIALOG), "missing target in: {output}");
    assert!(output.contains("options rendered as buttons"));
    assert!(output.contains("dialog closed"));
    assert!(output.contains("dialog timed out"));
    assert!(!output.contains(targets::PROCESS));
}
