//! Rendering embedded automation scripts.

use include_dir::{Dir, include_dir};
use serde::Serialize;

use horizon_dialog_core::{DialogError, Result};

static SCRIPTS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/osascript/scripts");

/// Placeholder replaced by the JSON payload.
const DATA_PLACEHOLDER: &str = "{{data}}";

/// Shared helpers prepended to every operation.
const PRELUDE: &str = "prelude";

/// Script operations shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Message,
    Entry,
    Options,
    File,
    Notify,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Entry => "entry",
            Self::Options => "options",
            Self::File => "file",
            Self::Notify => "notify",
        }
    }
}

fn source(name: &str) -> Result<&'static str> {
    SCRIPTS
        .get_file(format!("{name}.js"))
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| DialogError::Script(format!("script '{name}' is not embedded")))
}

/// Render `operation` with `data` as a JSON literal.
pub fn render<T: Serialize>(operation: Operation, data: &T) -> Result<String> {
    let prelude = source(PRELUDE)?;
    let body = source(operation.name())?;
    if !body.contains(DATA_PLACEHOLDER) {
        return Err(DialogError::Script(format!(
            "script '{}' has no data placeholder",
            operation.name()
        )));
    }

    let json = serde_json::to_string(data).map_err(|err| DialogError::Script(err.to_string()))?;
    Ok(format!("{prelude}\n{}", body.replacen(DATA_PLACEHOLDER, &json, 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operation_is_embedded() {
        for op in [
            Operation::Message,
            Operation::Entry,
            Operation::Options,
            Operation::File,
            Operation::Notify,
        ] {
            let script = render(op, &serde_json::json!({ "text": "hi" })).unwrap();
            assert!(script.contains("USER_CANCELED"));
            assert!(script.contains(r#"const d = {"text":"hi"};"#));
            assert!(!script.contains(DATA_PLACEHOLDER));
        }
    }

    #[test]
    fn test_payload_is_not_reinterpreted() {
        let script = render(Operation::Message, &serde_json::json!({ "text": "{{data}} \"quoted\"" })).unwrap();
        assert!(script.contains(r#"{"text":"{{data}} \"quoted\""}"#));
    }
}
