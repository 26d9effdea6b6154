//! Input checks performed before any backend call.

use crate::backend::Limits;
use crate::error::ValidationError;
use crate::settings::{EntrySettings, MessageSettings, OptionsSettings};

/// Reject empty labels and more buttons than `allowed`.
pub fn extra_buttons(labels: &[String], allowed: Option<usize>) -> Result<(), ValidationError> {
    if let Some(allowed) = allowed
        && labels.len() > allowed
    {
        return Err(ValidationError::TooManyExtraButtons {
            allowed,
            given: labels.len(),
        });
    }

    match labels.iter().position(String::is_empty) {
        Some(index) => Err(ValidationError::EmptyExtraButtonLabel { index }),
        None => Ok(()),
    }
}

pub fn message(settings: &MessageSettings, limits: &Limits) -> Result<(), ValidationError> {
    extra_buttons(&settings.buttons.extra_buttons, limits.message_extra_buttons)
}

pub fn entry(settings: &EntrySettings, limits: &Limits) -> Result<(), ValidationError> {
    extra_buttons(&settings.buttons.extra_buttons, limits.entry_extra_buttons)
}

/// Checks the option list itself. Button-style dialogs are additionally
/// checked as the message they degrade to.
pub fn options(settings: &OptionsSettings, limits: &Limits) -> Result<(), ValidationError> {
    if settings.options.is_empty() {
        return Err(ValidationError::NoOptions);
    }

    let count = settings.options.len();
    if let Some(&index) = settings.default_options.iter().find(|&&idx| idx >= count) {
        return Err(ValidationError::DefaultOptionOutOfRange { index, count });
    }

    let allowed = if settings.renders_as_buttons() {
        None
    } else {
        limits.options_extra_buttons
    };
    extra_buttons(&settings.buttons.extra_buttons, allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::OptionsStyle;

    fn limited() -> Limits {
        Limits {
            message_extra_buttons: Some(1),
            entry_extra_buttons: Some(1),
            options_extra_buttons: Some(0),
        }
    }

    #[test]
    fn test_too_many_extra_buttons() {
        let msg = MessageSettings::new("hi").extra_button("A").extra_button("B");
        assert_eq!(
            message(&msg, &limited()),
            Err(ValidationError::TooManyExtraButtons { allowed: 1, given: 2 })
        );
        assert_eq!(message(&msg, &Limits::UNLIMITED), Ok(()));
    }

    #[test]
    fn test_empty_label() {
        let entry_settings = EntrySettings::new("name?").extra_button("");
        assert_eq!(
            entry(&entry_settings, &Limits::UNLIMITED),
            Err(ValidationError::EmptyExtraButtonLabel { index: 0 })
        );
    }

    #[test]
    fn test_options_checks() {
        let none = OptionsSettings::new("pick", Vec::<String>::new());
        assert_eq!(options(&none, &Limits::UNLIMITED), Err(ValidationError::NoOptions));

        let out_of_range = OptionsSettings::new("pick", ["a"]).default_option(1);
        assert_eq!(
            options(&out_of_range, &Limits::UNLIMITED),
            Err(ValidationError::DefaultOptionOutOfRange { index: 1, count: 1 })
        );

        let list = OptionsSettings::new("pick", ["a"]).extra_button("More");
        assert!(options(&list, &limited()).is_err());
        let buttons = list.style(OptionsStyle::Buttons);
        assert!(options(&buttons, &limited()).is_ok());
    }
}
