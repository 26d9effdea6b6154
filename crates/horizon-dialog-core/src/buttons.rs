//! Rendering single-choice options as one button per option.

use crate::error::ValidationError;
use crate::result::{ButtonResult, OptionsResult};
use crate::settings::{MessageSettings, MessageStyle, OptionsSettings};

/// An options dialog rewritten as a message dialog.
///
/// The first option becomes the OK button and the remaining options become
/// extra buttons, followed by the caller's own extra buttons. A valid default
/// option is swapped into the OK slot so the focused button is the default
/// option. [`OptionButtons::resolve`] undoes the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionButtons {
    message: MessageSettings,
    ok_option: usize,
    extra_options: Vec<usize>,
}

impl OptionButtons {
    /// Lay out the buttons for `settings`.
    pub fn plan(settings: &OptionsSettings) -> Result<Self, ValidationError> {
        let (first, rest) = settings
            .options
            .split_first()
            .ok_or(ValidationError::NoOptions)?;

        let mut ok_option = 0;
        let mut ok_label = first.clone();
        let mut extra_options: Vec<usize> = (1..settings.options.len()).collect();
        let mut extra_labels: Vec<String> = rest.to_vec();

        if let Some(default) = settings.primary_default()
            && let Some(slot) = extra_options.iter().position(|&idx| idx == default)
        {
            std::mem::swap(&mut ok_option, &mut extra_options[slot]);
            std::mem::swap(&mut ok_label, &mut extra_labels[slot]);
        }

        extra_labels.extend(settings.buttons.extra_buttons.iter().cloned());

        let mut message = MessageSettings {
            general: settings.general.clone(),
            text: settings.text.clone(),
            buttons: settings.buttons.clone(),
            style: MessageStyle::Info,
            icon: settings.general.window_icon,
        };
        message.buttons.ok_label = ok_label;
        message.buttons.extra_buttons = extra_labels;

        Ok(Self {
            message,
            ok_option,
            extra_options,
        })
    }

    /// The message dialog to show.
    pub fn message(&self) -> &MessageSettings {
        &self.message
    }

    /// The option carried by the OK button.
    pub fn ok_option(&self) -> usize {
        self.ok_option
    }

    /// Map the pressed button back to an option or a caller extra button.
    pub fn resolve(&self, button: ButtonResult) -> OptionsResult {
        match button {
            ButtonResult::Ok => OptionsResult::selected(vec![self.ok_option]),
            ButtonResult::ExtraButton(idx) => match self.extra_options.get(idx) {
                Some(&option) => OptionsResult::selected(vec![option]),
                None => OptionsResult::extra(idx - self.extra_options.len()),
            },
            ButtonResult::Canceled => OptionsResult::canceled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::OptionsStyle;

    fn abc() -> OptionsSettings {
        OptionsSettings::new("pick", ["A", "B", "C"]).style(OptionsStyle::Buttons)
    }

    #[test]
    fn test_without_default() {
        let plan = OptionButtons::plan(&abc()).unwrap();
        assert_eq!(plan.message().buttons.ok_label, "A");
        assert_eq!(plan.message().buttons.extra_buttons, vec!["B", "C"]);
        assert_eq!(plan.resolve(ButtonResult::Ok).selection, vec![0]);
        assert_eq!(plan.resolve(ButtonResult::ExtraButton(1)).selection, vec![2]);
    }

    #[test]
    fn test_default_is_swapped_into_ok() {
        let plan = OptionButtons::plan(&abc().default_option(2)).unwrap();
        assert_eq!(plan.message().buttons.ok_label, "C");
        assert_eq!(plan.message().buttons.extra_buttons, vec!["B", "A"]);
        assert_eq!(plan.ok_option(), 2);

        let ok = plan.resolve(ButtonResult::Ok);
        assert_eq!(ok.button, ButtonResult::Ok);
        assert_eq!(ok.selection, vec![2]);
        assert_eq!(plan.resolve(ButtonResult::ExtraButton(0)).selection, vec![1]);
        assert_eq!(plan.resolve(ButtonResult::ExtraButton(1)).selection, vec![0]);
    }

    #[test]
    fn test_caller_extra_buttons_follow_options() {
        let plan = OptionButtons::plan(&abc().extra_button("Help")).unwrap();
        assert_eq!(plan.message().buttons.extra_buttons, vec!["B", "C", "Help"]);

        let res = plan.resolve(ButtonResult::ExtraButton(2));
        assert_eq!(res.button, ButtonResult::ExtraButton(0));
        assert!(res.selection.is_empty());
        assert!(plan.resolve(ButtonResult::Canceled).button.is_canceled());
    }

    #[test]
    fn test_empty_options_rejected() {
        let settings = OptionsSettings::new("pick", Vec::<String>::new());
        assert_eq!(OptionButtons::plan(&settings), Err(ValidationError::NoOptions));
    }
}
