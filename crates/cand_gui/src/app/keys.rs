//! Keyboard bindings.

use cand_core::Action;
use eframe::egui::{Key, Modifiers};

/// Map a key press to a viewer action.
pub(crate) fn action_for_key(key: Key, modifiers: Modifiers) -> Option<Action> {
    if modifiers.command {
        return (key == Key::S).then_some(Action::Export);
    }
    match key {
        Key::ArrowLeft | Key::A => Some(Action::Reject),
        Key::ArrowRight | Key::D => Some(Action::Accept),
        Key::ArrowUp | Key::W => Some(Action::Uncertain),
        Key::U => Some(Action::Undo),
        Key::N => Some(Action::Skip),
        Key::PageUp => Some(Action::PrevUnlabeled),
        Key::PageDown => Some(Action::NextUnlabeled),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Key::ArrowLeft, Action::Reject)]
    #[case(Key::A, Action::Reject)]
    #[case(Key::ArrowRight, Action::Accept)]
    #[case(Key::D, Action::Accept)]
    #[case(Key::ArrowUp, Action::Uncertain)]
    #[case(Key::W, Action::Uncertain)]
    #[case(Key::U, Action::Undo)]
    #[case(Key::N, Action::Skip)]
    #[case(Key::PageUp, Action::PrevUnlabeled)]
    #[case(Key::PageDown, Action::NextUnlabeled)]
    fn plain_keys(#[case] key: Key, #[case] expected: Action) {
        assert_eq!(action_for_key(key, Modifiers::NONE), Some(expected));
    }

    #[test]
    fn command_s_exports() {
        assert_eq!(action_for_key(Key::S, Modifiers::COMMAND), Some(Action::Export));
        assert_eq!(action_for_key(Key::S, Modifiers::NONE), None);
        assert_eq!(action_for_key(Key::A, Modifiers::COMMAND), None);
    }

    #[test]
    fn unbound_keys_do_nothing() {
        assert_eq!(action_for_key(Key::Q, Modifiers::NONE), None);
        assert_eq!(action_for_key(Key::ArrowDown, Modifiers::NONE), None);
    }
}
