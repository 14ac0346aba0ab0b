use super::super::super::messages::Message;
use super::super::super::state::{App, Tab};
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = match key.as_ref() {
            Key::Named(key::Named::Escape) => "escape".to_string(),
            Key::Named(key::Named::Space) => "space".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };

        if Self::shortcut_matches(&self.config.key_dismiss, "escape", &pressed, modifiers) {
            if self.notice.is_some() {
                Some(Message::DismissNotice)
            } else if self.history_modal.is_some() {
                Some(Message::CloseModal)
            } else {
                None
            }
        } else if Self::shortcut_matches(&self.config.key_safe_quit, "ctrl+q", &pressed, modifiers)
        {
            Some(Message::SafeQuit)
        } else if Self::shortcut_matches(
            &self.config.key_toggle_stopwatch,
            "ctrl+p",
            &pressed,
            modifiers,
        ) {
            Some(Message::ToggleStopwatch)
        } else if modifiers.control()
            && !modifiers.alt()
            && !modifiers.shift()
            && self.notice.is_none()
            && self.history_modal.is_none()
        {
            Tab::from_shortcut_digit(&pressed).map(Message::SwitchTab)
        } else {
            None
        }
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);

        let mut required_ctrl = false;
        let mut required_alt = false;
        let mut required_logo = false;
        let mut required_shift = false;
        let mut required_key: Option<&str> = None;

        for token in normalized
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match token {
                "ctrl" | "control" => required_ctrl = true,
                "alt" => required_alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => required_logo = true,
                "shift" => required_shift = true,
                "esc" => required_key = Some("escape"),
                key => required_key = Some(key),
            }
        }

        let Some(required_key) = required_key else {
            return false;
        };
        if pressed != required_key {
            return false;
        }

        modifiers.control() == required_ctrl
            && modifiers.alt() == required_alt
            && modifiers.logo() == required_logo
            && modifiers.shift() == required_shift
    }

    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized.replace("spacebar", "space")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::test_support::build_test_app;
    use crate::app::state::{Notice, NoticeKind};
    use iced::keyboard::Modifiers;

    fn character(ch: &str) -> Key {
        Key::Character(ch.into())
    }

    #[test]
    fn matches_ctrl_p_shortcut() {
        assert!(App::shortcut_matches("ctrl+p", "x", "p", Modifiers::CTRL));
        assert!(!App::shortcut_matches(
            "ctrl+p",
            "x",
            "p",
            Modifiers::CTRL | Modifiers::SHIFT,
        ));
    }

    #[test]
    fn blank_binding_falls_back() {
        assert_eq!(App::normalize_shortcut_token("  ", "ctrl+q"), "ctrl+q");
        assert!(App::shortcut_matches("", "escape", "escape", Modifiers::empty()));
    }

    #[test]
    fn ctrl_digit_switches_tabs() {
        let app = build_test_app();
        let message = app.shortcut_message_for_key(character("4"), Modifiers::CTRL);
        assert!(matches!(message, Some(Message::SwitchTab(Tab::ReadingLog))));
        assert!(
            app.shortcut_message_for_key(character("4"), Modifiers::empty())
                .is_none()
        );
    }

    #[test]
    fn ctrl_digit_ignored_while_an_overlay_is_open() {
        let mut app = build_test_app();
        app.history_modal = Some(crate::app::state::HistoryView::loading(1, "A".into()));
        assert!(
            app.shortcut_message_for_key(character("2"), Modifiers::CTRL)
                .is_none()
        );

        app.history_modal = None;
        app.notify_error("Could not save the session");
        let effects = app.reduce(Message::KeyPressed {
            key: character("2"),
            modifiers: Modifiers::CTRL,
        });
        assert!(effects.is_empty());
        assert_eq!(app.active_tab, Tab::Library);

        app.notice = None;
        assert!(matches!(
            app.shortcut_message_for_key(character("2"), Modifiers::CTRL),
            Some(Message::SwitchTab(_))
        ));
    }

    #[test]
    fn escape_prefers_the_notice_over_the_modal() {
        let mut app = build_test_app();
        let escape = || Key::Named(key::Named::Escape);
        assert!(
            app.shortcut_message_for_key(escape(), Modifiers::empty())
                .is_none()
        );

        app.history_modal = Some(crate::app::state::HistoryView::loading(1, "A".into()));
        assert!(matches!(
            app.shortcut_message_for_key(escape(), Modifiers::empty()),
            Some(Message::CloseModal)
        ));

        app.notice = Some(Notice {
            kind: NoticeKind::Info,
            text: "saved".into(),
        });
        assert!(matches!(
            app.shortcut_message_for_key(escape(), Modifiers::empty()),
            Some(Message::DismissNotice)
        ));
    }
}
