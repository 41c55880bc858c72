use crate::keybinds::{KeybindTable, Role};
use crate::token::{PhysicalToken, RawInput};

/// Control roles in the order they are checked.
const CONTROLS: [Role; 4] = [Role::Reset, Role::Stop, Role::Play, Role::PlayLoop];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    /// Token is on the ignored list.
    Ignored,
    /// Click landed on a UI control, not the practice surface.
    UiControl,
}

/// What input capture makes of one raw event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Captured {
    /// Left alone: no effect, platform default preserved.
    Pass(PassReason),
    /// A bound control role; never appended to an attempt.
    Control(Role),
    /// A candidate for the current attempt.
    Practice(PhysicalToken),
}

/// Normalizes and filters a raw event against the keybind table.
///
/// Comparisons use the normalized token only; stored bindings and ignored
/// entries are normalized the same way, so `w` and `W` are one token.
pub fn classify(raw: &RawInput, table: &KeybindTable) -> Captured {
    let token = raw.token();

    if table.is_ignored(&token) {
        return Captured::Pass(PassReason::Ignored);
    }
    if raw.is_control_click() {
        return Captured::Pass(PassReason::UiControl);
    }

    match CONTROLS.iter().find(|role| table.is_bound_to(**role, &token)) {
        Some(role) => Captured::Control(*role),
        None => Captured::Practice(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> KeybindTable {
        KeybindTable::new()
            .bind(Role::Wall, "Q")
            .bind(Role::Reset, "R")
            .bind(Role::Stop, "Escape")
            .ignore("w")
    }

    #[test]
    fn lowercase_ignore_entry_matches_normalized_token() {
        assert_eq!(
            classify(&RawInput::char('w'), &table()),
            Captured::Pass(PassReason::Ignored)
        );
        assert_eq!(
            classify(&RawInput::char('W'), &table()),
            Captured::Pass(PassReason::Ignored)
        );
    }

    #[test]
    fn controls_are_detected_on_either_case() {
        assert_eq!(
            classify(&RawInput::char('r'), &table()),
            Captured::Control(Role::Reset)
        );
        assert_eq!(
            classify(&RawInput::key("Escape", "Escape"), &table()),
            Captured::Control(Role::Stop)
        );
    }

    #[test]
    fn ui_clicks_pass_through() {
        assert_eq!(
            classify(&RawInput::control_click(0), &table()),
            Captured::Pass(PassReason::UiControl)
        );
        assert_eq!(
            classify(&RawInput::mouse(0), &table()),
            Captured::Practice(PhysicalToken::mouse(0))
        );
    }
}
