use crate::action::{Action, MoveKey};

/// Map a raw key name (as reported by the platform) to an action.
///
/// Key names are matched case-insensitively. Movement keys produce an action
/// on both press and release; one-shot keys only on press. Unrecognized keys
/// map to `None`.
pub fn action_for_key(key: &str, pressed: bool) -> Option<Action> {
    let key = key.to_ascii_lowercase();
    let movement = match key.as_str() {
        "w" | "arrowup" => Some(MoveKey::Forward),
        "s" | "arrowdown" => Some(MoveKey::Back),
        "a" | "arrowleft" => Some(MoveKey::Left),
        "d" | "arrowright" => Some(MoveKey::Right),
        _ => None,
    };
    if let Some(key) = movement {
        return Some(Action::Move { key, pressed });
    }
    if !pressed {
        return None;
    }
    match key.as_str() {
        "r" => Some(Action::Reload),
        "mouse0" | "mouseleft" => Some(Action::Fire),
        "escape" => Some(Action::ReleasePointer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_maps_to_movement() {
        assert_eq!(
            action_for_key("w", true),
            Some(Action::Move {
                key: MoveKey::Forward,
                pressed: true
            })
        );
        assert_eq!(
            action_for_key("D", false),
            Some(Action::Move {
                key: MoveKey::Right,
                pressed: false
            })
        );
    }

    #[test]
    fn one_shot_keys_only_on_press() {
        assert_eq!(action_for_key("r", true), Some(Action::Reload));
        assert_eq!(action_for_key("r", false), None);
        assert_eq!(action_for_key("Mouse0", true), Some(Action::Fire));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(action_for_key("q", true), None);
        assert_eq!(action_for_key("f13", false), None);
    }
}
