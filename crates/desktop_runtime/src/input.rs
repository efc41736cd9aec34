//! Keyboard mapping for the game view and global overlays.

use crate::{
    model::{GameState, Screen},
    world::MoveKey,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Move(MoveKey),
    Interact,
    TogglePause,
    ToggleCollisionDebug,
}

/// Maps a `KeyboardEvent.key` value, case-insensitively.
pub fn command_for_key(key: &str) -> Option<InputCommand> {
    let key = key.to_lowercase();
    match key.as_str() {
        "escape" => Some(InputCommand::TogglePause),
        "`" => Some(InputCommand::ToggleCollisionDebug),
        "e" => Some(InputCommand::Interact),
        other => MoveKey::from_key(other).map(InputCommand::Move),
    }
}

/// Whether keys the browser would otherwise scroll with should be swallowed.
pub fn prevents_default(key: &str) -> bool {
    matches!(
        key.to_lowercase().as_str(),
        "arrowup" | "arrowdown" | "arrowleft" | "arrowright"
    )
}

/// Escape is ignored on the menus and behind the intro, login and crash overlays.
pub fn can_toggle_pause(state: &GameState) -> bool {
    !matches!(state.screen, Screen::MainMenu | Screen::GameEnding) && !state.overlays.blocks_pause()
}

/// Whether world input (movement and interaction) currently reaches the player.
pub fn world_accepts_input(state: &GameState) -> bool {
    state.screen == Screen::GameWorld
        && !state.overlays.paused
        && !state.overlays.blocks_pause()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{IntroState, LoginState};

    #[test]
    fn keys_map_case_insensitively() {
        assert_eq!(command_for_key("Escape"), Some(InputCommand::TogglePause));
        assert_eq!(command_for_key("E"), Some(InputCommand::Interact));
        assert_eq!(command_for_key("`"), Some(InputCommand::ToggleCollisionDebug));
        assert_eq!(command_for_key("ArrowLeft"), Some(InputCommand::Move(MoveKey::Left)));
        assert_eq!(command_for_key("D"), Some(InputCommand::Move(MoveKey::Right)));
        assert_eq!(command_for_key("q"), None);
        assert!(prevents_default("ArrowDown"));
        assert!(!prevents_default("w"));
    }

    #[test]
    fn pause_is_blocked_on_menus_and_overlays() {
        let mut state = GameState::new("X".to_string(), 10);
        assert!(!can_toggle_pause(&state));
        state.screen = Screen::AgentDesktop;
        assert!(can_toggle_pause(&state));
        state.overlays.login = Some(LoginState::default());
        assert!(!can_toggle_pause(&state));
        state.overlays.login = None;
        state.overlays.intro = Some(IntroState::default());
        assert!(!can_toggle_pause(&state));
        state.overlays.intro = None;
        state.overlays.crashed = true;
        assert!(!can_toggle_pause(&state));
        state.overlays.crashed = false;
        state.screen = Screen::GameEnding;
        assert!(!can_toggle_pause(&state));
    }

    #[test]
    fn world_input_needs_unpaused_world() {
        let mut state = GameState::new("X".to_string(), 10);
        state.screen = Screen::GameWorld;
        assert!(world_accepts_input(&state));
        state.overlays.paused = true;
        assert!(!world_accepts_input(&state));
    }
}
