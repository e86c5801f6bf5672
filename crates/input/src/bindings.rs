//! Key code to semantic action bindings.

use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Semantic input actions understood by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Jump,
    Dash,
    /// Hold or toggle, depending on the sprint mode setting.
    Sprint,
    SwitchCamera,
    /// Debug: kill the player on the spot.
    ForceDeath,
    ExitLevel,
    Pause,
}

/// Maps physical keys to actions. Several keys may map to the same action.
#[derive(Debug, Clone)]
pub struct InputBindings {
    keys: HashMap<KeyCode, Action>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self { keys: HashMap::new() };
        bindings
            .bind(KeyCode::KeyW, Action::MoveForward)
            .bind(KeyCode::ArrowUp, Action::MoveForward)
            .bind(KeyCode::KeyS, Action::MoveBackward)
            .bind(KeyCode::ArrowDown, Action::MoveBackward)
            .bind(KeyCode::KeyA, Action::MoveLeft)
            .bind(KeyCode::ArrowLeft, Action::MoveLeft)
            .bind(KeyCode::KeyD, Action::MoveRight)
            .bind(KeyCode::ArrowRight, Action::MoveRight)
            .bind(KeyCode::Space, Action::Jump)
            .bind(KeyCode::KeyE, Action::Dash)
            .bind(KeyCode::ShiftLeft, Action::Sprint)
            .bind(KeyCode::ShiftRight, Action::Sprint)
            .bind(KeyCode::KeyC, Action::SwitchCamera)
            .bind(KeyCode::KeyK, Action::ForceDeath)
            .bind(KeyCode::Escape, Action::ExitLevel)
            .bind(KeyCode::KeyP, Action::Pause);
        bindings
    }
}

impl InputBindings {
    /// Bind a key, replacing any previous binding for it.
    pub fn bind(&mut self, key: KeyCode, action: Action) -> &mut Self {
        self.keys.insert(key, action);
        self
    }

    /// Look up the action for a key.
    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.keys.get(&key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_wasd_and_arrows() {
        let b = InputBindings::default();
        assert_eq!(b.action_for(KeyCode::KeyW), Some(Action::MoveForward));
        assert_eq!(b.action_for(KeyCode::ArrowUp), Some(Action::MoveForward));
        assert_eq!(b.action_for(KeyCode::Space), Some(Action::Jump));
        assert_eq!(b.action_for(KeyCode::KeyZ), None);
    }

    #[test]
    fn rebinding_replaces_action() {
        let mut b = InputBindings::default();
        b.bind(KeyCode::KeyE, Action::SwitchCamera);
        assert_eq!(b.action_for(KeyCode::KeyE), Some(Action::SwitchCamera));
    }
}
