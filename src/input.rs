//! Key mapping from keyboard state to game actions.

use macroquad::input::{is_key_down, is_key_pressed, KeyCode};

/// Everything the player can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Pan camera left
    CameraLeft,
    /// Pan camera right
    CameraRight,
    /// Walk left
    MoveLeft,
    /// Walk right
    MoveRight,
    /// Walk up
    MoveUp,
    /// Walk down
    MoveDown,
    /// Next player animation state
    CycleAnimation,
    /// Leave the game
    Quit,
}

impl Action {
    /// Every action, in the order the game loop polls them
    pub const ALL: [Action; 8] = [
        Action::CameraRight,
        Action::CameraLeft,
        Action::MoveRight,
        Action::MoveLeft,
        Action::MoveUp,
        Action::MoveDown,
        Action::CycleAnimation,
        Action::Quit,
    ];
}

/// Source of held and edge-triggered action queries
pub trait InputSource {
    /// `true` while the action's key is held
    fn is_down(&self, action: Action) -> bool;
    /// `true` only on the frame the action's key went down
    fn just_pressed(&self, action: Action) -> bool;
}

/// Map a game action to its keyboard key.
pub fn key_for(action: Action) -> KeyCode {
    match action {
        Action::CameraLeft => KeyCode::Key1,
        Action::CameraRight => KeyCode::Key2,
        Action::MoveLeft => KeyCode::Left,
        Action::MoveRight => KeyCode::Right,
        Action::MoveUp => KeyCode::Up,
        Action::MoveDown => KeyCode::Down,
        Action::CycleAnimation => KeyCode::A,
        Action::Quit => KeyCode::Escape,
    }
}

/// Live keyboard state through macroquad; needs a running window
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn is_down(&self, action: Action) -> bool {
        is_key_down(key_for(action))
    }

    fn just_pressed(&self, action: Action) -> bool {
        is_key_pressed(key_for(action))
    }
}

/// Fixed set of held / pressed actions, for replays and tests
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    /// Actions held this frame
    pub down: Vec<Action>,
    /// Actions pressed this frame
    pub pressed: Vec<Action>,
}

impl ScriptedInput {
    /// Input holding `down` with nothing newly pressed
    pub fn holding(down: &[Action]) -> Self {
        ScriptedInput {
            down: down.to_vec(),
            pressed: Vec::new(),
        }
    }

    /// Input pressing `pressed` this frame (pressed keys also count as held)
    pub fn pressing(pressed: &[Action]) -> Self {
        ScriptedInput {
            down: pressed.to_vec(),
            pressed: pressed.to_vec(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn is_down(&self, action: Action) -> bool {
        self.down.contains(&action)
    }

    fn just_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}
