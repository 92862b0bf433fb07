use crate::animation::{Animation, Grid};
use crate::error::{Error, Result};
use crate::surface::Surface;
use macroquad::math::{vec2, Vec2};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Velocity per unit of movement intent, also the per-tick decay step
pub const MOVE_SPEED: f32 = 1.5;
/// Sprite frame width
pub const FRAME_W: u32 = 32;
/// Sprite frame height
pub const FRAME_H: u32 = 32;
/// Time each animation frame stays on screen
pub const FRAME_DURATION: Duration = Duration::from_millis(60);

/// Accept `speed` only when it is finite and strictly positive
pub fn check_speed(speed: f32) -> Result<f32> {
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err(Error::InvalidSpeed(speed))
    }
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Sprite drawn as authored
    Right,
    /// Sprite mirrored
    Left,
}

/// Animation state; [`PlayerState::next`] walks them in order and wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    /// Standing
    Idle,
    /// Running
    Run,
    /// Airborne
    Jump,
    /// On a wall
    Climb,
}

impl PlayerState {
    /// Every state in cycle order
    pub const ALL: [PlayerState; 4] = [
        PlayerState::Idle,
        PlayerState::Run,
        PlayerState::Jump,
        PlayerState::Climb,
    ];

    /// Position in [`PlayerState::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Following state, Climb wraps to Idle
    pub fn next(self) -> PlayerState {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerState::Idle => "Idle",
            PlayerState::Run => "Run",
            PlayerState::Jump => "Jump",
            PlayerState::Climb => "Climb",
        };
        f.write_str(name)
    }
}

/// One sprite sheet per state, indexed like [`PlayerState::ALL`]
#[derive(Debug, Clone)]
pub struct PlayerSheets {
    sheets: [Surface; 4],
}

impl PlayerSheets {
    /// Sheets in Idle, Run, Jump, Climb order
    pub fn new(idle: Surface, run: Surface, jump: Surface, climb: Surface) -> Self {
        PlayerSheets {
            sheets: [idle, run, jump, climb],
        }
    }

    /// Load the four 32x32 hero sheets from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let load = |name: &str| {
            let path = dir.join(name);
            log::info!("loading sprite sheet {}", path.display());
            Surface::from_file(&path)
        };
        Ok(Self::new(
            load("Idle (32x32).png")?,
            load("Run (32x32).png")?,
            load("Jump (32x32).png")?,
            load("Wall Jump (32x32).png")?,
        ))
    }

    /// Sheet for `state`
    pub fn sheet(&self, state: PlayerState) -> &Surface {
        &self.sheets[state.index()]
    }
}

/// Frame selection per state as laid out on the hero sheets
pub fn default_animations() -> Result<[Animation; 4]> {
    let idle = Grid::new(FRAME_W, FRAME_H, 640, 192).frames(&[("1-10", "1-2"), ("1-4", "3")])?;
    let run = Grid::new(FRAME_W, FRAME_H, 640, 64).frames(&[("1-10", "1")])?;
    let jump = Grid::new(FRAME_W, FRAME_H, 832, 64).frames(&[("1-13", "1")])?;
    let climb = Grid::new(FRAME_W, FRAME_H, 640, 128).frames(&[("1-10", "1"), ("1-2", "2")])?;
    Ok([
        Animation::new(idle, FRAME_DURATION),
        Animation::new(run, FRAME_DURATION),
        Animation::new(jump, FRAME_DURATION),
        Animation::new(climb, FRAME_DURATION),
    ])
}

/// Player entity: motion integration plus state-driven animation
#[derive(Debug, Clone)]
pub struct Player {
    /// World position of the sprite's top-left corner
    pub position: Vec2,
    velocity: Vec2,
    facing: Facing,
    state: PlayerState,
    /// Driver shown on screen; follows `state` on the next update
    current: PlayerState,
    animations: [Animation; 4],
    sheets: PlayerSheets,
    speed: f32,
}

impl Player {
    /// Player at (50, 150), facing right, idle
    pub fn new(sheets: PlayerSheets, animations: [Animation; 4]) -> Self {
        Player {
            position: vec2(50.0, 150.0),
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            state: PlayerState::Idle,
            current: PlayerState::Idle,
            animations,
            sheets,
            speed: MOVE_SPEED,
        }
    }

    /// Override the movement speed (and decay step).
    ///
    /// Fails with [`Error::InvalidSpeed`] unless `speed` is finite and > 0.
    pub fn with_speed(mut self, speed: f32) -> Result<Self> {
        self.speed = check_speed(speed)?;
        Ok(self)
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Current facing
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Current state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Animation currently on screen
    pub fn current_animation(&self) -> &Animation {
        &self.animations[self.current.index()]
    }

    /// Animation owned by `state`
    pub fn animation(&self, state: PlayerState) -> &Animation {
        &self.animations[state.index()]
    }

    /// Replace the velocity with `(dx, dy) * speed`; facing follows a
    /// non-zero horizontal intent.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        if dx > 0.0 {
            self.facing = Facing::Right;
        } else if dx < 0.0 {
            self.facing = Facing::Left;
        }
        self.velocity = vec2(dx, dy) * self.speed;
    }

    /// Advance to the next animation state
    pub fn cycle_state(&mut self) {
        self.state = self.state.next();
        log::debug!("player state -> {}", self.state);
    }

    /// One tick: integrate, decay, then advance the animation by `dt`.
    ///
    /// Horizontal velocity decays toward zero from both sides; vertical
    /// velocity only while positive, so upward velocity persists.
    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity;

        if self.velocity.x > 0.0 {
            self.velocity.x = (self.velocity.x - self.speed).max(0.0);
        } else if self.velocity.x < 0.0 {
            self.velocity.x = (self.velocity.x + self.speed).min(0.0);
        }
        if self.velocity.y > 0.0 {
            self.velocity.y = (self.velocity.y - self.speed).max(0.0);
        }

        self.current = self.state;
        self.animations[self.current.index()].update(dt);
    }

    /// Draw the current frame with its top-left corner at `at`
    pub fn draw(&self, dest: &mut Surface, at: Vec2) {
        let sheet = self.sheets.sheet(self.current);
        let anim = self.current_animation();
        match self.facing {
            Facing::Right => anim.draw(sheet, dest, at, 1.0),
            Facing::Left => anim.draw(sheet, dest, vec2(at.x + FRAME_W as f32, at.y), -1.0),
        }
    }
}
