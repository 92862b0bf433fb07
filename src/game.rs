use crate::camera::Camera;
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::input::{Action, InputSource};
use crate::ir_level::{IrLevel, IrProject};
use crate::player::Player;
use crate::render::compositor::Renderer;
use crate::surface::Surface;
use crate::tileset::TilesetLoader;
use macroquad::math::Vec2;

/// Ticks per second the loop is paced for
pub const TICKS_PER_SECOND: u64 = 60;

/// Whether the loop keeps running after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going
    Continue,
    /// Quit was requested
    Quit,
}

/// Frame orchestrator: input → motion → composite → present
pub struct Game<L: TilesetLoader> {
    camera: Camera,
    renderer: Renderer<L>,
    player: Player,
    level: IrLevel,
    current_level: usize,
    camera_step: f32,
    ticks: u64,
}

fn log_project(project: &IrProject) {
    log::info!("project format version {}", project.json_version);
    for (i, ts) in project.tilesets.iter().enumerate() {
        log::info!(
            "tileset {}: uid={} id={} path={}",
            i,
            ts.uid,
            ts.identifier,
            ts.path.as_deref().unwrap_or("<internal>")
        );
    }
    for (i, level) in project.levels.iter().enumerate() {
        log::info!("level {}: {}", i, level.identifier);
    }
}

impl<L: TilesetLoader> Game<L> {
    /// Build the camera from `config`, then load the configured level
    pub fn new(
        config: &GameConfig,
        project: &IrProject,
        mut renderer: Renderer<L>,
        player: Player,
    ) -> Result<Self> {
        log_project(project);

        let c = &config.camera;
        let camera = Camera::new(
            config.window.width,
            config.window.height,
            c.x,
            c.y,
            c.rotation,
            c.scale,
        )?;
        camera.info();

        let level = project
            .level(config.level)
            .ok_or(Error::LevelNotFound(config.level))?
            .clone();
        renderer.load_level(&level)?;

        Ok(Game {
            camera,
            renderer,
            player,
            level,
            current_level: config.level,
            camera_step: c.step,
            ticks: 0,
        })
    }

    /// Replace the current level with `project`'s level `index`
    pub fn switch_level(&mut self, project: &IrProject, index: usize) -> Result<()> {
        let level = project
            .level(index)
            .ok_or(Error::LevelNotFound(index))?
            .clone();
        self.renderer.load_level(&level)?;
        self.level = level;
        self.current_level = index;
        Ok(())
    }

    /// One tick of game logic. Later movement keys win because every
    /// `move_by` replaces the velocity.
    pub fn update<I: InputSource + ?Sized>(&mut self, input: &I, dt: f32) -> Flow {
        if input.is_down(Action::CameraRight) {
            self.camera.move_position(self.camera_step, 0.0);
        }
        if input.is_down(Action::CameraLeft) {
            self.camera.move_position(-self.camera_step, 0.0);
        }

        if input.is_down(Action::MoveRight) {
            self.player.move_by(1.0, 0.0);
        }
        if input.is_down(Action::MoveLeft) {
            self.player.move_by(-1.0, 0.0);
        }
        if input.is_down(Action::MoveUp) {
            self.player.move_by(0.0, -1.0);
        }
        if input.is_down(Action::MoveDown) {
            self.player.move_by(0.0, 1.0);
        }

        if input.just_pressed(Action::CycleAnimation) {
            self.player.cycle_state();
        }
        if input.just_pressed(Action::Quit) {
            return Flow::Quit;
        }

        self.player.update(dt);
        self.ticks += 1;
        Flow::Continue
    }

    /// Compose the level through the camera, then the player on top
    pub fn draw(&mut self, screen: &mut Surface) {
        self.renderer
            .render_frame(&mut self.camera, screen, &self.level);
        let at = self.player_screen_position();
        self.player.draw(screen, at);
    }

    /// Where the player's top-left corner lands after the camera blit
    pub fn player_screen_position(&self) -> Vec2 {
        self.camera
            .blit_transform()
            .apply(self.player.position - self.camera.position())
    }

    /// `true` once more than five whole seconds have been simulated
    pub fn show_banner(&self) -> bool {
        self.ticks / TICKS_PER_SECOND > 5
    }

    /// Camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Player
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Compositor
    pub fn renderer(&self) -> &Renderer<L> {
        &self.renderer
    }

    /// Level being shown
    pub fn level(&self) -> &IrLevel {
        &self.level
    }

    /// Index of the level being shown
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// Updates run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
