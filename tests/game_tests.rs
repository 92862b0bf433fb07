// tests/game_tests.rs

mod common;

use common::*;
use goblit::{
    default_animations, Action, CacheScope, Error, Facing, Flow, Game, GameConfig, IrProject,
    Player, PlayerSheets, PlayerState, Renderer, ScriptedInput, Surface,
};
use macroquad::math::vec2;

const DT: f32 = 1.0 / 60.0;

fn small_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.window.width = 64;
    config.window.height = 64;
    config
}

fn one_level_project() -> IrProject {
    project(vec![level(
        64,
        32,
        vec![layer("Ground", vec![tile([0, 0], SRC_RED), tile([48, 16], SRC_BLUE)])],
    )])
}

fn player_with_idle(idle: Surface) -> Player {
    let blank = || Surface::new(832, 192);
    Player::new(
        PlayerSheets::new(idle, blank(), blank(), blank()),
        default_animations().unwrap(),
    )
}

fn game() -> Game<MemoryLoader> {
    game_with(small_config())
}

fn game_with(config: GameConfig) -> Game<MemoryLoader> {
    let renderer = Renderer::new(MemoryLoader::new(), CacheScope::Level);
    Game::new(
        &config,
        &one_level_project(),
        renderer,
        player_with_idle(Surface::new(832, 192)),
    )
    .expect("game should start")
}

#[test]
fn moving_right_for_one_tick() {
    let mut g = game_with(GameConfig::default());
    assert_eq!(g.camera().viewport(), (1280, 720));
    assert_eq!(g.player().position, vec2(50.0, 150.0));

    let flow = g.update(&ScriptedInput::holding(&[Action::MoveRight]), DT);
    assert_eq!(flow, Flow::Continue);
    assert_eq!(g.player().position.x, 51.5);
    assert_eq!(g.player().velocity().x, 0.0);
    assert_eq!(g.player().facing(), Facing::Right);

    g.update(&ScriptedInput::default(), DT);
    assert_eq!(g.player().position.x, 51.5);
    assert_eq!(g.ticks(), 2);
}

#[test]
fn later_movement_key_wins() {
    let mut g = game();
    g.update(
        &ScriptedInput::holding(&[Action::MoveRight, Action::MoveLeft]),
        DT,
    );
    assert_eq!(g.player().position.x, 48.5);
    assert_eq!(g.player().facing(), Facing::Left);

    g.update(&ScriptedInput::holding(&[Action::MoveUp, Action::MoveDown]), DT);
    assert_eq!(g.player().position.y, 151.5);
}

#[test]
fn camera_keys_pan_by_step() {
    let mut g = game();
    g.update(&ScriptedInput::holding(&[Action::CameraRight]), DT);
    g.update(&ScriptedInput::holding(&[Action::CameraRight]), DT);
    assert_eq!(g.camera().position(), vec2(10.0, 0.0));
    g.update(&ScriptedInput::holding(&[Action::CameraLeft]), DT);
    assert_eq!(g.camera().position(), vec2(5.0, 0.0));
    // both held cancel out
    g.update(
        &ScriptedInput::holding(&[Action::CameraLeft, Action::CameraRight]),
        DT,
    );
    assert_eq!(g.camera().position(), vec2(5.0, 0.0));
}

#[test]
fn cycle_is_edge_triggered() {
    let mut g = game();
    g.update(&ScriptedInput::holding(&[Action::CycleAnimation]), DT);
    assert_eq!(g.player().state(), PlayerState::Idle);
    g.update(&ScriptedInput::pressing(&[Action::CycleAnimation]), DT);
    assert_eq!(g.player().state(), PlayerState::Run);
}

#[test]
fn quit_stops_before_the_player_moves() {
    let mut g = game();
    let input = ScriptedInput {
        down: vec![Action::MoveRight, Action::Quit],
        pressed: vec![Action::Quit],
    };
    assert_eq!(g.update(&input, DT), Flow::Quit);
    assert_eq!(g.player().position.x, 50.0);
    assert_eq!(g.ticks(), 0);
}

#[test]
fn banner_shows_after_five_whole_seconds() {
    let mut g = game();
    let idle = ScriptedInput::default();
    for _ in 0..359 {
        g.update(&idle, DT);
    }
    assert!(!g.show_banner());
    g.update(&idle, DT);
    assert!(g.show_banner());
}

#[test]
fn unknown_start_level_fails() {
    let mut config = small_config();
    config.level = 3;
    let renderer = Renderer::new(MemoryLoader::new(), CacheScope::Level);
    let err = Game::new(
        &config,
        &one_level_project(),
        renderer,
        player_with_idle(Surface::new(832, 192)),
    )
    .err()
    .expect("level 3 does not exist");
    assert!(matches!(err, Error::LevelNotFound(3)));
}

#[test]
fn switching_level_reloads_tilesets() {
    let mut g = game();
    let p = project(vec![
        level(16, 16, vec![layer("A", vec![tile([0, 0], SRC_RED)])]),
        level(32, 16, vec![layer("B", vec![tile([16, 0], SRC_BLUE)])]),
    ]);
    g.switch_level(&p, 1).unwrap();
    assert_eq!(g.current_level(), 1);
    assert_eq!(g.level().width, 32);
    assert_eq!(g.renderer().loader().load_count(), 2);
    assert!(matches!(g.switch_level(&p, 9), Err(Error::LevelNotFound(9))));
    assert_eq!(g.current_level(), 1);
}

#[test]
fn frame_has_level_then_player_on_top() {
    let mut sheet = Surface::new(832, 192);
    sheet.set_pixel(0, 0, [1, 2, 3, 255]);
    let renderer = Renderer::new(MemoryLoader::new(), CacheScope::Level);
    let mut g = Game::new(
        &small_config(),
        &one_level_project(),
        renderer,
        player_with_idle(sheet),
    )
    .unwrap();
    g.player_mut().position = vec2(20.0, 4.0);

    let mut screen = Surface::new(64, 64);
    g.draw(&mut screen);
    assert_eq!(screen.pixel(0, 0), RED);
    assert_eq!(screen.pixel(20, 4), [1, 2, 3, 255]);
    assert_eq!(screen.pixel(48, 16), BLUE);
    assert_eq!(screen.pixel(10, 40), PLACEHOLDER);
}

#[test]
fn player_tracks_camera_pan() {
    let mut g = game();
    g.player_mut().position = vec2(30.0, 10.0);
    g.camera_mut().set_position(10.0, 0.0);
    assert_eq!(g.player_screen_position(), vec2(20.0, 10.0));
}
