use anyhow::Context;
use goblit::{
    decode_project_file, default_animations, CacheScope, DiskLoader, Flow, Game, GameConfig,
    KeyboardInput, Player, PlayerSheets, Renderer, Surface,
};
use macroquad::prelude::*;
use std::path::Path;

const CONFIG_PATH: &str = "goblit.json";

fn window_conf() -> Conf {
    let config = GameConfig::load_or_default(Path::new(CONFIG_PATH)).unwrap_or_default();
    Conf {
        window_title: config.window.title,
        window_width: config.window.width as i32,
        window_height: config.window.height as i32,
        ..Default::default()
    }
}

async fn run() -> anyhow::Result<()> {
    let config = GameConfig::load_or_default(Path::new(CONFIG_PATH))
        .with_context(|| format!("Reading config {}", CONFIG_PATH))?;

    let project = decode_project_file(&config.project)
        .with_context(|| format!("Opening project {}", config.project.display()))?;

    let renderer = Renderer::new(DiskLoader::new(&config.asset_root), CacheScope::Level);
    let sheets = PlayerSheets::load(&config.sprites)
        .with_context(|| format!("Loading sprites from {}", config.sprites.display()))?;
    let player = Player::new(sheets, default_animations()?).with_speed(config.player_speed)?;

    let mut game = Game::new(&config, &project, renderer, player).context("Loading level")?;

    let (w, h) = game.camera().viewport();
    let mut screen = Surface::new(w, h);
    let (tw, th) = (
        u16::try_from(w).context("Window width exceeds texture limits")?,
        u16::try_from(h).context("Window height exceeds texture limits")?,
    );
    let texture = Texture2D::from_rgba8(tw, th, screen.pixels());
    texture.set_filter(FilterMode::Nearest);
    let input = KeyboardInput;

    loop {
        if game.update(&input, get_frame_time()) == Flow::Quit {
            break;
        }

        screen.clear();
        game.draw(&mut screen);
        texture.update_from_bytes(w, h, screen.pixels());

        clear_background(BLACK);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        if game.show_banner() {
            draw_text("Goblit engine (after 5 sec)", 10.0, 20.0, 20.0, WHITE);
        }
        draw_text(
            &format!("FPS: {}", get_fps()),
            screen_width() - 135.0,
            55.0,
            30.0,
            RED,
        );

        next_frame().await;
    }
    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}
