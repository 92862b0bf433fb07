//! Runtime configuration, read from an optional JSON file.

use crate::error::Error;
use crate::player::check_speed;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Window settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar text
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Goblit".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Initial camera pose and pan speed
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World X
    pub x: f32,
    /// World Y
    pub y: f32,
    /// Radians
    pub rotation: f32,
    /// Zoom, must be > 0
    pub scale: f32,
    /// Pixels moved per tick while a pan key is held
    pub step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale: 1.0,
            step: 5.0,
        }
    }
}

/// Everything the game loop needs at startup
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window settings
    pub window: WindowConfig,
    /// LDtk project file
    pub project: PathBuf,
    /// Level shown at startup
    pub level: usize,
    /// Root that resolved tileset paths are joined onto
    pub asset_root: PathBuf,
    /// Directory holding the hero sprite sheets
    pub sprites: PathBuf,
    /// Camera pose
    pub camera: CameraConfig,
    /// Player speed per unit of intent
    pub player_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            project: PathBuf::from("assets/map/map1.ldtk"),
            level: 0,
            asset_root: PathBuf::from("assets"),
            sprites: PathBuf::from("assets/hero/Pink Man"),
            camera: CameraConfig::default(),
            player_speed: crate::player::MOVE_SPEED,
        }
    }
}

impl GameConfig {
    /// Parse a config document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json).map_err(|source| Error::Json {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the runtime cannot work with: a window outside
    /// `1..=u16::MAX` on either side (the screen texture is sized in `u16`)
    /// or a player speed that is not finite and positive.
    pub fn validate(&self) -> Result<(), Error> {
        let max = u16::MAX as u32;
        let (w, h) = (self.window.width, self.window.height);
        if w == 0 || h == 0 || w > max || h > max {
            return Err(Error::InvalidConfig(format!("window size {}x{}", w, h)));
        }
        check_speed(self.player_speed)?;
        Ok(())
    }

    /// Read `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let txt = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&txt).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_setup() {
        let c = GameConfig::default();
        assert_eq!((c.window.width, c.window.height), (1280, 720));
        assert_eq!(c.camera.scale, 1.0);
        assert_eq!(c.camera.step, 5.0);
        assert_eq!(c.player_speed, 1.5);
        assert_eq!(c.level, 0);
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let c = GameConfig::from_json(r#"{"level": 2, "camera": {"scale": 2.0}}"#).unwrap();
        assert_eq!(c.level, 2);
        assert_eq!(c.camera.scale, 2.0);
        assert_eq!(c.camera.step, 5.0);
        assert_eq!(c.window.title, "Goblit");
    }

    #[test]
    fn malformed_document_is_a_json_error() {
        assert!(matches!(
            GameConfig::from_json("{ nope"),
            Err(Error::Json { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_player_speed() {
        for doc in [
            r#"{"player_speed": -1.5}"#,
            r#"{"player_speed": 0.0}"#,
        ] {
            assert!(matches!(
                GameConfig::from_json(doc),
                Err(Error::InvalidSpeed(_))
            ));
        }
        assert_eq!(GameConfig::from_json(r#"{"player_speed": 2.0}"#).unwrap().player_speed, 2.0);
    }

    #[test]
    fn rejects_window_outside_texture_range() {
        for doc in [
            r#"{"window": {"width": 0}}"#,
            r#"{"window": {"height": 0}}"#,
            r#"{"window": {"width": 65536}}"#,
        ] {
            assert!(matches!(
                GameConfig::from_json(doc),
                Err(Error::InvalidConfig(_))
            ));
        }
        assert!(GameConfig::from_json(r#"{"window": {"width": 65535, "height": 1}}"#).is_ok());
    }

    #[test]
    fn invalid_file_is_rejected_on_load() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("goblit_bad_config_{}.json", nanos));
        std::fs::write(&path, r#"{"player_speed": -1.5}"#).unwrap();
        let result = GameConfig::load_or_default(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(Error::InvalidSpeed(_))));
    }

    #[test]
    fn missing_file_means_defaults() {
        let path = std::env::temp_dir().join("goblit_no_such_config.json");
        assert_eq!(GameConfig::load_or_default(&path).unwrap(), GameConfig::default());
    }
}
