use std::path::PathBuf;
use std::{error, fmt, io};

/// Error type for level loading, compositing and camera configuration
#[derive(Debug)]
pub enum Error {
    /// File I/O error
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// JSON parse error
    Json {
        /// File being decoded (empty for in-memory documents)
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
    /// Image decode error for a tileset or sprite sheet
    Image {
        /// Image file being decoded
        path: PathBuf,
        /// Underlying error
        source: image::ImageError,
    },
    /// Unsupported file format
    UnsupportedFormat(String),
    /// Layer `__type` the runtime does not know
    UnsupportedLayerType {
        /// Layer identifier
        layer: String,
        /// Type tag found in the file
        kind: String,
    },
    /// Level dimensions are zero or too large for a composite
    InvalidLevel(String),
    /// Requested level index does not exist in the project
    LevelNotFound(usize),
    /// A layer references a tileset that is not in the cache
    MissingTileset {
        /// Layer identifier
        layer: String,
        /// Tileset path as authored
        path: String,
    },
    /// Camera scale must be finite and strictly positive
    InvalidScale(f32),
    /// Animation frame range is malformed or outside the grid
    InvalidFrameRange(String),
    /// Player speed must be finite and strictly positive
    InvalidSpeed(f32),
    /// Configuration value out of range
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
            Error::Json { path, source } => {
                write!(f, "Failed to parse JSON {}: {}", path.display(), source)
            }
            Error::Image { path, source } => {
                write!(f, "Failed to decode image {}: {}", path.display(), source)
            }
            Error::UnsupportedFormat(path) => write!(f, "Unsupported file format: {}", path),
            Error::UnsupportedLayerType { layer, kind } => {
                write!(f, "Unsupported layer type '{}' in layer '{}'", kind, layer)
            }
            Error::InvalidLevel(msg) => write!(f, "Invalid level: {}", msg),
            Error::LevelNotFound(idx) => write!(f, "Level {} not found in project", idx),
            Error::MissingTileset { layer, path } => {
                write!(f, "Tileset '{}' for layer '{}' was never loaded", path, layer)
            }
            Error::InvalidScale(s) => write!(f, "Camera scale must be > 0, got {}", s),
            Error::InvalidFrameRange(range) => write!(f, "Invalid frame range: {}", range),
            Error::InvalidSpeed(s) => write!(f, "Player speed must be > 0, got {}", s),
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Json { source, .. } => Some(source),
            Error::Image { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Shorthand used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
