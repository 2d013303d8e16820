use std::path::PathBuf;

/// Every failure the game can report.
///
/// Resource and configuration errors are fatal at the binary boundary; the
/// only recoverable variant is `NegativeScore`, which rejects a single
/// mutation and leaves the score untouched.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("missing resource '{}': {source}", path.display())]
    MissingResource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}:{column}: '{cell}' is not an integer", path.display())]
    MalformedLayout {
        path: PathBuf,
        line: usize,
        column: usize,
        cell: String,
    },

    #[error("{}:{line}: row has {found} cells, expected {expected}", path.display())]
    RaggedLayout {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("asset index {index} is out of range ({available} assets loaded)")]
    AssetIndexOutOfRange { index: i32, available: usize },

    #[error("character layout has no player")]
    MissingPlayer,

    #[error("character layout has a second player at row {row}, column {col}")]
    DuplicatePlayer { row: usize, col: usize },

    #[error("{meter} cannot be a negative value (got {value})")]
    NegativeScore { meter: &'static str, value: i64 },

    #[error("unknown level '{0}'")]
    UnknownLevel(String),

    #[error("missing sprite sheet '{0}'")]
    MissingSpriteSheet(String),

    #[error("invalid config '{}': {source}", path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config setting '{field}' must be positive (got {value})")]
    NonPositiveSetting { field: &'static str, value: i64 },

    #[error("invalid image '{}': {source}", path.display())]
    InvalidImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("audio: {0}")]
    Audio(String),
}

pub type Result<T> = std::result::Result<T, GameError>;

impl GameError {
    pub(crate) fn missing(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GameError::MissingResource { path: path.into(), source }
    }
}
