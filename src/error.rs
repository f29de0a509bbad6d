use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TerrainError {
    #[error("terrain needs at least {min} points, got {got}")]
    TooFewPoints { min: usize, got: usize },
    #[error("terrain accepts at most {max} points, got {got}")]
    TooManyPoints { max: usize, got: usize },
    #[error("terrain point {index} is not finite")]
    NonFinite { index: usize },
    #[error("terrain point {index} goes back in x ({x} < {previous_x})")]
    Unordered { index: usize, x: f64, previous_x: f64 },
    #[error("height range {min_y}..={max_y} is empty or not finite")]
    HeightRange { min_y: f64, max_y: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error while opening file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] json::Error),
    #[error("couldn't find {0}")]
    MissingKey(&'static str),
    #[error("invalid value for {key}: {reason}")]
    InvalidParameter { key: &'static str, reason: String },
    #[error("level {index}: {source}")]
    Level {
        index: usize,
        #[source]
        source: TerrainError,
    },
    #[error("level index {index} out of range, catalog has {len} levels")]
    LevelOutOfRange { index: usize, len: usize },
}
