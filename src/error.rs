/// Errors raised at the edges of the engine (JS input, diagrams, configuration).
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("coordinate ({x}, {y}) is off the board")]
    OutOfBounds { x: i32, y: i32 },

    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),

    #[error("invalid color code: {0} (expected 1=black or 2=white)")]
    InvalidColor(u8),

    #[error("invalid play mode: {0}")]
    InvalidPlayMode(u8),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur when loading agent configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config validation error: {0}")]
    Validation(String),
}
