use std::path::PathBuf;

use crate::game::Player;

/// Errors reported by [`GameEngine`](crate::game::GameEngine).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid action: {0}")]
    InvalidAction(#[from] MoveError),
}

/// Why a column cannot be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is off the board (columns 0..{cols})")]
    InvalidColumn { column: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,
}

/// Errors raised while rebuilding a board from saved or textual form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions must be positive (got {rows}x{cols})")]
    ZeroDimension { rows: usize, cols: usize },

    #[error("board of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },

    #[error("expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell glyph {0:?}")]
    UnknownGlyph(char),

    #[error("piece at row {row}, column {col} has an empty cell below it")]
    FloatingPiece { row: usize, col: usize },
}

/// Errors that end a game played between two agents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("{} made no move", .player.name())]
    NoMove { player: Player },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
