//! Error types for the bus factor core.

use chrono::NaiveDate;

/// Top-level error enum for the bus factor library.
#[derive(Debug, thiserror::Error)]
pub enum BusFactorError {
    #[error("no anchor commit set: call set_anchor before processing commits")]
    NotReady,

    #[error("anchor commit cannot change once ingestion has started")]
    AnchorLocked,

    #[error("change date {date} is after the anchor date {anchor}")]
    InvalidDecayInput { date: NaiveDate, anchor: NaiveDate },

    #[error("compact summary references unknown user id {0}")]
    UnknownUser(u32),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("glob error: {0}")]
    Glob(#[from] globset::Error),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}

pub type Result<T> = std::result::Result<T, BusFactorError>;
