//! Error types for enemy data loading and pool management.

use thiserror::Error;

use super::components::TemplateId;

/// Errors that can occur when loading enemy definitions or pool configuration.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}

/// Malformed pool setup. Always fatal at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A regular or boss group lists no templates.
    #[error("{group} has an empty template set")]
    EmptyTemplateSet { group: String },

    /// Pool size per template must be at least 1.
    #[error("Pool size per template must be at least 1, got {0}")]
    InvalidPoolSize(usize),

    /// Level range is empty or starts below 1.
    #[error("Invalid level range {min}..={max}")]
    InvalidLevelRange { min: u32, max: u32 },

    /// Boss groups must target a level of at least 1.
    #[error("Invalid boss level {0}")]
    InvalidBossLevel(u32),

    /// The unit factory has no definition for this template.
    #[error("Unknown template '{0}'")]
    UnknownTemplate(TemplateId),

    /// The template's definition cannot produce a playable unit.
    #[error("Invalid template '{template}': {details}")]
    InvalidTemplate { template: TemplateId, details: String },
}

/// Errors returned by [`EnemyPoolEngine`](super::EnemyPoolEngine) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Invalid pool configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Enemy pools are already initialized")]
    AlreadyInitialized,

    #[error("Enemy pools have not been initialized")]
    NotInitialized,

    /// No regular group covers the level and no boss is eligible.
    #[error("No enemy pool covers level {level}")]
    NoEligiblePool { level: u32 },

    /// Every instance of the template is in use and growth is disabled.
    #[error("Pool for '{template}' is exhausted")]
    PoolExhausted { template: TemplateId },

    #[error("No active unit to report as defeated")]
    NoActiveUnit,

    /// The reported unit was already replaced by another spawn.
    #[error("Defeat reported for '{template}', which is no longer the current unit")]
    StaleUnit { template: TemplateId },

    #[error("Defeat reported for level {reported}, but the current unit was spawned for level {spawned}")]
    LevelMismatch { reported: u32, spawned: u32 },
}
