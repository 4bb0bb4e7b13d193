//! Error types for the simulation core and its configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by field operations.
///
/// None of these occur during normal ticking; they signal misuse by the
/// driver (drag protocol) or a corrupted position reaching the spatial index.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// `pick_up` was called while entities are still held.
    #[error("a drag is already in progress ({held} entities held)")]
    DragInProgress {
        /// Number of entities currently held.
        held: usize,
    },
    /// `drag_to` or `release` was called with nothing held.
    #[error("no entity is held")]
    NothingHeld,
    /// The spatial index rejected a position (non-finite coordinate).
    #[error("spatial index error: {0}")]
    Spatial(String),
}

/// Errors raised while loading or validating [`super::params::Params`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid JSON for `Params`.
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// A value is out of its allowed range.
    #[error("invalid parameter `{field}`: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}
