//! Error types and error handling utilities.

use std::path::PathBuf;

/// A result type returning electrode-processing errors.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for electrode extraction and mapping checks.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required input file does not exist.
    #[error("required input not found: {}", path.display())]
    InputAbsent {
        /// The path that was looked up.
        path: PathBuf,
    },
    /// A filtering stage left nothing to work with.
    #[error("empty result: {0}")]
    EmptyResult(String),
    /// The point set cannot support the requested geometric computation.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
    /// The number of extracted electrodes differs from the expected count.
    #[error("expected {expected} electrodes, but extracted {actual}")]
    CountMismatch {
        /// The expected number of electrodes.
        expected: usize,
        /// The number of electrodes actually extracted.
        actual: usize,
    },
    /// An input was readable but semantically invalid.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// An I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Malformed YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Malformed TOML configuration.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Returns `true` if this error indicates that a required input was missing.
    #[inline]
    pub fn is_input_absent(&self) -> bool {
        matches!(self, Self::InputAbsent { .. })
    }
}
