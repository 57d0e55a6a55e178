//! Error types for w2vgrad.

use thiserror::Error;

/// Recoverable failures: configuration loading and self-check results.
///
/// Malformed numeric input (zero rows, out-of-range indices, unknown tokens)
/// is a caller bug and panics instead.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML config error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON config error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Analytic and numerical gradients disagree.
    #[error(
        "gradient check failed at {count} coordinate(s); first at ({row}, {col}) with relative error {rel_error:.3e}"
    )]
    GradientMismatch {
        count: usize,
        row: usize,
        col: usize,
        rel_error: f64,
    },

    /// Row normalization produced an unexpected value.
    #[error("row normalization mismatch at {row}: expected {expected:?}, got {got:?}")]
    NormalizationMismatch {
        row: usize,
        expected: Vec<f64>,
        got: Vec<f64>,
    },
}

/// Result type for w2vgrad operations.
pub type Result<T> = std::result::Result<T, Error>;
