use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the outlook engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The scenario selector is not one of `all`, `conservative`, `base` or
    /// `optimistic`, or the active calibration has no entry for it.
    #[error("unknown scenario `{0}`; expected one of all, conservative, base, optimistic")]
    UnknownScenario(String),

    #[error("cannot summarize an empty population")]
    EmptyPopulation,

    /// Every sampled value is identical, so no bin width can be derived.
    #[error("all sampled values equal {value}; histogram range is degenerate")]
    DegenerateRange { value: f64 },

    #[error("histogram bin count must be > 0")]
    InvalidBinCount,

    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),

    #[error("failed to read calibration file {}: {source}", path.display())]
    CalibrationIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse calibration JSON: {0}")]
    CalibrationParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
