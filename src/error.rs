// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading sensor data or interpreting user selections.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("no phase signal columns found (expected names like 'l1_p', 'l2_v')")]
    NoSignalColumns,

    #[error("unrecognised day '{0}'")]
    InvalidDay(String),

    #[error("unrecognised time of day '{0}'")]
    InvalidTime(String),

    #[error("unknown signal type '{0}' (expected one of p, q, i, v)")]
    UnknownSignalType(String),

    #[error("unknown outlier mode '{0}' (expected 'include' or 'remove')")]
    UnknownOutlierMode(String),
}

pub type SensorResult<T> = Result<T, SensorError>;
