use std::path::PathBuf;
use thiserror::Error;

use crate::accuracy::Violation;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read error bounds from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid error bounds JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid bound {element}.{field} = {value}: must be finite and non-negative")]
    InvalidBound {
        element: &'static str,
        field: &'static str,
        value: f64,
    },
}

#[derive(Error, Debug)]
pub enum AccuracyError {
    #[error("{} measurement(s) exceed their bound: {}", .violations.len(), summarize(.violations))]
    BoundsExceeded { violations: Vec<Violation> },
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
