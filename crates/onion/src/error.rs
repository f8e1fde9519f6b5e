//! Error types for configuration, hull computation and point sources.

use std::path::PathBuf;

use thiserror::Error;

/// Which of the two merge tangents a divide-and-conquer search was looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tangent {
    Upper,
    Lower,
}

impl std::fmt::Display for Tangent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tangent::Upper => f.write_str("upper"),
            Tangent::Lower => f.write_str("lower"),
        }
    }
}

/// Invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The algorithm selector did not name one of the known hull algorithms.
    #[error("unknown hull algorithm `{name}` (expected graham, jarvis or divide)")]
    UnknownAlgorithm { name: String },
}

/// Fatal hull computation errors. These signal a broken internal invariant
/// (usually non-robust predicates on near-degenerate input), never bad usage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HullError {
    /// The divide-and-conquer tangent walk did not settle within its budget.
    #[error(
        "{tangent} tangent search did not converge after {iterations} moves \
         (left hull {left} vertices, right hull {right} vertices)"
    )]
    TangentSearchDiverged {
        tangent: Tangent,
        iterations: usize,
        left: usize,
        right: usize,
    },
    /// Gift wrapping visited more vertices than there are distinct points.
    #[error("gift wrapping did not return to its start after {iterations} vertices")]
    WrapDiverged { iterations: usize },
    /// Layer computation was handed a NaN or infinite coordinate.
    #[error("point #{index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
}

/// Failure of `LayerEngine::set_algorithm_by_name`: a bad name or a failed
/// recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetAlgorithmError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Hull(#[from] HullError),
}

/// Point source failures. Recoverable: callers may proceed with no points.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("reading points from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: `{token}` is not a number")]
    Parse { line: usize, token: String },
}
