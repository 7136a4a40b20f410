use thiserror::Error;

/// Failures of the line reconstruction pipeline.
///
/// Degenerate geometry and unmatched sample points are not errors; they are
/// absorbed by the pipeline and only reduce recall.
#[derive(Debug, Error)]
pub enum LineError {
    /// The rounded candidate slopes have no single most frequent value, so the
    /// page skew cannot be inferred.
    #[error("no dominant skew: slopes {tied:?} each occur {count} times")]
    NoDominantSkew { tied: Vec<f64>, count: usize },

    /// A word or block polygon did not have exactly four vertices.
    #[error("{what} polygon has {found} vertices, expected 4")]
    MalformedPolygon { what: String, found: usize },

    #[error("page dimensions are unknown")]
    UnknownPageSize,

    #[error("invalid reader options: {0}")]
    InvalidOptions(String),

    #[error("malformed annotate response")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LineError>;
