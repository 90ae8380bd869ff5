use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the ingestion boundary. The geometric core itself is
/// total over valid inputs and never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("contour header declares {declared} vertices but file has {actual}")]
    VertexCountMismatch { declared: usize, actual: usize },

    #[error("non-finite coordinate ({x}, {y}) at {}:{line}", .path.display())]
    InvalidPoint { path: PathBuf, line: usize, x: f64, y: f64 },

    #[error("malformed record at {}:{line}: {reason}", .path.display())]
    MalformedRecord { path: PathBuf, line: usize, reason: String },

    #[error("invalid forecast date {0:?}, expected ddmmyy")]
    BadDate(String),

    #[error("no forecast files for issue date {0} in {}", .1.display())]
    NoForecastFiles(String, PathBuf),

    #[error("invalid WKT polygon: {0}")]
    Wkt(String),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
