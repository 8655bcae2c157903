//! Error types for model loading and canvas setup

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a model or sizing the canvas
#[derive(Debug, Error)]
pub enum Error {
    /// The model file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Binary STL shorter than its 84-byte header
    #[error("file too small to be a valid STL ({0} bytes)")]
    StlTooShort(usize),

    /// Binary STL whose body ends before the declared triangle count
    #[error("unexpected end of STL data: header declares {expected} triangles, found room for {found}")]
    StlTruncated { expected: usize, found: usize },

    /// Canvas dimensions whose cell count overflows or exceeds the limit
    #[error("canvas of {rows} rows by {cols} columns is too large (limit {limit} cells)")]
    CanvasTooLarge { rows: usize, cols: usize, limit: usize },

    /// ASCII STL syntax error
    #[error("failed to parse ASCII STL: {0}")]
    StlAscii(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
