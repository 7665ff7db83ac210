use thiserror::Error;

/// Everything that can go wrong while reading a GYRE output file.
///
/// Errors coming from the underlying I/O, HDF5 or JSON layers are passed
/// through unchanged; the remaining variants are raised by the loaders' own
/// schema and shape checks.
#[derive(Error, Debug)]
pub enum GyreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "hdf5")]
    #[error(transparent)]
    Hdf5(#[from] hdf5::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("Missing required attribute '{0}'")]
    MissingAttribute(String),
    #[error("Missing required dataset '{0}'")]
    MissingDataset(String),
    #[error("'{name}' has an unexpected type, expected {expected}")]
    TypeMismatch { name: String, expected: &'static str },
    #[error("'{name}' has {found} rows but {expected} were expected")]
    ShapeMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("'{name}' has unsupported rank {rank}")]
    BadRank { name: String, rank: usize },
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

impl GyreError {
    pub(crate) fn type_mismatch(name: &str, expected: &'static str) -> Self {
        GyreError::TypeMismatch {
            name: name.to_string(),
            expected,
        }
    }

    pub(crate) fn shape_mismatch(name: &str, expected: usize, found: usize) -> Self {
        GyreError::ShapeMismatch {
            name: name.to_string(),
            expected,
            found,
        }
    }
}

pub type Result<T> = std::result::Result<T, GyreError>;
