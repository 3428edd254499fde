use thiserror::Error;

///
/// Errors raised while reading, validating or slicing regions and matrices.
///
/// Undefined index values (masked bins, windows running off a chromosome)
/// are not errors; they are represented as `NaN` in the index curves.
///
#[derive(Error, Debug)]
pub enum TadError {
    /// Malformed region or matrix text input.
    #[error("Format error: {0}")]
    Format(String),

    /// Matrix dimension disagrees with the region count or the index array shape.
    #[error("Dimension error: {0}")]
    Dimension(String),

    /// A query region does not overlap any input region.
    #[error("Range error: {0}")]
    Range(String),

    /// A sparse matrix references a region name that cannot be resolved.
    #[error("Lookup error: {0}")]
    Lookup(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type TadResult<T> = std::result::Result<T, TadError>;
