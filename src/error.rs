use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdIndexError {
    /// A point, box corner or query target had the wrong number of coordinates.
    #[error("Invalid dimension: expected {expected} coordinates, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    /// A point lies outside of the bounding box the tree was built with.
    #[error("Point at insertion index {index} lies outside of the tree bounds")]
    BoundsViolation { index: usize },

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, KdIndexError>;

/// Fail with [`KdIndexError::InvalidDimension`] unless `actual == expected`.
#[inline]
pub(crate) fn check_dimension(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(KdIndexError::InvalidDimension { expected, actual })
    }
}
