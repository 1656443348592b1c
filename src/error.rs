use thiserror::Error;

/// Failure kinds shared by every fallible operation in the crate.
///
/// Core operations validate eagerly and fail fast; they never repair a
/// malformed input heuristically. Degenerate-but-recoverable situations
/// (flat histogram, all-background binary image, pure black in CMYK) are
/// handled with documented fallbacks instead of errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Malformed numeric input: non-numeric text, wrong element count,
    /// even-sized window where odd is required, ragged or empty grid,
    /// non-positive circle radius.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Divide-by-constant operation with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// Too few points to define the requested geometry.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Buffer length inconsistent with the declared dimensions, or an
    /// attempt to combine incompatibly shaped buffers.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
