//! Error types for firespot.

use thiserror::Error;

/// Result alias for firespot operations.
pub type FireSpotResult<T> = std::result::Result<T, FireSpotError>;

/// Errors that can occur while preparing or running a hotspot scan.
///
/// All variants are input-contract or configuration violations and are fatal
/// to the run. Empty candidate levels, missing background samples and absent
/// static-mask configuration are ordinary outcomes, not errors.
#[derive(Debug, Error, PartialEq)]
pub enum FireSpotError {
    /// A grid was requested with a zero row or column count.
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
    /// The backing buffer does not match the requested grid shape.
    #[error("buffer of length {got} does not hold {rows}x{cols} elements")]
    BufferSize {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
        /// Actual buffer length.
        got: usize,
    },
    /// A grid is not co-registered with the rest of the scene.
    #[error("grid '{name}' is {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    ShapeMismatch {
        /// Name of the offending grid (channel or mask).
        name: String,
        /// Actual row count.
        rows: usize,
        /// Actual column count.
        cols: usize,
        /// Expected row count.
        expected_rows: usize,
        /// Expected column count.
        expected_cols: usize,
    },
    /// A channel named in the bindings was not supplied by the reader.
    #[error("required channel '{name}' missing from scene input")]
    MissingChannel {
        /// Bound channel name.
        name: String,
    },
    /// An auxiliary mask kind is configured but no source was injected.
    #[error("mask function '{kind}' configured without an auxiliary mask source")]
    MissingAuxSource {
        /// Registry name of the mask kind.
        kind: &'static str,
    },
    /// Static masks are configured but no filter implementation was injected.
    #[error("static masks configured without a static-mask filter")]
    MissingStaticFilter,
    /// The injected static-mask filter broke its per-candidate contract.
    #[error("static-mask filter returned {got} verdicts for {expected} candidates")]
    StaticFilterContract {
        /// Number of candidates submitted.
        expected: usize,
        /// Number of verdicts returned.
        got: usize,
    },
    /// The scan configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
