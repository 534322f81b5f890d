//! Error types for planlib-rs.
//!
//! A single `thiserror`-derived enum covers every recoverable failure raised
//! by the engine. Lookups that may legitimately find nothing return `Option`
//! instead. The `ensure!` and `fail!` macros build the common
//! variants with a formatted message.

use thiserror::Error;

/// The top-level error type used throughout planlib-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (raised by `fail!`).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (raised by `ensure!`).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Index out of range.
    #[error("index ({index}) out of range [0, {size})")]
    IndexOutOfRange {
        /// The index that was out of range.
        index: usize,
        /// The size of the container.
        size: usize,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A sequence of ranges is empty, reversed, unordered or overlapping.
    #[error("inconsistent ranges: {0}")]
    UnorderedRanges(String),

    /// Two quantities that must share a unit do not.
    #[error("unit mismatch: expected {expected}, found {found}")]
    UnitMismatch {
        /// The unit every value was expected to use.
        expected: String,
        /// The unit actually encountered.
        found: String,
    },

    /// A partition produced a different number of buckets than requested.
    #[error("bucket count mismatch: requested {expected}, produced {actual}")]
    BucketCountMismatch {
        /// Number of buckets the caller asked for.
        expected: usize,
        /// Number of buckets actually produced.
        actual: usize,
    },
}

/// Shorthand `Result` type used throughout planlib-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use pl_core::{ensure, errors::Error};
/// fn positive(x: f64) -> pl_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use pl_core::{fail, errors::Error};
/// fn always_err() -> pl_core::errors::Result<()> {
///     fail!("calendar {} not found", 7);
/// }
/// assert_eq!(always_err(), Err(Error::Runtime("calendar 7 not found".into())));
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
