//! Error types for zerosight.

use thiserror::Error;

/// Result alias for zerosight operations.
pub type ZeroSightResult<T> = std::result::Result<T, ZeroSightError>;

/// Errors that can occur while detecting holes or computing a correction.
///
/// Every expected failure path of the pipeline is one of these values; none of
/// them is raised as a panic.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ZeroSightError {
    /// No hole-like blobs survived classification.
    #[error("no holes detected ({blobs} blobs found before filtering)")]
    NoHolesDetected { blobs: usize },
    /// Fewer hole candidates than the configured minimum shot count.
    #[error("insufficient shots: found {found}, need at least {required}")]
    InsufficientShots { found: usize, required: usize },
    /// The reference frame could not be located plausibly.
    #[error("frame not found: {reason}")]
    FrameNotFound { reason: &'static str },
    /// A caller-provided parameter is out of its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
    /// A coordinate in coordinate mode is missing or non-finite.
    #[error("malformed input at hole {index}: {reason}")]
    MalformedInput { index: usize, reason: &'static str },
    /// The aim point in coordinate mode is non-finite.
    #[error("malformed bull: {reason}")]
    MalformedBull { reason: &'static str },
    /// Width or height is zero or overflows the address space.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The pixel buffer length does not match the declared dimensions.
    #[error("pixel buffer holds {got} elements, expected {expected}")]
    BufferSizeMismatch { expected: usize, got: usize },
    /// The image exceeds the configured pixel budget.
    #[error("image has {pixels} pixels, limit is {max_pixels}")]
    ImageTooLarge { pixels: usize, max_pixels: usize },
    /// Image decoding failed (only with the `image-io` feature).
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}

/// Coarse error taxonomy for outer layers (CLI, bindings, HTTP).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoHolesDetected,
    InsufficientShots,
    FrameNotFound,
    InvalidParameter,
    MalformedInput,
    /// Caller contract violations such as buffer size mismatches.
    Internal,
}

impl ErrorKind {
    /// Stable snake_case identifier.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::NoHolesDetected => "no_holes_detected",
            ErrorKind::InsufficientShots => "insufficient_shots",
            ErrorKind::FrameNotFound => "frame_not_found",
            ErrorKind::InvalidParameter => "invalid_parameter",
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::Internal => "internal_error",
        }
    }

    /// Returns true when the caller can fix the problem by changing its input.
    pub fn is_recoverable(self) -> bool {
        !matches!(self, ErrorKind::Internal)
    }
}

impl ZeroSightError {
    /// Maps the error onto the coarse taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZeroSightError::NoHolesDetected { .. } => ErrorKind::NoHolesDetected,
            ZeroSightError::InsufficientShots { .. } => ErrorKind::InsufficientShots,
            ZeroSightError::FrameNotFound { .. } => ErrorKind::FrameNotFound,
            ZeroSightError::InvalidParameter { .. } | ZeroSightError::ImageTooLarge { .. } => {
                ErrorKind::InvalidParameter
            }
            ZeroSightError::MalformedInput { .. } | ZeroSightError::MalformedBull { .. } => {
                ErrorKind::MalformedInput
            }
            ZeroSightError::InvalidDimensions { .. }
            | ZeroSightError::InvalidStride { .. }
            | ZeroSightError::BufferSizeMismatch { .. }
            | ZeroSightError::ImageIo { .. } => ErrorKind::Internal,
        }
    }
}

/// Shorthand for building an `InvalidParameter` error.
pub(crate) fn invalid(name: &'static str, reason: &'static str) -> ZeroSightError {
    ZeroSightError::InvalidParameter { name, reason }
}
