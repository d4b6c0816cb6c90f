//! Errors reported by lazy sequences.

use thiserror::Error;

/// Result type alias for lazy sequence operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// The value given to a dynamic constructor is neither a sequence nor
  /// an iterator of the requested element type.
  #[error("invalid source: {type_name} is neither a sequence nor an iterator")]
  InvalidSource { type_name: &'static str },

  #[error("index {index} out of range for sequence of length {len}")]
  IndexOutOfRange { index: isize, len: usize },

  #[error("slice step cannot be zero")]
  ZeroStep,
}
