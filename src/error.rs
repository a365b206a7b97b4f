use thiserror::Error;

/// Errors reported by the positional operations of [`crate::List`]. Misses
/// on keys and values are not errors; they come back as `None`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("index {index} is out of range for a list of length {len}")]
    OutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
