//! Core error types

use thiserror::Error;

/// Errors raised while building a sweep grid
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("{axis} must contain at least one value")]
    EmptyAxis { axis: &'static str },

    #[error("{axis} must only contain positive values")]
    ZeroValue { axis: &'static str },

    #[error("{axis} must be strictly ascending, found {next} after {previous}")]
    NotAscending {
        axis: &'static str,
        previous: u32,
        next: u32,
    },
}
