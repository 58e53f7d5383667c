use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Precondition violations rejected by [`crate::Interpolator::try_process`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Invalid rate {0}: must be finite and greater than zero")]
    InvalidRate(f64),

    #[error("Destination of length {len} is shorter than the write offset {offset}")]
    DestinationTooShort { len: usize, offset: usize },
}
