use core::result::Result as CoreResult;
use thiserror::Error;

pub type Result<T> = CoreResult<T, Error>;

/// The wire format carries no checksum or length prefix, so nothing about a
/// received payload can be judged invalid. The only failure surface is IO.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
}
