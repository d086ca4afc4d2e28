pub mod copy;
pub mod policy;

use thiserror::Error;

use crate::util::buffer::AllocError;

#[derive(Debug, Error)]
pub enum CatError {
    #[error("error reading from input file: {0}")]
    Read(#[source] std::io::Error),

    #[error("error writing to output: {0}")]
    Write(#[source] std::io::Error),

    #[error(transparent)]
    Alloc(#[from] AllocError),

    #[error("error closing input file: {0}")]
    Close(#[source] std::io::Error),
}
