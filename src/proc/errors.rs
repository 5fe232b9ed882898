// ctdproc/src/proc/errors.rs

use crate::cast::CastError;
use crate::cnv::CnvReadError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcError {
    #[error("Failed to read cast: {0}")]
    ReadError(#[from] CnvReadError),
    #[error(transparent)]
    CastError(#[from] CastError),
    #[error("Cast {0} has no position in its header and no position override was given")]
    MissingPosition(String),
    #[error("Cannot derive a cast identifier from path {0:?}")]
    InvalidCastName(PathBuf),
}
