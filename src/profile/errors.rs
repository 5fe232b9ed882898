// ctdproc/src/profile/errors.rs

use crate::cast::CastError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileStackError {
    #[error("Duplicate (ID, z) key: ({0}, {1})")]
    DuplicateKey(String, f64),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    CastError(#[from] CastError),
}

#[derive(Error, Debug)]
pub enum ProfilePlotError {
    #[error("No profile has a column named {0}")]
    MissingColumn(String),
}
