// ctdproc/src/teos10/errors.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EquationOfStateError {
    #[error("TEOS-10 conversion failed: {0}")]
    GswError(#[from] gsw::Error),
}
