// ctdproc/src/cast/errors.rs

use crate::resample::ResampleError;
use crate::teos10::EquationOfStateError;
use ndarray::ShapeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CastError {
    #[error("Column not found in cast: {0}")]
    MissingColumn(String),
    #[error("Requested columns not found in cast: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Cast has {0} column names but {1} data columns")]
    ColumnCountMismatch(usize, usize),
    #[error("Expected {0} values per column but got {1}")]
    RowCountMismatch(usize, usize),
    #[error(transparent)]
    NDArrayShapeError(#[from] ShapeError),
    #[error(transparent)]
    ResampleError(#[from] ResampleError),
    #[error(transparent)]
    EquationOfStateError(#[from] EquationOfStateError),
}
