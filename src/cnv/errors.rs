// ctdproc/src/cnv/errors.rs

use crate::cast::CastError;
use ndarray::ShapeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CnvReadError {
    #[error("File IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Header is not terminated by *END*")]
    MissingEndOfHeader,
    #[error("Header does not declare any column")]
    NoColumns,
    #[error("Invalid column declaration: {0}")]
    InvalidColumnDeclaration(String),
    #[error("No pressure column found among: {}", .0.join(", "))]
    MissingPressureColumn(Vec<String>),
    #[error("Invalid value {token:?} on line {line}")]
    InvalidValue { line: usize, token: String },
    #[error("Line {line} holds {found} values but the header declares {expected} columns")]
    ColumnCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Could not parse position from {0:?}")]
    InvalidPosition(String),
    #[error(transparent)]
    NDArrayShapeError(#[from] ShapeError),
    #[error(transparent)]
    CastError(#[from] CastError),
}
