// ctdproc/src/cnv/mod.rs

//! Reader for Sea-Bird `.cnv` converted data files.

mod errors;
mod header;
mod reader;

pub use errors::CnvReadError;
pub use header::{parse_coordinate, CnvHeader};
pub use reader::{parse_cnv, read_cnv, CnvFile, PRESSURE_KEYS};
