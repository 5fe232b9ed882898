// ctdproc/src/cast/mod.rs

mod cast;
mod errors;

pub use cast::{Cast, Position, PRESSURE_INDEX};
pub use errors::CastError;
