// ctdproc/src/profile/mod.rs

mod errors;
mod plot;
mod profile;
mod stack;

pub use errors::{ProfilePlotError, ProfileStackError};
pub use profile::{cast_id, Profile, ProfileMetadata};
pub use stack::{write_cast_csv, ProfileStack};
