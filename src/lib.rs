use pretty_env_logger;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn _setup_pretty_env_logger_default() {
    INIT.call_once(|| {
        pretty_env_logger::init();
    });
}

pub use cast::{Cast, CastError, Position};
pub use options::{ColumnPolicy, ProcOptions, ProcOptionsBuilder, ThermoColumns};
pub use proc::{proc_cnv, process_cast, ProcError};
pub use profile::{Profile, ProfileMetadata, ProfileStack};
pub use thermo::derive_ts;
pub mod cast;
pub mod clean;
pub mod cnv;
pub mod depth;
pub mod options;
pub mod proc;
pub mod profile;
pub mod resample;
pub mod teos10;
pub mod thermo;
