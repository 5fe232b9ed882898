// ctdproc/src/proc/mod.rs

mod errors;
mod pipeline;

pub use errors::ProcError;
pub use pipeline::{proc_cnv, proc_cnv_with, process_cast};
