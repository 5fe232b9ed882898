// ctdproc/src/proc/pipeline.rs

use super::errors::ProcError;
use crate::cast::Cast;
use crate::clean::clean_cast;
use crate::cnv::read_cnv;
use crate::depth::index_by_depth;
use crate::options::ProcOptions;
use crate::profile::{cast_id, Profile, ProfileMetadata};
use crate::resample::{bin_average, interpolate_gaps};
use crate::teos10::{EquationOfState, Teos10};
use crate::thermo::derive_ts;
use humantime::format_duration;
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Reads and processes one `.cnv` file with the bundled equation of state.
pub fn proc_cnv(path: &Path, options: &ProcOptions) -> Result<Profile, ProcError> {
    proc_cnv_with(path, options, &Teos10)
}

pub fn proc_cnv_with(
    path: &Path,
    options: &ProcOptions,
    eos: &dyn EquationOfState,
) -> Result<Profile, ProcError> {
    let id = cast_id(path).ok_or_else(|| ProcError::InvalidCastName(path.to_path_buf()))?;
    let cast = read_cnv(path)?;
    process_cast(cast, &id, options, eos)
}

/// Runs the single-cast pipeline on a pressure-indexed cast.
///
/// clean → index by depth → bin → interpolate → derive SA/CT/sigma0 → tag with `id`.
pub fn process_cast(
    cast: Cast,
    id: &str,
    options: &ProcOptions,
    eos: &dyn EquationOfState,
) -> Result<Profile, ProcError> {
    info!("Processing cast {} ({} rows)", id, cast.nrows());
    let now = Instant::now();
    let position = options
        .position
        .or(cast.position())
        .ok_or_else(|| ProcError::MissingPosition(id.to_string()))?;
    let columns = &options.thermo_columns;

    let cast = clean_cast(cast, position, options)?;
    let cast = index_by_depth(cast, &columns.latitude, eos)?;
    let cast = bin_average(&cast, options.bin_width)?;
    let cast = interpolate_gaps(&cast)?;
    let metadata = ProfileMetadata::from_cast(&cast, columns)?;
    let cast = derive_ts(cast, columns, eos)?;

    debug!(
        "Took {} to process cast {} into {} bins",
        format_duration(now.elapsed()),
        id,
        cast.nrows()
    );
    Ok(Profile::new(id, cast, metadata))
}
