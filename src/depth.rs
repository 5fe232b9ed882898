// ctdproc/src/depth.rs

use crate::cast::{Cast, CastError};
use crate::teos10::EquationOfState;
use log::debug;

/// Name of the depth index (metres, positive down).
pub const DEPTH_INDEX: &str = "z";

/// Re-indexes a pressure-indexed cast on depth.
///
/// Depth is `-z_from_p(p, lat)` using the per-row `latitude_col`. The pressure
/// index becomes the first data column of the returned cast.
pub fn index_by_depth(
    cast: Cast,
    latitude_col: &str,
    eos: &dyn EquationOfState,
) -> Result<Cast, CastError> {
    let pressure = cast.index();
    let latitude = cast.column(latitude_col)?;
    let z = -eos.z_from_p_array(pressure, latitude);
    debug!(
        "Derived depth for {} rows from index '{}'",
        z.len(),
        cast.index_name()
    );
    cast.set_index(DEPTH_INDEX, z)
}
