// ctdproc/src/thermo.rs

use crate::cast::{Cast, CastError};
use crate::options::ThermoColumns;
use crate::teos10::EquationOfState;

pub const ABSOLUTE_SALINITY: &str = "SA";
pub const CONSERVATIVE_TEMPERATURE: &str = "CT";
pub const SIGMA0: &str = "sigma0_CT";

/// Adds Absolute Salinity, Conservative Temperature and sigma0 to a cast.
///
/// CT is computed from the measured Practical Salinity column, sigma0 from
/// SA and CT.
///
/// Existing `SA`, `CT` and `sigma0_CT` columns are overwritten, so calling
/// this twice yields the same values.
pub fn derive_ts(
    cast: Cast,
    columns: &ThermoColumns,
    eos: &dyn EquationOfState,
) -> Result<Cast, CastError> {
    let sp = cast.column(&columns.salinity)?;
    let p = cast.column(&columns.pressure)?;
    let t = cast.column(&columns.temperature)?;
    let lon = cast.column(&columns.longitude)?;
    let lat = cast.column(&columns.latitude)?;

    let sa = eos.sa_from_sp_array(sp, p, lon, lat);
    let ct = eos.ct_from_t_array(sp, t, p)?;
    let sigma0 = eos.sigma0_ct_array(sa.view(), ct.view())?;

    cast.with_column(ABSOLUTE_SALINITY, sa)?
        .with_column(CONSERVATIVE_TEMPERATURE, ct)?
        .with_column(SIGMA0, sigma0)
}
