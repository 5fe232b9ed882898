// ctdproc/src/teos10/mod.rs

//! Seawater thermodynamics used by the cast pipeline.
//!
//! The pipeline only talks to the [`EquationOfState`] trait. [`Teos10`] backs
//! it with the GSW toolbox (`gsw` crate) plus the two pieces that crate does
//! not provide: potential temperature from in-situ temperature and the Baltic
//! Sea salinity relation.

pub use conversions::{ct_from_t, pt0_from_t, sa_from_sp, sa_from_sp_baltic, sigma0_ct, z_from_p};
pub use errors::EquationOfStateError;
pub use traits::EquationOfState;

pub mod conversions;
mod errors;
pub mod traits;

/// Standard Ocean Reference Salinity (g/kg).
pub const SSO: f64 = 35.16504;

/// Ratio between Reference Salinity and Practical Salinity.
pub const UPS: f64 = SSO / 35.0;

#[derive(Clone, Copy, Debug, Default)]
pub struct Teos10;

impl EquationOfState for Teos10 {
    fn sa_from_sp(&self, sp: f64, p: f64, lon: f64, lat: f64) -> f64 {
        sa_from_sp(sp, p, lon, lat)
    }
    fn ct_from_t(&self, salinity: f64, t: f64, p: f64) -> Result<f64, EquationOfStateError> {
        ct_from_t(salinity, t, p)
    }
    fn sigma0_ct(&self, sa: f64, ct: f64) -> Result<f64, EquationOfStateError> {
        sigma0_ct(sa, ct)
    }
    fn z_from_p(&self, p: f64, lat: f64) -> f64 {
        z_from_p(p, lat)
    }
}
