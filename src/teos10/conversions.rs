// ctdproc/src/teos10/conversions.rs

//! Salinity, temperature, density and pressure conversions.
//!
//! Everything the `gsw` crate implements is delegated to it. Potential
//! temperature referenced to 0 dbar is not part of `gsw` 0.2, so it
//! integrates the adiabatic lapse rate of Bryden (1973) with the Runge-Kutta
//! scheme of Fofonoff (1977), which is within a few millikelvin of the Gibbs
//! function result over the oceanic range.

use super::errors::EquationOfStateError;
use super::SSO;
use gsw::conversions::{ct_from_pt, sp_from_sr, sr_from_sp};

const T68_PER_T90: f64 = 1.00024;

// Baltic Sea polygon. The west edge has three vertices, the east edge two.
const BALTIC_LAT_WEST: [f64; 3] = [50.0, 59.0, 69.0];
const BALTIC_LON_WEST: [f64; 3] = [12.6, 7.0, 26.0];
const BALTIC_LAT_EAST: [f64; 2] = [50.0, 69.0];
const BALTIC_LON_EAST: [f64; 2] = [45.0, 26.0];
const BALTIC_SA_OFFSET: f64 = 0.087;

/// Height in metres from sea pressure (dbar). Negative below the surface.
pub fn z_from_p(p: f64, lat: f64) -> f64 {
    gsw::conversions::z_from_p(p, lat, 0.0, 0.0)
}

/// Absolute Salinity from Practical Salinity.
///
/// Uses the Baltic Sea relation inside the Baltic polygon and Reference
/// Salinity everywhere else. The absolute salinity anomaly atlas is not
/// bundled, so pressure does not change the result.
pub fn sa_from_sp(sp: f64, _p: f64, lon: f64, lat: f64) -> f64 {
    match sa_from_sp_baltic(sp, lon, lat) {
        Some(sa) => sa,
        None => sr_from_sp(sp),
    }
}

/// Baltic Sea Absolute Salinity, `None` outside the Baltic polygon.
pub fn sa_from_sp_baltic(sp: f64, lon: f64, lat: f64) -> Option<f64> {
    let lon = lon.rem_euclid(360.0);
    if !(BALTIC_LON_WEST[1] < lon
        && lon < BALTIC_LON_EAST[0]
        && BALTIC_LAT_WEST[0] < lat
        && lat < BALTIC_LAT_WEST[2])
    {
        return None;
    }
    let west = interp_edge(lat, &BALTIC_LAT_WEST, &BALTIC_LON_WEST);
    let east = interp_edge(lat, &BALTIC_LAT_EAST, &BALTIC_LON_EAST);
    if west <= lon && lon <= east {
        Some(((SSO - BALTIC_SA_OFFSET) / 35.0) * sp + BALTIC_SA_OFFSET)
    } else {
        None
    }
}

// Linear interpolation along a polygon edge; `xs` is increasing.
fn interp_edge(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let i = xs[1..xs.len() - 1]
        .iter()
        .take_while(|&&knot| knot < x)
        .count();
    ys[i] + (ys[i + 1] - ys[i]) * (x - xs[i]) / (xs[i + 1] - xs[i])
}

/// Conservative Temperature from in-situ temperature (ITS-90) at pressure `p`.
pub fn ct_from_t(sa: f64, t: f64, p: f64) -> Result<f64, EquationOfStateError> {
    Ok(ct_from_pt(sa, pt0_from_t(sa, t, p))?)
}

/// Potential density anomaly referenced to the sea surface (kg/m³).
pub fn sigma0_ct(sa: f64, ct: f64) -> Result<f64, EquationOfStateError> {
    Ok(gsw::volume::sigma0(sa, ct)?)
}

/// Potential temperature (ITS-90) referenced to 0 dbar.
pub fn pt0_from_t(sa: f64, t: f64, p: f64) -> f64 {
    let sp = sp_from_sr(sa);
    let h = -p;
    let mut p = p;
    let mut t = t * T68_PER_T90;

    let mut xk = h * adiabatic_lapse_rate(sp, t, p);
    t += 0.5 * xk;
    let mut q = xk;
    p += 0.5 * h;
    xk = h * adiabatic_lapse_rate(sp, t, p);
    t += 0.29289322 * (xk - q);
    q = 0.58578644 * xk + 0.121320344 * q;
    xk = h * adiabatic_lapse_rate(sp, t, p);
    t += 1.707106781 * (xk - q);
    q = 3.414213562 * xk - 4.121320344 * q;
    p += 0.5 * h;
    xk = h * adiabatic_lapse_rate(sp, t, p);
    (t + (xk - 2.0 * q) / 6.0) / T68_PER_T90
}

/// Adiabatic lapse rate (°C/dbar), IPTS-68 temperature.
fn adiabatic_lapse_rate(sp: f64, t: f64, p: f64) -> f64 {
    let ds = sp - 35.0;
    (((-2.1687e-16 * t + 1.8676e-14) * t - 4.6206e-13) * p
        + ((2.7759e-12 * t - 1.1351e-10) * ds
            + ((-5.4481e-14 * t + 8.733e-12) * t - 6.7795e-10) * t
            + 1.8741e-8))
        * p
        + (-4.2393e-8 * t + 1.8932e-6) * ds
        + ((6.6228e-10 * t - 6.836e-8) * t + 8.5258e-6) * t
        + 3.5803e-5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teos10::UPS;

    #[test]
    fn test_z_from_p_close_to_pressure_near_surface() {
        let z = z_from_p(5.0, -30.0);
        assert!(z < 0.0);
        assert!((z + 4.9659).abs() < 1e-3);
    }

    #[test]
    fn test_z_from_p_deep() {
        // Saunders-Fofonoff depth for 1000 dbar at 30° is 990.808 m
        let z = z_from_p(1000.0, 30.0);
        assert!((z + 990.808).abs() < 0.01);
        assert_eq!(z_from_p(0.0, 45.0), 0.0);
    }

    #[test]
    fn test_sa_from_sp_reference_composition() {
        let sa = sa_from_sp(35.0, 10.0, 0.0, -30.0);
        assert!((sa - SSO).abs() < 1e-12);
        assert!(sa > 35.0);
    }

    #[test]
    fn test_sa_from_sp_baltic() {
        let sa = sa_from_sp(7.0, 10.0, 20.0, 58.0);
        let expected = ((SSO - 0.087) / 35.0) * 7.0 + 0.087;
        assert!((sa - expected).abs() < 1e-12);
        // North Sea, west of the polygon
        assert!(sa_from_sp_baltic(35.0, 3.0, 56.0).is_none());
    }

    #[test]
    fn test_sa_from_sp_gulf_of_finland() {
        // East edge runs from 45°E at 50°N to 26°E at 69°N, about 35°E here.
        let sa = sa_from_sp(5.0, 0.0, 29.0, 59.9);
        assert!((sa - 5.09815).abs() < 1e-5);
        assert!(sa_from_sp_baltic(5.0, 36.0, 59.9).is_none());
    }

    #[test]
    fn test_interp_edge() {
        assert!((interp_edge(59.0, &BALTIC_LAT_WEST, &BALTIC_LON_WEST) - 7.0).abs() < 1e-12);
        assert!((interp_edge(64.0, &BALTIC_LAT_WEST, &BALTIC_LON_WEST) - 16.5).abs() < 1e-12);
        assert!((interp_edge(59.5, &BALTIC_LAT_EAST, &BALTIC_LON_EAST) - 35.5).abs() < 1e-12);
    }

    #[test]
    fn test_potential_temperature_check_value() {
        // UNESCO (1983) check value: S=40, T68=40, p=10000 dbar -> 36.89073
        let sa = 40.0 * UPS;
        let pt = pt0_from_t(sa, 40.0 / T68_PER_T90, 10000.0) * T68_PER_T90;
        assert!((pt - 36.89073).abs() < 1e-4);
    }

    #[test]
    fn test_ct_from_t_near_surface() {
        let ct = ct_from_t(SSO, 10.0, 3.0).unwrap();
        assert!((ct - 10.0).abs() < 0.02);
        assert!((ct_from_t(SSO, 25.0, 0.0).unwrap() - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_negative_salinity_is_an_error() {
        assert!(matches!(
            ct_from_t(-1.0, 10.0, 0.0),
            Err(EquationOfStateError::GswError(_))
        ));
        assert!(sigma0_ct(-1.0, 10.0).is_err());
    }

    #[test]
    fn test_sigma0_typical_water() {
        let sigma0 = sigma0_ct(SSO, 10.0).unwrap();
        assert!((sigma0 - 26.9524).abs() < 1e-3);
        assert!(sigma0_ct(SSO + 1.0, 10.0).unwrap() > sigma0);
        assert!(sigma0_ct(SSO, 5.0).unwrap() > sigma0_ct(SSO, 15.0).unwrap());
    }

    #[test]
    fn test_missing_values_pass_through() {
        assert!(ct_from_t(f64::NAN, 10.0, 1.0).unwrap().is_nan());
        assert!(sigma0_ct(f64::NAN, 10.0).unwrap().is_nan());
    }
}
