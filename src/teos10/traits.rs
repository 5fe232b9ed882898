// ctdproc/src/teos10/traits.rs

use super::errors::EquationOfStateError;
use ndarray::{Array1, ArrayView1, Zip};

/// Scalar seawater conversions plus element-wise helpers over profile columns.
///
/// Input arrays passed to the helpers must share one length.
pub trait EquationOfState {
    /// Absolute Salinity (g/kg) from Practical Salinity, pressure (dbar) and position.
    fn sa_from_sp(&self, sp: f64, p: f64, lon: f64, lat: f64) -> f64;
    /// Conservative Temperature (°C) from salinity, in-situ temperature and pressure.
    ///
    /// `salinity` is the salinity column as recorded by the instrument
    /// (Practical Salinity); implementations hand it to `CT_from_t` unchanged.
    fn ct_from_t(&self, salinity: f64, t: f64, p: f64) -> Result<f64, EquationOfStateError>;
    /// Potential density anomaly referenced to 0 dbar (kg/m³).
    fn sigma0_ct(&self, sa: f64, ct: f64) -> Result<f64, EquationOfStateError>;
    /// Height (m, negative below the sea surface) from pressure (dbar) and latitude.
    fn z_from_p(&self, p: f64, lat: f64) -> f64;

    fn sa_from_sp_array(
        &self,
        sp: ArrayView1<f64>,
        p: ArrayView1<f64>,
        lon: ArrayView1<f64>,
        lat: ArrayView1<f64>,
    ) -> Array1<f64> {
        Zip::from(&sp)
            .and(&p)
            .and(&lon)
            .and(&lat)
            .map_collect(|&sp, &p, &lon, &lat| self.sa_from_sp(sp, p, lon, lat))
    }

    fn ct_from_t_array(
        &self,
        salinity: ArrayView1<f64>,
        t: ArrayView1<f64>,
        p: ArrayView1<f64>,
    ) -> Result<Array1<f64>, EquationOfStateError> {
        salinity
            .iter()
            .zip(t.iter())
            .zip(p.iter())
            .map(|((&s, &t), &p)| self.ct_from_t(s, t, p))
            .collect::<Result<Vec<f64>, _>>()
            .map(Array1::from)
    }

    fn sigma0_ct_array(
        &self,
        sa: ArrayView1<f64>,
        ct: ArrayView1<f64>,
    ) -> Result<Array1<f64>, EquationOfStateError> {
        sa.iter()
            .zip(ct.iter())
            .map(|(&sa, &ct)| self.sigma0_ct(sa, ct))
            .collect::<Result<Vec<f64>, _>>()
            .map(Array1::from)
    }

    fn z_from_p_array(&self, p: ArrayView1<f64>, lat: ArrayView1<f64>) -> Array1<f64> {
        Zip::from(&p)
            .and(&lat)
            .map_collect(|&p, &lat| self.z_from_p(p, lat))
    }
}
