// ctdproc/src/resample.rs

//! Re-gridding of a depth-indexed cast onto uniform bins.
//!
//! A sample at depth `z` belongs to the bin centred on `round(z / delta) * delta`.
//! The grid spans every bin between the shallowest and the deepest occupied
//! bin, so it is strictly increasing with a constant spacing of `delta`.

use crate::cast::{Cast, CastError};
use crate::depth::DEPTH_INDEX;
use log::{debug, trace};
use ndarray::{Array1, Array2, ArrayView1, Axis, Zip};
use std::f64::NAN;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResampleError {
    #[error("bin width must be finite and > 0, but got {0}")]
    InvalidBinWidth(f64),
    #[error("index and values must be of the same length. Got lengths {0} and {1} respectively")]
    LengthMismatch(usize, usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BinGrid {
    first_key: i64,
    nbins: usize,
    delta: f64,
}

impl BinGrid {
    fn from_index(index: ArrayView1<f64>, delta: f64) -> Result<Self, ResampleError> {
        if !(delta.is_finite() && delta > 0.) {
            return Err(ResampleError::InvalidBinWidth(delta));
        }
        let bounds = index
            .iter()
            .filter(|z| z.is_finite())
            .map(|&z| Self::key(z, delta))
            .fold(None, |bounds: Option<(i64, i64)>, k| match bounds {
                None => Some((k, k)),
                Some((lo, hi)) => Some((lo.min(k), hi.max(k))),
            });
        Ok(match bounds {
            None => Self {
                first_key: 0,
                nbins: 0,
                delta,
            },
            Some((lo, hi)) => Self {
                first_key: lo,
                nbins: (hi - lo) as usize + 1,
                delta,
            },
        })
    }

    fn key(z: f64, delta: f64) -> i64 {
        (z / delta).round() as i64
    }

    fn points(&self) -> Array1<f64> {
        Array1::from_iter((0..self.nbins).map(|i| (self.first_key + i as i64) as f64 * self.delta))
    }

    /// Mean of the finite samples in every bin, `NaN` for bins without any.
    fn average(&self, index: ArrayView1<f64>, values: ArrayView1<f64>) -> Array1<f64> {
        let mut sums = Array1::<f64>::zeros(self.nbins);
        let mut counts = Array1::<usize>::zeros(self.nbins);
        for (&z, &value) in index.iter().zip(values.iter()) {
            if !z.is_finite() || !value.is_finite() {
                continue;
            }
            let bin = (Self::key(z, self.delta) - self.first_key) as usize;
            sums[bin] += value;
            counts[bin] += 1;
        }
        Zip::from(&sums)
            .and(&counts)
            .map_collect(|&sum, &count| if count == 0 { NAN } else { sum / count as f64 })
    }
}

fn check_lengths(index: ArrayView1<f64>, values: ArrayView1<f64>) -> Result<(), ResampleError> {
    if index.len() != values.len() {
        return Err(ResampleError::LengthMismatch(index.len(), values.len()));
    }
    Ok(())
}

/// Bins one series onto `delta`-wide bins. Returns `(grid, binned values)`.
pub fn bin_series(
    index: ArrayView1<f64>,
    values: ArrayView1<f64>,
    delta: f64,
) -> Result<(Array1<f64>, Array1<f64>), ResampleError> {
    check_lengths(index, values)?;
    let grid = BinGrid::from_index(index, delta)?;
    Ok((grid.points(), grid.average(index, values)))
}

/// Fills interior `NaN` gaps by linear interpolation over `index`.
///
/// Values before the first or after the last finite sample stay `NaN`.
pub fn interpolate_series(
    index: ArrayView1<f64>,
    values: ArrayView1<f64>,
) -> Result<Array1<f64>, ResampleError> {
    check_lengths(index, values)?;
    let mut filled = values.to_owned();
    let valid: Vec<usize> = (0..values.len())
        .filter(|&i| values[i].is_finite() && index[i].is_finite())
        .collect();
    for pair in valid.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b - a < 2 {
            continue;
        }
        let span = index[b] - index[a];
        for i in a + 1..b {
            filled[i] = if span == 0. {
                values[a]
            } else {
                values[a] + (values[b] - values[a]) * (index[i] - index[a]) / span
            };
        }
        trace!("Interpolated {} values between rows {} and {}", b - a - 1, a, b);
    }
    Ok(filled)
}

/// Bin-averages every column of a depth-indexed cast.
pub fn bin_average(cast: &Cast, delta: f64) -> Result<Cast, CastError> {
    let grid = BinGrid::from_index(cast.index(), delta)?;
    debug!(
        "Binning {} rows into {} bins of {} m",
        cast.nrows(),
        grid.nbins,
        delta
    );
    let mut data = Array2::from_elem((grid.nbins, cast.columns().len()), NAN);
    for (j, column) in cast.data().axis_iter(Axis(1)).enumerate() {
        data.column_mut(j).assign(&grid.average(cast.index(), column));
    }
    cast.reindexed(DEPTH_INDEX, grid.points(), data)
}

/// Interpolates interior gaps of every column.
pub fn interpolate_gaps(cast: &Cast) -> Result<Cast, CastError> {
    let mut data = cast.data().to_owned();
    for (j, column) in cast.data().axis_iter(Axis(1)).enumerate() {
        data.column_mut(j)
            .assign(&interpolate_series(cast.index(), column)?);
    }
    cast.reindexed(cast.index_name(), cast.index().to_owned(), data)
}
