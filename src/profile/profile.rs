// ctdproc/src/profile/profile.rs

use crate::cast::{Cast, CastError};
use crate::options::ThermoColumns;
use ndarray::{ArrayView1, ArrayView2};
use std::path::Path;

/// Cast-level summary recorded once the profile is on its final grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileMetadata {
    pub mean_latitude: f64,
    pub mean_longitude: f64,
}

impl ProfileMetadata {
    pub fn from_cast(cast: &Cast, columns: &ThermoColumns) -> Result<Self, CastError> {
        Ok(Self {
            mean_latitude: nanmean(cast.column(&columns.latitude)?),
            mean_longitude: nanmean(cast.column(&columns.longitude)?),
        })
    }
}

pub(crate) fn nanmean(values: ArrayView1<f64>) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Identifier of the cast stored at `path`: the file name up to its first `.`.
pub fn cast_id(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?.split('.').next()?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// A processed cast keyed by `(id, z)`.
#[derive(Clone, Debug)]
pub struct Profile {
    id: String,
    cast: Cast,
    metadata: ProfileMetadata,
}

impl Profile {
    pub fn new(id: impl Into<String>, cast: Cast, metadata: ProfileMetadata) -> Self {
        Self {
            id: id.into(),
            cast,
            metadata,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn z(&self) -> ArrayView1<f64> {
        self.cast.index()
    }

    pub fn columns(&self) -> &[String] {
        self.cast.columns()
    }

    pub fn column(&self, name: &str) -> Result<ArrayView1<f64>, CastError> {
        self.cast.column(name)
    }

    pub fn data(&self) -> ArrayView2<f64> {
        self.cast.data()
    }

    pub fn metadata(&self) -> ProfileMetadata {
        self.metadata
    }

    pub fn len(&self) -> usize {
        self.cast.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.cast.is_empty()
    }

    /// Two-level row keys `(id, z)`.
    pub fn keys(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.z().into_iter().map(move |&z| (self.id.as_str(), z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::path::PathBuf;

    #[test]
    fn test_cast_id_strips_directory_and_extension() {
        assert_eq!(cast_id(Path::new("data/stn01.cnv")).as_deref(), Some("stn01"));
        assert_eq!(
            cast_id(&PathBuf::from("/tmp/stn02.down.cnv")).as_deref(),
            Some("stn02")
        );
        assert_eq!(cast_id(Path::new("stn03")).as_deref(), Some("stn03"));
        assert_eq!(cast_id(Path::new(".cnv")), None);
        assert_eq!(cast_id(Path::new("/")), None);
    }

    #[test]
    fn test_nanmean_skips_missing() {
        assert_eq!(nanmean(array![1., f64::NAN, 3.].view()), 2.0);
        assert!(nanmean(array![f64::NAN].view()).is_nan());
    }

    #[test]
    fn test_keys() {
        let cast = Cast::from_columns(
            "z",
            array![1., 2.],
            vec![
                ("latitude".to_string(), array![-30., -30.]),
                ("longitude".to_string(), array![10., 12.]),
            ],
        )
        .unwrap();
        let metadata = ProfileMetadata::from_cast(&cast, &ThermoColumns::default()).unwrap();
        assert_eq!(metadata.mean_longitude, 11.0);
        let profile = Profile::new("stn01", cast, metadata);
        let keys: Vec<(&str, f64)> = profile.keys().collect();
        assert_eq!(keys, vec![("stn01", 1.), ("stn01", 2.)]);
        assert_eq!(profile.len(), 2);
    }
}
