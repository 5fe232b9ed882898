// ctdproc/src/options.rs

use crate::cast::{Position, PRESSURE_INDEX};
use derive_builder::Builder;

/// What to do when a column requested for retention is absent from the cast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnPolicy {
    /// Log a warning and carry on without the column.
    #[default]
    Lenient,
    /// Fail with `CastError::MissingColumns`.
    Strict,
}

/// Names of the columns read by the depth and thermodynamic stages.
#[derive(Clone, Debug, PartialEq)]
pub struct ThermoColumns {
    pub salinity: String,
    pub pressure: String,
    pub temperature: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for ThermoColumns {
    fn default() -> Self {
        Self {
            salinity: "sal00".to_string(),
            pressure: PRESSURE_INDEX.to_string(),
            temperature: "t090C".to_string(),
            latitude: "latitude".to_string(),
            longitude: "longitude".to_string(),
        }
    }
}

/// Settings of the single-cast pipeline.
///
/// ```
/// use ctdproc::options::{ColumnPolicy, ProcOptionsBuilder};
///
/// let options = ProcOptionsBuilder::default()
///     .keep(vec!["oxygen".to_string()])
///     .column_policy(ColumnPolicy::Strict)
///     .build()
///     .unwrap();
/// assert!(options.remove_upcast);
/// assert_eq!(options.bin_width, 1.0);
/// ```
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(default)]
pub struct ProcOptions {
    /// Keep only the downcast leg.
    pub remove_upcast: bool,
    /// Columns retained on top of position, temperature and salinity.
    #[builder(setter(into))]
    pub keep: Vec<String>,
    pub column_policy: ColumnPolicy,
    /// Vertical bin width in metres.
    pub bin_width: f64,
    pub thermo_columns: ThermoColumns,
    /// Station position used instead of the one found in the file header.
    #[builder(setter(strip_option))]
    pub position: Option<Position>,
}

impl Default for ProcOptions {
    fn default() -> Self {
        Self {
            remove_upcast: true,
            keep: Vec::new(),
            column_policy: ColumnPolicy::default(),
            bin_width: 1.0,
            thermo_columns: ThermoColumns::default(),
            position: None,
        }
    }
}

impl ProcOptions {
    /// Ordered, de-duplicated set of columns the cleaning stage retains.
    pub fn keep_set(&self) -> Vec<String> {
        let columns = &self.thermo_columns;
        let mut keep = vec![
            columns.latitude.clone(),
            columns.longitude.clone(),
            columns.temperature.clone(),
            columns.salinity.clone(),
        ];
        for name in &self.keep {
            if !keep.contains(name) {
                keep.push(name.clone());
            }
        }
        keep
    }
}
