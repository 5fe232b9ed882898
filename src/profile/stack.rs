// ctdproc/src/profile/stack.rs

use super::errors::ProfileStackError;
use super::profile::{nanmean, Profile};
use crate::cast::Cast;
use crate::depth::DEPTH_INDEX;
use log::debug;
use ndarray::{Array1, Array2};
use std::collections::HashSet;
use std::io;

/// Several profiles concatenated on their `(ID, z)` keys.
#[derive(Clone, Debug, Default)]
pub struct ProfileStack {
    profiles: Vec<Profile>,
    keys: HashSet<(String, u64)>,
}

impl ProfileStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a profile, rejecting it whole if any of its keys is already stacked.
    pub fn push(&mut self, profile: Profile) -> Result<(), ProfileStackError> {
        let keys: Vec<(String, u64)> = profile
            .keys()
            .map(|(id, z)| (id.to_string(), z.to_bits()))
            .collect();
        {
            let mut seen = HashSet::with_capacity(keys.len());
            for key in &keys {
                if self.keys.contains(key) || !seen.insert(key) {
                    return Err(ProfileStackError::DuplicateKey(
                        key.0.clone(),
                        f64::from_bits(key.1),
                    ));
                }
            }
        }
        debug!("Stacking profile {} ({} rows)", profile.id(), keys.len());
        self.keys.extend(keys);
        self.profiles.push(profile);
        Ok(())
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Union of the profile columns, in order of first appearance.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for profile in &self.profiles {
            for name in profile.columns() {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
        }
        columns
    }

    /// Sorted, de-duplicated depths over all profiles.
    pub fn depths(&self) -> Array1<f64> {
        let mut z: Vec<f64> = self
            .profiles
            .iter()
            .flat_map(|profile| profile.z().to_vec())
            .collect();
        z.sort_by(|a, b| a.total_cmp(b));
        z.dedup();
        Array1::from(z)
    }

    /// Mean of `columns` over all profiles at each depth, skipping missing values.
    pub fn mean_profile(&self, columns: &[&str]) -> Result<Cast, ProfileStackError> {
        let z = self.depths();
        let mut data = Array2::from_elem((z.len(), columns.len()), f64::NAN);
        for (j, name) in columns.iter().enumerate() {
            for (i, &depth) in z.iter().enumerate() {
                let samples: Array1<f64> = self
                    .profiles
                    .iter()
                    .filter_map(|profile| {
                        let values = profile.column(name).ok()?;
                        let row = profile.z().iter().position(|&zz| zz == depth)?;
                        Some(values[row])
                    })
                    .collect();
                data[[i, j]] = nanmean(samples.view());
            }
        }
        let names = columns.iter().map(|name| name.to_string()).collect();
        Ok(Cast::new(DEPTH_INDEX, z, names, data)?)
    }

    /// Writes `ID,z,<columns>` rows. Missing values are written as empty fields.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), ProfileStackError> {
        let columns = self.columns();
        let mut writer = csv::Writer::from_writer(writer);
        let mut header = vec!["ID".to_string(), DEPTH_INDEX.to_string()];
        header.extend(columns.iter().cloned());
        writer.write_record(&header)?;
        for profile in &self.profiles {
            let lookup: Vec<Option<usize>> = columns
                .iter()
                .map(|name| profile.columns().iter().position(|c| c == name))
                .collect();
            for (row, values) in profile.data().outer_iter().enumerate() {
                let mut record = vec![profile.id().to_string(), format_value(profile.z()[row])];
                record.extend(lookup.iter().map(|j| match j {
                    Some(j) => format_value(values[*j]),
                    None => String::new(),
                }));
                writer.write_record(&record)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

/// Writes a cast as `<index>,<columns>` rows with the given field delimiter.
pub fn write_cast_csv<W: io::Write>(
    cast: &Cast,
    writer: W,
    delimiter: u8,
) -> Result<(), ProfileStackError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    let mut header = vec![cast.index_name().to_string()];
    header.extend(cast.columns().iter().cloned());
    writer.write_record(&header)?;
    for (z, values) in cast.index().iter().zip(cast.data().outer_iter()) {
        let mut record = vec![format_value(*z)];
        record.extend(values.iter().map(|v| format_value(*v)));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
