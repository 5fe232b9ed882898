// ctdproc/src/cnv/reader.rs

use super::errors::CnvReadError;
use super::header::CnvHeader;
use crate::cast::{Cast, PRESSURE_INDEX};
use log::{debug, info};
use ndarray::{Array2, Axis};
use std::f64::NAN;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Short names recognised as the pressure channel, in order of preference.
pub const PRESSURE_KEYS: [&str; 4] = ["prDM", "prdM", "prSM", "pr"];

/// Header and data block of a `.cnv` file, before any indexing.
#[derive(Clone, Debug)]
pub struct CnvFile {
    pub header: CnvHeader,
    pub data: Array2<f64>,
}

impl CnvFile {
    /// Indexes the data on pressure. The pressure channel is removed from the columns.
    pub fn into_cast(self) -> Result<Cast, CnvReadError> {
        let names = &self.header.names;
        let pressure_col = PRESSURE_KEYS
            .iter()
            .find_map(|key| names.iter().position(|name| name == key))
            .ok_or_else(|| CnvReadError::MissingPressureColumn(names.clone()))?;
        debug!(
            "Using '{}' ({}) as pressure index",
            names[pressure_col], self.header.long_names[pressure_col]
        );
        let index = self.data.column(pressure_col).to_owned();
        let kept: Vec<usize> = (0..names.len()).filter(|&i| i != pressure_col).collect();
        let columns = kept.iter().map(|&i| names[i].clone()).collect();
        let data = self.data.select(Axis(1), &kept);
        let cast = Cast::new(PRESSURE_INDEX, index, columns, data)?;
        Ok(match self.header.position() {
            Some(position) => cast.with_position(position),
            None => cast,
        })
    }
}

impl TryFrom<&Path> for CnvFile {
    type Error = CnvReadError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let file = File::open(path)?;
        parse_cnv(BufReader::new(file))
    }
}

/// Parses a `.cnv` stream. Samples equal to the header's `bad_flag` become `NaN`.
pub fn parse_cnv<R: BufRead>(reader: R) -> Result<CnvFile, CnvReadError> {
    let mut header = CnvHeader::default();
    let mut lines = reader.lines().enumerate();
    let mut header_ended = false;
    for (_, line) in lines.by_ref() {
        let line = line?;
        let line = line.trim_end();
        if line.starts_with("*END*") {
            header_ended = true;
            break;
        }
        header.parse_line(line)?;
    }
    if !header_ended {
        return Err(CnvReadError::MissingEndOfHeader);
    }
    if header.names.is_empty() {
        return Err(CnvReadError::NoColumns);
    }

    let ncols = header.names.len();
    let mut values = Vec::new();
    let mut nrows = 0;
    for (i, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let start = values.len();
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| CnvReadError::InvalidValue {
                line: i + 1,
                token: token.to_string(),
            })?;
            values.push(if header.bad_flag == Some(value) {
                NAN
            } else {
                value
            });
        }
        let found = values.len() - start;
        if found != ncols {
            return Err(CnvReadError::ColumnCountMismatch {
                line: i + 1,
                expected: ncols,
                found,
            });
        }
        nrows += 1;
    }
    debug!("Parsed {} rows of {} columns", nrows, ncols);
    let data = Array2::from_shape_vec((nrows, ncols), values)?;
    Ok(CnvFile { header, data })
}

/// Reads a `.cnv` file into a pressure-indexed cast.
pub fn read_cnv(path: &Path) -> Result<Cast, CnvReadError> {
    info!("Reading {}", path.display());
    CnvFile::try_from(path)?.into_cast()
}

impl Cast {
    pub fn from_cnv(path: &Path) -> Result<Cast, CnvReadError> {
        read_cnv(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::Position;

    const SAMPLE: &str = "\
* Sea-Bird SBE 9 Data File:
* NMEA Latitude = 30 00.00 S
* NMEA Longitude = 000 00.00 E
** Station: 01
# nquan = 4
# name 0 = prDM: Pressure, Digiquartz [db]
# name 1 = t090C: Temperature [ITS-90, deg C]
# name 2 = sal00: Salinity, Practical [PSU]
# name 3 = flag:  0.000e+00
# bad_flag = -9.990e-29
*END*
      1.000    10.0000    35.0000  0.000e+00
      2.000    10.0000 -9.990e-29  0.000e+00

      3.000     9.5000    35.1000  0.000e+00
";

    #[test]
    fn test_parse_sample() {
        let cnv = parse_cnv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(cnv.header.names, vec!["prDM", "t090C", "sal00", "flag"]);
        assert_eq!(cnv.data.dim(), (3, 4));
        assert!(cnv.data[[1, 2]].is_nan());

        let cast = cnv.into_cast().unwrap();
        assert_eq!(cast.index_name(), PRESSURE_INDEX);
        assert_eq!(cast.index().to_vec(), vec![1., 2., 3.]);
        assert_eq!(cast.columns(), &["t090C", "sal00", "flag"]);
        assert_eq!(cast.position(), Some(Position::new(-30., 0.)));
    }

    #[test]
    fn test_missing_end_of_header() {
        let text = "# name 0 = prDM: Pressure\n 1.0\n";
        assert!(matches!(
            parse_cnv(text.as_bytes()),
            Err(CnvReadError::MissingEndOfHeader)
        ));
    }

    #[test]
    fn test_column_count_mismatch() {
        let text = "# name 0 = prDM: Pressure\n# name 1 = t090C: Temperature\n*END*\n1.0 2.0\n3.0\n";
        assert!(matches!(
            parse_cnv(text.as_bytes()),
            Err(CnvReadError::ColumnCountMismatch {
                line: 5,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_invalid_value() {
        let text = "# name 0 = prDM: Pressure\n*END*\n1.0\nabc\n";
        match parse_cnv(text.as_bytes()) {
            Err(CnvReadError::InvalidValue { line, token }) => {
                assert_eq!(line, 4);
                assert_eq!(token, "abc");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_pressure_column() {
        let text = "# name 0 = depSM: Depth [salt water, m]\n*END*\n1.0\n";
        let cnv = parse_cnv(text.as_bytes()).unwrap();
        assert!(matches!(
            cnv.into_cast(),
            Err(CnvReadError::MissingPressureColumn(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("tests/data/does_not_exist.cnv");
        assert!(matches!(read_cnv(path), Err(CnvReadError::IoError(_))));
    }
}
