// ctdproc/src/clean.rs

use crate::cast::{Cast, CastError, Position};
use crate::options::{ColumnPolicy, ProcOptions};
use log::{debug, warn};
use ndarray::Array1;

/// Strips the upcast, broadcasts the station position and drops unwanted columns.
///
/// `position` is attached to every row as the latitude and longitude columns
/// so it survives column selection and binning.
pub fn clean_cast(
    cast: Cast,
    position: Position,
    options: &ProcOptions,
) -> Result<Cast, CastError> {
    let cast = if options.remove_upcast {
        let (down, up) = cast.split();
        debug!(
            "Kept {} downcast rows, discarded {} upcast rows",
            down.nrows(),
            up.nrows()
        );
        down
    } else {
        cast
    };

    let nrows = cast.nrows();
    let names = &options.thermo_columns;
    let cast = cast
        .with_column(&names.latitude, Array1::from_elem(nrows, position.latitude))?
        .with_column(&names.longitude, Array1::from_elem(nrows, position.longitude))?
        .with_position(position);

    let keep = options.keep_set();
    let missing: Vec<String> = keep
        .iter()
        .filter(|name| !cast.has_column(name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        match options.column_policy {
            ColumnPolicy::Strict => return Err(CastError::MissingColumns(missing)),
            ColumnPolicy::Lenient => warn!(
                "Ignoring columns missing from the cast: {}",
                missing.join(", ")
            ),
        }
    }

    let dropped = cast
        .columns()
        .iter()
        .filter(|name| !keep.contains(*name))
        .count();
    debug!("Dropping {} columns not in {:?}", dropped, keep);
    Ok(cast.retain_columns(|name| keep.iter().any(|k| k == name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::PRESSURE_INDEX;
    use crate::options::ProcOptionsBuilder;
    use ndarray::{array, Array1};

    fn raw_cast() -> Cast {
        let pressure = array![1., 2., 3., 4., 3., 2.];
        let column = |v: f64| Array1::from_elem(6, v);
        Cast::from_columns(
            PRESSURE_INDEX,
            pressure,
            vec![
                ("t090C".to_string(), column(10.)),
                ("sal00".to_string(), column(35.)),
                ("oxygen".to_string(), column(6.)),
                ("extraneous".to_string(), column(-1.)),
            ],
        )
        .unwrap()
    }

    fn position() -> Position {
        Position::new(-30., 0.)
    }

    #[test]
    fn test_removes_upcast_by_default() {
        let cast = clean_cast(raw_cast(), position(), &ProcOptions::default()).unwrap();
        assert_eq!(cast.index().to_vec(), vec![1., 2., 3., 4.]);
    }

    #[test]
    fn test_keeps_upcast_when_asked() {
        let options = ProcOptionsBuilder::default()
            .remove_upcast(false)
            .build()
            .unwrap();
        let cast = clean_cast(raw_cast(), position(), &options).unwrap();
        assert_eq!(cast.nrows(), 6);
    }

    #[test]
    fn test_column_retention_with_extra_keep() {
        let options = ProcOptionsBuilder::default()
            .keep(vec!["oxygen".to_string()])
            .build()
            .unwrap();
        let cast = clean_cast(raw_cast(), position(), &options).unwrap();
        let mut columns = cast.columns().to_vec();
        columns.sort();
        assert_eq!(
            columns,
            vec!["latitude", "longitude", "oxygen", "sal00", "t090C"]
        );
        assert_eq!(cast.column("latitude").unwrap().to_vec(), vec![-30.; 4]);
        assert_eq!(cast.position(), Some(position()));
    }

    #[test]
    fn test_default_keep_drops_extra_channels() {
        let cast = clean_cast(raw_cast(), position(), &ProcOptions::default()).unwrap();
        assert!(!cast.has_column("oxygen"));
        assert!(!cast.has_column("extraneous"));
    }

    #[test]
    fn test_missing_keep_column_lenient_and_strict() {
        let lenient = ProcOptionsBuilder::default()
            .keep(vec!["par".to_string()])
            .build()
            .unwrap();
        let cast = clean_cast(raw_cast(), position(), &lenient).unwrap();
        assert!(!cast.has_column("par"));

        let strict = ProcOptionsBuilder::default()
            .keep(vec!["par".to_string()])
            .column_policy(ColumnPolicy::Strict)
            .build()
            .unwrap();
        match clean_cast(raw_cast(), position(), &strict) {
            Err(CastError::MissingColumns(missing)) => assert_eq!(missing, vec!["par"]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }
}
