// ctdproc/src/cast/cast.rs

use super::errors::CastError;
use ndarray::{concatenate, Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_stats::QuantileExt;

/// Name given to the pressure index of a cast read from a `.cnv` file.
pub const PRESSURE_INDEX: &str = "Pressure [dbar]";

/// Cast-wide station position in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One CTD deployment as an indexed table of measurements.
///
/// Rows follow the index, columns follow `columns`. Missing samples are `NaN`.
/// Every operation returns a new `Cast`; nothing is mutated in place.
#[derive(Clone, Debug)]
pub struct Cast {
    index_name: String,
    index: Array1<f64>,
    columns: Vec<String>,
    data: Array2<f64>,
    position: Option<Position>,
}

impl Cast {
    pub fn new(
        index_name: impl Into<String>,
        index: Array1<f64>,
        columns: Vec<String>,
        data: Array2<f64>,
    ) -> Result<Self, CastError> {
        if columns.len() != data.ncols() {
            return Err(CastError::ColumnCountMismatch(columns.len(), data.ncols()));
        }
        if index.len() != data.nrows() {
            return Err(CastError::RowCountMismatch(index.len(), data.nrows()));
        }
        Ok(Self {
            index_name: index_name.into(),
            index,
            columns,
            data,
            position: None,
        })
    }

    /// Builds a cast from named columns of equal length.
    pub fn from_columns(
        index_name: impl Into<String>,
        index: Array1<f64>,
        columns: Vec<(String, Array1<f64>)>,
    ) -> Result<Self, CastError> {
        let nrows = index.len();
        let mut data = Array2::<f64>::zeros((nrows, 0));
        let mut names = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            if values.len() != nrows {
                return Err(CastError::RowCountMismatch(nrows, values.len()));
            }
            data.push_column(values.view())?;
            names.push(name);
        }
        Self::new(index_name, index, names, data)
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn index(&self) -> ArrayView1<f64> {
        self.index.view()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn data(&self) -> ArrayView2<f64> {
        self.data.view()
    }

    pub fn nrows(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_position(name).is_some()
    }

    fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Result<ArrayView1<f64>, CastError> {
        let i = self
            .column_position(name)
            .ok_or_else(|| CastError::MissingColumn(name.to_string()))?;
        Ok(self.data.column(i))
    }

    /// Replaces the column `name`, or appends it when the cast does not have it yet.
    pub fn with_column(mut self, name: &str, values: Array1<f64>) -> Result<Self, CastError> {
        if values.len() != self.nrows() {
            return Err(CastError::RowCountMismatch(self.nrows(), values.len()));
        }
        match self.column_position(name) {
            Some(i) => self.data.column_mut(i).assign(&values),
            None => {
                self.data.push_column(values.view())?;
                self.columns.push(name.to_string());
            }
        }
        Ok(self)
    }

    /// Keeps the rows at `rows`, in that order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            index_name: self.index_name.clone(),
            index: self.index.select(Axis(0), rows),
            columns: self.columns.clone(),
            data: self.data.select(Axis(0), rows),
            position: self.position,
        }
    }

    /// Drops every column whose name `keep` rejects. Column order is preserved.
    pub fn retain_columns<F>(self, keep: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let kept: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, name)| keep(name))
            .map(|(i, _)| i)
            .collect();
        Self {
            index_name: self.index_name,
            columns: kept.iter().map(|&i| self.columns[i].clone()).collect(),
            data: self.data.select(Axis(1), &kept),
            index: self.index,
            position: self.position,
        }
    }

    /// Splits the cast at its maximum index value into `(downcast, upcast)`.
    ///
    /// The downcast runs from the first row up to and including the deepest
    /// row. The upcast runs from the deepest row back to the last row, reversed
    /// so that it is ordered by decreasing index like the downcast is ordered
    /// by increasing index.
    pub fn split(&self) -> (Self, Self) {
        let deepest = match self.index.argmax_skipnan() {
            Ok(i) => i,
            Err(_) => {
                return (self.clone(), self.select_rows(&[]));
            }
        };
        let down: Vec<usize> = (0..=deepest).collect();
        let up: Vec<usize> = (deepest..self.nrows()).rev().collect();
        (self.select_rows(&down), self.select_rows(&up))
    }

    /// Moves the current index into the first column and indexes the cast on `values`.
    pub fn set_index(self, name: &str, values: Array1<f64>) -> Result<Self, CastError> {
        if values.len() != self.nrows() {
            return Err(CastError::RowCountMismatch(self.nrows(), values.len()));
        }
        let old_index = self.index.insert_axis(Axis(1));
        let data = concatenate(Axis(1), &[old_index.view(), self.data.view()])?;
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(self.index_name);
        columns.extend(self.columns);
        Ok(Self {
            index_name: name.to_string(),
            index: values,
            columns,
            data,
            position: self.position,
        })
    }

    /// Same table on a new index, no column is added.
    pub(crate) fn reindexed(
        &self,
        index_name: &str,
        index: Array1<f64>,
        data: Array2<f64>,
    ) -> Result<Self, CastError> {
        let cast = Self::new(index_name, index, self.columns.clone(), data)?;
        Ok(match self.position {
            Some(position) => cast.with_position(position),
            None => cast,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample_cast() -> Cast {
        Cast::from_columns(
            PRESSURE_INDEX,
            array![1., 2., 3., 2.5, 1.5],
            vec![
                ("t090C".to_string(), array![10., 9., 8., 8.5, 9.5]),
                ("sal00".to_string(), array![35., 35.1, 35.2, 35.15, 35.05]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_mismatched_shapes() {
        let err = Cast::new(
            PRESSURE_INDEX,
            array![1., 2.],
            vec!["a".to_string()],
            Array2::zeros((3, 1)),
        )
        .unwrap_err();
        assert!(matches!(err, CastError::RowCountMismatch(2, 3)));
    }

    #[test]
    fn test_column_lookup() {
        let cast = sample_cast();
        assert_eq!(cast.column("sal00").unwrap()[2], 35.2);
        assert!(matches!(
            cast.column("oxygen"),
            Err(CastError::MissingColumn(name)) if name == "oxygen"
        ));
    }

    #[test]
    fn test_split_at_deepest_row() {
        let (down, up) = sample_cast().split();
        assert_eq!(down.index().to_vec(), vec![1., 2., 3.]);
        assert_eq!(up.index().to_vec(), vec![1.5, 2.5, 3.]);
        assert_eq!(down.column("t090C").unwrap().to_vec(), vec![10., 9., 8.]);
    }

    #[test]
    fn test_split_empty_cast() {
        let cast = Cast::from_columns(PRESSURE_INDEX, Array1::zeros(0), vec![]).unwrap();
        let (down, up) = cast.split();
        assert!(down.is_empty());
        assert!(up.is_empty());
    }

    #[test]
    fn test_with_column_appends_and_replaces() {
        let cast = sample_cast()
            .with_column("oxygen", Array1::from_elem(5, 6.0))
            .unwrap()
            .with_column("t090C", Array1::zeros(5))
            .unwrap();
        assert_eq!(cast.columns(), &["t090C", "sal00", "oxygen"]);
        assert_eq!(cast.column("t090C").unwrap().sum(), 0.0);
        assert!(sample_cast().with_column("x", Array1::zeros(2)).is_err());
    }

    #[test]
    fn test_retain_columns_keeps_order() {
        let cast = sample_cast().retain_columns(|name| name == "sal00");
        assert_eq!(cast.columns(), &["sal00"]);
        assert_eq!(cast.data().ncols(), 1);
        assert_eq!(cast.nrows(), 5);
    }

    #[test]
    fn test_set_index_moves_old_index_to_first_column() {
        let cast = sample_cast();
        let z = cast.index().mapv(|p| p * 0.99);
        let cast = cast.set_index("z", z).unwrap();
        assert_eq!(cast.index_name(), "z");
        assert_eq!(cast.columns()[0], PRESSURE_INDEX);
        assert_eq!(cast.column(PRESSURE_INDEX).unwrap()[2], 3.0);
        assert!(!cast.has_column("z"));
    }
}
