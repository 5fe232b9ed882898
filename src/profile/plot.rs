// ctdproc/src/profile/plot.rs

use super::errors::ProfilePlotError;
use super::profile::Profile;
use super::stack::ProfileStack;
use plotly::color::NamedColor;
use plotly::common::{Line, Mode, Title};
use plotly::layout::{Axis, Layout};
use plotly::{Plot, Scatter};

impl Profile {
    /// `(value, -z)` pairs of `column` with missing values left out.
    fn trace_points(&self, column: &str) -> Option<(Vec<f64>, Vec<f64>)> {
        let values = self.column(column).ok()?;
        Some(
            values
                .iter()
                .zip(self.z().iter())
                .filter(|(value, _)| value.is_finite())
                .map(|(&value, &z)| (value, -z))
                .unzip(),
        )
    }
}

impl ProfileStack {
    /// One trace per profile plus the mean profile, height on the vertical axis.
    pub fn make_profile_plot(&self, column: &str) -> Result<Plot, ProfilePlotError> {
        let mut plot = Plot::new();
        let mut traces = 0;
        for profile in self.profiles() {
            if let Some((x, y)) = profile.trace_points(column) {
                let trace = Scatter::new(x, y)
                    .mode(Mode::Lines)
                    .name(profile.id());
                plot.add_trace(trace);
                traces += 1;
            }
        }
        if traces == 0 {
            return Err(ProfilePlotError::MissingColumn(column.to_string()));
        }
        if let Ok(mean) = self.mean_profile(&[column]) {
            let (x, y): (Vec<f64>, Vec<f64>) = mean
                .data()
                .column(0)
                .iter()
                .zip(mean.index().iter())
                .filter(|(value, _)| value.is_finite())
                .map(|(&value, &z)| (value, -z))
                .unzip();
            let trace = Scatter::new(x, y)
                .mode(Mode::Lines)
                .name("Av")
                .line(Line::new().color(NamedColor::Black).width(2.));
            plot.add_trace(trace);
        }
        plot.set_layout(
            Layout::new()
                .x_axis(Axis::new().title(Title::new(column)))
                .y_axis(Axis::new().title(Title::new("z [m]"))),
        );
        Ok(plot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::Cast;
    use crate::profile::ProfileMetadata;
    use ndarray::array;

    #[test]
    fn test_plot_requires_column() {
        let cast = Cast::from_columns("z", array![1., 2.], vec![("CT".to_string(), array![10., 9.])])
            .unwrap();
        let metadata = ProfileMetadata {
            mean_latitude: 0.,
            mean_longitude: 0.,
        };
        let mut stack = ProfileStack::new();
        stack.push(Profile::new("stn01", cast, metadata)).unwrap();
        assert!(stack.make_profile_plot("CT").is_ok());
        assert!(matches!(
            stack.make_profile_plot("SA"),
            Err(ProfilePlotError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_trace_points_skip_missing() {
        let cast = Cast::from_columns(
            "z",
            array![1., 2., 3.],
            vec![("SA".to_string(), array![35., f64::NAN, 35.2])],
        )
        .unwrap();
        let metadata = ProfileMetadata {
            mean_latitude: 0.,
            mean_longitude: 0.,
        };
        let profile = Profile::new("stn01", cast, metadata);
        let (x, y) = profile.trace_points("SA").unwrap();
        assert_eq!(x, vec![35., 35.2]);
        assert_eq!(y, vec![-1., -3.]);
        assert!(profile.trace_points("CT").is_none());
    }
}
