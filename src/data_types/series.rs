use super::axis::{AxisRange, Span};
use crate::error::{PlotError, PlotResult};
use gpui::Hsla;

/// Bin edges of the built-in placeholder series.
pub const DEFAULT_EDGES: [f64; 15] = [
    0.0, 5.0, 11.0, 15.0, 17.0, 22.0, 41.0, 47.0, 49.0, 51.0, 55.0, 59.0, 61.0, 66.0, 99.0,
];
/// Bin heights of the built-in placeholder series.
pub const DEFAULT_VALUES: [f64; 14] = [
    0.0, 5.0, 2.0, 8.0, 11.0, 2.0, 0.0, 1.0, 0.0, 15.0, 12.0, 3.0, 22.0, 6.0,
];

/// One stair series: `values[i]` spans `[edges[i], edges[i + 1])`.
///
/// Optional fields resolve to preference defaults when the series is placed
/// into a slot.
#[derive(Clone, Debug, PartialEq)]
pub struct StairSeries {
    pub edges: Vec<f64>,
    pub values: Vec<f64>,
    pub color: Option<Hsla>,
    pub id: Option<String>,
    pub title: Option<String>,
}

impl StairSeries {
    pub fn new(edges: Vec<f64>, values: Vec<f64>) -> Self {
        Self {
            edges,
            values,
            color: None,
            id: None,
            title: None,
        }
    }

    /// Accepts row-major 2-D input holding exactly one row per array.
    pub fn from_rows(edges: Vec<Vec<f64>>, values: Vec<Vec<f64>>) -> PlotResult<Self> {
        fn single_row(mut rows: Vec<Vec<f64>>, what: &str) -> PlotResult<Vec<f64>> {
            match rows.len() {
                1 => Ok(rows.remove(0)),
                0 => Err(PlotError::invalid_data(format!("{what} has no rows"))),
                n => Err(PlotError::invalid_data(format!(
                    "{what} with {n} rows has too many dimensions"
                ))),
            }
        }
        let series = Self::new(single_row(edges, "edges")?, single_row(values, "values")?);
        series.validate()?;
        Ok(series)
    }

    /// The built-in placeholder for slot `index`, scaled by `index + 1`.
    pub fn synthetic(index: usize) -> Self {
        let k = (index + 1) as f64;
        Self::new(
            DEFAULT_EDGES.iter().map(|e| e * k).collect(),
            DEFAULT_VALUES.iter().map(|v| v * k).collect(),
        )
    }

    pub fn with_color(mut self, color: Hsla) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Checks the shape contract: one more edge than values, at least one
    /// bin, finite numbers, non-decreasing edges.
    pub fn validate(&self) -> PlotResult<()> {
        if self.edges.len() != self.values.len() + 1 {
            return Err(PlotError::invalid_data(format!(
                "len(edges) = {} but len(values) + 1 = {}",
                self.edges.len(),
                self.values.len() + 1
            )));
        }
        if self.values.is_empty() {
            return Err(PlotError::invalid_data("series has no bins"));
        }
        if self
            .edges
            .iter()
            .chain(self.values.iter())
            .any(|v| !v.is_finite())
        {
            return Err(PlotError::invalid_data("series contains non-finite numbers"));
        }
        if self.edges.windows(2).any(|w| w[1] < w[0]) {
            return Err(PlotError::invalid_data("edges must be non-decreasing"));
        }
        Ok(())
    }

    pub fn bin_count(&self) -> usize {
        self.values.len()
    }

    /// Index of the bin containing `x`, clamped to the first/last bin.
    pub fn bin_at(&self, x: f64) -> usize {
        let above = self.edges.partition_point(|&e| e <= x);
        above.saturating_sub(1).min(self.values.len().saturating_sub(1))
    }

    /// Value of the bin under `x`.
    pub fn value_at(&self, x: f64) -> f64 {
        self.values.get(self.bin_at(x)).copied().unwrap_or(0.0)
    }

    pub fn x_extent(&self) -> Span {
        let first = self.edges.first().copied().unwrap_or(0.0);
        let last = self.edges.last().copied().unwrap_or(0.0);
        Span::ordered(first, last)
    }

    pub fn value_extent(&self) -> Span {
        let (min, max) = self
            .values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if min.is_finite() {
            Span { min, max }
        } else {
            Span::default()
        }
    }

    /// Largest magnitude among the values.
    pub fn abs_max(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}

/// One plotting region of the surface.
#[derive(Clone, Debug)]
pub struct Slot {
    pub series: StairSeries,
    pub visible: bool,
    /// Symmetric half-range of the y axis around zero.
    pub vertical_scale: f64,
    /// Autoscale bound from the last rescale.
    pub data_max: f64,
    pub line_color: Hsla,
    pub line_width: f32,
    pub title: Option<String>,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
}

impl Slot {
    pub fn new(series: StairSeries, line_color: Hsla, line_width: f32) -> Self {
        let color = series.color.unwrap_or(line_color);
        let title = series.title.clone();
        Self {
            series,
            visible: true,
            vertical_scale: 1.0,
            data_max: 1.0,
            line_color: color,
            line_width,
            title,
            x_range: AxisRange::new(0.0, 1.0),
            y_range: AxisRange::new(-1.0, 1.0),
        }
    }

    /// Swaps in new data, resolving the colour against `default_color`.
    pub fn replace_series(&mut self, series: StairSeries, default_color: Hsla) {
        self.line_color = series.color.unwrap_or(default_color);
        if series.title.is_some() {
            self.title = series.title.clone();
        }
        self.series = series;
    }
}
