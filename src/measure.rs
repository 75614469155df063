//! Area and RMS of stair series over a reference span.

use crate::data_types::{Span, StairSeries};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SlotMeasurement {
    pub slot: usize,
    /// Integral of the step function over the span, in value × x units.
    pub area: f64,
    /// Root of the width-weighted mean of squared values over the span.
    pub rms: f64,
}

/// Exact integral of the step function over `span`.
pub fn stair_area(series: &StairSeries, span: Span) -> f64 {
    series
        .edges
        .windows(2)
        .zip(&series.values)
        .map(|(e, v)| v * span.overlap(e[0], e[1]))
        .sum()
}

/// RMS of the step function over the covered part of `span`. Zero when the
/// span misses every bin.
pub fn stair_rms(series: &StairSeries, span: Span) -> f64 {
    let (sum_sq, covered) = series.edges.windows(2).zip(&series.values).fold(
        (0.0, 0.0),
        |(sum_sq, covered), (e, v)| {
            let w = span.overlap(e[0], e[1]);
            (sum_sq + v * v * w, covered + w)
        },
    );
    if covered > 0.0 {
        (sum_sq / covered).sqrt()
    } else {
        0.0
    }
}

pub fn measure(slot: usize, series: &StairSeries, span: Span) -> SlotMeasurement {
    SlotMeasurement {
        slot,
        area: stair_area(series, span),
        rms: stair_rms(series, span),
    }
}
