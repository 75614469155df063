use crate::data_types::{AxisRange, Span};
use crate::preferences::ZeroLinePosition;

/// Large-to-small ratio of the range when the zero line sits at an edge.
const EDGE_SPLIT: f64 = 10.0;

/// Where a vertical rescale is centred.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ScaleAnchor {
    /// Around the zero line, which keeps its configured position.
    #[default]
    Zero,
    /// Around a data y value, keeping its relative position in the limits.
    Value(f64),
}

/// ViewController handles the scaling math of the surface independently of
/// the GPUI infrastructure to facilitate testing.
pub struct ViewController;

impl ViewController {
    /// Calculates the new bounds for an auto-fit with a margin expressed as
    /// a fraction of the data extent.
    pub fn compute_auto_fit(min: f64, max: f64, margin_pct: f64) -> (f64, f64) {
        if min == f64::INFINITY || max == f64::NEG_INFINITY {
            return (0.0, 1.0);
        }
        let pad = margin_pct * (max - min);
        Self::guard_degenerate(min - pad, max + pad)
    }

    /// y limits reaching `half` (widened by `y_bump` of the full height) on
    /// the large side of the zero line. In the middle that is
    /// `[-half, half]`; at the top or bottom the small side gets a tenth.
    pub fn zero_line_limits(half: f64, y_bump: f64, position: ZeroLinePosition) -> (f64, f64) {
        let half = half.abs();
        let reach = half + y_bump * 2.0 * half;
        let (min, max) = match position {
            ZeroLinePosition::Middle => (-reach, reach),
            ZeroLinePosition::Top => (-reach, reach / EDGE_SPLIT),
            ZeroLinePosition::Bottom => (-reach / EDGE_SPLIT, reach),
        };
        Self::guard_degenerate(min, max)
    }

    /// Forces a collapsed range to the unit range `[0, 1]`.
    pub fn guard_degenerate(min: f64, max: f64) -> (f64, f64) {
        if min == max || !min.is_finite() || !max.is_finite() {
            (0.0, 1.0)
        } else {
            (min, max)
        }
    }

    /// Normalises a raw wheel step: platforms report multiples of three per
    /// notch, and a single step is never smaller than one.
    pub fn scroll_magnitude(step: f64) -> f64 {
        (step.abs() / 3.0).max(1.0)
    }

    /// Multiplicative change of the y range for a wheel step. Negative steps
    /// shrink the data (widen the range), positive steps enlarge it.
    pub fn scroll_scale_factor(step: f64, multiplier: f64) -> f64 {
        let magnitude = Self::scroll_magnitude(step);
        if step < 0.0 {
            magnitude * multiplier
        } else {
            1.0 / (magnitude * multiplier)
        }
    }

    /// Applies `factor` to the half-range around the zero line. Returns the
    /// new half-range and the limits to display.
    pub fn rescale_about_zero(
        vertical_scale: f64,
        factor: f64,
        position: ZeroLinePosition,
    ) -> (f64, (f64, f64)) {
        let scaled = (vertical_scale * factor).abs();
        if scaled == 0.0 || !scaled.is_finite() {
            return (1.0, (0.0, 1.0));
        }
        (scaled, Self::zero_line_limits(scaled, 0.0, position))
    }

    /// Rescales the current limits around `anchor`, keeping the anchor at
    /// the same relative height.
    pub fn rescale_anchored(range: &mut AxisRange, anchor: f64, factor: f64) {
        let span = range.span();
        if span == 0.0 || !span.is_finite() {
            range.set(0.0, 1.0);
            return;
        }
        let pivot_pct = (anchor - range.min) / span;
        range.zoom_at(anchor, pivot_pct, factor);
        let (min, max) = Self::guard_degenerate(range.min, range.max);
        range.set(min, max);
    }

    /// Whether a dragged extent is large enough to commit.
    pub fn meets_min_span(span: Span, min_span: Option<f64>) -> bool {
        match min_span {
            Some(min) => span.width() >= min,
            None => true,
        }
    }
}
