use d3rs::scale::{LinearScale, Scale};
use serde::{Deserialize, Serialize};

/// An ordered `[min, max]` interval in data coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    /// Builds a span from two ends given in any order.
    pub fn ordered(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Length of the intersection with `[lo, hi]`, zero when disjoint.
    pub fn overlap(&self, lo: f64, hi: f64) -> f64 {
        (self.max.min(hi) - self.min.max(lo)).max(0.0)
    }
}

/// Autoscale extent of one slot's data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisDomain {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Visible limits of one axis of one slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub cached_ticks: Vec<f64>,
    pub last_tick_domain: (f64, f64),
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            cached_ticks: vec![],
            last_tick_domain: (0.0, 0.0),
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn bounds(&self) -> Span {
        Span::ordered(self.min, self.max)
    }

    pub fn set(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
        self.cached_ticks.clear();
    }

    pub fn set_span(&mut self, span: Span) {
        self.set(span.min, span.max);
    }

    pub fn ticks(&mut self, count: usize) -> &[f64] {
        let (min, max) = (self.min, self.max);
        let domain_changed = (min - self.last_tick_domain.0).abs() > (max - min).abs() * 0.001
            || (max - self.last_tick_domain.1).abs() > (max - min).abs() * 0.001;

        if domain_changed || self.cached_ticks.is_empty() {
            self.cached_ticks = if (max - min).abs() < f64::EPSILON {
                vec![min]
            } else {
                LinearScale::new()
                    .domain(min, max)
                    .range(0.0, 1.0)
                    .ticks(count)
            };
            self.last_tick_domain = (min, max);
        }
        &self.cached_ticks
    }

    /// Rescales the span by `factor` keeping `pivot_data` at the same
    /// relative position (`pivot_pct` from `min`).
    pub fn zoom_at(&mut self, pivot_data: f64, pivot_pct: f64, factor: f64) {
        let new_span = self.span() * factor;
        self.min = pivot_data - new_span * pivot_pct;
        self.max = self.min + new_span;
        self.cached_ticks.clear();
    }
}
