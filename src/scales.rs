/// Linear mapping between a data domain and a pixel range.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl ChartScale {
    pub fn new_linear(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self {
            domain: Self::widen(domain.0, domain.1),
            range,
        }
    }

    fn widen(mut d_min: f64, mut d_max: f64) -> (f64, f64) {
        if (d_max - d_min).abs() < f64::EPSILON {
            d_min -= 0.5;
            d_max += 0.5;
        }
        (d_min, d_max)
    }

    pub fn map(&self, value: f64) -> f32 {
        let (m, c) = self.get_linear_coeffs();
        let res = (value * m + c) as f32;
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res
        }
    }

    pub fn invert(&self, pixel: f32) -> f64 {
        let (m, c) = self.get_linear_coeffs();
        if m == 0.0 || !m.is_finite() {
            return self.domain.0;
        }
        (pixel as f64 - c) / m
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Label text for a tick, precision chosen from the visible span.
    pub fn format_tick(&self, value: f64) -> String {
        let span = (self.domain.1 - self.domain.0).abs();
        if value == 0.0 {
            "0".to_string()
        } else if span >= 10.0 || (span >= 1.0 && value.fract() == 0.0) {
            format!("{:.0}", value)
        } else if span >= 1.0 {
            format!("{:.1}", value)
        } else if span >= 0.01 {
            format!("{:.3}", value)
        } else {
            format!("{:.2e}", value)
        }
    }

    /// Returns (m, c) such that screen = value * m + c
    pub fn get_linear_coeffs(&self) -> (f64, f64) {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;
        let m = (r_max - r_min) as f64 / (d_max - d_min);
        let c = r_min as f64 - m * d_min;
        (m, c)
    }
}
