//! Transform helper for coordinate projection

use crate::data_types::AxisRange;
use crate::geometry::PixelsExt;
use crate::scales::ChartScale;
use gpui::*;

/// Data to screen projection for one slot frame.
#[derive(Clone, Debug)]
pub struct PlotTransform {
    pub x_scale: ChartScale,
    pub y_scale: ChartScale,
    pub bounds: Bounds<Pixels>,
}

impl PlotTransform {
    pub fn new(x_scale: ChartScale, y_scale: ChartScale, bounds: Bounds<Pixels>) -> Self {
        Self {
            x_scale,
            y_scale,
            bounds,
        }
    }

    /// Builds the projection of a slot's limits onto `bounds`, y growing up.
    pub fn for_ranges(x: &AxisRange, y: &AxisRange, bounds: Bounds<Pixels>) -> Self {
        let width = bounds.size.width.as_f32();
        let height = bounds.size.height.as_f32();
        Self::new(
            ChartScale::new_linear((x.min, x.max), (0.0, width)),
            ChartScale::new_linear((y.min, y.max), (height, 0.0)),
            bounds,
        )
    }

    pub fn data_to_screen(&self, point: Point<f64>) -> Point<Pixels> {
        Point::new(self.x_data_to_screen(point.x), self.y_data_to_screen(point.y))
    }

    pub fn screen_to_data(&self, point: Point<Pixels>) -> Point<f64> {
        Point::new(
            self.x_scale
                .invert((point.x - self.bounds.origin.x).as_f32()),
            self.y_scale
                .invert((point.y - self.bounds.origin.y).as_f32()),
        )
    }

    pub fn x_data_to_screen(&self, x: f64) -> Pixels {
        self.bounds.origin.x + px(self.x_scale.map(x))
    }

    pub fn y_data_to_screen(&self, y: f64) -> Pixels {
        self.bounds.origin.y + px(self.y_scale.map(y))
    }
}
