//! Vertical stacking of the active slots.

use crate::geometry::PixelsExt;
use gpui::*;

/// Fraction of the viewport height kept under the stack for x ticks and title.
pub const X_AXIS_GUTTER: f32 = 0.075;
/// Fraction of the viewport height kept above the stack for the first title.
pub const TITLE_GUTTER: f32 = 0.05;

/// Placement of one active slot.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotFrame {
    pub slot: usize,
    pub bounds: Bounds<Pixels>,
    /// Only the bottom-most frame carries x ticks and the x title.
    pub show_x_axis: bool,
    pub show_title: bool,
}

/// Frames of every active slot, top to bottom.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceLayout {
    pub viewport: Bounds<Pixels>,
    pub frames: Vec<SlotFrame>,
    /// Band under the stack where x labels go, when shown.
    pub x_axis_band: Option<Bounds<Pixels>>,
}

impl SurfaceLayout {
    /// Stacks `active` slots with equal heights and no spacing.
    pub fn compute(
        viewport: Bounds<Pixels>,
        active: &[usize],
        xaxis_show: bool,
        title_show: bool,
    ) -> Self {
        let total_h = viewport.size.height.as_f32().max(0.0);
        let bottom = if xaxis_show { total_h * X_AXIS_GUTTER } else { 0.0 };
        let top = if title_show { total_h * TITLE_GUTTER } else { 0.0 };
        let stack_h = (total_h - top - bottom).max(0.0);

        let count = active.len();
        let row_h = if count > 0 { stack_h / count as f32 } else { 0.0 };
        let origin_x = viewport.origin.x;
        let width = viewport.size.width;

        let frames = active
            .iter()
            .enumerate()
            .map(|(row, &slot)| SlotFrame {
                slot,
                bounds: Bounds::new(
                    Point::new(origin_x, viewport.origin.y + px(top + row_h * row as f32)),
                    Size {
                        width,
                        height: px(row_h),
                    },
                ),
                show_x_axis: xaxis_show && row + 1 == count,
                show_title: title_show,
            })
            .collect();

        let x_axis_band = (xaxis_show && count > 0).then(|| {
            Bounds::new(
                Point::new(origin_x, viewport.origin.y + px(top + stack_h)),
                Size {
                    width,
                    height: px(bottom),
                },
            )
        });

        Self {
            viewport,
            frames,
            x_axis_band,
        }
    }

    pub fn rows(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_of(&self, slot: usize) -> Option<&SlotFrame> {
        self.frames.iter().find(|f| f.slot == slot)
    }

    /// Frame under a screen position.
    pub fn frame_at(&self, point: Point<Pixels>) -> Option<&SlotFrame> {
        self.frames.iter().find(|f| f.bounds.contains(&point))
    }
}
