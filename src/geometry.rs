//! Screen geometry of the surface and its cached background.
//!
//! Everything here is plain data: the view adapter turns [`StrokePath`]s into
//! GPUI paths and [`FillRect`]s into quads. Building the background once per
//! data/limits/viewport change and reusing it while a rubber band moves keeps
//! drag redraws down to the overlay.

use crate::data_types::StairSeries;
use crate::transform::PlotTransform;
use gpui::*;
use std::ops::Range;
use std::rc::Rc;

pub(crate) trait PixelsExt {
    fn as_f32(&self) -> f32;
}

impl PixelsExt for Pixels {
    fn as_f32(&self) -> f32 {
        f32::from(*self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StrokePath {
    pub points: Vec<Point<Pixels>>,
    pub color: Hsla,
    pub width: f32,
    /// Region the stroke is clipped to when painted.
    pub clip: Option<Bounds<Pixels>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FillRect {
    pub bounds: Bounds<Pixels>,
    pub color: Hsla,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelAlign {
    Left,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub origin: Point<Pixels>,
    pub color: Hsla,
    pub align: LabelAlign,
}

/// Static part of a frame: slot backgrounds, zero lines, stairs, labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BackgroundScene {
    pub fills: Vec<FillRect>,
    pub strokes: Vec<StrokePath>,
    pub labels: Vec<TextLabel>,
}

/// Transient part of a frame: rubber bands and the reference span.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayScene {
    pub fills: Vec<FillRect>,
}

impl OverlayScene {
    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub background: Rc<BackgroundScene>,
    pub overlay: OverlayScene,
}

/// Indices of the bins that intersect `[x_min, x_max]`, widened by one bin on
/// each side so the path leaves the frame instead of stopping at its edge.
pub fn visible_bins(edges: &[f64], x_min: f64, x_max: f64) -> Range<usize> {
    let bins = edges.len().saturating_sub(1);
    if bins == 0 {
        return 0..0;
    }
    let first = edges.partition_point(|&e| e < x_min).saturating_sub(1);
    let last = edges.partition_point(|&e| e <= x_max).min(bins);
    let start = first.saturating_sub(1);
    let end = (last + 1).min(bins);
    start.min(end)..end
}

/// Outline of a stair series in data space: up from zero at the first edge,
/// across every bin, back down to zero at the last edge.
pub fn stair_outline(series: &StairSeries, bins: Range<usize>) -> Vec<Point<f64>> {
    if bins.is_empty() {
        return Vec::new();
    }
    let edges = &series.edges;
    let values = &series.values;
    let mut points = Vec::with_capacity(bins.len() * 2 + 2);

    points.push(Point::new(edges[bins.start], 0.0));
    for i in bins.clone() {
        points.push(Point::new(edges[i], values[i]));
        points.push(Point::new(edges[i + 1], values[i]));
    }
    points.push(Point::new(edges[bins.end], 0.0));
    points
}

/// Screen polyline of `series` within the transform's x domain.
pub fn stair_polyline(series: &StairSeries, transform: &PlotTransform) -> Vec<Point<Pixels>> {
    let (x_min, x_max) = transform.x_scale.domain();
    let bins = visible_bins(&series.edges, x_min, x_max);
    let mut out: Vec<Point<Pixels>> = Vec::new();
    for p in stair_outline(series, bins) {
        let s = transform.data_to_screen(p);
        if out.last() != Some(&s) {
            out.push(s);
        }
    }
    out
}

/// Splits the horizontal line `y` from `x0` to `x1` into dash segments.
/// An empty pattern yields the whole line.
pub fn dash_segments(x0: f32, x1: f32, y: f32, pattern: &[f32], width: f32) -> Vec<[Point<Pixels>; 2]> {
    let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
    let scale = width.max(1.0);
    let total: f32 = pattern.iter().sum::<f32>() * scale;
    if pattern.is_empty() || total <= 0.0 {
        return vec![[point(px(lo), px(y)), point(px(hi), px(y))]];
    }

    let mut segments = Vec::new();
    let mut x = lo;
    let mut i = 0;
    while x < hi {
        let run = pattern[i % pattern.len()] * scale;
        let end = (x + run).min(hi);
        if i % 2 == 0 {
            segments.push([point(px(x), px(y)), point(px(end), px(y))]);
        }
        x = end;
        i += 1;
    }
    segments
}

/// Full-height band of a frame between two screen x positions.
pub fn vertical_band(frame: Bounds<Pixels>, x0: Pixels, x1: Pixels) -> Bounds<Pixels> {
    let frame_left = frame.origin.x.as_f32();
    let frame_right = frame_left + frame.size.width.as_f32();
    let left = x0.as_f32().min(x1.as_f32()).max(frame_left);
    let right = x0.as_f32().max(x1.as_f32()).min(frame_right);
    Bounds::new(
        point(px(left), frame.origin.y),
        Size {
            width: px((right - left).max(0.0)),
            height: frame.size.height,
        },
    )
}

/// Rectangle spanned by two screen corners, clipped to `frame`.
pub fn corner_rect(frame: Bounds<Pixels>, a: Point<Pixels>, b: Point<Pixels>) -> Bounds<Pixels> {
    let band = vertical_band(frame, a.x, b.x);
    let frame_top = frame.origin.y.as_f32();
    let frame_bottom = frame_top + frame.size.height.as_f32();
    let top = a.y.as_f32().min(b.y.as_f32()).max(frame_top);
    let bottom = a.y.as_f32().max(b.y.as_f32()).min(frame_bottom);
    Bounds::new(
        point(band.origin.x, px(top)),
        Size {
            width: band.size.width,
            height: px((bottom - top).max(0.0)),
        },
    )
}

/// Identity of a background build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneKey {
    pub data_generation: u64,
    pub view_generation: u64,
    pub viewport: Bounds<Pixels>,
}

/// Keeps the last background and rebuilds only when its key changes.
#[derive(Debug, Default)]
pub struct SceneCache {
    key: Option<SceneKey>,
    scene: Option<Rc<BackgroundScene>>,
    builds: usize,
}

impl SceneCache {
    pub fn get_or_build(
        &mut self,
        key: SceneKey,
        build: impl FnOnce() -> BackgroundScene,
    ) -> Rc<BackgroundScene> {
        if self.key == Some(key) {
            if let Some(scene) = &self.scene {
                return scene.clone();
            }
        }
        let scene = Rc::new(build());
        self.builds += 1;
        tracing::trace!("background rebuilt ({} builds)", self.builds);
        self.key = Some(key);
        self.scene = Some(scene.clone());
        scene
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.scene = None;
    }

    /// Number of background builds so far.
    pub fn builds(&self) -> usize {
        self.builds
    }
}
