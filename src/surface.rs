//! The plot surface: a fixed arena of slots, the active-slot view over it,
//! the public data API and synchronous input dispatch.

use crate::config::{ScrollTarget, SurfaceConfig, ZoomMode};
use crate::data_types::{AxisDomain, PointerSample, ScalingMode, Slot, Span, StairSeries};
use crate::error::{PlotError, PlotResult};
use crate::geometry::{
    corner_rect, dash_segments, stair_polyline, vertical_band, BackgroundScene, FillRect,
    LabelAlign, OverlayScene, PixelsExt, Scene, SceneCache, SceneKey, StrokePath, TextLabel,
};
use crate::gestures::{
    BoxZoom, GestureInput, GestureKind, GestureOutcome, GesturePhase, GestureRecognizer,
    InputEvent, MiddleEvents, SpanSelector,
};
use crate::host::{
    MiddleMotion, MiddlePress, MiddleSelect, MotionEvent, NoopHost, PlotHost, ReferenceSelection,
    ScrollDirection, ScrollEvent, ZoomSelection,
};
use crate::layout::SurfaceLayout;
use crate::measure::{measure, SlotMeasurement};
use crate::preferences::Preferences;
use crate::theme::PlotTheme;
use crate::transform::PlotTransform;
use crate::view_controller::{ScaleAnchor, ViewController};
use gpui::{point, px, Bounds, Pixels, Point};
use tracing::{debug, warn};

/// How much of the view an input invalidated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Redraw {
    None,
    /// Rubber band or reference overlay only; the cached background stays.
    Overlay,
    Full,
}

/// A recognizer and the slot it is pinned to when unlinked.
struct BoundRecognizer {
    home: Option<usize>,
    recognizer: Box<dyn GestureRecognizer>,
}

pub struct PlotSurface {
    config: SurfaceConfig,
    prefs: Preferences,
    theme: PlotTheme,
    slots: Vec<Slot>,
    active: Vec<usize>,
    recognizers: Vec<BoundRecognizer>,
    gestures_enabled: bool,
    host: Box<dyn PlotHost>,
    viewport: Bounds<Pixels>,
    layout: SurfaceLayout,
    cache: SceneCache,
    data_generation: u64,
    view_generation: u64,
    /// A gesture motion notification went out this frame.
    motion_sent: bool,
    reference: Option<Span>,
}

fn positive_scale(value: f64) -> f64 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        1.0
    }
}

impl PlotSurface {
    /// Creates `config.slot_count` slots. Initial data of the wrong length or
    /// shape is replaced by the built-in placeholder series.
    pub fn new(
        config: SurfaceConfig,
        prefs: Preferences,
        initial: Option<Vec<StairSeries>>,
    ) -> PlotResult<Self> {
        let count = config.slot_count;
        if count < 1 {
            return Err(PlotError::configuration("slot_count must be at least 1"));
        }
        if config.scale_multiplier <= 0.0 || config.scale_multiplier.is_nan() {
            return Err(PlotError::configuration("scale_multiplier must be positive"));
        }

        let series = match initial {
            Some(list) if list.len() == count && list.iter().all(|s| s.validate().is_ok()) => list,
            Some(list) => {
                warn!(
                    "initial data has {} series for {} slots, using defaults",
                    list.len(),
                    count
                );
                (0..count).map(StairSeries::synthetic).collect()
            }
            None => (0..count).map(StairSeries::synthetic).collect(),
        };

        let line_color = prefs.line_color_real.hsla();
        let mut slots: Vec<Slot> = series
            .into_iter()
            .map(|s| Slot::new(s, line_color, prefs.line_width))
            .collect();
        if config.plot_titles.len() == count {
            for (slot, title) in slots.iter_mut().zip(&config.plot_titles) {
                slot.title = Some(title.clone());
            }
        }

        let recognizers = Self::build_recognizers(&config);
        let theme = PlotTheme::new(&prefs, &config);
        let mut surface = Self {
            config,
            prefs,
            theme,
            slots,
            active: (0..count).collect(),
            recognizers,
            gestures_enabled: true,
            host: Box::new(NoopHost),
            viewport: Bounds::default(),
            layout: SurfaceLayout::default(),
            cache: SceneCache::default(),
            data_generation: 0,
            view_generation: 0,
            motion_sent: false,
            reference: None,
        };
        surface.autoscale();
        surface.relayout();
        debug!("plot surface created with {} slots", count);
        Ok(surface)
    }

    fn build_recognizers(config: &SurfaceConfig) -> Vec<BoundRecognizer> {
        let count = config.slot_count;
        let groups: Vec<(Option<usize>, Vec<usize>)> = if config.unlink {
            (0..count).map(|i| (Some(i), vec![i])).collect()
        } else {
            vec![(None, (0..count).collect())]
        };

        let mut out = Vec::new();
        for (home, targets) in groups {
            let zoom: Option<Box<dyn GestureRecognizer>> = match config.zoom {
                ZoomMode::None => None,
                ZoomMode::Span => Some(Box::new(SpanSelector::zoom(targets.clone(), config.min_span))),
                ZoomMode::Box => Some(Box::new(BoxZoom::new(
                    targets.clone(),
                    config.min_span,
                    config.min_span_y,
                ))),
            };
            if let Some(recognizer) = zoom {
                out.push(BoundRecognizer { home, recognizer });
            }
            if config.reference {
                out.push(BoundRecognizer {
                    home,
                    recognizer: Box::new(SpanSelector::reference(targets.clone(), config.min_span)),
                });
            }
            if config.middle {
                out.push(BoundRecognizer {
                    home,
                    recognizer: Box::new(MiddleEvents::new(targets)),
                });
            }
        }
        out
    }

    pub fn set_host(&mut self, host: Box<dyn PlotHost>) {
        self.host = host;
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn theme(&self) -> &PlotTheme {
        &self.theme
    }

    /// Replaces the display preferences and re-lays out the surface. A new
    /// zero-line position re-derives every slot's y limits from its current
    /// vertical scale.
    pub fn set_preferences(&mut self, prefs: Preferences) {
        self.theme = PlotTheme::new(&prefs, &self.config);
        let position = prefs.zero_line_plot_position;
        if position != self.prefs.zero_line_plot_position {
            for slot in &mut self.slots {
                let (min, max) = ViewController::zero_line_limits(slot.vertical_scale, 0.0, position);
                slot.y_range.set(min, max);
            }
            debug!("zero line moved to {position:?}");
        }
        self.prefs = prefs;
        self.relayout();
        self.view_generation += 1;
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Series currently held by a slot.
    pub fn slot_data(&self, index: usize) -> Option<&StairSeries> {
        self.slots.get(index).map(|s| &s.series)
    }

    /// Active slots in construction order.
    pub fn active_slots(&self) -> &[usize] {
        &self.active
    }

    pub fn x_limits(&self, index: usize) -> Option<Span> {
        self.slots.get(index).map(|s| s.x_range.bounds())
    }

    pub fn y_limits(&self, index: usize) -> Option<Span> {
        self.slots.get(index).map(|s| s.y_range.bounds())
    }

    pub fn vertical_scale(&self, index: usize) -> Option<f64> {
        self.slots.get(index).map(|s| s.vertical_scale)
    }

    pub fn data_max(&self, index: usize) -> Option<f64> {
        self.slots.get(index).map(|s| s.data_max)
    }

    /// Value of the bin under `x` in a slot.
    pub fn value_at(&self, index: usize, x: f64) -> Option<f64> {
        self.slots.get(index).map(|s| s.series.value_at(x))
    }

    /// Last committed reference span.
    pub fn reference_span(&self) -> Option<Span> {
        self.reference
    }

    /// Whether any reference overlay is currently shown.
    pub fn reference_visible(&self) -> bool {
        self.recognizers
            .iter()
            .filter_map(|b| b.recognizer.reference())
            .any(|r| r.shown().is_some())
    }

    /// Autoscale extent of a slot: global x range, symmetric y bound.
    pub fn data_domain(&self, index: usize) -> Option<AxisDomain> {
        let x = self.data_x_extent();
        self.slots.get(index).map(|s| AxisDomain {
            x_min: x.min,
            x_max: x.max,
            y_min: -s.data_max,
            y_max: s.data_max,
        })
    }

    // ---- data ----

    /// Replaces every slot's series. The call is rejected as a whole when
    /// the count or any series is wrong.
    pub fn set_data(&mut self, series: Vec<StairSeries>) -> PlotResult<()> {
        if series.len() != self.slots.len() {
            warn!(
                "set_data rejected: {} series for {} slots",
                series.len(),
                self.slots.len()
            );
            return Err(PlotError::invalid_data(format!(
                "expected {} series, got {}",
                self.slots.len(),
                series.len()
            )));
        }
        for s in &series {
            s.validate().map_err(|e| {
                warn!("set_data rejected: {e}");
                e
            })?;
        }
        let default_color = self.prefs.line_color_real.hsla();
        for (slot, s) in self.slots.iter_mut().zip(series) {
            slot.replace_series(s, default_color);
        }
        self.data_generation += 1;
        Ok(())
    }

    /// Replaces one slot's series.
    pub fn set_slot_data(&mut self, index: usize, series: StairSeries) -> PlotResult<()> {
        let count = self.slots.len();
        let Some(slot) = self.slots.get_mut(index) else {
            warn!("set_slot_data rejected: index {index} of {count}");
            return Err(PlotError::invalid_data(format!(
                "slot index {index} out of range for {count} slots"
            )));
        };
        if let Err(e) = series.validate() {
            warn!("set_slot_data rejected: {e}");
            return Err(e);
        }
        slot.replace_series(series, self.prefs.line_color_real.hsla());
        self.data_generation += 1;
        Ok(())
    }

    /// Re-derives drawn geometry. With `rescale`, recomputes the autoscale
    /// bounds and resets limits and vertical scales; otherwise limits stay.
    pub fn refresh(&mut self, rescale: bool) {
        if rescale {
            self.autoscale();
        }
        self.data_generation += 1;
        self.view_generation += 1;
    }

    /// Edge extent over every slot; x is always scaled globally.
    pub fn data_x_extent(&self) -> Span {
        let (x_min, x_max) = self.slots.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), s| {
                let e = s.series.x_extent();
                (lo.min(e.min), hi.max(e.max))
            },
        );
        if x_min.is_finite() {
            Span { min: x_min, max: x_max }
        } else {
            Span { min: 0.0, max: 1.0 }
        }
    }

    fn autoscale(&mut self) {
        let x = self.data_x_extent();

        let per_slot: Vec<f64> = self.slots.iter().map(|s| s.series.abs_max()).collect();
        let global = per_slot.iter().copied().fold(0.0_f64, f64::max);
        let position = self.prefs.zero_line_plot_position;
        let (x0, x1) = ViewController::compute_auto_fit(x.min, x.max, self.config.x_scale_bump);

        for (slot, local) in self.slots.iter_mut().zip(per_slot) {
            let bound = match self.config.scaling {
                ScalingMode::Global => global,
                ScalingMode::Local => local,
            };
            slot.data_max = bound;
            slot.vertical_scale = positive_scale(bound);
            slot.x_range.set(x0, x1);
            let (y0, y1) = ViewController::zero_line_limits(bound, self.config.y_scale_bump, position);
            slot.y_range.set(y0, y1);
        }
        debug!(
            "autoscaled x [{}, {}], {:?} y bounds",
            x0, x1, self.config.scaling
        );
    }

    // ---- limits ----

    /// Sets every slot's x limits to the data extent, unpadded.
    pub fn reset_x_limits(&mut self) {
        let Span { min, max } = self.data_x_extent();
        let (min, max) = ViewController::guard_degenerate(min, max);
        for slot in &mut self.slots {
            slot.x_range.set(min, max);
        }
        self.view_generation += 1;
    }

    /// Sets every slot's y limits to its autoscale bound, unpadded.
    pub fn reset_y_limits(&mut self) {
        let position = self.prefs.zero_line_plot_position;
        for slot in &mut self.slots {
            let (min, max) = ViewController::zero_line_limits(slot.data_max, 0.0, position);
            slot.y_range.set(min, max);
        }
        self.view_generation += 1;
    }

    fn reset_zoom(&mut self, targets: &[usize]) {
        let x = self.data_x_extent();
        let (x0, x1) = ViewController::compute_auto_fit(x.min, x.max, self.config.x_scale_bump);
        let position = self.prefs.zero_line_plot_position;
        for &t in targets {
            if let Some(slot) = self.slots.get_mut(t) {
                slot.x_range.set(x0, x1);
                let (y0, y1) =
                    ViewController::zero_line_limits(slot.data_max, self.config.y_scale_bump, position);
                slot.y_range.set(y0, y1);
                slot.vertical_scale = positive_scale(slot.data_max);
            }
        }
        self.view_generation += 1;
    }

    pub fn set_titles(&mut self, titles: Vec<String>) -> PlotResult<()> {
        if titles.len() != self.slots.len() {
            return Err(PlotError::configuration(format!(
                "expected {} titles, got {}",
                self.slots.len(),
                titles.len()
            )));
        }
        for (slot, title) in self.slots.iter_mut().zip(titles) {
            slot.title = (!title.is_empty()).then_some(title);
        }
        self.view_generation += 1;
        Ok(())
    }

    // ---- visibility ----

    /// Shows exactly the slots whose flag is set, in construction order.
    pub fn set_visible_slots(&mut self, flags: &[bool]) -> PlotResult<()> {
        if flags.len() != self.slots.len() {
            return Err(PlotError::configuration(format!(
                "expected {} visibility flags, got {}",
                self.slots.len(),
                flags.len()
            )));
        }
        for (slot, &visible) in self.slots.iter_mut().zip(flags) {
            slot.visible = visible;
        }
        self.active = flags
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| v.then_some(i))
            .collect();

        for bound in &mut self.recognizers {
            let targets = match bound.home {
                None => self.active.clone(),
                Some(home) if self.active.contains(&home) => vec![home],
                Some(_) => Vec::new(),
            };
            bound.recognizer.set_targets(targets);
        }
        self.relayout();
        self.view_generation += 1;
        debug!("active slots {:?}", self.active);
        Ok(())
    }

    /// Shows the first `n` slots and hides the rest.
    pub fn set_active_slot_count(&mut self, n: usize) -> PlotResult<()> {
        if n == 0 || n > self.slots.len() {
            return Err(PlotError::configuration(format!(
                "active slot count {} outside 1..={}",
                n,
                self.slots.len()
            )));
        }
        let flags: Vec<bool> = (0..self.slots.len()).map(|i| i < n).collect();
        self.set_visible_slots(&flags)
    }

    // ---- vertical scale ----

    /// Rescales y by one wheel step. `slot = None` applies to every slot.
    /// With [`ScaleAnchor::Zero`] the half-range around zero changes and all
    /// slots snap to `[-scale, scale]`; with [`ScaleAnchor::Value`] the
    /// current limits are scaled around the anchor.
    pub fn set_vertical_scale(
        &mut self,
        step: f64,
        slot: Option<usize>,
        anchor: ScaleAnchor,
    ) -> PlotResult<()> {
        if let Some(index) = slot {
            if index >= self.slots.len() {
                return Err(PlotError::configuration(format!(
                    "slot index {index} out of range"
                )));
            }
        }
        let factor = ViewController::scroll_scale_factor(step, self.config.scale_multiplier);
        let targets: Vec<usize> = match slot {
            Some(index) => vec![index],
            None => (0..self.slots.len()).collect(),
        };

        match anchor {
            ScaleAnchor::Value(y) => {
                for &t in &targets {
                    ViewController::rescale_anchored(&mut self.slots[t].y_range, y, factor);
                }
            }
            ScaleAnchor::Zero => {
                let position = self.prefs.zero_line_plot_position;
                for (i, s) in self.slots.iter_mut().enumerate() {
                    let f = if targets.contains(&i) { factor } else { 1.0 };
                    let (scale, (min, max)) =
                        ViewController::rescale_about_zero(s.vertical_scale, f, position);
                    s.vertical_scale = scale;
                    s.y_range.set(min, max);
                }
            }
        }
        debug!("vertical scale step {step} factor {factor:.3} on {:?}", slot);
        self.view_generation += 1;
        Ok(())
    }

    /// Sets every slot's half-range directly. With `reset_max` the values
    /// also become the autoscale bounds.
    pub fn set_vertical_scale_absolute(&mut self, values: &[f64], reset_max: bool) -> PlotResult<()> {
        if values.len() != self.slots.len() {
            return Err(PlotError::configuration(format!(
                "expected {} scale values, got {}",
                self.slots.len(),
                values.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PlotError::configuration("scale values must be finite"));
        }
        let position = self.prefs.zero_line_plot_position;
        for (slot, &value) in self.slots.iter_mut().zip(values) {
            let (scale, (min, max)) = ViewController::rescale_about_zero(value, 1.0, position);
            slot.vertical_scale = scale;
            slot.y_range.set(min, max);
            if reset_max {
                slot.data_max = value.abs();
            }
        }
        self.view_generation += 1;
        Ok(())
    }

    // ---- measurement ----

    /// Area and RMS of every active slot over the reference span. Zero when
    /// no reference span was set.
    pub fn compute_area_and_rms(&self) -> Vec<SlotMeasurement> {
        self.measure_span(self.reference)
    }

    fn measure_span(&self, span: Option<Span>) -> Vec<SlotMeasurement> {
        self.active
            .iter()
            .map(|&i| match span {
                Some(span) => measure(i, &self.slots[i].series, span),
                None => SlotMeasurement {
                    slot: i,
                    ..Default::default()
                },
            })
            .collect()
    }

    // ---- layout and geometry ----

    pub fn set_viewport(&mut self, viewport: Bounds<Pixels>) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.relayout();
        }
    }

    pub fn viewport(&self) -> Bounds<Pixels> {
        self.viewport
    }

    fn relayout(&mut self) {
        self.layout = SurfaceLayout::compute(
            self.viewport,
            &self.active,
            self.prefs.xaxis_show,
            self.prefs.title_show,
        );
    }

    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    /// Projection of an active slot onto its frame.
    pub fn transform(&self, index: usize) -> Option<PlotTransform> {
        let frame = self.layout.frame_of(index)?;
        let slot = self.slots.get(index)?;
        Some(PlotTransform::for_ranges(&slot.x_range, &slot.y_range, frame.bounds))
    }

    pub fn data_to_screen(&self, index: usize, data: Point<f64>) -> Option<Point<Pixels>> {
        self.transform(index).map(|t| t.data_to_screen(data))
    }

    /// Slot and data coordinates under a screen position.
    pub fn hit_test(&self, position: Point<Pixels>) -> Option<PointerSample> {
        let frame = self.layout.frame_at(position)?;
        let transform = self.transform(frame.slot)?;
        Some(PointerSample {
            slot: Some(frame.slot),
            data: transform.screen_to_data(position),
            screen: position,
        })
    }

    /// Resolves a position against `index`'s frame, clamping into it.
    fn sample_in(&self, index: usize, position: Point<Pixels>) -> PointerSample {
        let hovered = self.layout.frame_at(position).map(|f| f.slot);
        let data = match (self.layout.frame_of(index), self.transform(index)) {
            (Some(frame), Some(transform)) => {
                let b = frame.bounds;
                let left = b.origin.x.as_f32();
                let top = b.origin.y.as_f32();
                let clamped = point(
                    px(position.x.as_f32().clamp(left, left + b.size.width.as_f32())),
                    px(position.y.as_f32().clamp(top, top + b.size.height.as_f32())),
                );
                transform.screen_to_data(clamped)
            }
            _ => Point::default(),
        };
        PointerSample {
            slot: hovered,
            data,
            screen: position,
        }
    }

    /// Frame boundary: allows the next gesture motion notification.
    pub fn end_frame(&mut self) {
        self.motion_sent = false;
    }

    /// Number of background rebuilds so far.
    pub fn background_builds(&self) -> usize {
        self.cache.builds()
    }

    /// Current scene. The background is reused until data, limits or the
    /// viewport change.
    pub fn scene(&mut self) -> Scene {
        let key = SceneKey {
            data_generation: self.data_generation,
            view_generation: self.view_generation,
            viewport: self.viewport,
        };
        let Self {
            cache,
            slots,
            layout,
            theme,
            config,
            ..
        } = self;
        let background =
            cache.get_or_build(key, || build_background(slots, layout, theme, &config.x_title));
        Scene {
            background,
            overlay: self.build_overlay(),
        }
    }

    fn build_overlay(&self) -> OverlayScene {
        let mut fills = Vec::new();
        for bound in &self.recognizers {
            let r = &bound.recognizer;
            let color = match r.kind() {
                GestureKind::Reference => self.theme.reference_fill,
                _ => self.theme.zoom_fill,
            };
            match (r.kind(), r.selection()) {
                (GestureKind::ZoomSpan | GestureKind::Reference, Some(sel)) => {
                    self.push_bands(&mut fills, r.targets(), sel.x_span(), color);
                }
                (GestureKind::ZoomBox, Some(sel)) => {
                    if let (Some(frame), Some(t)) =
                        (self.layout.frame_of(sel.slot), self.transform(sel.slot))
                    {
                        let a = t.data_to_screen(sel.start.data);
                        let b = t.data_to_screen(sel.current.data);
                        fills.push(FillRect {
                            bounds: corner_rect(frame.bounds, a, b),
                            color,
                        });
                    }
                }
                (_, None) => {
                    if let Some(span) = r.reference().and_then(|rs| rs.shown()) {
                        self.push_bands(&mut fills, r.targets(), span, color);
                    }
                }
                _ => {}
            }
        }
        fills.retain(|f| f.bounds.size.width.as_f32() > 0.0 && f.bounds.size.height.as_f32() > 0.0);
        OverlayScene { fills }
    }

    fn push_bands(&self, fills: &mut Vec<FillRect>, targets: &[usize], span: Span, color: gpui::Hsla) {
        for &t in targets {
            if let (Some(frame), Some(tr)) = (self.layout.frame_of(t), self.transform(t)) {
                fills.push(FillRect {
                    bounds: vertical_band(
                        frame.bounds,
                        tr.x_data_to_screen(span.min),
                        tr.x_data_to_screen(span.max),
                    ),
                    color,
                });
            }
        }
    }

    // ---- input ----

    pub fn gestures_enabled(&self) -> bool {
        self.gestures_enabled
    }

    /// Disabling abandons any drag in progress.
    pub fn set_gestures_enabled(&mut self, enabled: bool) -> Redraw {
        self.gestures_enabled = enabled;
        if enabled {
            Redraw::None
        } else {
            self.cancel_gestures()
        }
    }

    /// Drops every in-progress drag without committing.
    pub fn cancel_gestures(&mut self) -> Redraw {
        let dropped = self
            .recognizers
            .iter_mut()
            .filter_map(|b| b.recognizer.cancel())
            .count();
        if dropped > 0 {
            debug!("cancelled {dropped} gesture(s)");
            Redraw::Overlay
        } else {
            Redraw::None
        }
    }

    /// Whether any recognizer is mid-drag.
    pub fn is_dragging(&self) -> bool {
        self.recognizers.iter().any(|b| b.recognizer.is_active())
    }

    pub fn dispatch(&mut self, event: InputEvent) -> Redraw {
        match event {
            InputEvent::Press {
                button, position, ..
            } => self.route(GesturePhase::Press, Some(button), position),
            InputEvent::Move {
                position, pressed, ..
            } => {
                let redraw = self.route(GesturePhase::Move, pressed, position);
                self.notify_motion(position);
                redraw
            }
            InputEvent::Release {
                button, position, ..
            } => self.route(GesturePhase::Release, Some(button), position),
            InputEvent::Scroll {
                position,
                delta,
                modifiers,
            } => self.scroll(position, delta, modifiers.shift),
            InputEvent::FocusLost => self.cancel_gestures(),
        }
    }

    fn route(
        &mut self,
        phase: GesturePhase,
        button: Option<gpui::MouseButton>,
        position: Point<Pixels>,
    ) -> Redraw {
        if !self.gestures_enabled {
            return Redraw::None;
        }
        let hovered = self.hit_test(position).unwrap_or(PointerSample {
            slot: None,
            data: Point::default(),
            screen: position,
        });

        let mut outcomes = Vec::new();
        for i in 0..self.recognizers.len() {
            let sample = match self.recognizers[i].recognizer.drag_slot() {
                Some(slot) => self.sample_in(slot, position),
                None => hovered,
            };
            let input = GestureInput {
                phase,
                button,
                sample,
            };
            if let Some(outcome) = self.recognizers[i].recognizer.handle(&input) {
                outcomes.push((i, outcome, sample));
            }
        }

        outcomes
            .into_iter()
            .map(|(i, outcome, sample)| self.apply_outcome(i, outcome, sample))
            .max()
            .unwrap_or(Redraw::None)
    }

    fn motion_enabled(&self, kind: GestureKind) -> bool {
        let events = &self.config.events;
        match kind {
            GestureKind::ZoomSpan | GestureKind::ZoomBox => events.zoom_motion,
            GestureKind::Reference => events.reference_motion,
            GestureKind::Middle => events.middle_motion,
        }
    }

    /// Generic motion is held back while a drag reports its own motion.
    fn motion_suppressed(&self) -> bool {
        self.recognizers.iter().any(|b| {
            b.recognizer.is_active() && self.motion_enabled(b.recognizer.kind())
        })
    }

    fn notify_motion(&mut self, position: Point<Pixels>) {
        if !self.config.events.motion || self.motion_suppressed() {
            return;
        }
        let Some(sample) = self.hit_test(position) else {
            return;
        };
        let Some(slot) = sample.slot else {
            return;
        };
        let (Some(value), Some(bounds)) = (
            self.value_at(slot, sample.data.x),
            self.data_domain(slot),
        ) else {
            return;
        };
        self.host.on_motion(&MotionEvent {
            x: sample.data.x,
            y: sample.data.y,
            value,
            bounds,
            slot,
        });
    }

    /// At most one gesture motion notification per frame.
    fn take_motion_token(&mut self) -> bool {
        !std::mem::replace(&mut self.motion_sent, true)
    }

    fn apply_outcome(&mut self, index: usize, outcome: GestureOutcome, sample: PointerSample) -> Redraw {
        let kind = self.recognizers[index].recognizer.kind();
        let targets = self.recognizers[index].recognizer.targets().to_vec();
        let events = self.config.events.clone();
        let value_here = |s: &Self, slot: usize| s.value_at(slot, sample.data.x).unwrap_or(0.0);
        let redraw = if outcome.is_commit() {
            Redraw::Full
        } else if outcome.is_middle() {
            Redraw::None
        } else {
            Redraw::Overlay
        };

        match outcome {
            GestureOutcome::Started { slot } => {
                debug!("{:?} started in slot {}", kind, slot);
            }
            GestureOutcome::SpanPreview { slot, span } => {
                let value = value_here(self, slot);
                match kind {
                    GestureKind::Reference if events.reference_motion => {
                        if self.take_motion_token() {
                            let measurements = self.measure_span(Some(span));
                            self.host.on_reference_motion(&ReferenceSelection {
                                x_min: span.min,
                                x_max: span.max,
                                value,
                                reset: false,
                                slot,
                                measurements,
                            });
                        }
                    }
                    GestureKind::ZoomSpan if events.zoom_motion => {
                        if self.take_motion_token() {
                            self.host.on_zoom_motion(&ZoomSelection {
                                x_min: span.min,
                                x_max: span.max,
                                value,
                                y_min: None,
                                y_max: None,
                                reset: false,
                                slot,
                            });
                        }
                    }
                    _ => {}
                }
            }
            GestureOutcome::BoxPreview { slot, x, y } => {
                if events.zoom_motion && self.take_motion_token() {
                    let value = value_here(self, slot);
                    self.host.on_zoom_motion(&ZoomSelection {
                        x_min: x.min,
                        x_max: x.max,
                        value,
                        y_min: Some(y.min),
                        y_max: Some(y.max),
                        reset: false,
                        slot,
                    });
                }
            }
            GestureOutcome::SpanCommitted { slot, span } => {
                let value = value_here(self, slot);
                if kind == GestureKind::Reference {
                    self.reference = Some(span);
                    debug!("reference span [{}, {}]", span.min, span.max);
                    if events.reference_select {
                        let measurements = self.measure_span(Some(span));
                        self.host.on_reference_select(&ReferenceSelection {
                            x_min: span.min,
                            x_max: span.max,
                            value,
                            reset: false,
                            slot,
                            measurements,
                        });
                    }
                } else {
                    for &t in &targets {
                        self.slots[t].x_range.set_span(span);
                    }
                    self.view_generation += 1;
                    debug!("zoomed x to [{}, {}]", span.min, span.max);
                    if events.zoom_select {
                        self.host.on_zoom_select(&ZoomSelection {
                            x_min: span.min,
                            x_max: span.max,
                            value,
                            y_min: None,
                            y_max: None,
                            reset: false,
                            slot,
                        });
                    }
                }
            }
            GestureOutcome::BoxCommitted { slot, x, y } => {
                for &t in &targets {
                    self.slots[t].x_range.set_span(x);
                    self.slots[t].y_range.set_span(y);
                }
                self.view_generation += 1;
                debug!("box zoom x {:?} y {:?}", x, y);
                if events.zoom_select {
                    let value = value_here(self, slot);
                    self.host.on_zoom_select(&ZoomSelection {
                        x_min: x.min,
                        x_max: x.max,
                        value,
                        y_min: Some(y.min),
                        y_max: Some(y.max),
                        reset: false,
                        slot,
                    });
                }
            }
            GestureOutcome::Reset { slot } => {
                self.reset_zoom(&targets);
                debug!("zoom reset on {:?}", targets);
                if events.zoom_select {
                    let x = self.slots[slot].x_range.bounds();
                    let y = self.slots[slot].y_range.bounds();
                    self.host.on_zoom_select(&ZoomSelection {
                        x_min: x.min,
                        x_max: x.max,
                        value: 0.0,
                        y_min: Some(y.min),
                        y_max: Some(y.max),
                        reset: true,
                        slot,
                    });
                }
            }
            GestureOutcome::Toggled { slot, visible } => {
                debug!("reference overlay visible: {}", visible);
                if events.reference_select {
                    let value = value_here(self, slot);
                    let measurements = self.measure_span(self.reference);
                    self.host.on_reference_select(&ReferenceSelection {
                        x_min: sample.data.x,
                        x_max: sample.data.x,
                        value,
                        reset: true,
                        slot,
                        measurements,
                    });
                }
            }
            GestureOutcome::Discarded { slot } => {
                debug!("{:?} discarded in slot {}", kind, slot);
            }
            GestureOutcome::MiddlePress { slot, screen, data } => {
                if events.middle_press {
                    if let Some(bounds) = self.data_domain(slot) {
                        self.host.on_middle_press(&MiddlePress {
                            screen,
                            slot,
                            bounds,
                            data,
                        });
                    }
                }
            }
            GestureOutcome::MiddleMotion {
                slot,
                current,
                previous,
            } => {
                if events.middle_motion {
                    self.host.on_middle_motion(&MiddleMotion {
                        current,
                        previous,
                        slot,
                    });
                }
            }
            GestureOutcome::MiddleRelease { slot, start, end } => {
                if events.middle_select {
                    self.host.on_middle_select(&MiddleSelect { start, end, slot });
                }
            }
        }
        redraw
    }

    fn scroll(&mut self, position: Point<Pixels>, delta: f64, shift: bool) -> Redraw {
        let hovered = self.hit_test(position);
        let slot = hovered.and_then(|s| s.slot);
        let y = hovered.map(|s| s.data.y);

        if self.config.events.scroll {
            self.host.on_scroll(&ScrollEvent {
                direction: if delta >= 0.0 {
                    ScrollDirection::Up
                } else {
                    ScrollDirection::Down
                },
                step: delta,
                slot,
                y,
                shift,
            });
        }
        if !self.config.scroll.rescale || delta == 0.0 {
            return Redraw::None;
        }

        let target = match self.config.scroll.target {
            ScrollTarget::Hovered => match slot {
                Some(s) => Some(s),
                None => return Redraw::None,
            },
            ScrollTarget::All => None,
        };
        let anchor = match (shift, y) {
            (true, Some(y)) => ScaleAnchor::Value(y),
            _ => ScaleAnchor::Zero,
        };
        match self.set_vertical_scale(delta, target, anchor) {
            Ok(()) => Redraw::Full,
            Err(e) => {
                warn!("scroll rescale failed: {e}");
                Redraw::None
            }
        }
    }
}

fn build_background(
    slots: &mut [Slot],
    layout: &SurfaceLayout,
    theme: &PlotTheme,
    x_title: &str,
) -> BackgroundScene {
    let mut scene = BackgroundScene::default();

    for frame in &layout.frames {
        let Some(slot) = slots.get_mut(frame.slot) else {
            continue;
        };
        let b = frame.bounds;
        let left = b.origin.x.as_f32();
        let right = left + b.size.width.as_f32();
        let top = b.origin.y.as_f32();
        let bottom = top + b.size.height.as_f32();
        let transform = PlotTransform::for_ranges(&slot.x_range, &slot.y_range, b);

        scene.fills.push(FillRect {
            bounds: b,
            color: theme.background,
        });

        if let Some((color, style)) = theme.zero_line {
            let y = transform.y_data_to_screen(0.0).as_f32();
            if (top..=bottom).contains(&y) {
                for [a, c] in dash_segments(left, right, y, style.dash_pattern(), slot.line_width) {
                    scene.strokes.push(StrokePath {
                        points: vec![a, c],
                        color,
                        width: slot.line_width,
                        clip: Some(b),
                    });
                }
            }
        }

        let points = stair_polyline(&slot.series, &transform);
        if points.len() >= 2 {
            scene.strokes.push(StrokePath {
                points,
                color: slot.line_color,
                width: slot.line_width,
                clip: Some(b),
            });
        }

        scene.strokes.push(StrokePath {
            points: vec![
                point(px(left), px(top)),
                point(px(right), px(top)),
                point(px(right), px(bottom)),
                point(px(left), px(bottom)),
                point(px(left), px(top)),
            ],
            color: theme.axis_line,
            width: 1.0,
            clip: None,
        });

        if frame.show_title {
            if let Some(title) = &slot.title {
                scene.labels.push(TextLabel {
                    text: title.clone(),
                    origin: point(px(left + 4.0), px(top + 2.0)),
                    color: theme.axis_label,
                    align: LabelAlign::Left,
                });
            }
        }

        if let (true, Some(band)) = (frame.show_x_axis, layout.x_axis_band) {
            let ticks = slot.x_range.ticks(8).to_vec();
            for tick in ticks {
                let x = transform.x_data_to_screen(tick).as_f32();
                if !(left..=right).contains(&x) {
                    continue;
                }
                scene.strokes.push(StrokePath {
                    points: vec![point(px(x), px(bottom)), point(px(x), px(bottom + 4.0))],
                    color: theme.axis_line,
                    width: 1.0,
                    clip: None,
                });
                scene.labels.push(TextLabel {
                    text: transform.x_scale.format_tick(tick),
                    origin: point(px(x), band.origin.y + px(4.0)),
                    color: theme.axis_label,
                    align: LabelAlign::Center,
                });
            }
            if !x_title.is_empty() {
                scene.labels.push(TextLabel {
                    text: x_title.to_string(),
                    origin: point(
                        px(left + b.size.width.as_f32() / 2.0),
                        band.origin.y + band.size.height * 0.5,
                    ),
                    color: theme.axis_label,
                    align: LabelAlign::Center,
                });
            }
        }
    }
    scene
}
