//! GPUI view hosting a [`PlotSurface`].

pub mod input;
pub mod renderer;

use crate::surface::{PlotSurface, Redraw};
use gpui::prelude::*;
use gpui::*;
use parking_lot::RwLock;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use self::input::PlotInputHandler;

/// Paint timings, readable from other threads for diagnostics.
#[derive(Clone, Debug, Default)]
pub struct PaintStats {
    pub frames: u64,
    pub last_paint: Duration,
    pub background_builds: usize,
}

pub struct StairPlotView {
    surface: Rc<RefCell<PlotSurface>>,
    // Bounds shared with the canvas
    bounds: Rc<RefCell<Bounds<Pixels>>>,
    input: PlotInputHandler,
    focus_handle: FocusHandle,
    paint_stats: Arc<RwLock<PaintStats>>,
    _subscriptions: Vec<Subscription>,
}

impl Focusable for StairPlotView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl StairPlotView {
    pub fn new(surface: PlotSurface, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let focus_handle = cx.focus_handle();
        let surface = Rc::new(RefCell::new(surface));
        let input = PlotInputHandler::new(surface.clone(), focus_handle.clone());

        let blur = cx.on_blur(&focus_handle, window, |this, _window, cx| {
            if this.input.handle_blur() != Redraw::None {
                cx.notify();
            }
        });

        Self {
            surface,
            bounds: Rc::new(RefCell::new(Bounds::default())),
            input,
            focus_handle,
            paint_stats: Arc::new(RwLock::new(PaintStats::default())),
            _subscriptions: vec![blur],
        }
    }

    pub fn surface(&self) -> Rc<RefCell<PlotSurface>> {
        self.surface.clone()
    }

    /// Mutates the surface and schedules a redraw.
    pub fn update_surface<R>(
        &mut self,
        cx: &mut Context<Self>,
        f: impl FnOnce(&mut PlotSurface) -> R,
    ) -> R {
        let result = f(&mut self.surface.borrow_mut());
        cx.notify();
        result
    }

    pub fn paint_stats(&self) -> Arc<RwLock<PaintStats>> {
        self.paint_stats.clone()
    }

    fn after_input(redraw: Redraw, cx: &mut Context<Self>) {
        if redraw != Redraw::None {
            cx.notify();
        }
    }
}

impl Render for StairPlotView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let (labels, background, label_size) = {
            let mut surface = self.surface.borrow_mut();
            let scene = surface.scene();
            let theme = surface.theme();
            (
                scene.background.labels.clone(),
                theme.background,
                theme.axis_label_size,
            )
        };
        let origin = self.bounds.borrow().origin;
        let label_elements = renderer::label_elements(&labels, origin, label_size);

        let surface = self.surface.clone();
        let paint_surface = self.surface.clone();
        let bounds = self.bounds.clone();
        let stats = self.paint_stats.clone();

        div()
            .id("stair-plot")
            .track_focus(&self.focus_handle)
            .size_full()
            .relative()
            .bg(background)
            .child(
                canvas(
                    move |b, window, _| {
                        *bounds.borrow_mut() = b;
                        let mut surface = surface.borrow_mut();
                        if surface.viewport() != b {
                            surface.set_viewport(b);
                            // labels were laid out for the old viewport
                            window.refresh();
                        }
                        surface.scene()
                    },
                    move |_, scene, window, _| {
                        let start = Instant::now();
                        renderer::paint_scene(&scene, window);
                        let mut surface = paint_surface.borrow_mut();
                        surface.end_frame();
                        let mut s = stats.write();
                        s.frames += 1;
                        s.last_paint = start.elapsed();
                        s.background_builds = surface.background_builds();
                    },
                )
                .size_full(),
            )
            .children(label_elements)
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, window, cx| {
                    Self::after_input(this.input.handle_mouse_down(ev, window), cx)
                }),
            )
            .on_mouse_down(
                MouseButton::Right,
                cx.listener(|this, ev, window, cx| {
                    Self::after_input(this.input.handle_mouse_down(ev, window), cx)
                }),
            )
            .on_mouse_down(
                MouseButton::Middle,
                cx.listener(|this, ev, window, cx| {
                    Self::after_input(this.input.handle_mouse_down(ev, window), cx)
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                Self::after_input(this.input.handle_mouse_move(ev), cx)
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| Self::after_input(this.input.handle_mouse_up(ev), cx)),
            )
            .on_mouse_up(
                MouseButton::Right,
                cx.listener(|this, ev, _, cx| Self::after_input(this.input.handle_mouse_up(ev), cx)),
            )
            .on_mouse_up(
                MouseButton::Middle,
                cx.listener(|this, ev, _, cx| Self::after_input(this.input.handle_mouse_up(ev), cx)),
            )
            .on_scroll_wheel(cx.listener(|this, ev, _, cx| {
                Self::after_input(this.input.handle_scroll_wheel(ev), cx)
            }))
    }
}
