use crate::gestures::InputEvent;
use crate::surface::{PlotSurface, Redraw};
use crate::geometry::PixelsExt;
use gpui::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Pixels of smooth scrolling that count as one wheel step.
const PIXELS_PER_STEP: f32 = 20.0;

/// Translates GPUI mouse events into surface input events.
#[derive(Clone)]
pub struct PlotInputHandler {
    pub surface: Rc<RefCell<PlotSurface>>,
    pub focus_handle: FocusHandle,
    /// Scroll distance in pixels not yet worth a whole step.
    pending_scroll: Cell<f32>,
}

impl PlotInputHandler {
    pub fn new(surface: Rc<RefCell<PlotSurface>>, focus_handle: FocusHandle) -> Self {
        Self {
            surface,
            focus_handle,
            pending_scroll: Cell::new(0.0),
        }
    }

    fn dispatch(&self, event: InputEvent) -> Redraw {
        self.surface.borrow_mut().dispatch(event)
    }

    pub fn handle_mouse_down(&self, event: &MouseDownEvent, window: &mut Window) -> Redraw {
        window.focus(&self.focus_handle);
        self.dispatch(InputEvent::Press {
            button: event.button,
            position: event.position,
            modifiers: event.modifiers,
        })
    }

    pub fn handle_mouse_move(&self, event: &MouseMoveEvent) -> Redraw {
        self.dispatch(InputEvent::Move {
            position: event.position,
            pressed: event.pressed_button,
            modifiers: event.modifiers,
        })
    }

    pub fn handle_mouse_up(&self, event: &MouseUpEvent) -> Redraw {
        self.dispatch(InputEvent::Release {
            button: event.button,
            position: event.position,
            modifiers: event.modifiers,
        })
    }

    /// Trackpads deliver many small pixel deltas; they are summed and only
    /// whole steps reach the surface. Reversing direction drops the rest.
    pub fn handle_scroll_wheel(&self, event: &ScrollWheelEvent) -> Redraw {
        let pixels = match event.delta {
            ScrollDelta::Lines(p) => p.y * PIXELS_PER_STEP,
            ScrollDelta::Pixels(p) => p.y.as_f32(),
        };
        let mut pending = self.pending_scroll.get();
        if pending * pixels < 0.0 {
            pending = 0.0;
        }
        pending += pixels;
        let steps = (pending / PIXELS_PER_STEP).trunc();
        self.pending_scroll.set(pending - steps * PIXELS_PER_STEP);
        if steps == 0.0 {
            return Redraw::None;
        }
        self.dispatch(InputEvent::Scroll {
            position: event.position,
            delta: steps as f64,
            modifiers: event.modifiers,
        })
    }

    pub fn handle_blur(&self) -> Redraw {
        self.dispatch(InputEvent::FocusLost)
    }
}
