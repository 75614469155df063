#![allow(dead_code)]

use gpui::{point, px, size, Bounds, Modifiers, MouseButton, Pixels, Point};
use gpui_stairs::host::{
    MiddleMotion, MiddlePress, MiddleSelect, MotionEvent, PlotHost, ReferenceSelection,
    ScrollEvent, ZoomSelection,
};
use gpui_stairs::{InputEvent, PlotSurface, Preferences, Redraw, StairSeries, SurfaceConfig};
use std::cell::RefCell;
use std::rc::Rc;

pub const EDGES: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];
pub const VALUES: [f64; 4] = [1.0, -2.0, 3.0, -4.0];

#[derive(Clone, Debug, PartialEq)]
pub enum Note {
    Motion(MotionEvent),
    Scroll(ScrollEvent),
    ZoomSelect(ZoomSelection),
    ZoomMotion(ZoomSelection),
    ReferenceSelect(ReferenceSelection),
    ReferenceMotion(ReferenceSelection),
    MiddlePress(MiddlePress),
    MiddleMotion(MiddleMotion),
    MiddleSelect(MiddleSelect),
}

/// Host that keeps every notification for inspection.
#[derive(Clone, Default)]
pub struct Recorder(pub Rc<RefCell<Vec<Note>>>);

impl Recorder {
    pub fn notes(&self) -> Vec<Note> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn zoom_selects(&self) -> Vec<ZoomSelection> {
        self.notes()
            .into_iter()
            .filter_map(|n| match n {
                Note::ZoomSelect(z) => Some(z),
                _ => None,
            })
            .collect()
    }

    pub fn reference_selects(&self) -> Vec<ReferenceSelection> {
        self.notes()
            .into_iter()
            .filter_map(|n| match n {
                Note::ReferenceSelect(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Note) -> bool) -> usize {
        self.0.borrow().iter().filter(|n| pred(n)).count()
    }
}

impl PlotHost for Recorder {
    fn on_motion(&mut self, event: &MotionEvent) {
        self.0.borrow_mut().push(Note::Motion(event.clone()));
    }
    fn on_scroll(&mut self, event: &ScrollEvent) {
        self.0.borrow_mut().push(Note::Scroll(event.clone()));
    }
    fn on_zoom_select(&mut self, selection: &ZoomSelection) {
        self.0.borrow_mut().push(Note::ZoomSelect(selection.clone()));
    }
    fn on_zoom_motion(&mut self, selection: &ZoomSelection) {
        self.0.borrow_mut().push(Note::ZoomMotion(selection.clone()));
    }
    fn on_reference_select(&mut self, selection: &ReferenceSelection) {
        self.0.borrow_mut().push(Note::ReferenceSelect(selection.clone()));
    }
    fn on_reference_motion(&mut self, selection: &ReferenceSelection) {
        self.0.borrow_mut().push(Note::ReferenceMotion(selection.clone()));
    }
    fn on_middle_press(&mut self, event: &MiddlePress) {
        self.0.borrow_mut().push(Note::MiddlePress(event.clone()));
    }
    fn on_middle_motion(&mut self, event: &MiddleMotion) {
        self.0.borrow_mut().push(Note::MiddleMotion(event.clone()));
    }
    fn on_middle_select(&mut self, event: &MiddleSelect) {
        self.0.borrow_mut().push(Note::MiddleSelect(event.clone()));
    }
}

pub fn viewport() -> Bounds<Pixels> {
    Bounds::new(point(px(0.0), px(0.0)), size(px(800.0), px(600.0)))
}

pub fn series() -> StairSeries {
    StairSeries::new(EDGES.to_vec(), VALUES.to_vec())
}

/// Surface over the test series in every slot, laid out in an 800x600
/// viewport, with a recording host attached.
pub fn surface_with(config: SurfaceConfig) -> (PlotSurface, Recorder) {
    surface_with_prefs(config, Preferences::default())
}

pub fn surface_with_prefs(config: SurfaceConfig, prefs: Preferences) -> (PlotSurface, Recorder) {
    let count = config.slot_count;
    let mut surface = PlotSurface::new(
        config,
        prefs,
        Some((0..count).map(|_| series()).collect()),
    )
    .unwrap();
    surface.set_viewport(viewport());
    let recorder = Recorder::default();
    surface.set_host(Box::new(recorder.clone()));
    (surface, recorder)
}

pub fn at(surface: &PlotSurface, slot: usize, x: f64, y: f64) -> Point<Pixels> {
    surface.data_to_screen(slot, Point::new(x, y)).unwrap()
}

pub fn press(surface: &mut PlotSurface, button: MouseButton, position: Point<Pixels>) -> Redraw {
    surface.dispatch(InputEvent::Press {
        button,
        position,
        modifiers: Modifiers::default(),
    })
}

pub fn drag(surface: &mut PlotSurface, button: MouseButton, position: Point<Pixels>) -> Redraw {
    surface.dispatch(InputEvent::Move {
        position,
        pressed: Some(button),
        modifiers: Modifiers::default(),
    })
}

pub fn hover(surface: &mut PlotSurface, position: Point<Pixels>) -> Redraw {
    surface.dispatch(InputEvent::Move {
        position,
        pressed: None,
        modifiers: Modifiers::default(),
    })
}

pub fn release(surface: &mut PlotSurface, button: MouseButton, position: Point<Pixels>) -> Redraw {
    surface.dispatch(InputEvent::Release {
        button,
        position,
        modifiers: Modifiers::default(),
    })
}

pub fn scroll(surface: &mut PlotSurface, position: Point<Pixels>, delta: f64, shift: bool) -> Redraw {
    surface.dispatch(InputEvent::Scroll {
        position,
        delta,
        modifiers: Modifiers {
            shift,
            ..Default::default()
        },
    })
}

/// Press, one move, release.
pub fn drag_gesture(
    surface: &mut PlotSurface,
    button: MouseButton,
    from: Point<Pixels>,
    to: Point<Pixels>,
) -> Redraw {
    press(surface, button, from);
    drag(surface, button, to);
    surface.end_frame();
    release(surface, button, to)
}

pub fn click(surface: &mut PlotSurface, button: MouseButton, position: Point<Pixels>) -> Redraw {
    press(surface, button, position);
    release(surface, button, position)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}
