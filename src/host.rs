//! Notifications from the surface to the hosting application.
//!
//! Every callback has a no-op default that only traces the event, so a host
//! implements just the ones it cares about.

use crate::data_types::AxisDomain;
use crate::measure::SlotMeasurement;
use gpui::{Pixels, Point};
use tracing::trace;

/// Pointer motion over a slot outside any drag.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    pub x: f64,
    pub y: f64,
    /// Data value of the bin under `x`.
    pub value: f64,
    /// Autoscale extent of the slot's data.
    pub bounds: AxisDomain,
    pub slot: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollEvent {
    pub direction: ScrollDirection,
    pub step: f64,
    pub slot: Option<usize>,
    /// Data y under the pointer in the hovered slot.
    pub y: Option<f64>,
    pub shift: bool,
}

/// Zoom span or box, provisional or committed.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomSelection {
    pub x_min: f64,
    pub x_max: f64,
    pub value: f64,
    /// Only box zooms and resets carry y bounds.
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub reset: bool,
    pub slot: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceSelection {
    pub x_min: f64,
    pub x_max: f64,
    pub value: f64,
    /// Set when a click toggled the overlay instead of a drag.
    pub reset: bool,
    pub slot: usize,
    pub measurements: Vec<SlotMeasurement>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MiddlePress {
    pub screen: Point<Pixels>,
    pub slot: usize,
    pub bounds: AxisDomain,
    pub data: Point<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MiddleMotion {
    pub current: Point<Pixels>,
    pub previous: Point<Pixels>,
    pub slot: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MiddleSelect {
    pub start: Point<Pixels>,
    pub end: Point<Pixels>,
    pub slot: usize,
}

pub trait PlotHost {
    fn on_motion(&mut self, event: &MotionEvent) {
        trace!("motion {:?}", event);
    }

    fn on_scroll(&mut self, event: &ScrollEvent) {
        trace!("scroll {:?}", event);
    }

    fn on_zoom_select(&mut self, selection: &ZoomSelection) {
        trace!("zoom select {:?}", selection);
    }

    fn on_zoom_motion(&mut self, selection: &ZoomSelection) {
        trace!("zoom motion {:?}", selection);
    }

    fn on_reference_select(&mut self, selection: &ReferenceSelection) {
        trace!("reference select {:?}", selection);
    }

    fn on_reference_motion(&mut self, selection: &ReferenceSelection) {
        trace!("reference motion {:?}", selection);
    }

    fn on_middle_press(&mut self, event: &MiddlePress) {
        trace!("middle press {:?}", event);
    }

    fn on_middle_motion(&mut self, event: &MiddleMotion) {
        trace!("middle motion {:?}", event);
    }

    fn on_middle_select(&mut self, event: &MiddleSelect) {
        trace!("middle select {:?}", event);
    }
}

/// Host that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHost;

impl PlotHost for NoopHost {}
