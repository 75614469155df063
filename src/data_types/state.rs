use super::axis::Span;
use gpui::{Pixels, Point};
use serde::{Deserialize, Serialize};

/// How y bounds are shared between slots when autoscaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingMode {
    /// One y bound across every slot.
    #[default]
    Global,
    /// Each slot scales to its own data.
    Local,
}

/// A screen position resolved against the slot layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Slot under the pointer, `None` outside every active slot.
    pub slot: Option<usize>,
    /// Data coordinates in the slot's current limits.
    pub data: Point<f64>,
    pub screen: Point<Pixels>,
}

/// Transient state of one press-drag-release cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSelection {
    pub start: PointerSample,
    pub current: PointerSample,
    pub slot: usize,
    pub active: bool,
}

impl DragSelection {
    pub fn new(start: PointerSample, slot: usize) -> Self {
        Self {
            start,
            current: start,
            slot,
            active: true,
        }
    }

    /// Horizontal extent in data units.
    pub fn x_span(&self) -> Span {
        Span::ordered(self.start.data.x, self.current.data.x)
    }

    /// Vertical extent in data units.
    pub fn y_span(&self) -> Span {
        Span::ordered(self.start.data.y, self.current.data.y)
    }

    /// True when the pointer never left its press position.
    pub fn is_click(&self) -> bool {
        self.start.screen == self.current.screen
    }
}

/// Persistent reference cursor span.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceSpan {
    pub span: Option<Span>,
    pub visible: bool,
}

impl ReferenceSpan {
    pub fn set(&mut self, span: Span) {
        self.span = Some(span);
        self.visible = true;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// The span when it is both defined and shown.
    pub fn shown(&self) -> Option<Span> {
        self.span.filter(|_| self.visible)
    }
}
