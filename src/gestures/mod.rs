//! Drag gesture recognizers.
//!
//! Each recognizer is a small state machine fed with [`GestureInput`]s by the
//! surface. It is bound to a set of target slots: a linked recognizer targets
//! every active slot, an unlinked one targets a single slot. Mouse buttons
//! keep them apart: zoom listens to the primary button, the reference span to
//! the secondary one and the middle reporter to the middle one.

pub mod drag;
pub mod middle;
pub mod span;
pub mod zoom_box;

pub use drag::*;
pub use middle::*;
pub use span::*;
pub use zoom_box::*;

use crate::data_types::{DragSelection, PointerSample, ReferenceSpan, Span};
use gpui::{Modifiers, MouseButton, Pixels, Point};

/// Raw input as delivered by the host windowing system.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Press {
        button: MouseButton,
        position: Point<Pixels>,
        modifiers: Modifiers,
    },
    Move {
        position: Point<Pixels>,
        /// Button still held during the move, if any.
        pressed: Option<MouseButton>,
        modifiers: Modifiers,
    },
    Release {
        button: MouseButton,
        position: Point<Pixels>,
        modifiers: Modifiers,
    },
    Scroll {
        position: Point<Pixels>,
        /// Signed wheel steps, positive away from the user.
        delta: f64,
        modifiers: Modifiers,
    },
    /// The surface lost keyboard focus; in-progress drags are abandoned.
    FocusLost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Press,
    Move,
    Release,
}

/// One pointer event resolved against the slot layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureInput {
    pub phase: GesturePhase,
    /// Pressed/released button; for moves, the button still held.
    pub button: Option<MouseButton>,
    pub sample: PointerSample,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    ZoomSpan,
    ZoomBox,
    Reference,
    Middle,
}

/// What a recognizer made of an input.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureOutcome {
    Started {
        slot: usize,
    },
    SpanPreview {
        slot: usize,
        span: Span,
    },
    BoxPreview {
        slot: usize,
        x: Span,
        y: Span,
    },
    SpanCommitted {
        slot: usize,
        span: Span,
    },
    BoxCommitted {
        slot: usize,
        x: Span,
        y: Span,
    },
    /// Zero-drag click on a zoom recognizer.
    Reset {
        slot: usize,
    },
    /// Zero-drag click on the reference recognizer.
    Toggled {
        slot: usize,
        visible: bool,
    },
    /// Released below the minimum extent, or cancelled.
    Discarded {
        slot: usize,
    },
    MiddlePress {
        slot: usize,
        screen: Point<Pixels>,
        data: Point<f64>,
    },
    MiddleMotion {
        slot: usize,
        current: Point<Pixels>,
        previous: Point<Pixels>,
    },
    MiddleRelease {
        slot: usize,
        start: Point<Pixels>,
        end: Point<Pixels>,
    },
}

impl GestureOutcome {
    /// Outcomes that change limits or persisted state need a full redraw.
    pub fn is_commit(&self) -> bool {
        matches!(
            self,
            Self::SpanCommitted { .. }
                | Self::BoxCommitted { .. }
                | Self::Reset { .. }
                | Self::Toggled { .. }
        )
    }

    /// Middle-button reports, which never touch the drawing.
    pub fn is_middle(&self) -> bool {
        matches!(
            self,
            Self::MiddlePress { .. } | Self::MiddleMotion { .. } | Self::MiddleRelease { .. }
        )
    }
}

pub trait GestureRecognizer {
    fn kind(&self) -> GestureKind;

    /// Slots this recognizer accepts presses in.
    fn targets(&self) -> &[usize];

    /// Rebinds to a new slot set. A drag whose slot left the set is dropped.
    fn set_targets(&mut self, targets: Vec<usize>);

    /// Slot of the in-progress drag.
    fn drag_slot(&self) -> Option<usize>;

    fn is_active(&self) -> bool {
        self.drag_slot().is_some()
    }

    /// Current drag extent, for rubber band rendering.
    fn selection(&self) -> Option<&DragSelection>;

    /// Persisted reference span, for recognizers that keep one.
    fn reference(&self) -> Option<&ReferenceSpan> {
        None
    }

    /// Abandons an in-progress drag without committing.
    fn cancel(&mut self) -> Option<GestureOutcome>;

    /// Never fails: inputs that do not apply are ignored.
    fn handle(&mut self, input: &GestureInput) -> Option<GestureOutcome>;
}
