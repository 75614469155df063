use super::{DragStep, DragTracker, GestureInput, GestureKind, GestureOutcome, GestureRecognizer};
use crate::data_types::{DragSelection, ReferenceSpan};
use crate::view_controller::ViewController;
use gpui::MouseButton;

/// What a horizontal span drag does once committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanRole {
    /// Primary button. Sets the x limits; a click resets them.
    Zoom,
    /// Secondary button. Stores a reference span; a click toggles it.
    Reference,
}

/// Horizontal extent selector.
pub struct SpanSelector {
    role: SpanRole,
    targets: Vec<usize>,
    tracker: DragTracker,
    min_span: Option<f64>,
    reference: ReferenceSpan,
}

impl SpanSelector {
    pub fn new(role: SpanRole, targets: Vec<usize>, min_span: Option<f64>) -> Self {
        let button = match role {
            SpanRole::Zoom => MouseButton::Left,
            SpanRole::Reference => MouseButton::Right,
        };
        Self {
            role,
            targets,
            tracker: DragTracker::new(button),
            min_span,
            reference: ReferenceSpan::default(),
        }
    }

    pub fn zoom(targets: Vec<usize>, min_span: Option<f64>) -> Self {
        Self::new(SpanRole::Zoom, targets, min_span)
    }

    pub fn reference(targets: Vec<usize>, min_span: Option<f64>) -> Self {
        Self::new(SpanRole::Reference, targets, min_span)
    }

    pub fn role(&self) -> SpanRole {
        self.role
    }

    fn finish(&mut self, sel: DragSelection) -> GestureOutcome {
        let slot = sel.slot;
        if sel.start.screen.x == sel.current.screen.x {
            return match self.role {
                SpanRole::Zoom => GestureOutcome::Reset { slot },
                SpanRole::Reference => {
                    self.reference.toggle();
                    GestureOutcome::Toggled {
                        slot,
                        visible: self.reference.visible,
                    }
                }
            };
        }

        let span = sel.x_span();
        if span.width() <= 0.0 || !ViewController::meets_min_span(span, self.min_span) {
            tracing::debug!("span {:?} below minimum, discarded", span);
            return GestureOutcome::Discarded { slot };
        }
        if self.role == SpanRole::Reference {
            self.reference.set(span);
        }
        GestureOutcome::SpanCommitted { slot, span }
    }
}

impl GestureRecognizer for SpanSelector {
    fn kind(&self) -> GestureKind {
        match self.role {
            SpanRole::Zoom => GestureKind::ZoomSpan,
            SpanRole::Reference => GestureKind::Reference,
        }
    }

    fn targets(&self) -> &[usize] {
        &self.targets
    }

    fn set_targets(&mut self, targets: Vec<usize>) {
        if let Some(slot) = self.tracker.slot() {
            if !targets.contains(&slot) {
                self.tracker.cancel();
            }
        }
        self.targets = targets;
    }

    fn drag_slot(&self) -> Option<usize> {
        self.tracker.slot()
    }

    fn selection(&self) -> Option<&DragSelection> {
        self.tracker.selection()
    }

    fn reference(&self) -> Option<&ReferenceSpan> {
        (self.role == SpanRole::Reference).then_some(&self.reference)
    }

    fn cancel(&mut self) -> Option<GestureOutcome> {
        self.tracker
            .cancel()
            .map(|sel| GestureOutcome::Discarded { slot: sel.slot })
    }

    fn handle(&mut self, input: &GestureInput) -> Option<GestureOutcome> {
        match self.tracker.feed(input, &self.targets)? {
            DragStep::Began(sel) => Some(GestureOutcome::Started { slot: sel.slot }),
            DragStep::Moved { selection, .. } => Some(GestureOutcome::SpanPreview {
                slot: selection.slot,
                span: selection.x_span(),
            }),
            DragStep::Ended(sel) => Some(self.finish(sel)),
            DragStep::Lost(sel) => Some(GestureOutcome::Discarded { slot: sel.slot }),
        }
    }
}
