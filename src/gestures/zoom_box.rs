use super::{DragStep, DragTracker, GestureInput, GestureKind, GestureOutcome, GestureRecognizer};
use crate::data_types::DragSelection;
use crate::view_controller::ViewController;
use gpui::MouseButton;

/// Two-dimensional zoom on the primary button.
pub struct BoxZoom {
    targets: Vec<usize>,
    tracker: DragTracker,
    min_span_x: Option<f64>,
    min_span_y: Option<f64>,
}

impl BoxZoom {
    pub fn new(targets: Vec<usize>, min_span_x: Option<f64>, min_span_y: Option<f64>) -> Self {
        Self {
            targets,
            tracker: DragTracker::new(MouseButton::Left),
            min_span_x,
            min_span_y,
        }
    }

    fn finish(&self, sel: DragSelection) -> GestureOutcome {
        let slot = sel.slot;
        // The release has to land in the slot the box started in.
        if sel.current.slot != Some(slot) {
            return GestureOutcome::Discarded { slot };
        }
        if sel.is_click() {
            return GestureOutcome::Reset { slot };
        }

        let (x, y) = (sel.x_span(), sel.y_span());
        if x.width() <= 0.0 || y.width() <= 0.0 {
            return GestureOutcome::Discarded { slot };
        }
        if !ViewController::meets_min_span(x, self.min_span_x)
            || !ViewController::meets_min_span(y, self.min_span_y)
        {
            tracing::debug!("box {:?} x {:?} below minimum, discarded", x, y);
            return GestureOutcome::Discarded { slot };
        }
        GestureOutcome::BoxCommitted { slot, x, y }
    }
}

impl GestureRecognizer for BoxZoom {
    fn kind(&self) -> GestureKind {
        GestureKind::ZoomBox
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

    fn cancel(&mut self) -> Option<GestureOutcome> {
        self.tracker
            .cancel()
            .map(|sel| GestureOutcome::Discarded { slot: sel.slot })
    }

    fn handle(&mut self, input: &GestureInput) -> Option<GestureOutcome> {
        match self.tracker.feed(input, &self.targets)? {
            DragStep::Began(sel) => Some(GestureOutcome::Started { slot: sel.slot }),
            DragStep::Moved { selection, .. } => Some(GestureOutcome::BoxPreview {
                slot: selection.slot,
                x: selection.x_span(),
                y: selection.y_span(),
            }),
            DragStep::Ended(sel) => Some(self.finish(sel)),
            DragStep::Lost(sel) => Some(GestureOutcome::Discarded { slot: sel.slot }),
        }
    }
}
