use super::{DragStep, DragTracker, GestureInput, GestureKind, GestureOutcome, GestureRecognizer};
use crate::data_types::DragSelection;
use gpui::MouseButton;

/// Reports middle-button press, motion and release in screen coordinates.
/// Keeps no visual state.
pub struct MiddleEvents {
    targets: Vec<usize>,
    tracker: DragTracker,
}

impl MiddleEvents {
    pub fn new(targets: Vec<usize>) -> Self {
        Self {
            targets,
            tracker: DragTracker::new(MouseButton::Middle),
        }
    }
}

impl GestureRecognizer for MiddleEvents {
    fn kind(&self) -> GestureKind {
        GestureKind::Middle
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
            DragStep::Began(sel) => Some(GestureOutcome::MiddlePress {
                slot: sel.slot,
                screen: sel.start.screen,
                data: sel.start.data,
            }),
            DragStep::Moved {
                selection,
                previous,
            } => Some(GestureOutcome::MiddleMotion {
                slot: selection.slot,
                current: selection.current.screen,
                previous: previous.screen,
            }),
            DragStep::Ended(sel) => Some(GestureOutcome::MiddleRelease {
                slot: sel.slot,
                start: sel.start.screen,
                end: sel.current.screen,
            }),
            DragStep::Lost(sel) => Some(GestureOutcome::Discarded { slot: sel.slot }),
        }
    }
}
