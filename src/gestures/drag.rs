use super::{GestureInput, GesturePhase};
use crate::data_types::{DragSelection, PointerSample};
use gpui::MouseButton;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// Button down, pointer not moved yet.
    Pressed(DragSelection),
    Dragging(DragSelection),
}

/// Press/move/release bookkeeping shared by every recognizer.
#[derive(Clone, Debug)]
pub struct DragTracker {
    button: MouseButton,
    state: DragState,
}

/// Result of feeding one input to a tracker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragStep {
    Began(DragSelection),
    Moved {
        selection: DragSelection,
        previous: PointerSample,
    },
    Ended(DragSelection),
    /// The held button no longer matches; the drag is dropped.
    Lost(DragSelection),
}

impl DragTracker {
    pub fn new(button: MouseButton) -> Self {
        Self {
            button,
            state: DragState::Idle,
        }
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn selection(&self) -> Option<&DragSelection> {
        match &self.state {
            DragState::Idle => None,
            DragState::Pressed(sel) | DragState::Dragging(sel) => Some(sel),
        }
    }

    pub fn slot(&self) -> Option<usize> {
        self.selection().map(|sel| sel.slot)
    }

    /// Drops any drag in progress.
    pub fn cancel(&mut self) -> Option<DragSelection> {
        let dropped = self.selection().copied();
        self.state = DragState::Idle;
        dropped
    }

    /// Advances the state machine. Presses count only with the tracker's
    /// button, from idle, inside one of `targets`.
    pub fn feed(&mut self, input: &GestureInput, targets: &[usize]) -> Option<DragStep> {
        match (input.phase, self.state) {
            (GesturePhase::Press, DragState::Idle) => {
                if input.button != Some(self.button) {
                    return None;
                }
                let slot = input.sample.slot.filter(|s| targets.contains(s))?;
                let selection = DragSelection::new(input.sample, slot);
                self.state = DragState::Pressed(selection);
                tracing::debug!("{:?} drag pressed in slot {}", self.button, slot);
                Some(DragStep::Began(selection))
            }
            (GesturePhase::Move, DragState::Pressed(mut sel) | DragState::Dragging(mut sel)) => {
                if input.button != Some(self.button) {
                    self.state = DragState::Idle;
                    tracing::debug!("{:?} drag lost its button", self.button);
                    return Some(DragStep::Lost(sel));
                }
                let previous = sel.current;
                sel.current = input.sample;
                self.state = if sel.is_click() {
                    DragState::Pressed(sel)
                } else {
                    DragState::Dragging(sel)
                };
                Some(DragStep::Moved {
                    selection: sel,
                    previous,
                })
            }
            (GesturePhase::Release, DragState::Pressed(mut sel) | DragState::Dragging(mut sel)) => {
                if input.button != Some(self.button) {
                    return None;
                }
                sel.current = input.sample;
                sel.active = false;
                self.state = DragState::Idle;
                tracing::debug!("{:?} drag released in slot {}", self.button, sel.slot);
                Some(DragStep::Ended(sel))
            }
            _ => None,
        }
    }
}
