use super::types::{CandidateFile, DragEvent, DragState};

impl DragState {
    pub fn apply(self, event: &DragEvent) -> Self {
        match event {
            DragEvent::Enter => DragState::Over,
            DragEvent::Over => self,
            DragEvent::Leave { on_target: true } => DragState::Idle,
            DragEvent::Leave { on_target: false } => self,
            DragEvent::Drop(_) => DragState::Idle,
        }
    }

    pub fn is_dragging(self) -> bool {
        self == DragState::Over
    }
}

/// Turns per-frame hover/drop snapshots into discrete drag events.
///
/// The windowing layer only tells us, every frame, whether files are hovering
/// and which files were released. Edges of the hover flag become
/// `Enter`/`Leave`, steady hovering becomes `Over`.
#[derive(Debug, Default)]
pub struct HoverTracker {
    hovering: bool,
}

impl HoverTracker {
    pub fn frame(&mut self, hovering: bool, dropped: Vec<CandidateFile>) -> Vec<DragEvent> {
        let mut events = Vec::new();

        if !dropped.is_empty() {
            if !self.hovering {
                events.push(DragEvent::Enter);
            }
            events.push(DragEvent::Drop(dropped));
            self.hovering = false;
            return events;
        }

        match (self.hovering, hovering) {
            (false, true) => events.push(DragEvent::Enter),
            (true, true) => events.push(DragEvent::Over),
            (true, false) => events.push(DragEvent::Leave { on_target: true }),
            (false, false) => {}
        }
        self.hovering = hovering;
        events
    }
}
