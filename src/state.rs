use crate::path::Point;
use crate::store::PictureStore;
use crate::tools::{Tool, ToolKind, ToolType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// A gesture started by `tool` is in progress
    Drawing { tool: ToolKind },
}

/// Per-surface stroke state machine.
///
/// Holds the selected tool and whether one of its gestures is in progress.
/// A down signal while a gesture is in progress never starts a second one,
/// which matters when the same contact arrives both as touch and as an
/// emulated mouse event.
///
/// A gesture belongs to the picture it started on. Once the store replaces
/// that picture the gesture is dropped on the next pointer signal, so the
/// next down starts fresh on the new picture.
#[derive(Debug, Clone, Default)]
pub struct StrokeSession {
    tool: ToolType,
    state: SessionState,
    /// Store epoch the current gesture started in
    epoch: u64,
}

impl StrokeSession {
    pub fn new(tool: ToolType) -> Self {
        Self {
            tool,
            state: SessionState::Idle,
            epoch: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, SessionState::Drawing { .. })
    }

    pub fn tool(&self) -> &ToolType {
        &self.tool
    }

    pub fn selected_tool(&self) -> ToolKind {
        self.tool.kind()
    }

    /// Whether pointer events should be routed here for the selected tool
    pub fn accepts_pointer(&self) -> bool {
        self.tool.handles_pointer()
    }

    /// Switch tools, ending the current gesture first
    pub fn set_tool(&mut self, tool: ToolType, store: &PictureStore) {
        self.drop_stale_gesture(store);
        if self.is_drawing() {
            log::debug!("Ending {} gesture on tool change", self.tool.name());
            self.tool.on_pointer_up(store);
            self.state = SessionState::Idle;
        }
        log::info!("Tool changed: {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
    }

    /// Returns whether a gesture started
    pub fn pointer_down(&mut self, pos: Point, store: &PictureStore) -> bool {
        if !self.tool.handles_pointer() {
            return false;
        }
        self.drop_stale_gesture(store);
        if self.is_drawing() {
            log::trace!("Ignoring duplicate down at {:?}", pos);
            return false;
        }
        let epoch = store.epoch();
        let started = self.tool.on_pointer_down(pos, store);
        if started {
            self.state = SessionState::Drawing {
                tool: self.tool.kind(),
            };
            self.epoch = epoch;
        }
        started
    }

    pub fn pointer_move(&mut self, pos: Point, store: &PictureStore) {
        self.drop_stale_gesture(store);
        if self.is_drawing() {
            self.tool.on_pointer_move(pos, store);
        }
    }

    /// Returns whether a gesture ended
    pub fn pointer_up(&mut self, store: &PictureStore) -> bool {
        self.drop_stale_gesture(store);
        if !self.is_drawing() {
            return false;
        }
        self.tool.on_pointer_up(store);
        self.state = SessionState::Idle;
        true
    }

    // The replaced picture took its in-progress path with it, so there is
    // nothing to seal on the store side.
    fn drop_stale_gesture(&mut self, store: &PictureStore) {
        if self.is_drawing() && self.epoch != store.epoch() {
            log::debug!("Dropping {} gesture: picture was replaced", self.tool.name());
            self.state = SessionState::Idle;
        }
    }
}
