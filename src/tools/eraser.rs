use serde::{Deserialize, Serialize};

use super::{Tool, ToolKind};
use crate::path::Point;
use crate::store::PictureStore;

pub const DEFAULT_ERASER_RADIUS: f32 = 10.0;

/// Removes whole paths that the eraser's trail passes over.
///
/// The trail is sampled at each down and move; a path is removed as soon as
/// one sample lands within `radius` of its stroke. The trail itself is not kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraserTool {
    pub radius: f32,
}

impl Default for EraserTool {
    fn default() -> Self {
        Self {
            radius: DEFAULT_ERASER_RADIUS,
        }
    }
}

impl EraserTool {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Tool for EraserTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Eraser
    }

    fn on_pointer_down(&mut self, pos: Point, store: &PictureStore) -> bool {
        if !store.is_loaded() {
            return false;
        }
        store.erase_at(pos, self.radius);
        true
    }

    fn on_pointer_move(&mut self, pos: Point, store: &PictureStore) {
        store.erase_at(pos, self.radius);
    }

    fn on_pointer_up(&mut self, _store: &PictureStore) {}
}
