use serde::{Deserialize, Serialize};

use super::{Tool, ToolKind};
use crate::path::Point;
use crate::store::PictureStore;

/// Reserved for panning the canvas. Pointer input is left to the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandTool;

impl Tool for HandTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Hand
    }

    fn handles_pointer(&self) -> bool {
        false
    }

    fn on_pointer_down(&mut self, _pos: Point, _store: &PictureStore) -> bool {
        false
    }

    fn on_pointer_move(&mut self, _pos: Point, _store: &PictureStore) {}

    fn on_pointer_up(&mut self, _store: &PictureStore) {}
}
