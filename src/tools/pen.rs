use serde::{Deserialize, Serialize};

use super::{Tool, ToolKind};
use crate::path::Point;
use crate::store::PictureStore;

pub const DEFAULT_PEN_COLOR: &str = "#000";
pub const DEFAULT_PEN_WIDTH: f32 = 3.0;

/// Freehand drawing: every gesture becomes one path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenTool {
    /// Stroke color, any CSS color string
    pub color: String,
    pub width: f32,
}

impl Default for PenTool {
    fn default() -> Self {
        Self {
            color: DEFAULT_PEN_COLOR.to_owned(),
            width: DEFAULT_PEN_WIDTH,
        }
    }
}

impl PenTool {
    pub fn new(color: impl Into<String>, width: f32) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

impl Tool for PenTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pen
    }

    fn on_pointer_down(&mut self, pos: Point, store: &PictureStore) -> bool {
        store.begin_path(pos, &self.color, self.width)
    }

    fn on_pointer_move(&mut self, pos: Point, store: &PictureStore) {
        store.append_point(pos);
    }

    fn on_pointer_up(&mut self, store: &PictureStore) {
        store.end_path();
    }
}
