use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::SurfaceConfig;
use crate::path::Point;
use crate::store::PictureStore;

mod eraser;
mod hand;
mod pen;

pub use eraser::{DEFAULT_ERASER_RADIUS, EraserTool};
pub use hand::HandTool;
pub use pen::{DEFAULT_PEN_COLOR, DEFAULT_PEN_WIDTH, PenTool};

/// Tool trait defines how a tool interprets pointer gestures.
///
/// The [`StrokeSession`](crate::state::StrokeSession) owns the Idle/Drawing
/// state and only forwards move and up signals for a gesture that a
/// successful `on_pointer_down` started.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Return the name of the tool
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// If false, pointer events are not routed to this tool at all
    fn handles_pointer(&self) -> bool {
        true
    }

    /// Handle pointer press. Returns whether a gesture started.
    fn on_pointer_down(&mut self, pos: Point, store: &PictureStore) -> bool;

    /// Handle pointer movement during a gesture
    fn on_pointer_move(&mut self, pos: Point, store: &PictureStore);

    /// Handle pointer release, ending the gesture
    fn on_pointer_up(&mut self, store: &PictureStore);
}

/// The closed set of tools, without their settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Hand,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Pen, ToolKind::Hand, ToolKind::Eraser];

    pub fn name(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Eraser => "eraser",
            Self::Hand => "hand",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pen" => Ok(Self::Pen),
            "eraser" => Ok(Self::Eraser),
            "hand" => Ok(Self::Hand),
            other => Err(format!("unknown tool: {}", other)),
        }
    }
}

/// A tool together with its settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolType {
    Pen(PenTool),
    Eraser(EraserTool),
    Hand(HandTool),
}

impl Default for ToolType {
    fn default() -> Self {
        Self::Pen(PenTool::default())
    }
}

impl ToolType {
    /// Build a tool of `kind` with the settings from `config`
    pub fn from_config(kind: ToolKind, config: &SurfaceConfig) -> Self {
        match kind {
            ToolKind::Pen => Self::Pen(PenTool::new(config.pen_color.clone(), config.pen_width)),
            ToolKind::Eraser => Self::Eraser(EraserTool::new(config.eraser_radius)),
            ToolKind::Hand => Self::Hand(HandTool),
        }
    }
}

impl Tool for ToolType {
    fn kind(&self) -> ToolKind {
        match self {
            Self::Pen(tool) => tool.kind(),
            Self::Eraser(tool) => tool.kind(),
            Self::Hand(tool) => tool.kind(),
        }
    }

    fn handles_pointer(&self) -> bool {
        match self {
            Self::Pen(tool) => tool.handles_pointer(),
            Self::Eraser(tool) => tool.handles_pointer(),
            Self::Hand(tool) => tool.handles_pointer(),
        }
    }

    fn on_pointer_down(&mut self, pos: Point, store: &PictureStore) -> bool {
        match self {
            Self::Pen(tool) => tool.on_pointer_down(pos, store),
            Self::Eraser(tool) => tool.on_pointer_down(pos, store),
            Self::Hand(tool) => tool.on_pointer_down(pos, store),
        }
    }

    fn on_pointer_move(&mut self, pos: Point, store: &PictureStore) {
        match self {
            Self::Pen(tool) => tool.on_pointer_move(pos, store),
            Self::Eraser(tool) => tool.on_pointer_move(pos, store),
            Self::Hand(tool) => tool.on_pointer_move(pos, store),
        }
    }

    fn on_pointer_up(&mut self, store: &PictureStore) {
        match self {
            Self::Pen(tool) => tool.on_pointer_up(store),
            Self::Eraser(tool) => tool.on_pointer_up(store),
            Self::Hand(tool) => tool.on_pointer_up(store),
        }
    }
}
