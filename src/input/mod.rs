use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

mod resolver;
mod router;

pub use resolver::CoordinateResolver;
pub use router::{DrawingSurface, InputOutcome};

/// Which part of a gesture an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// mousedown / touchstart
    Down,
    /// mousemove / touchmove
    Move,
    /// mouseup / touchend
    Up,
}

/// What produced a touch point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchKind {
    /// A finger, or a palm resting on the screen
    #[default]
    Direct,
    Stylus,
}

/// One entry of a touch event's changed-touch list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    /// Position in viewport (client) coordinates
    pub client: Pos2,
    #[serde(default)]
    pub kind: TouchKind,
}

impl Touch {
    pub fn finger(client: Pos2) -> Self {
        Self {
            client,
            kind: TouchKind::Direct,
        }
    }

    pub fn stylus(client: Pos2) -> Self {
        Self {
            client,
            kind: TouchKind::Stylus,
        }
    }
}

/// A raw event as delivered by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputEvent {
    Mouse {
        phase: Phase,
        /// Position relative to the target's content box
        offset: Pos2,
    },
    Touch {
        phase: Phase,
        changed_touches: Vec<Touch>,
    },
}

impl InputEvent {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Mouse { phase, .. } | Self::Touch { phase, .. } => *phase,
        }
    }
}

/// Where the drawing surface currently sits on the page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGeometry {
    /// The surface element's bounding rect, in client coordinates
    pub bounds: Rect,
    /// Page scroll offset
    pub scroll: Vec2,
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            scroll: Vec2::ZERO,
        }
    }
}

impl SurfaceGeometry {
    pub fn new(bounds: Rect, scroll: Vec2) -> Self {
        Self { bounds, scroll }
    }
}
