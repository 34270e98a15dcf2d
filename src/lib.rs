#![warn(clippy::all, rust_2018_idioms)]

//! Stroke capture for a vector whiteboard.
//!
//! Raw pointer and touch events are resolved to surface points
//! ([`CoordinateResolver`]), interpreted by the selected tool
//! ([`StrokeSession`]) and applied to the owned picture ([`PictureStore`]),
//! which loads and saves through a [`PersistenceGateway`].

pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod id;
pub mod input;
pub mod path;
pub mod persistence;
pub mod picture;
pub mod renderer;
pub mod state;
pub mod store;
pub mod tools;

pub use config::SurfaceConfig;
pub use error::{ConfigError, ParseIdError, PersistenceError};
pub use event::{EventBus, EventHandler, SaveRedirect, StoreEvent, SubscriptionId};
pub use id::PictureId;
pub use input::{CoordinateResolver, DrawingSurface, InputEvent, InputOutcome, SurfaceGeometry};
pub use path::{Path, Point};
pub use persistence::{FileGateway, MemoryGateway, PersistenceGateway};
pub use picture::Picture;
pub use renderer::path_descriptor;
pub use state::{SessionState, StrokeSession};
pub use store::PictureStore;
pub use tools::{Tool, ToolKind, ToolType};
