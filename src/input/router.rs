use futures::FutureExt;
use futures::future::{self, BoxFuture};

use super::{CoordinateResolver, InputEvent, Phase, SurfaceGeometry};
use crate::config::SurfaceConfig;
use crate::error::PersistenceResult;
use crate::id::PictureId;
use crate::path::Point;
use crate::state::StrokeSession;
use crate::store::PictureStore;
use crate::tools::{ToolKind, ToolType};

/// What the caller should do with the platform event after routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not for this surface; leave the platform's default behaviour alone
    Ignored,
    /// Routed to the stroke session
    Handled,
    /// Routed to the stroke session; suppress the platform's default gesture
    /// (scrolling, zooming) for this event
    Consumed,
}

impl InputOutcome {
    pub fn suppress_default(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// The drawing surface as seen by the presentation layer.
///
/// Binds the surface geometry, resolves raw events, and routes them through
/// the [`StrokeSession`] into the [`PictureStore`].
#[derive(Debug)]
pub struct DrawingSurface {
    store: PictureStore,
    session: StrokeSession,
    resolver: CoordinateResolver,
    geometry: SurfaceGeometry,
    config: SurfaceConfig,
    writable: bool,
}

impl DrawingSurface {
    pub fn new(store: PictureStore, config: SurfaceConfig) -> Self {
        Self {
            session: StrokeSession::new(ToolType::from_config(ToolKind::Pen, &config)),
            resolver: CoordinateResolver::new(config.palm_rejection),
            geometry: SurfaceGeometry::default(),
            store,
            config,
            writable: true,
        }
    }

    pub fn store(&self) -> &PictureStore {
        &self.store
    }

    pub fn session(&self) -> &StrokeSession {
        &self.session
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Update where the surface sits on the page (after layout or scroll)
    pub fn bind(&mut self, geometry: SurfaceGeometry) {
        self.geometry = geometry;
    }

    pub fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }

    /// Enter a drawing context: the picture `id`, or a fresh one when `None`.
    ///
    /// Whatever was shown before is dropped first. Loading an id resolves
    /// once the fetch completes; a fresh picture resolves immediately.
    pub fn open(&mut self, id: Option<PictureId>) -> BoxFuture<'static, PersistenceResult<bool>> {
        self.end_gesture();
        self.store.reset();
        match id {
            Some(id) => self.store.load(id),
            None => {
                self.store.init_new();
                future::ready(Ok(true)).boxed()
            }
        }
    }

    /// Leave the drawing context
    pub fn teardown(&mut self) {
        self.end_gesture();
        self.store.reset();
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> InputOutcome {
        if !self.writable || !self.session.accepts_pointer() {
            return InputOutcome::Ignored;
        }
        let Some(point) = self.resolver.resolve(event, &self.geometry) else {
            log::trace!("No usable touch in {:?}", event);
            return InputOutcome::Ignored;
        };

        self.dispatch(event.phase(), point);
        match event {
            InputEvent::Mouse { .. } => InputOutcome::Handled,
            InputEvent::Touch { .. } => InputOutcome::Consumed,
        }
    }

    fn dispatch(&mut self, phase: Phase, point: Point) {
        match phase {
            Phase::Down => {
                self.session.pointer_down(point, &self.store);
            }
            Phase::Move => self.session.pointer_move(point, &self.store),
            Phase::Up => {
                self.session.pointer_up(&self.store);
            }
        }
    }

    fn end_gesture(&mut self) {
        self.session.pointer_up(&self.store);
    }

    pub fn selected_tool(&self) -> ToolKind {
        self.session.selected_tool()
    }

    /// Select a tool using the configured settings
    pub fn select_tool(&mut self, kind: ToolKind) {
        self.set_tool(ToolType::from_config(kind, &self.config));
    }

    pub fn set_tool(&mut self, tool: ToolType) {
        self.session.set_tool(tool, &self.store);
    }

    pub fn palm_rejection(&self) -> bool {
        self.resolver.palm_rejection
    }

    pub fn set_palm_rejection(&mut self, enabled: bool) {
        log::debug!("Palm rejection {}", if enabled { "enabled" } else { "disabled" });
        self.resolver.palm_rejection = enabled;
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// A read-only surface ignores all pointer input
    pub fn set_writable(&mut self, writable: bool) {
        if !writable {
            self.end_gesture();
        }
        self.writable = writable;
    }

    pub fn title(&self) -> String {
        self.store.display_title(&self.config.default_title)
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.store.set_title(title);
    }

    pub fn save(&self) -> BoxFuture<'static, PersistenceResult<Option<PictureId>>> {
        self.store.save()
    }

    pub fn path_descriptors(&self) -> Vec<String> {
        self.store.path_descriptors()
    }
}
