//! The owned picture and its lifecycle.
//!
//! [`PictureStore`] is a cheap handle around the single picture a drawing
//! surface works on. Input handling mutates it through the path primitives,
//! while `load` and `save` hand back `'static` futures so input keeps flowing
//! while they are in flight. Every change of context (`reset`, `init_new`,
//! `load`) bumps a generation counter; async completions that belong to an
//! older generation are discarded.
//!
//! Mutations against a store that holds no picture are silent no-ops: they
//! happen when input races teardown.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use parking_lot::Mutex;

use crate::error::PersistenceResult;
use crate::event::{EventBus, EventHandler, StoreEvent, SubscriptionId};
use crate::id::PictureId;
use crate::path::{Path, Point};
use crate::persistence::PersistenceGateway;
use crate::picture::Picture;

#[derive(Debug, Default)]
struct StoreState {
    picture: Option<Picture>,
    /// Index into `picture.paths` of the path still being drawn
    active_path: Option<usize>,
    generation: u64,
    /// Bumped only when the owned picture is swapped out
    epoch: u64,
}

impl StoreState {
    fn replace(&mut self, picture: Option<Picture>) {
        self.picture = picture;
        self.active_path = None;
        self.generation += 1;
        self.epoch += 1;
    }
}

#[derive(Clone)]
pub struct PictureStore {
    state: Arc<Mutex<StoreState>>,
    gateway: Arc<dyn PersistenceGateway>,
    events: Arc<EventBus>,
}

impl std::fmt::Debug for PictureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PictureStore")
            .field("state", &*self.state.lock())
            .field("events", &self.events)
            .finish()
    }
}

impl PictureStore {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::default())),
            gateway,
            events: Arc::new(EventBus::new()),
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Shorthand for `events().subscribe(..)`
    pub fn subscribe(&self, handler: impl EventHandler + 'static) -> SubscriptionId {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Drop the owned picture and any in-progress path, and forget in-flight loads
    pub fn reset(&self) {
        self.state.lock().replace(None);
        log::debug!("Picture store reset");
        self.events.emit(StoreEvent::Reset);
    }

    /// Install an empty picture that has no identifier yet
    pub fn init_new(&self) {
        self.state.lock().replace(Some(Picture::new()));
        log::debug!("Initialized new picture");
        self.events.emit(StoreEvent::Initialized);
    }

    /// Fetch `id` through the gateway and install it.
    ///
    /// The request is registered when this is called, not when the future is
    /// first polled. If another `load`, `reset` or `init_new` happens before
    /// the fetch completes, its result (success or failure) is discarded and
    /// the future resolves to `Ok(false)`. A failed fetch of the current
    /// request is returned as is.
    pub fn load(&self, id: PictureId) -> BoxFuture<'static, PersistenceResult<bool>> {
        let ticket = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.generation
        };
        load_task(self.clone(), id, ticket).boxed()
    }

    /// Persist the owned picture.
    ///
    /// Resolves to `Ok(None)` without touching the gateway when nothing is
    /// owned. Otherwise the picture as it is at call time is sent, the
    /// returned id is written back (unless the store has moved on to another
    /// picture meanwhile) and a single [`StoreEvent::SaveCompleted`] is emitted.
    ///
    /// If the gateway fails, the error is returned and no event is emitted:
    /// subscribers waiting for `SaveCompleted` will keep waiting.
    pub fn save(&self) -> BoxFuture<'static, PersistenceResult<Option<PictureId>>> {
        let (snapshot, generation) = {
            let state = self.state.lock();
            match &state.picture {
                Some(picture) => (picture.clone(), state.generation),
                None => {
                    log::trace!("save ignored: no picture loaded");
                    return future::ready(Ok(None)).boxed();
                }
            }
        };
        save_task(self.clone(), snapshot, generation).boxed()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        {
            let mut state = self.state.lock();
            match state.picture.as_mut() {
                Some(picture) => picture.title = title.clone(),
                None => {
                    log::trace!("set_title ignored: no picture loaded");
                    return;
                }
            }
        }
        self.events.emit(StoreEvent::TitleChanged { title });
    }

    /// The picture's title, or an empty string when nothing is loaded
    pub fn title(&self) -> String {
        self.with_picture(|picture| picture.title.clone())
            .unwrap_or_default()
    }

    /// The title to show in chrome: `default` until a picture is loaded
    pub fn display_title(&self, default: &str) -> String {
        self.with_picture(|picture| picture.title.clone())
            .unwrap_or_else(|| default.to_owned())
    }

    /// Start a new path at `point`. Refused when no picture is loaded or a
    /// path is already in progress.
    pub fn begin_path(&self, point: Point, color: &str, width: f32) -> bool {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.active_path.is_some() {
            log::trace!("begin_path ignored: a path is already in progress");
            return false;
        }
        let Some(picture) = state.picture.as_mut() else {
            log::trace!("begin_path ignored: no picture loaded");
            return false;
        };
        picture.add_path(Path::new(color, width, point));
        state.active_path = Some(picture.path_count() - 1);
        true
    }

    /// Append a sample to the in-progress path, see [`Path`] for which samples are kept
    pub fn append_point(&self, point: Point) -> bool {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let Some(index) = state.active_path else {
            return false;
        };
        state
            .picture
            .as_mut()
            .and_then(|picture| picture.paths.get_mut(index))
            .is_some_and(|path| path.append_sample(point))
    }

    /// Seal the in-progress path. Returns false if there was none.
    pub fn end_path(&self) -> bool {
        self.state.lock().active_path.take().is_some()
    }

    pub fn is_drawing(&self) -> bool {
        self.state.lock().active_path.is_some()
    }

    /// Identifies the picture currently owned. Changes on every `reset`,
    /// `init_new` and completed `load`, so a gesture that remembers the
    /// epoch it started in can tell when its picture has gone away.
    pub fn epoch(&self) -> u64 {
        self.state.lock().epoch
    }

    /// Remove every sealed path an eraser of `radius` at `point` touches.
    /// Returns how many paths were removed.
    pub fn erase_at(&self, point: Point, radius: f32) -> usize {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let Some(picture) = state.picture.as_mut() else {
            log::trace!("erase ignored: no picture loaded");
            return 0;
        };

        let active = state.active_path;
        let mut new_active = active;
        let mut index = 0;
        let mut removed = 0;
        picture.paths.retain(|path| {
            let i = index;
            index += 1;
            if Some(i) == active {
                new_active = Some(i - removed);
                return true;
            }
            let hit = path.is_hit_by(point, radius);
            if hit {
                removed += 1;
            }
            !hit
        });
        state.active_path = new_active;

        if removed > 0 {
            log::debug!("Erased {} path(s) at {:?}", removed, point);
        }
        removed
    }

    pub fn is_loaded(&self) -> bool {
        self.state.lock().picture.is_some()
    }

    pub fn with_picture<R>(&self, f: impl FnOnce(&Picture) -> R) -> Option<R> {
        self.state.lock().picture.as_ref().map(f)
    }

    /// A copy of the owned picture
    pub fn snapshot(&self) -> Option<Picture> {
        self.with_picture(Picture::clone)
    }

    pub fn picture_id(&self) -> Option<PictureId> {
        self.with_picture(|picture| picture.id.clone()).flatten()
    }

    pub fn path_count(&self) -> usize {
        self.with_picture(Picture::path_count).unwrap_or(0)
    }

    /// Descriptors for every path in z-order; empty when nothing is loaded
    pub fn path_descriptors(&self) -> Vec<String> {
        self.with_picture(crate::renderer::picture_descriptors)
            .unwrap_or_default()
    }
}

async fn load_task(store: PictureStore, id: PictureId, ticket: u64) -> PersistenceResult<bool> {
    log::debug!("Loading picture {}", id);
    let fetched = store.gateway.fetch_picture(&id).await;

    {
        let mut state = store.state.lock();
        if state.generation != ticket {
            log::debug!("Discarding stale load of {}", id);
            return Ok(false);
        }
        state.replace(Some(fetched?));
    }

    store.events.emit(StoreEvent::Loaded { picture_id: id });
    Ok(true)
}

async fn save_task(
    store: PictureStore,
    snapshot: Picture,
    generation: u64,
) -> PersistenceResult<Option<PictureId>> {
    let picture_id = store.gateway.save_picture(&snapshot).await?;

    {
        let mut state = store.state.lock();
        let current = state.generation == generation;
        match state.picture.as_mut() {
            Some(picture) if current => picture.id = Some(picture_id.clone()),
            _ => log::debug!("Store moved on while saving {}", picture_id),
        }
    }

    log::info!("Saved picture {}", picture_id);
    store.events.emit(StoreEvent::SaveCompleted {
        picture_id: picture_id.clone(),
    });
    Ok(Some(picture_id))
}
