use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use egui::pos2;
use futures::FutureExt;
use futures::StreamExt;
use futures::channel::oneshot;
use futures::executor::block_on;
use parking_lot::Mutex;
use whiteboard::error::PersistenceResult;
use whiteboard::{
    MemoryGateway, PersistenceError, PersistenceGateway, Picture, PictureId, PictureStore,
    SaveRedirect, StoreEvent,
};

/// Wraps a MemoryGateway and counts calls
#[derive(Default)]
struct CountingGateway {
    inner: MemoryGateway,
    fetches: AtomicUsize,
    saves: AtomicUsize,
}

#[async_trait]
impl PersistenceGateway for CountingGateway {
    async fn fetch_picture(&self, id: &PictureId) -> PersistenceResult<Picture> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_picture(id).await
    }

    async fn save_picture(&self, picture: &Picture) -> PersistenceResult<PictureId> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_picture(picture).await
    }
}

/// Fetches and saves only complete when the test releases them
#[derive(Default)]
struct GatedGateway {
    fetches: Mutex<HashMap<PictureId, oneshot::Receiver<PersistenceResult<Picture>>>>,
    save_gate: Mutex<Option<oneshot::Receiver<()>>>,
    saved: Mutex<Vec<Picture>>,
}

impl GatedGateway {
    fn expect_fetch(&self, id: &PictureId) -> oneshot::Sender<PersistenceResult<Picture>> {
        let (sender, receiver) = oneshot::channel();
        self.fetches.lock().insert(id.clone(), receiver);
        sender
    }

    fn gate_save(&self) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        *self.save_gate.lock() = Some(receiver);
        sender
    }
}

#[async_trait]
impl PersistenceGateway for GatedGateway {
    async fn fetch_picture(&self, id: &PictureId) -> PersistenceResult<Picture> {
        let receiver = self.fetches.lock().remove(id);
        match receiver {
            Some(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(PersistenceError::Rejected("fetch dropped".to_owned()))),
            None => Err(PersistenceError::NotFound(id.clone())),
        }
    }

    async fn save_picture(&self, picture: &Picture) -> PersistenceResult<PictureId> {
        let gate = self.save_gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.saved.lock().push(picture.clone());
        Ok(picture.id.clone().unwrap_or_else(PictureId::generate))
    }
}

struct RejectingGateway;

#[async_trait]
impl PersistenceGateway for RejectingGateway {
    async fn fetch_picture(&self, id: &PictureId) -> PersistenceResult<Picture> {
        Err(PersistenceError::NotFound(id.clone()))
    }

    async fn save_picture(&self, _picture: &Picture) -> PersistenceResult<PictureId> {
        Err(PersistenceError::Rejected("read-only backend".to_owned()))
    }
}

fn titled(id: &PictureId, title: &str) -> Picture {
    Picture::with_id(id.clone(), title)
}

#[test]
fn test_save_without_picture_is_noop() {
    let gateway = Arc::new(CountingGateway::default());
    let store = PictureStore::new(gateway.clone());
    let (_, mut events) = store.events().channel();

    assert_eq!(block_on(store.save()).unwrap(), None);

    assert_eq!(gateway.saves.load(Ordering::SeqCst), 0);
    store.events().emit(StoreEvent::Reset);
    // the marker is the first thing queued, so nothing was emitted by save
    assert_eq!(block_on(events.next()), Some(StoreEvent::Reset));
}

#[test]
fn test_first_save_assigns_id_and_notifies_once() {
    let gateway = Arc::new(CountingGateway::default());
    let store = PictureStore::new(gateway.clone());
    store.init_new();
    store.begin_path(pos2(1.0, 1.0), "#000", 3.0);
    store.end_path();

    let saved_ids = Arc::new(Mutex::new(Vec::new()));
    {
        let saved_ids = Arc::clone(&saved_ids);
        store.subscribe(move |event: &StoreEvent| {
            if let StoreEvent::SaveCompleted { picture_id } = event {
                saved_ids.lock().push(picture_id.clone());
            }
        });
    }

    let id = block_on(store.save()).unwrap().unwrap();

    assert_eq!(store.picture_id(), Some(id.clone()));
    assert_eq!(*saved_ids.lock(), vec![id.clone()]);
    assert_eq!(gateway.saves.load(Ordering::SeqCst), 1);
    assert_eq!(gateway.inner.get(&id).unwrap().path_count(), 1);

    // saving again keeps the id
    assert_eq!(block_on(store.save()).unwrap(), Some(id.clone()));
    assert_eq!(gateway.inner.len(), 1);
}

#[test]
fn test_load_installs_fetched_picture() {
    let gateway = Arc::new(CountingGateway::default());
    let id = gateway.inner.insert(titled(&PictureId::generate(), "Kitchen"));
    let store = PictureStore::new(gateway.clone());
    let (_, mut events) = store.events().channel();

    assert!(block_on(store.load(id.clone())).unwrap());

    assert_eq!(store.title(), "Kitchen");
    assert_eq!(store.picture_id(), Some(id.clone()));
    assert_eq!(block_on(events.next()), Some(StoreEvent::Loaded { picture_id: id }));
}

#[test]
fn test_failed_load_propagates() {
    let store = PictureStore::new(Arc::new(MemoryGateway::new()));
    let result = block_on(store.load(PictureId::generate()));
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    assert!(!store.is_loaded());
}

#[test]
fn test_stale_load_is_discarded() {
    let gateway = Arc::new(GatedGateway::default());
    let store = PictureStore::new(gateway.clone());
    let first = PictureId::generate();
    let second = PictureId::generate();
    let first_sender = gateway.expect_fetch(&first);
    let second_sender = gateway.expect_fetch(&second);

    let mut first_load = store.load(first.clone());
    assert!((&mut first_load).now_or_never().is_none());
    let second_load = store.load(second.clone());

    second_sender.send(Ok(titled(&second, "second"))).unwrap();
    assert!(block_on(second_load).unwrap());

    // the older request resolves last and must not win
    first_sender.send(Ok(titled(&first, "first"))).unwrap();
    assert!(!block_on(first_load).unwrap());

    assert_eq!(store.picture_id(), Some(second));
    assert_eq!(store.title(), "second");
}

#[test]
fn test_reset_discards_in_flight_load() {
    let gateway = Arc::new(GatedGateway::default());
    let store = PictureStore::new(gateway.clone());
    let id = PictureId::generate();
    let sender = gateway.expect_fetch(&id);

    let load = store.load(id.clone());
    store.reset();
    sender
        .send(Err(PersistenceError::Rejected("gone".to_owned())))
        .unwrap();

    // a stale failure is dropped along with the request
    assert!(!block_on(load).unwrap());
    assert!(!store.is_loaded());
}

#[test]
fn test_drawing_continues_while_save_in_flight() {
    let gateway = Arc::new(GatedGateway::default());
    let store = PictureStore::new(gateway.clone());
    store.init_new();
    store.begin_path(pos2(1.0, 1.0), "#000", 3.0);
    store.end_path();

    let release = gateway.gate_save();
    let mut saving = store.save();
    assert!((&mut saving).now_or_never().is_none());

    store.begin_path(pos2(5.0, 5.0), "#000", 3.0);
    store.append_point(pos2(6.0, 7.0));
    store.end_path();

    release.send(()).unwrap();
    let id = block_on(saving).unwrap().unwrap();

    // the save carried the picture as it was when requested
    assert_eq!(gateway.saved.lock()[0].path_count(), 1);
    assert_eq!(store.path_count(), 2);
    assert_eq!(store.picture_id(), Some(id));
}

#[test]
fn test_save_after_context_change_does_not_tag_new_picture() {
    let gateway = Arc::new(GatedGateway::default());
    let store = PictureStore::new(gateway.clone());
    store.init_new();

    let release = gateway.gate_save();
    let mut saving = store.save();
    assert!((&mut saving).now_or_never().is_none());

    store.init_new();
    release.send(()).unwrap();
    let id = block_on(saving).unwrap();

    assert!(id.is_some());
    assert_eq!(store.picture_id(), None);
}

#[test]
fn test_rejected_save_emits_nothing() {
    let store = PictureStore::new(Arc::new(RejectingGateway));
    store.init_new();
    let (_, mut events) = store.events().channel();

    let result = block_on(store.save());
    assert!(matches!(result, Err(PersistenceError::Rejected(_))));

    store.events().emit(StoreEvent::Reset);
    assert_eq!(block_on(events.next()), Some(StoreEvent::Reset));
    assert_eq!(store.picture_id(), None);
}

#[test]
fn test_redirect_after_first_save_until_unsubscribed() {
    let store = PictureStore::new(Arc::new(MemoryGateway::new()));
    store.init_new();

    let visited = Arc::new(Mutex::new(Vec::new()));
    let subscription = {
        let visited = Arc::clone(&visited);
        store.subscribe(SaveRedirect::new(None, move |url| visited.lock().push(url)))
    };

    let id = block_on(store.save()).unwrap().unwrap();
    assert_eq!(*visited.lock(), vec![format!("/{}", id)]);

    assert!(store.unsubscribe(subscription));
    store.init_new();
    block_on(store.save()).unwrap();
    assert_eq!(visited.lock().len(), 1);
}

#[test]
fn test_save_completed_handler_can_switch_context() {
    let store = PictureStore::new(Arc::new(MemoryGateway::new()));
    store.init_new();
    let (_, mut events) = store.events().channel();

    {
        let inner = store.clone();
        store.subscribe(move |event: &StoreEvent| {
            if let StoreEvent::SaveCompleted { .. } = event {
                inner.reset();
                inner.init_new();
                inner.set_title("next");
            }
        });
    }

    let id = block_on(store.save()).unwrap().unwrap();

    assert_eq!(store.picture_id(), None);
    assert_eq!(store.title(), "next");
    assert_eq!(
        block_on(events.next()),
        Some(StoreEvent::SaveCompleted { picture_id: id })
    );
    assert_eq!(block_on(events.next()), Some(StoreEvent::Reset));
    assert_eq!(block_on(events.next()), Some(StoreEvent::Initialized));
    assert_eq!(
        block_on(events.next()),
        Some(StoreEvent::TitleChanged {
            title: "next".to_owned()
        })
    );
}
