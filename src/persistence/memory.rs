use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::PersistenceGateway;
use crate::error::{PersistenceError, PersistenceResult};
use crate::id::PictureId;
use crate::picture::Picture;

/// Keeps saved pictures in memory
#[derive(Debug, Default)]
pub struct MemoryGateway {
    pictures: Mutex<HashMap<PictureId, Picture>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the gateway with an already persisted picture
    pub fn insert(&self, picture: Picture) -> PictureId {
        let id = picture.id.clone().unwrap_or_else(PictureId::generate);
        let mut stored = picture;
        stored.id = Some(id.clone());
        self.pictures.lock().insert(id.clone(), stored);
        id
    }

    pub fn get(&self, id: &PictureId) -> Option<Picture> {
        self.pictures.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.pictures.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn fetch_picture(&self, id: &PictureId) -> PersistenceResult<Picture> {
        self.get(id).ok_or_else(|| PersistenceError::NotFound(id.clone()))
    }

    async fn save_picture(&self, picture: &Picture) -> PersistenceResult<PictureId> {
        Ok(self.insert(picture.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_save_assigns_id_once() {
        let gateway = MemoryGateway::new();
        let mut picture = Picture::new();
        picture.title = "Plan".to_owned();

        let id = block_on(gateway.save_picture(&picture)).unwrap();
        picture.id = Some(id.clone());
        let again = block_on(gateway.save_picture(&picture)).unwrap();

        assert_eq!(id, again);
        assert_eq!(gateway.len(), 1);
        assert_eq!(block_on(gateway.fetch_picture(&id)).unwrap().title, "Plan");
    }

    #[test]
    fn test_fetch_missing() {
        let gateway = MemoryGateway::new();
        let result = block_on(gateway.fetch_picture(&PictureId::generate()));
        assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    }
}
