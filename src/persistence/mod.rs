//! Fetching and saving pictures.
//!
//! The store only talks to the [`PersistenceGateway`] trait. Two reference
//! backends ship with the crate: [`MemoryGateway`] for tests and embedding, and
//! [`FileGateway`] which keeps one JSON document per picture in a directory.

use async_trait::async_trait;

use crate::error::PersistenceResult;
use crate::id::PictureId;
use crate::picture::Picture;

mod file;
mod memory;

pub use file::FileGateway;
pub use memory::MemoryGateway;

#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Returns the stored picture, or fails if there is none under `id`
    async fn fetch_picture(&self, id: &PictureId) -> PersistenceResult<Picture>;

    /// Persists `picture` and returns its identifier: the existing one, or a
    /// newly assigned one if the picture has never been saved.
    async fn save_picture(&self, picture: &Picture) -> PersistenceResult<PictureId>;
}
