use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::PersistenceGateway;
use crate::error::{PersistenceError, PersistenceResult};
use crate::id::PictureId;
use crate::picture::Picture;

/// Stores each picture as `<id>.json` inside a directory.
///
/// File access is synchronous; pictures are small and this backend is meant
/// for local tooling rather than a server.
#[derive(Debug, Clone)]
pub struct FileGateway {
    dir: PathBuf,
}

impl FileGateway {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn picture_path(&self, id: &PictureId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl PersistenceGateway for FileGateway {
    async fn fetch_picture(&self, id: &PictureId) -> PersistenceResult<Picture> {
        let path = self.picture_path(id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(id.clone()));
            }
            Err(err) => return Err(err.into()),
        };

        let mut picture: Picture = serde_json::from_str(&json)?;
        if picture.id.as_ref() != Some(id) {
            log::warn!("{} carries a different id, using the file name", path.display());
            picture.id = Some(id.clone());
        }
        log::debug!("Loaded picture {} with {} paths", id, picture.path_count());
        Ok(picture)
    }

    async fn save_picture(&self, picture: &Picture) -> PersistenceResult<PictureId> {
        let id = picture.id.clone().unwrap_or_else(PictureId::generate);

        let mut stored = picture.clone();
        stored.id = Some(id.clone());

        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(self.picture_path(&id), json)?;

        log::debug!("Saved picture {} to {}", id, self.dir.display());
        Ok(id)
    }
}
