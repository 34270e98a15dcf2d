use serde::{Deserialize, Serialize};

use crate::id::PictureId;
use crate::path::Path;

/// The drawable document: a title and its paths in z-order (later paths on top)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Picture {
    /// `None` until the picture is saved for the first time
    #[serde(default)]
    pub id: Option<PictureId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub paths: Vec<Path>,
}

impl Picture {
    /// An empty picture that has never been persisted
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: PictureId, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            paths: Vec::new(),
        }
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn add_path(&mut self, path: Path) {
        self.paths.push(path);
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_json_shape() {
        let mut picture = Picture::new();
        picture.title = "Sketch".to_owned();
        picture.add_path(Path::new("#000", 3.0, pos2(1.0, 2.0)));

        let json = serde_json::to_value(&picture).unwrap();
        assert_eq!(json["id"], serde_json::Value::Null);
        assert_eq!(json["title"], "Sketch");
        assert_eq!(json["paths"][0]["points"][0]["x"], 1.0);

        let back: Picture = serde_json::from_value(json).unwrap();
        assert_eq!(back, picture);
    }

    #[test]
    fn test_missing_fields_default() {
        let picture: Picture = serde_json::from_str("{}").unwrap();
        assert_eq!(picture, Picture::new());
    }
}
