use crate::event::{EventHandler, StoreEvent};
use crate::id::PictureId;

/// Canonical address of a saved picture
pub fn picture_url(id: &PictureId) -> String {
    format!("/{}", id)
}

/// Navigates to a picture's canonical URL when a save hands back an id
/// other than the one currently displayed, e.g. the first save of a new picture.
pub struct SaveRedirect {
    displayed: Option<PictureId>,
    navigate: Box<dyn FnMut(String) + Send>,
}

impl SaveRedirect {
    pub fn new(displayed: Option<PictureId>, navigate: impl FnMut(String) + Send + 'static) -> Self {
        Self {
            displayed,
            navigate: Box::new(navigate),
        }
    }

    pub fn displayed(&self) -> Option<&PictureId> {
        self.displayed.as_ref()
    }
}

impl EventHandler for SaveRedirect {
    fn handle_event(&mut self, event: &StoreEvent) {
        if let StoreEvent::SaveCompleted { picture_id } = event {
            if self.displayed.as_ref() != Some(picture_id) {
                let url = picture_url(picture_id);
                log::info!("Picture saved under new id, navigating to {}", url);
                (self.navigate)(url);
                self.displayed = Some(picture_id.clone());
            }
        }
    }
}
