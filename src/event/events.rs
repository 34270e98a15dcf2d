use crate::id::PictureId;

/// Notifications published by the [`PictureStore`](crate::store::PictureStore)
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A fetched picture was installed
    Loaded { picture_id: PictureId },
    /// A fresh, unsaved picture was installed
    Initialized,
    /// The owned picture was dropped
    Reset,
    TitleChanged { title: String },
    /// The gateway accepted a save and returned this id
    SaveCompleted { picture_id: PictureId },
}
