use serde::Serialize;

/// One stored photo as it sits in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPhoto {
    pub date: String,
    pub extension: String,
    pub stored_name: String,
}

/// A day on the upload page and the photo already stored for it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadSlot {
    pub date: String,
    pub existing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryEntry {
    pub name: String,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub upload: String,
    pub gallery: String,
}
