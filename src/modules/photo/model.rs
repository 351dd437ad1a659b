/// A file received from the upload form, before validation.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Raw `POST /upload` form fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub date: String,
    pub photo: Option<UploadedFile>,
}

/// Store settings handed to the service.
#[derive(Debug, Clone)]
pub struct PhotoConfig {
    pub upload_days: usize,
    pub max_upload_bytes: usize,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            upload_days: 60,
            max_upload_bytes: 16 * 1024 * 1024, // 16MB
        }
    }
}
