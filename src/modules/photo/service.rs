use chrono::NaiveDate;
use std::sync::Arc;

use crate::api::error::{self, UploadError};
use crate::constants::{ALLOWED_EXTENSIONS, DATE_FORMAT};
use crate::modules::photo::{
    model::{PhotoConfig, UploadForm},
    repository::PhotoRepository,
    schema::{DailyPhoto, GalleryEntry, UploadSlot},
};
use crate::utils::{
    allowed_extension, date_key, generate_dates, has_allowed_suffix, is_date_key,
    is_plain_filename, stored_name,
};

#[derive(Clone)]
pub struct PhotoService<R>
where
    R: PhotoRepository + Send + Sync,
{
    photo_repo: Arc<R>,
    config: PhotoConfig,
}

impl<R> PhotoService<R>
where
    R: PhotoRepository + Send + Sync,
{
    pub fn new(photo_repo: Arc<R>, config: PhotoConfig) -> Self {
        log::info!(
            "PhotoService initialized ({} upload days, {} byte limit)",
            config.upload_days,
            config.max_upload_bytes
        );
        Self { photo_repo, config }
    }

    #[cfg(test)]
    pub fn with_defaults(photo_repo: Arc<R>) -> Self {
        Self::new(photo_repo, PhotoConfig::default())
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.config.max_upload_bytes
    }

    /// Checks the form in order: date, file presence, file type, size.
    fn validate(&self, form: UploadForm) -> Result<(DailyPhoto, Vec<u8>), UploadError> {
        let date = form.date.trim();
        if !is_date_key(date) {
            return Err(UploadError::InvalidDate);
        }

        let file = match form.photo {
            Some(file) if !file.filename.is_empty() => file,
            _ => return Err(UploadError::MissingFile),
        };

        let extension = allowed_extension(&file.filename).ok_or(UploadError::UnsupportedType)?;

        if file.bytes.len() > self.config.max_upload_bytes {
            return Err(UploadError::FileTooLarge);
        }

        let photo = DailyPhoto {
            date: date.to_string(),
            stored_name: stored_name(date, &extension),
            extension,
        };
        Ok((photo, file.bytes))
    }

    /// Stores the day's photo, replacing whatever was there under any extension.
    pub async fn upload(&self, form: UploadForm) -> Result<DailyPhoto, UploadError> {
        let (photo, bytes) = self.validate(form)?;

        self.photo_repo.save(&photo.stored_name, &bytes).await?;
        log::info!("Stored {} ({} bytes)", photo.stored_name, bytes.len());

        for ext in ALLOWED_EXTENSIONS.iter().filter(|ext| **ext != photo.extension) {
            let stale = stored_name(&photo.date, ext);
            match self.photo_repo.remove(&stale).await {
                Ok(true) => log::info!("Removed superseded {}", stale),
                Ok(false) => {}
                Err(e) => log::warn!("Could not remove superseded {}: {}", stale, e),
            }
        }

        Ok(photo)
    }

    /// Stored name for `date`, checking extensions in allow-list order.
    pub async fn find_existing(&self, date: &str) -> Result<Option<String>, error::SystemError> {
        for ext in ALLOWED_EXTENSIONS {
            let candidate = stored_name(date, ext);
            if self.photo_repo.exists(&candidate).await? {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    /// Days from `today` onwards, each with the photo already stored for it.
    pub async fn upload_slots(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<UploadSlot>, error::SystemError> {
        let mut slots = Vec::new();
        for day in generate_dates(today, self.config.upload_days) {
            let date = day.format(DATE_FORMAT).to_string();
            let existing = self.find_existing(&date).await?;
            slots.push(UploadSlot { date, existing });
        }
        Ok(slots)
    }

    /// Every stored photo, newest date first.
    pub async fn gallery(&self) -> Result<Vec<GalleryEntry>, error::SystemError> {
        let mut entries: Vec<GalleryEntry> = self
            .photo_repo
            .list()
            .await?
            .into_iter()
            .filter(|name| has_allowed_suffix(name))
            .map(|name| GalleryEntry { date: date_key(&name).to_string(), name })
            .collect();

        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    /// Raw bytes of a stored file, by exact name.
    pub async fn open(&self, filename: &str) -> Result<Vec<u8>, error::SystemError> {
        if !is_plain_filename(filename) {
            return Err(error::SystemError::not_found("File not found"));
        }

        self.photo_repo
            .read(filename)
            .await?
            .ok_or_else(|| error::SystemError::not_found("File not found"))
    }
}
