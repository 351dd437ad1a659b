use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;

use crate::api::flash::{Flash, FlashSigner};
use crate::api::success::{self, Success};
use crate::api::error::{self, UploadError};
use crate::constants::FLASH_COOKIE;
use crate::modules::photo::{
    model::{UploadForm, UploadedFile},
    repository::PhotoRepository,
    schema::{GalleryEntry, IndexResponse, UploadSlot},
    service::PhotoService,
};

/// Collects the `date` and `photo` fields. Once a field has grown past `limit` the rest of
/// it is drained and dropped; what is kept is still over the limit for the service to reject.
///
/// Only the first `photo` part that names a file counts. A body that is not a well formed
/// multipart form stops the read; fields completed before that point are kept.
async fn read_form(mut payload: Multipart, limit: usize) -> UploadForm {
    let mut form = UploadForm::default();

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                log::warn!("Malformed upload form: {}", e);
                break;
            }
        };

        let (name, filename) = match field.content_disposition() {
            Some(cd) => (cd.get_name().map(str::to_string), cd.get_filename().map(str::to_string)),
            None => (None, None),
        };

        let mut bytes = Vec::new();
        loop {
            match field.try_next().await {
                Ok(Some(chunk)) => {
                    if bytes.len() <= limit {
                        bytes.extend_from_slice(&chunk);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    log::warn!("Malformed upload form: {}", e);
                    return form;
                }
            }
        }

        match (name.as_deref(), filename) {
            (Some("date"), _) => form.date = String::from_utf8_lossy(&bytes).into_owned(),
            (Some("photo"), Some(filename)) if form.photo.is_none() => {
                form.photo = Some(UploadedFile { filename, bytes });
            }
            _ => {}
        }
    }

    form
}

fn upload_anchor(date: &str) -> String {
    format!("/upload#d-{}", date)
}

pub async fn index() -> Success<IndexResponse> {
    Success::ok(Some(IndexResponse { upload: "/upload".to_string(), gallery: "/views".to_string() }))
        .message("One photo a day")
}

/// Upload page handler
pub async fn upload_page<R>(
    req: HttpRequest,
    service: web::Data<PhotoService<R>>,
    signer: web::Data<FlashSigner>,
) -> Result<Success<Vec<UploadSlot>>, error::Error>
where
    R: PhotoRepository + Send + Sync + 'static,
{
    let today = chrono::Local::now().date_naive();
    let slots = service.upload_slots(today).await?;

    let cookies =
        if req.cookie(FLASH_COOKIE).is_some() { vec![FlashSigner::clear()] } else { Vec::new() };

    Ok(Success::ok(Some(slots)).flash(signer.read(&req)).cookies(cookies))
}

/// Upload handler. Every outcome the user can act on becomes a flash and a redirect.
pub async fn upload_photo<R>(
    payload: Multipart,
    service: web::Data<PhotoService<R>>,
    signer: web::Data<FlashSigner>,
) -> Result<HttpResponse, error::Error>
where
    R: PhotoRepository + Send + Sync + 'static,
{
    let form = read_form(payload, service.max_upload_bytes()).await;
    let date = form.date.trim().to_string();

    let (flash, location) = match service.upload(form).await {
        Ok(photo) => {
            (Flash::success("Photo uploaded successfully!"), upload_anchor(&photo.date))
        }
        Err(UploadError::InvalidDate) => {
            (Flash::error(UploadError::InvalidDate.to_string()), "/upload".to_string())
        }
        Err(UploadError::Storage(e)) => return Err(e.into()),
        Err(e) => (Flash::error(e.to_string()), upload_anchor(&date)),
    };

    Ok(success::redirect(&location, Some(signer.cookie(flash)?)))
}

/// Raw file handler
pub async fn serve_upload<R>(
    filename: web::Path<String>,
    service: web::Data<PhotoService<R>>,
) -> Result<HttpResponse, error::Error>
where
    R: PhotoRepository + Send + Sync + 'static,
{
    let filename = filename.into_inner();
    let bytes = service.open(&filename).await?;
    let mime = mime_guess::from_path(&filename).first_or_octet_stream();

    Ok(HttpResponse::Ok().content_type(mime.as_ref()).body(bytes))
}

/// Gallery handler
pub async fn gallery<R>(
    service: web::Data<PhotoService<R>>,
) -> Result<Success<Vec<GalleryEntry>>, error::Error>
where
    R: PhotoRepository + Send + Sync + 'static,
{
    let entries = service.gallery().await?;
    Ok(Success::ok(Some(entries)))
}
