use actix_web::web;

use crate::modules::photo::{handle, repository::PhotoRepository};

pub fn configure<R>(cfg: &mut web::ServiceConfig)
where
    R: PhotoRepository + Send + Sync + 'static,
{
    cfg.service(web::resource("/").route(web::get().to(handle::index)))
        .service(
            web::resource("/upload")
                .route(web::get().to(handle::upload_page::<R>))
                .route(web::post().to(handle::upload_photo::<R>)),
        )
        .service(
            web::resource("/uploads/{filename}").route(web::get().to(handle::serve_upload::<R>)),
        )
        .service(web::resource("/views").route(web::get().to(handle::gallery::<R>)));
}
