use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::{Arc, LazyLock};

use crate::{
    api::flash::FlashSigner,
    modules::photo::{route, PhotoConfig, PhotoFsRepository, PhotoService},
};

mod api;
mod constants;
mod modules;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let photo_repo = PhotoFsRepository::new(ENV.upload_dir.as_str());
    photo_repo.ensure_root().await.map_err(|_| std::io::Error::other("Upload directory error"))?;
    log::info!("Storing photos in {}", photo_repo.root().display());

    let photo_service = PhotoService::new(
        Arc::new(photo_repo),
        PhotoConfig { upload_days: ENV.upload_days, max_upload_bytes: ENV.max_upload_bytes },
    );
    let flash_signer = FlashSigner::new(ENV.secret_key.as_bytes());

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(photo_service.clone()))
            .app_data(web::Data::new(flash_signer.clone()))
            .configure(route::configure::<PhotoFsRepository>)
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
