//! One-shot status messages carried across the post/redirect/get cycle of an upload.
//!
//! The message travels in a short-lived cookie signed with the application secret, so a
//! client can neither forge nor alter it. Anything that fails to verify is dropped.

use actix_web::{
    cookie::{time, Cookie},
    HttpRequest,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{api::error, constants::FLASH_COOKIE};

const FLASH_TTL_SECS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Error, message: message.into() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct FlashClaims {
    #[serde(flatten)]
    flash: Flash,
    exp: u64,
}

#[derive(Clone)]
pub struct FlashSigner {
    secret: Vec<u8>,
}

impl FlashSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self { secret: secret.as_ref().to_vec() }
    }

    pub fn cookie(&self, flash: Flash) -> Result<Cookie<'static>, error::SystemError> {
        let exp = (chrono::Utc::now().timestamp() + FLASH_TTL_SECS) as u64;
        let token = encode(
            &Header::new(Algorithm::HS256),
            &FlashClaims { flash, exp },
            &EncodingKey::from_secret(&self.secret),
        )?;

        Ok(Cookie::build(FLASH_COOKIE, token)
            .path("/")
            .http_only(true)
            .max_age(time::Duration::seconds(FLASH_TTL_SECS))
            .finish())
    }

    /// Reads the pending message, if there is one and it verifies.
    pub fn read(&self, req: &HttpRequest) -> Option<Flash> {
        let cookie = req.cookie(FLASH_COOKIE)?;
        self.verify(cookie.value())
    }

    fn verify(&self, token: &str) -> Option<Flash> {
        let validation = Validation::new(Algorithm::HS256);
        match decode::<FlashClaims>(token, &DecodingKey::from_secret(&self.secret), &validation) {
            Ok(data) => Some(data.claims.flash),
            Err(e) => {
                log::debug!("Discarding flash cookie: {}", e);
                None
            }
        }
    }

    pub fn clear() -> Cookie<'static> {
        let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
        cookie.make_removal();
        cookie
    }
}
