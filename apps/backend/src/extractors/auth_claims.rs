use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::{AuthClaims, AuthError};
use crate::error::AppError;

/// Verified claims, as stored by `RequirePermission`.
///
/// Only usable on routes wrapped in `RequirePermission`; anywhere else the
/// extractor fails as if no credentials had been sent.
impl FromRequest for AuthClaims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthClaims>()
                .cloned()
                .ok_or_else(|| AuthError::header_missing().into()),
        )
    }
}
