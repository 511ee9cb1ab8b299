use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Drink id from the `{id}` path segment; must be a positive integer.
///
/// Existence is not checked here: the handler's repository call reports
/// unknown ids inside the request transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrinkId(pub i64);

fn parse(raw: Option<&str>) -> Result<DrinkId, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidDrinkId, "Missing drink id parameter")
    })?;

    let id = raw.parse::<i64>().map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidDrinkId, format!("Invalid drink id: {raw}"))
    })?;

    if id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidDrinkId,
            format!("Drink id must be positive, got: {id}"),
        ));
    }

    Ok(DrinkId(id))
}

impl FromRequest for DrinkId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse(req.match_info().get("id")))
    }
}
