//! `/drinks` resource handlers.
//!
//! Each protected method is its own guarded resource so that it can carry
//! its own `RequirePermission` scope.

use actix_web::{guard, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use tracing::info;

use crate::auth::permissions::{DELETE_DRINKS, GET_DRINKS_DETAIL, PATCH_DRINKS, POST_DRINKS};
use crate::auth::AuthClaims;
use crate::db::txn::with_txn;
use crate::domain::{DrinkLong, DrinkPatch, DrinkShort, Ingredient, NewDrink};
use crate::error::AppError;
use crate::extractors::{DrinkId, ValidatedJson};
use crate::middleware::RequirePermission;
use crate::repos::drinks;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateDrinkRequest {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// PATCH body. Absent fields are left alone; `recipe: null` clears the
/// recipe. `title: null` parses as present-but-null and is rejected.
#[derive(Debug, Deserialize)]
pub struct UpdateDrinkRequest {
    #[serde(default, with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub recipe: Option<Option<Vec<Ingredient>>>,
}

#[derive(Debug, Serialize)]
struct DrinksResponse<T> {
    success: bool,
    drinks: Vec<T>,
}

impl<T> DrinksResponse<T> {
    fn ok(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    success: bool,
    delete: i64,
}

async fn list_drinks(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let all = with_txn(&app_state, |txn| {
        Box::pin(async move { drinks::list(txn).await.map_err(AppError::from) })
    })
    .await?;

    let body: Vec<DrinkShort> = all.iter().map(|d| d.short()).collect();
    Ok(HttpResponse::Ok().json(DrinksResponse::ok(body)))
}

async fn list_drinks_detail(
    _claims: AuthClaims,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let all = with_txn(&app_state, |txn| {
        Box::pin(async move { drinks::list(txn).await.map_err(AppError::from) })
    })
    .await?;

    let body: Vec<DrinkLong> = all.iter().map(|d| d.long()).collect();
    Ok(HttpResponse::Ok().json(DrinksResponse::ok(body)))
}

async fn create_drink(
    claims: AuthClaims,
    body: ValidatedJson<CreateDrinkRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let new_drink = NewDrink::new(&body.title, body.recipe)?;

    let drink = with_txn(&app_state, |txn| {
        Box::pin(async move { drinks::create(txn, new_drink).await.map_err(AppError::from) })
    })
    .await?;

    info!(drink_id = drink.id, sub = ?claims.sub, "drink created");
    Ok(HttpResponse::Ok().json(DrinksResponse::ok(vec![drink.long()])))
}

async fn update_drink(
    claims: AuthClaims,
    id: DrinkId,
    body: ValidatedJson<UpdateDrinkRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let title = match body.title {
        Some(None) => return Err(AppError::unprocessable("title must not be null")),
        Some(Some(title)) => Some(title),
        None => None,
    };
    let patch = DrinkPatch::new(title.as_deref(), body.recipe)?;

    let drink = with_txn(&app_state, |txn| {
        Box::pin(async move { drinks::update(txn, id.0, patch).await.map_err(AppError::from) })
    })
    .await?;

    info!(drink_id = drink.id, sub = ?claims.sub, "drink updated");
    Ok(HttpResponse::Ok().json(DrinksResponse::ok(vec![drink.long()])))
}

async fn delete_drink(
    claims: AuthClaims,
    id: DrinkId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    with_txn(&app_state, |txn| {
        Box::pin(async move { drinks::delete(txn, id.0).await.map_err(AppError::from) })
    })
    .await?;

    info!(drink_id = id.0, sub = ?claims.sub, "drink deleted");
    Ok(HttpResponse::Ok().json(DeleteResponse {
        success: true,
        delete: id.0,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/drinks")
            .guard(guard::Get())
            .to(list_drinks),
    )
    .service(
        web::resource("/drinks")
            .guard(guard::Post())
            .wrap(RequirePermission::new(POST_DRINKS))
            .to(create_drink),
    )
    .service(
        web::resource("/drinks-detail")
            .guard(guard::Get())
            .wrap(RequirePermission::new(GET_DRINKS_DETAIL))
            .to(list_drinks_detail),
    )
    .service(
        web::resource("/drinks/{id}")
            .guard(guard::Patch())
            .wrap(RequirePermission::new(PATCH_DRINKS))
            .to(update_drink),
    )
    .service(
        web::resource("/drinks/{id}")
            .guard(guard::Delete())
            .wrap(RequirePermission::new(DELETE_DRINKS))
            .to(delete_drink),
    );
}
