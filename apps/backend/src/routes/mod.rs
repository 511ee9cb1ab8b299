use actix_web::web;

use crate::error::AppError;

pub mod drinks;
pub mod health;

/// Register every route plus the JSON 404 fallback.
///
/// Shared by `main` and the integration tests so both serve the same paths
/// with the same per-route authorization.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(drinks::configure_routes)
        .default_service(web::to(not_found));
}

async fn not_found() -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::resource_not_found())
}
