use std::env;

use actix_cors::Cors;
use actix_web::http::header;

const FALLBACK_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// CORS for the drinks API.
///
/// Origins come from `CORS_ALLOWED_ORIGINS` (comma-separated); entries that
/// are empty, `null` or not http(s) are ignored. With nothing valid
/// configured, only the local frontend origins are allowed.
pub fn cors_middleware() -> Cors {
    let configured = allowed_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());
    let origins = if configured.is_empty() {
        FALLBACK_ORIGINS.iter().map(|o| o.to_string()).collect()
    } else {
        configured
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    for origin in &origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

fn allowed_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}
