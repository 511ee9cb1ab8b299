use actix_web::{web, App, HttpServer};
use drinks_backend::config::{AuthConfig, DbKind};
use drinks_backend::infra::state::build_state;
use drinks_backend::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use drinks_backend::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: docker-compose env_file or docker run --env-file
    // - Local dev: source env files manually (set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let auth_config = match AuthConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid auth configuration");
            std::process::exit(1);
        }
    };
    info!(
        domain = %auth_config.domain,
        audience = %auth_config.audience,
        jwks_url = %auth_config.jwks_url,
        "auth configured"
    );

    let app_state = match build_state()
        .with_auth(auth_config)
        .with_db(DbKind::Postgres)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);

    info!(%host, port, "starting drinks backend");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
