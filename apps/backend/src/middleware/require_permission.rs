//! Per-route authorization.
//!
//! `RequirePermission::new(scope)` wraps a resource. Before any handler
//! extractor runs it pulls the bearer token, verifies it and checks the
//! scope; on success the verified [`AuthClaims`] go into request extensions.
//! Failures short-circuit with the `AppError` rendered as a response here,
//! inside the caller's trace scope.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::warn;

use crate::auth::{check_permissions, extract_bearer, AuthClaims};
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Copy)]
pub struct RequirePermission {
    permission: &'static str,
}

impl RequirePermission {
    pub fn new(permission: &'static str) -> Self {
        Self { permission }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionMiddleware {
            service: Rc::new(service),
            permission: self.permission,
        }))
    }
}

pub struct RequirePermissionMiddleware<S> {
    service: Rc<S>,
    permission: &'static str,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let permission = self.permission;

        Box::pin(async move {
            let claims = match authorize(&req, permission).await {
                Ok(claims) => claims,
                Err(e) => {
                    if e.status().is_client_error() {
                        warn!(
                            permission,
                            code = ?e.code(),
                            path = %req.path(),
                            "authorization rejected"
                        );
                    }
                    return Ok(req.error_response(e).map_into_right_body());
                }
            };

            req.extensions_mut().insert(claims);
            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

async fn authorize(req: &ServiceRequest, permission: &str) -> Result<AuthClaims, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let token = extract_bearer(req.headers().get(header::AUTHORIZATION))?;

    let claims = state.verifier().verify(&token).await?;
    check_permissions(permission, &claims)?;
    Ok(claims)
}
