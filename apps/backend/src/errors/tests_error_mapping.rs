// Unit tests for DomainError -> AppError mapping; no HTTP server or database.
use actix_web::http::StatusCode;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_422() {
    let de = DomainError::validation(ValidationKind::EmptyTitle, "title must not be empty");
    let app: AppError = de.into();
    assert_eq!(app.code(), Some(ErrorCode::Unprocessable));
    assert_eq!(app.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.message(), "title must not be empty");
}

#[test]
fn maps_unique_title_to_422_title_conflict() {
    let de = DomainError::conflict(ConflictKind::UniqueTitle, "title already exists");
    let app: AppError = de.into();
    assert_eq!(app.code(), Some(ErrorCode::TitleConflict));
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_not_found_to_404() {
    let de = DomainError::not_found(NotFoundKind::Drink, "drink 7 not found");
    let app: AppError = de.into();
    assert_eq!(app.code(), Some(ErrorCode::DrinkNotFound));
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_infra_without_leaking_detail() {
    let corrupt = DomainError::infra(InfraErrorKind::DataCorruption, "row 3 recipe: eof");
    let app: AppError = corrupt.into();
    assert_eq!(app.code(), Some(ErrorCode::DataCorruption));
    assert_eq!(app.status().as_u16(), 500);
    assert!(!app.message().contains("row 3"));

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "pool closed");
    let app: AppError = down.into();
    assert_eq!(app.code(), Some(ErrorCode::DbUnavailable));
    assert_eq!(app.status().as_u16(), 503);

    let timeout = DomainError::infra(InfraErrorKind::Timeout, "slow");
    let app: AppError = timeout.into();
    assert_eq!(app.code(), Some(ErrorCode::DbTimeout));
    assert_eq!(app.status().as_u16(), 504);

    let other = DomainError::infra(InfraErrorKind::Other("boom".into()), "secret text");
    let app: AppError = other.into();
    assert_eq!(app.code(), Some(ErrorCode::DbError));
    assert_eq!(app.status().as_u16(), 500);
    assert!(!app.message().contains("secret"));
}
