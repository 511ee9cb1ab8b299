//! Scope membership checks on verified claims.

use super::{AuthClaims, AuthError};

pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
pub const POST_DRINKS: &str = "post:drinks";
pub const PATCH_DRINKS: &str = "patch:drinks";
pub const DELETE_DRINKS: &str = "delete:drinks";

/// Assert that `claims` grants `permission`.
pub fn check_permissions(permission: &str, claims: &AuthClaims) -> Result<(), AuthError> {
    if claims.permissions.is_none() {
        return Err(AuthError::invalid_claims("JWT does not include `permissions`."));
    }

    if !claims.has_permission(permission) {
        return Err(AuthError::unauthorised());
    }

    Ok(())
}
