//! Bearer token authentication and scope-based authorization.

pub mod bearer;
pub mod claims;
pub mod error;
pub mod jwks;
pub mod permissions;
pub mod verify;

pub use bearer::{extract_bearer, parse_bearer};
pub use claims::{Audience, AuthClaims};
pub use error::AuthError;
pub use jwks::{HttpKeySetSource, JwkSet, JwksResolver, KeySetSource, StaticKeySetSource};
pub use permissions::check_permissions;
pub use verify::TokenVerifier;
