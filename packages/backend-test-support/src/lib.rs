//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: logging
//! initialization, assertions on the uniform error body, unique data, and
//! signed access tokens.

pub mod error_body;
pub mod jwt_keys;
pub mod logging;
pub mod tokens;
pub mod unique_helpers;
