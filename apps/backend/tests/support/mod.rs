#![allow(dead_code)]

pub mod drinks;
pub mod test_state;

pub use app_builder::create_test_app;
pub use test_state::{build_auth_only_state, build_test_state};
