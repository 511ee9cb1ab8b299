pub mod auth;
pub mod db;

pub use auth::AuthConfig;
pub use db::{db_url, DbKind};
