//! Infrastructure: database bootstrap, state assembly, DB error translation.

pub mod db;
pub mod db_errors;
pub mod state;
