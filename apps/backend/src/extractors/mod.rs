pub mod auth_claims;
pub mod drink_id;
pub mod validated_json;

pub use drink_id::DrinkId;
pub use validated_json::ValidatedJson;
