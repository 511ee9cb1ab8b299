pub mod token_verification;
