//! SeaORM adapters. Functions return `DbErr`; the repos layer maps to
//! `DomainError`.

pub mod drinks_sea;
