//! Pure drink domain: ingredients, validation and response projections.

pub mod drinks;

pub use drinks::{Drink, DrinkLong, DrinkPatch, DrinkShort, Ingredient, NewDrink, ShortIngredient};
