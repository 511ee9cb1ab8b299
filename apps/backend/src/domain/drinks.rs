use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub const MAX_TITLE_LEN: usize = 80;

/// One line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

impl Ingredient {
    fn validate(&self, position: usize) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidIngredient,
                format!("ingredient {position} has an empty name"),
            ));
        }
        if self.color.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidIngredient,
                format!("ingredient {position} has an empty color"),
            ));
        }
        if self.parts == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidIngredient,
                format!("ingredient {position} must have at least one part"),
            ));
        }
        Ok(())
    }
}

/// A stored drink with its decoded recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Ingredient with the `parts` count redacted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortIngredient {
    pub name: String,
    pub color: String,
}

/// Public projection: recipe without proportions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkShort {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// Full projection, for holders of `get:drinks-detail` and write responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkLong {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|i| ShortIngredient {
                    name: i.name.clone(),
                    color: i.color.clone(),
                })
                .collect(),
        }
    }

    pub fn long(&self) -> DrinkLong {
        DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.clone(),
        }
    }
}

fn validate_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyTitle,
            "title must not be empty",
        ));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::validation(
            ValidationKind::TitleTooLong,
            format!("title must be at most {MAX_TITLE_LEN} characters"),
        ));
    }
    Ok(title.to_string())
}

fn validate_recipe(recipe: &[Ingredient]) -> Result<(), DomainError> {
    if recipe.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyRecipe,
            "recipe must contain at least one ingredient",
        ));
    }
    recipe
        .iter()
        .enumerate()
        .try_for_each(|(i, ingredient)| ingredient.validate(i + 1))
}

/// A validated drink ready to insert. Only obtainable through [`NewDrink::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrink {
    title: String,
    recipe: Vec<Ingredient>,
}

impl NewDrink {
    pub fn new(title: &str, recipe: Vec<Ingredient>) -> Result<Self, DomainError> {
        let title = validate_title(title)?;
        validate_recipe(&recipe)?;
        Ok(Self { title, recipe })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn recipe(&self) -> &[Ingredient] {
        &self.recipe
    }
}

/// A validated partial update. `recipe: Some(vec![])` is an explicit reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkPatch {
    title: Option<String>,
    recipe: Option<Vec<Ingredient>>,
}

impl DrinkPatch {
    /// `recipe` uses the double-option convention: `None` leaves the recipe
    /// as is, `Some(None)` clears it, `Some(Some(list))` replaces it.
    pub fn new(
        title: Option<&str>,
        recipe: Option<Option<Vec<Ingredient>>>,
    ) -> Result<Self, DomainError> {
        if title.is_none() && recipe.is_none() {
            return Err(DomainError::validation(
                ValidationKind::NothingToUpdate,
                "provide a title or a recipe to update",
            ));
        }

        let title = title.map(validate_title).transpose()?;
        let recipe = match recipe {
            None => None,
            Some(None) => Some(Vec::new()),
            Some(Some(list)) => {
                validate_recipe(&list)?;
                Some(list)
            }
        };

        Ok(Self { title, recipe })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn recipe(&self) -> Option<&[Ingredient]> {
        self.recipe.as_deref()
    }
}
