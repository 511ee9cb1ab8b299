//! Drinks repository: domain types in, domain types out.

use sea_orm::ConnectionTrait;
use tracing::error;

use crate::adapters::drinks_sea::{self as drinks_adapter, DrinkCreate, DrinkUpdate};
use crate::domain::{Drink, DrinkPatch, Ingredient, NewDrink};
use crate::entities::drinks;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::infra::db_errors::map_db_err;

impl TryFrom<drinks::Model> for Drink {
    type Error = DomainError;

    fn try_from(row: drinks::Model) -> Result<Self, Self::Error> {
        let recipe = serde_json::from_str::<Vec<Ingredient>>(&row.recipe).map_err(|e| {
            error!(drink_id = row.id, error = %e, "stored recipe is not an ingredient list");
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("drink {} has an unreadable recipe", row.id),
            )
        })?;

        Ok(Drink {
            id: row.id,
            title: row.title,
            recipe,
        })
    }
}

fn encode_recipe(recipe: &[Ingredient]) -> Result<String, DomainError> {
    serde_json::to_string(recipe).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Serialization".into()),
            format!("failed to encode recipe: {e}"),
        )
    })
}

fn drink_not_found(id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Drink, format!("drink {id} not found"))
}

/// All drinks, ordered by id.
pub async fn list<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Drink>, DomainError> {
    drinks_adapter::list(conn)
        .await
        .map_err(map_db_err)?
        .into_iter()
        .map(Drink::try_from)
        .collect()
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    drink: NewDrink,
) -> Result<Drink, DomainError> {
    let dto = DrinkCreate {
        title: drink.title().to_string(),
        recipe: encode_recipe(drink.recipe())?,
    };
    let row = drinks_adapter::create(conn, dto).await.map_err(map_db_err)?;
    Drink::try_from(row)
}

/// Apply a validated patch. `NotFound(Drink)` when `id` is unknown.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    patch: DrinkPatch,
) -> Result<Drink, DomainError> {
    let dto = DrinkUpdate {
        title: patch.title().map(str::to_string),
        recipe: patch.recipe().map(encode_recipe).transpose()?,
    };

    let row = drinks_adapter::update(conn, id, dto)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::RecordNotFound(_) => drink_not_found(id),
            other => map_db_err(other),
        })?;
    Drink::try_from(row)
}

/// Remove a drink. `NotFound(Drink)` when `id` is unknown.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    let removed = drinks_adapter::delete(conn, id).await.map_err(map_db_err)?;
    if removed == 0 {
        return Err(drink_not_found(id));
    }
    Ok(())
}
