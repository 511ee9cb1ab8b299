//! SeaORM adapter for drinks.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet, QueryOrder, Set,
};

use crate::entities::drinks;

/// Insert payload; `recipe` is already serialized.
#[derive(Debug, Clone)]
pub struct DrinkCreate {
    pub title: String,
    pub recipe: String,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct DrinkUpdate {
    pub title: Option<String>,
    pub recipe: Option<String>,
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<drinks::Model>, sea_orm::DbErr> {
    drinks::Entity::find()
        .order_by_asc(drinks::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<drinks::Model>, sea_orm::DbErr> {
    drinks::Entity::find_by_id(id).one(conn).await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: DrinkCreate,
) -> Result<drinks::Model, sea_orm::DbErr> {
    let active = drinks::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        recipe: Set(dto.recipe),
    };
    active.insert(conn).await
}

/// Apply `dto` to an existing row. `RecordNotFound` when `id` is unknown.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: DrinkUpdate,
) -> Result<drinks::Model, sea_orm::DbErr> {
    let existing = find_by_id(conn, id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("drink {id}")))?;

    if dto.title.is_none() && dto.recipe.is_none() {
        return Ok(existing);
    }

    let mut active = existing.into_active_model();
    if let Some(title) = dto.title {
        active.title = Set(title);
    }
    if let Some(recipe) = dto.recipe {
        active.recipe = Set(recipe);
    }
    active.update(conn).await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = drinks::Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}
