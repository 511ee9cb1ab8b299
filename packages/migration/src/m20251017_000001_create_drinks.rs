use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Drinks {
    Table,
    Id,
    Title,
    Recipe,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Drinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Drinks::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Drinks::Title).string_len(80).not_null())
                    // Compact JSON list of {name, color, parts}
                    .col(ColumnDef::new(Drinks::Recipe).text().not_null())
                    .to_owned(),
            )
            .await?;

        // Titles are unique; the index name is matched when translating violations
        manager
            .create_index(
                Index::create()
                    .name("ux_drinks_title")
                    .table(Drinks::Table)
                    .col(Drinks::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("ux_drinks_title")
                    .table(Drinks::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Drinks::Table).if_exists().to_owned())
            .await
    }
}
