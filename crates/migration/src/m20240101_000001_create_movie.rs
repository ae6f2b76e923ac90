//! Create `movie` table.
//! `id` is the internal row key; `movie_id` is the public identifier handed out
//! by the catalog's counter.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(pk_auto(Movie::Id))
                    .col(big_integer(Movie::MovieId).not_null())
                    .col(string_len(Movie::Title, 512).not_null())
                    .col(string_len(Movie::Year, 16).not_null())
                    .col(timestamp_with_time_zone(Movie::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Movie::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Movie {
    Table,
    Id,
    MovieId,
    Title,
    Year,
    CreatedAt,
    UpdatedAt,
}
