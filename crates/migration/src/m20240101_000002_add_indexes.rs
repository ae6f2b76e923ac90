use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_movie::Movie;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Public id must never be handed out twice, even if the counter races.
        manager
            .create_index(
                Index::create()
                    .name("idx_movie_movie_id_unique")
                    .table(Movie::Table)
                    .col(Movie::MovieId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_movie_movie_id_unique")
                    .table(Movie::Table)
                    .to_owned(),
            )
            .await
    }
}
