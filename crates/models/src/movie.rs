use chrono::{DateTime, Utc};
use sea_orm::{
    entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub movie_id: i64,
    pub title: String,
    pub year: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Row to insert; the public id has already been assigned.
#[derive(Clone, Debug)]
pub struct NewRow {
    pub movie_id: u32,
    pub title: String,
    pub year: String,
    pub created_at: DateTime<Utc>,
}

fn active(row: NewRow) -> ActiveModel {
    let ts: DateTimeWithTimeZone = row.created_at.into();
    ActiveModel {
        movie_id: Set(i64::from(row.movie_id)),
        title: Set(row.title),
        year: Set(row.year),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
}

pub async fn insert(db: &DatabaseConnection, row: NewRow) -> Result<Model, errors::ModelError> {
    Ok(active(row).insert(db).await?)
}

/// Bulk insert used for fixture seeding.
pub async fn insert_many(db: &DatabaseConnection, rows: Vec<NewRow>) -> Result<u64, errors::ModelError> {
    let count = rows.len() as u64;
    if count == 0 {
        return Ok(0);
    }
    Entity::insert_many(rows.into_iter().map(active)).exec(db).await?;
    Ok(count)
}

pub async fn find_by_movie_id(db: &DatabaseConnection, movie_id: u32) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::MovieId.eq(i64::from(movie_id)))
        .one(db)
        .await?)
}

/// Delete by public id, returning the number of rows the backend removed.
pub async fn delete_by_movie_id(db: &DatabaseConnection, movie_id: u32) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::MovieId.eq(i64::from(movie_id)))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, errors::ModelError> {
    Ok(Entity::find().count(db).await?)
}

/// Largest public id stored, `None` on an empty table.
pub async fn max_movie_id(db: &DatabaseConnection) -> Result<Option<i64>, errors::ModelError> {
    let max: Option<Option<i64>> = Entity::find()
        .select_only()
        .column_as(Column::MovieId.max(), "max_movie_id")
        .into_tuple()
        .one(db)
        .await?;
    Ok(max.flatten())
}

/// One page ordered by public id, newest first, plus the table's row count.
pub async fn page_desc(
    db: &DatabaseConnection,
    offset: u64,
    limit: u64,
) -> Result<(Vec<Model>, u64), errors::ModelError> {
    let total = count(db).await?;
    if limit == 0 || offset >= total {
        return Ok((Vec::new(), total));
    }
    let rows = Entity::find()
        .order_by_desc(Column::MovieId)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?;
    Ok((rows, total))
}
