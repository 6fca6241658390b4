//! PostgreSQL post store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use quill_core::domain::{NewPost, Post, PostId, WriteOutcome};
use quill_core::error::RepoError;
use quill_core::ports::PostStore;

use super::connections::DatabaseHandle;
use super::entity::post::{self, Entity as PostEntity};

/// Post store backed by the `posts` table.
pub struct PostgresPostStore {
    db: Arc<DatabaseHandle>,
}

impl PostgresPostStore {
    pub fn new(db: Arc<DatabaseHandle>) -> Self {
        Self { db }
    }
}

fn read_error(err: DbErr) -> RepoError {
    RepoError::Read(err.to_string())
}

fn write_error(err: DbErr) -> RepoError {
    RepoError::Write(err.to_string())
}

fn outcome(rows_affected: u64) -> WriteOutcome {
    if rows_affected == 0 {
        WriteOutcome::NotFoundNoop
    } else {
        WriteOutcome::Applied
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn create_many(&self, records: Vec<NewPost>) -> Result<usize, RepoError> {
        if records.is_empty() {
            return Ok(0);
        }

        // One microsecond apart: the column keeps microsecond precision.
        let base = Utc::now();
        let count = records.len();
        let models = records.into_iter().enumerate().map(|(offset, record)| {
            let created_at = base + Duration::microseconds(offset as i64);
            post::ActiveModel::from(Post::from_record(PostId::new(), record, created_at))
        });

        PostEntity::insert_many(models)
            .exec_without_returning(self.db.conn())
            .await
            .map_err(write_error)?;

        tracing::debug!(count, "Inserted post batch");
        Ok(count)
    }

    async fn create(&self, record: NewPost) -> Result<Post, RepoError> {
        let post = Post::from_record(PostId::new(), record, Utc::now());
        let model = post::ActiveModel::from(post)
            .insert(self.db.conn())
            .await
            .map_err(write_error)?;

        Ok(model.into())
    }

    async fn list_sorted_by_date_desc(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::PublishedDate)
            .order_by_asc(post::Column::CreatedAt)
            .limit(limit)
            .all(self.db.conn())
            .await
            .map_err(read_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id.as_uuid())
            .one(self.db.conn())
            .await
            .map_err(read_error)?;

        Ok(result.map(Into::into))
    }

    async fn update_by_id(
        &self,
        id: PostId,
        record: NewPost,
    ) -> Result<WriteOutcome, RepoError> {
        let result = PostEntity::update_many()
            .set(post::replacement(record))
            .filter(post::Column::Id.eq(id.as_uuid()))
            .exec(self.db.conn())
            .await
            .map_err(write_error)?;

        Ok(outcome(result.rows_affected))
    }

    async fn delete_by_id(&self, id: PostId) -> Result<WriteOutcome, RepoError> {
        let result = PostEntity::delete_by_id(id.as_uuid())
            .exec(self.db.conn())
            .await
            .map_err(write_error)?;

        Ok(outcome(result.rows_affected))
    }
}
