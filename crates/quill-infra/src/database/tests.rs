use std::sync::Arc;

use chrono::{TimeZone, Utc};
use quill_core::domain::{NewPost, PostId, WriteOutcome};
use quill_core::error::RepoError;
use quill_core::ports::PostStore;
use quill_core::seeds::demo_posts;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult};

use crate::database::connections::DatabaseHandle;
use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostStore;

fn store_over(db: DatabaseConnection) -> PostgresPostStore {
    PostgresPostStore::new(Arc::new(DatabaseHandle::from_conn(db)))
}

fn model(id: uuid::Uuid, headline: &str, day: u32) -> post::Model {
    let published = Utc.with_ymd_and_hms(2021, 8, day, 0, 0, 0).unwrap();
    post::Model {
        id,
        headline: headline.to_owned(),
        author: "Grace Hopper".to_owned(),
        published_date: published.into(),
        featured_image: String::new(),
        content: "Content".to_owned(),
        created_at: Utc::now().into(),
    }
}

fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = uuid::Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model(post_id, "Test Post", 14)]])
        .into_connection();

    let repo = store_over(db);
    let post = repo
        .find_by_id(PostId::from(post_id))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(post.headline, "Test Post");
    assert_eq!(post.id.as_uuid(), post_id);
    assert!(!post.has_featured_image());
}

#[tokio::test]
async fn test_find_missing_post_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = store_over(db);
    assert!(repo.find_by_id(PostId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_returns_stored_row() {
    let post_id = uuid::Uuid::new_v4();
    let mut stored = model(post_id, "Fresh", 12);
    stored.featured_image = "/uploads/1628726400000-cover.png".to_owned();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![stored]])
        .into_connection();

    let repo = store_over(db);
    let post = repo
        .create(NewPost {
            headline: "Fresh".to_owned(),
            featured_image: "/uploads/1628726400000-cover.png".to_owned(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(post.id.as_uuid(), post_id);
    assert_eq!(post.featured_image, "/uploads/1628726400000-cover.png");
}

#[tokio::test]
async fn test_list_keeps_store_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            model(uuid::Uuid::new_v4(), "Newest", 14),
            model(uuid::Uuid::new_v4(), "Older", 10),
        ]])
        .into_connection();

    let repo = store_over(db);
    let posts = repo.list_sorted_by_date_desc(20).await.unwrap();

    let headlines: Vec<_> = posts.iter().map(|p| p.headline.as_str()).collect();
    assert_eq!(headlines, ["Newest", "Older"]);
}

#[tokio::test]
async fn test_list_failure_is_a_read_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors(vec![DbErr::Custom("connection refused".to_owned())])
        .into_connection();

    let repo = store_over(db);
    let err = repo.list_sorted_by_date_desc(20).await.unwrap_err();
    assert!(matches!(err, RepoError::Read(_)));
}

#[tokio::test]
async fn test_update_reports_noop_for_missing_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec(1), exec(0)])
        .into_connection();

    let repo = store_over(db);
    let record = NewPost {
        headline: "Edited".to_owned(),
        ..Default::default()
    };

    assert_eq!(
        repo.update_by_id(PostId::new(), record.clone())
            .await
            .unwrap(),
        WriteOutcome::Applied
    );
    assert_eq!(
        repo.update_by_id(PostId::new(), record).await.unwrap(),
        WriteOutcome::NotFoundNoop
    );
}

#[tokio::test]
async fn test_delete_reports_noop_for_missing_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec(1), exec(0)])
        .into_connection();

    let repo = store_over(db);

    assert_eq!(
        repo.delete_by_id(PostId::new()).await.unwrap(),
        WriteOutcome::Applied
    );
    assert_eq!(
        repo.delete_by_id(PostId::new()).await.unwrap(),
        WriteOutcome::NotFoundNoop
    );
}

#[tokio::test]
async fn test_write_failure_is_a_write_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_errors(vec![DbErr::Custom("connection reset".to_owned())])
        .into_connection();

    let repo = store_over(db);
    let err = repo.delete_by_id(PostId::new()).await.unwrap_err();
    assert!(matches!(err, RepoError::Write(_)));
}

#[tokio::test]
async fn test_create_many_inserts_batch() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec(6)])
        .into_connection();

    let repo = store_over(db);
    assert_eq!(repo.create_many(demo_posts()).await.unwrap(), 6);
}

#[tokio::test]
async fn test_create_many_empty_skips_store() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let repo = store_over(db);
    assert_eq!(repo.create_many(Vec::new()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_handle_shared_with_store_closes_by_ref() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();
    let handle = Arc::new(DatabaseHandle::from_conn(db));

    let repo = PostgresPostStore::new(handle.clone());
    assert!(repo.find_by_id(PostId::new()).await.unwrap().is_none());

    handle.close().await.unwrap();
}
