//! In-memory post store - used when no database is configured or reachable.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use quill_core::domain::{NewPost, Post, PostId, WriteOutcome};
use quill_core::error::RepoError;
use quill_core::ports::PostStore;

/// Post store holding records in insertion order behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    /// Next insertion stamp, strictly after every stamp already handed out.
    fn next_stamp(posts: &[Post]) -> DateTime<Utc> {
        let now = Utc::now();
        match posts.iter().map(|p| p.created_at).max() {
            Some(last) if last >= now => last + Duration::microseconds(1),
            _ => now,
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn create_many(&self, records: Vec<NewPost>) -> Result<usize, RepoError> {
        let mut posts = self.posts.write().await;
        let count = records.len();

        for record in records {
            let created_at = Self::next_stamp(&posts);
            posts.push(Post::from_record(PostId::new(), record, created_at));
        }

        Ok(count)
    }

    async fn create(&self, record: NewPost) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let created_at = Self::next_stamp(&posts);
        let post = Post::from_record(PostId::new(), record, created_at);
        posts.push(post.clone());
        Ok(post)
    }

    async fn list_sorted_by_date_desc(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.posts.read().await.clone();
        // Stable sort: equal dates keep insertion order.
        posts.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(posts)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn update_by_id(
        &self,
        id: PostId,
        record: NewPost,
    ) -> Result<WriteOutcome, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.replace_with(record);
                Ok(WriteOutcome::Applied)
            }
            None => Ok(WriteOutcome::NotFoundNoop),
        }
    }

    async fn delete_by_id(&self, id: PostId) -> Result<WriteOutcome, RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            Ok(WriteOutcome::NotFoundNoop)
        } else {
            Ok(WriteOutcome::Applied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use quill_core::DomainError;
    use quill_core::seeds::{FEATURED_DEMO_HEADLINE, demo_posts};

    fn record(headline: &str, published_date: DateTime<Utc>) -> NewPost {
        NewPost {
            headline: headline.to_string(),
            author: "Ada Byron".to_string(),
            published_date,
            featured_image: String::new(),
            content: "Body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_keeps_image_path() {
        let store = InMemoryPostStore::new();
        let mut new_post = record("With image", Utc::now());
        new_post.featured_image = "/uploads/1628899200000-cover.png".to_string();

        let created = store.create(new_post).await.unwrap();
        let fetched = store.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.featured_image, "/uploads/1628899200000-cover.png");
    }

    #[tokio::test]
    async fn test_list_returns_twenty_newest_first() {
        let store = InMemoryPostStore::new();
        let start = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let records = (0..25)
            .map(|day| record(&format!("Post {day}"), start + Duration::days(day)))
            .collect();
        store.create_many(records).await.unwrap();

        let posts = store.list_sorted_by_date_desc(20).await.unwrap();

        assert_eq!(posts.len(), 20);
        assert_eq!(posts[0].headline, "Post 24");
        assert!(
            posts
                .windows(2)
                .all(|pair| pair[0].published_date > pair[1].published_date)
        );
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let store = InMemoryPostStore::new();
        assert!(store.list_sorted_by_date_desc(20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_equal_dates_keep_insertion_order() {
        let store = InMemoryPostStore::new();
        store.create_many(demo_posts()).await.unwrap();

        let posts = store.list_sorted_by_date_desc(20).await.unwrap();

        assert_eq!(posts[0].headline, FEATURED_DEMO_HEADLINE);
        assert_eq!(posts[1].headline, "Release notes");
        assert!(posts[0].created_at < posts[1].created_at);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_but_not_id() {
        let store = InMemoryPostStore::new();
        let created = store.create(record("Old", Utc::now())).await.unwrap();

        let outcome = store
            .update_by_id(created.id, record("New", created.published_date))
            .await
            .unwrap();
        let fetched = store.get_by_id(created.id).await.unwrap();

        assert_eq!(outcome, WriteOutcome::Applied);
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.headline, "New");
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = InMemoryPostStore::new();
        let created = store.create(record("Doomed", Utc::now())).await.unwrap();

        let outcome = store.delete_by_id(created.id).await.unwrap();
        let err = store.get_by_id(created.id).await.unwrap_err();

        assert_eq!(outcome, WriteOutcome::Applied);
        assert!(matches!(err, DomainError::PostNotFound(id) if id == created.id));
    }

    #[tokio::test]
    async fn test_missing_id_writes_are_noops() {
        let store = InMemoryPostStore::new();
        store.create(record("Bystander", Utc::now())).await.unwrap();

        assert_eq!(
            store
                .update_by_id(PostId::new(), record("Ghost", Utc::now()))
                .await
                .unwrap(),
            WriteOutcome::NotFoundNoop
        );
        assert_eq!(
            store.delete_by_id(PostId::new()).await.unwrap(),
            WriteOutcome::NotFoundNoop
        );
        assert_eq!(store.list_sorted_by_date_desc(20).await.unwrap().len(), 1);
    }
}
