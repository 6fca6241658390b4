use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostId, WriteOutcome};
use crate::error::{DomainError, RepoError};

/// Number of posts shown on the home page.
pub const LIST_LIMIT: u64 = 20;

/// Post store - abstraction over the collection holding posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Bulk-insert records without any checks. Returns how many were stored.
    ///
    /// Records are stamped in input order, so equal publish dates keep it.
    async fn create_many(&self, records: Vec<NewPost>) -> Result<usize, RepoError>;

    /// Insert one record; the store assigns `id` and `created_at`.
    async fn create(&self, record: NewPost) -> Result<Post, RepoError>;

    /// Up to `limit` posts, newest `published_date` first.
    /// Equal dates come back in insertion order.
    async fn list_sorted_by_date_desc(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Find a post by id.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError>;

    /// Replace every caller-owned field of the matching post.
    async fn update_by_id(&self, id: PostId, record: NewPost)
    -> Result<WriteOutcome, RepoError>;

    /// Remove the matching post.
    async fn delete_by_id(&self, id: PostId) -> Result<WriteOutcome, RepoError>;

    /// Fetch a post that must exist.
    async fn get_by_id(&self, id: PostId) -> Result<Post, DomainError> {
        self.find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }
}
