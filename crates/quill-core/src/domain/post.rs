use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Opaque post identifier, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(Uuid);

impl PostId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier taken from a request path.
    ///
    /// Anything that is not a UUID is rejected with
    /// [`DomainError::InvalidIdentifier`].
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| DomainError::InvalidIdentifier(raw.to_string()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PostId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for PostId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Caller-supplied post fields: everything the store does not assign.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    pub headline: String,
    pub author: String,
    pub published_date: DateTime<Utc>,
    /// Relative path of the uploaded image, or empty when none was attached.
    pub featured_image: String,
    pub content: String,
}

/// Post entity - a stored blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub headline: String,
    pub author: String,
    pub published_date: DateTime<Utc>,
    pub featured_image: String,
    pub content: String,
    /// Insertion stamp. Breaks ties between equal `published_date` values.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Materialise a stored post from its record and store-assigned fields.
    pub fn from_record(id: PostId, record: NewPost, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            headline: record.headline,
            author: record.author,
            published_date: record.published_date,
            featured_image: record.featured_image,
            content: record.content,
            created_at,
        }
    }

    /// Replace every caller-owned field, keeping `id` and `created_at`.
    pub fn replace_with(&mut self, record: NewPost) {
        self.headline = record.headline;
        self.author = record.author;
        self.published_date = record.published_date;
        self.featured_image = record.featured_image;
        self.content = record.content;
    }

    pub fn has_featured_image(&self) -> bool {
        !self.featured_image.is_empty()
    }
}

/// Result of an update or delete addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A matching record was changed.
    Applied,
    /// No record had the id; nothing happened.
    NotFoundNoop,
}

/// Parse the published date submitted with a post form.
///
/// Accepts RFC 3339, the HTML `datetime-local` shape (read as UTC) and a
/// bare calendar date (midnight UTC).
pub fn parse_published_date(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::Validation(
            "Published date is required".to_string(),
        ));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(DomainError::Validation(format!(
        "Published date {raw:?} is not a valid date"
    )))
}
