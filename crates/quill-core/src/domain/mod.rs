//! Domain entities - the core business objects.

mod post;

pub use post::{NewPost, Post, PostId, WriteOutcome, parse_published_date};
