//! Fixed demo records for development seeding.

use chrono::{TimeZone, Utc};

use crate::domain::NewPost;

/// Headline of the post the home page features once the demo set is loaded.
pub const FEATURED_DEMO_HEADLINE: &str = "Shipping the first release";

const DEMO_POSTS: [(&str, &str, (u32, u32), &str); 6] = [
    (
        "Hello, world",
        "Ada Byron",
        (9, 9),
        "A first post to prove the pipes are connected.",
    ),
    (
        "Choosing a document store",
        "Grace Hopper",
        (10, 14),
        "Posts are small, self-contained records. Any store that can sort by date will do.",
    ),
    (
        "Uploading featured images",
        "Ada Byron",
        (11, 8),
        "Images are written to disk and referenced by a relative path.",
    ),
    (
        "Method override in forms",
        "Linus Torvalds",
        (12, 17),
        "HTML forms only speak GET and POST; a query flag carries the real verb.",
    ),
    (
        FEATURED_DEMO_HEADLINE,
        "Grace Hopper",
        (14, 0),
        "Everything we need for a small blog, and nothing more.",
    ),
    (
        "Release notes",
        "Linus Torvalds",
        (14, 0),
        "Same day, written later. Ties keep insertion order.",
    ),
];

/// Six posts dated 2021-08-09 through 2021-08-14, two of them on the 14th.
pub fn demo_posts() -> Vec<NewPost> {
    DEMO_POSTS
        .iter()
        .map(|(headline, author, (day, hour), content)| NewPost {
            headline: headline.to_string(),
            author: author.to_string(),
            published_date: Utc
                .with_ymd_and_hms(2021, 8, *day, *hour, 0, 0)
                .single()
                .unwrap_or_default(),
            featured_image: String::new(),
            content: content.to_string(),
        })
        .collect()
}
