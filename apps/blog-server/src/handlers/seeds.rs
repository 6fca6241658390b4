//! Development fixture loader. Compiled only with the `dev-seeds` feature.

use actix_web::{HttpResponse, http::header::ContentType, web};

use quill_core::seeds::demo_posts;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /seeds - insert the fixed demo posts.
pub async fn seed(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let count = state.posts.create_many(demo_posts()).await?;
    tracing::info!(count, "demo posts seeded");

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(format!("Seeded {count} posts")))
}
