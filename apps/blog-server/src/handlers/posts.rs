//! Post handlers - list, show, create, edit, update, delete.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, http::StatusCode, http::header, web};
use chrono::{DateTime, Utc};

use quill_core::DomainError;
use quill_core::domain::{NewPost, PostId, WriteOutcome, parse_published_date};
use quill_core::ports::{IncomingFile, LIST_LIMIT};
use quill_shared::{Action, PostForm, StatusQuery};

use crate::forms::{PostSubmission, read_post_submission};
use crate::middleware::error::AppResult;
use crate::observability::RequestId;
use crate::state::AppState;
use crate::views::{FormTemplate, IndexTemplate, PostView, ShowTemplate, form_from_view, render};

fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Persist the attached file, if any. No file means no image.
async fn store_upload(state: &AppState, file: Option<IncomingFile>) -> Result<String, DomainError> {
    match file {
        Some(file) => Ok(state.uploads.store(file).await?),
        None => Ok(String::new()),
    }
}

/// Drop a file that no stored post ended up referencing.
async fn discard_upload(state: &AppState, path: &str) {
    if path.is_empty() {
        return;
    }
    if let Err(e) = state.uploads.remove(path).await {
        tracing::warn!(path, error = %e, "failed to remove unreferenced upload");
    }
}

fn to_record(form: PostForm, published_date: DateTime<Utc>, featured_image: String) -> NewPost {
    NewPost {
        headline: form.headline,
        author: form.author,
        published_date,
        featured_image,
        content: form.content,
    }
}

/// The user-facing part of a date validation failure.
fn validation_message(err: DomainError) -> Result<String, DomainError> {
    match err {
        DomainError::Validation(msg) => Ok(msg),
        other => Err(other),
    }
}

/// GET / - newest post highlighted, then the rest of the latest page.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<StatusQuery>,
) -> AppResult<HttpResponse> {
    let mut posts = state
        .posts
        .list_sorted_by_date_desc(LIST_LIMIT)
        .await?
        .into_iter()
        .map(PostView::from);

    let template = IndexTemplate {
        banner: query.banner(),
        featured: posts.next(),
        posts: posts.collect(),
    };
    render(template, StatusCode::OK)
}

/// GET /posts/new
pub async fn new_form() -> AppResult<HttpResponse> {
    render(FormTemplate::create(PostForm::default(), None), StatusCode::OK)
}

/// GET /posts/{id}
pub async fn show(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<StatusQuery>,
) -> AppResult<HttpResponse> {
    let id = PostId::parse(&path)?;
    let post = state.posts.get_by_id(id).await?;

    let template = ShowTemplate {
        banner: query.banner(),
        post: post.into(),
    };
    render(template, StatusCode::OK)
}

/// POST /posts
pub async fn create(
    state: web::Data<AppState>,
    request_id: RequestId,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let PostSubmission { form, file } =
        read_post_submission(payload, state.uploads.max_bytes()).await?;

    let published_date = match parse_published_date(&form.published_date) {
        Ok(date) => date,
        Err(err) => {
            let message = validation_message(err)?;
            return render(
                FormTemplate::create(form, Some(message)),
                StatusCode::UNPROCESSABLE_ENTITY,
            );
        }
    };

    let featured_image = store_upload(&state, file).await?;
    let post = match state
        .posts
        .create(to_record(form, published_date, featured_image.clone()))
        .await
    {
        Ok(post) => post,
        Err(err) => {
            discard_upload(&state, &featured_image).await;
            return Err(err.into());
        }
    };

    tracing::info!(
        request_id = %request_id.as_str(),
        post_id = %post.id,
        has_image = post.has_featured_image(),
        "post created"
    );

    Ok(see_other(Action::Create.redirect_to("/")))
}

/// GET /posts/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = PostId::parse(&path)?;
    let post = PostView::from(state.posts.get_by_id(id).await?);

    let form = form_from_view(&post);
    render(
        FormTemplate::edit(id, form, post.featured_image, None),
        StatusCode::OK,
    )
}

/// PUT /posts/{id} - full replace of the stored fields.
pub async fn update(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<String>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let id = PostId::parse(&path)?;
    let PostSubmission { form, file } =
        read_post_submission(payload, state.uploads.max_bytes()).await?;
    let redirect = Action::Update.redirect_to(&format!("/posts/{id}"));

    let Some(existing) = state.posts.find_by_id(id).await? else {
        tracing::warn!(request_id = %request_id.as_str(), post_id = %id, "update matched no post");
        return Ok(see_other(redirect));
    };

    let published_date = match parse_published_date(&form.published_date) {
        Ok(date) => date,
        Err(err) => {
            let message = validation_message(err)?;
            return render(
                FormTemplate::edit(id, form, existing.featured_image, Some(message)),
                StatusCode::UNPROCESSABLE_ENTITY,
            );
        }
    };

    let featured_image = store_upload(&state, file).await?;
    let outcome = match state
        .posts
        .update_by_id(id, to_record(form, published_date, featured_image.clone()))
        .await
    {
        Ok(outcome) => outcome,
        Err(err) => {
            discard_upload(&state, &featured_image).await;
            return Err(err.into());
        }
    };

    match outcome {
        WriteOutcome::Applied => {
            tracing::info!(request_id = %request_id.as_str(), post_id = %id, "post updated")
        }
        WriteOutcome::NotFoundNoop => {
            // Deleted between the lookup and the write.
            tracing::warn!(
                request_id = %request_id.as_str(),
                post_id = %id,
                "update matched no post"
            );
            discard_upload(&state, &featured_image).await;
        }
    }

    Ok(see_other(redirect))
}

/// DELETE /posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = PostId::parse(&path)?;

    match state.posts.delete_by_id(id).await? {
        WriteOutcome::Applied => {
            tracing::info!(request_id = %request_id.as_str(), post_id = %id, "post deleted")
        }
        WriteOutcome::NotFoundNoop => {
            tracing::warn!(
                request_id = %request_id.as_str(),
                post_id = %id,
                "delete matched no post"
            )
        }
    }

    Ok(see_other(Action::Delete.redirect_to("/")))
}
