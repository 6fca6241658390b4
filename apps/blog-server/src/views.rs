//! View models and askama templates.

use actix_web::{HttpResponse, http::StatusCode, http::header::ContentType};
use askama::Template;
use chrono::Timelike;

use quill_core::domain::{Post, PostId};
use quill_shared::PostForm;

use crate::middleware::error::{AppError, AppResult};

const EXCERPT_CHARS: usize = 180;

/// Render `template` as an HTML response with `status`.
pub fn render<T: Template>(template: T, status: StatusCode) -> AppResult<HttpResponse> {
    let body = template
        .render()
        .map_err(|err| AppError::Internal(format!("Template rendering failed: {err}")))?;

    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body))
}

/// Post fields as the templates display them.
#[derive(Debug, Clone)]
pub struct PostView {
    pub id: String,
    pub headline: String,
    pub author: String,
    pub published_label: String,
    pub published_input: String,
    pub featured_image: String,
    pub content: String,
    pub excerpt: String,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        let excerpt = if post.content.chars().count() > EXCERPT_CHARS {
            let mut cut: String = post.content.chars().take(EXCERPT_CHARS).collect();
            cut.push('…');
            cut
        } else {
            post.content.clone()
        };

        // Seconds survive an unchanged edit form round trip.
        let input_format = if post.published_date.second() == 0 {
            "%Y-%m-%dT%H:%M"
        } else {
            "%Y-%m-%dT%H:%M:%S"
        };

        Self {
            id: post.id.to_string(),
            published_label: post.published_date.format("%B %-d, %Y").to_string(),
            published_input: post.published_date.format(input_format).to_string(),
            headline: post.headline,
            author: post.author,
            featured_image: post.featured_image,
            content: post.content,
            excerpt,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub banner: Option<&'static str>,
    pub featured: Option<PostView>,
    pub posts: Vec<PostView>,
}

#[derive(Template)]
#[template(path = "show.html")]
pub struct ShowTemplate {
    pub banner: Option<&'static str>,
    pub post: PostView,
}

/// Create and edit forms share one template.
#[derive(Template)]
#[template(path = "form.html")]
pub struct FormTemplate {
    pub heading: &'static str,
    pub action_url: String,
    pub submit_label: &'static str,
    pub cancel_url: String,
    pub form: PostForm,
    pub current_image: String,
    pub error: Option<String>,
}

impl FormTemplate {
    pub fn create(form: PostForm, error: Option<String>) -> Self {
        Self {
            heading: "New post",
            action_url: "/posts".to_string(),
            submit_label: "Publish",
            cancel_url: "/".to_string(),
            form,
            current_image: String::new(),
            error,
        }
    }

    pub fn edit(
        id: PostId,
        form: PostForm,
        current_image: String,
        error: Option<String>,
    ) -> Self {
        Self {
            heading: "Edit post",
            action_url: format!("/posts/{id}?_method=put"),
            submit_label: "Save changes",
            cancel_url: format!("/posts/{id}"),
            form,
            current_image,
            error,
        }
    }
}

/// Edit form values taken from a stored post.
pub fn form_from_view(post: &PostView) -> PostForm {
    PostForm {
        headline: post.headline.clone(),
        author: post.author.clone(),
        published_date: post.published_input.clone(),
        content: post.content.clone(),
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub status: u16,
    pub title: &'a str,
    pub detail: &'a str,
}
