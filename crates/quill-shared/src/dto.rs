//! Data Transfer Objects - form and query types for the HTML routes.

use serde::Deserialize;

/// Text fields of the create/edit post form.
///
/// `published_date` is kept as submitted so a rejected form can be
/// re-rendered with the user's input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub headline: String,
    pub author: String,
    /// Submitted as `publishedDate`.
    pub published_date: String,
    pub content: String,
}

impl PostForm {
    /// Assign a named multipart text field. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "headline" => &mut self.headline,
            "author" => &mut self.author,
            "publishedDate" => &mut self.published_date,
            "content" => &mut self.content,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// `success` / `action` flags carried on redirects back to the views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusQuery {
    pub success: Option<String>,
    pub action: Option<String>,
}

impl StatusQuery {
    /// Banner text for a successful action, if the flags ask for one.
    pub fn banner(&self) -> Option<&'static str> {
        if self.success.as_deref() != Some("true") {
            return None;
        }

        let message = match self.action.as_deref().and_then(Action::parse) {
            Some(Action::Create) => "Post created.",
            Some(Action::Update) => "Post updated.",
            Some(Action::Delete) => "Post deleted.",
            None => "Done.",
        };
        Some(message)
    }
}

/// Mutating actions reported back through [`StatusQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "create" => Some(Action::Create),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            _ => None,
        }
    }

    /// Redirect target under `path` announcing this action's success.
    pub fn redirect_to(&self, path: &str) -> String {
        format!("{path}?success=true&action={}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_requires_success_flag() {
        let query = StatusQuery {
            success: None,
            action: Some("create".to_string()),
        };
        assert_eq!(query.banner(), None);

        let query = StatusQuery {
            success: Some("false".to_string()),
            action: Some("create".to_string()),
        };
        assert_eq!(query.banner(), None);
    }

    #[test]
    fn test_banner_per_action() {
        let banner = |action: &str| {
            StatusQuery {
                success: Some("true".to_string()),
                action: Some(action.to_string()),
            }
            .banner()
        };

        assert_eq!(banner("create"), Some("Post created."));
        assert_eq!(banner("update"), Some("Post updated."));
        assert_eq!(banner("delete"), Some("Post deleted."));
        assert_eq!(banner("publish"), Some("Done."));
    }

    #[test]
    fn test_redirect_targets() {
        assert_eq!(
            Action::Create.redirect_to("/"),
            "/?success=true&action=create"
        );
        assert_eq!(
            Action::Update.redirect_to("/posts/abc"),
            "/posts/abc?success=true&action=update"
        );
    }

    #[test]
    fn test_form_uses_camel_case_date_field() {
        let mut form = PostForm::default();
        assert!(form.set_field("publishedDate", "2021-08-09".to_string()));
        assert!(!form.set_field("featuredImage", "x".to_string()));
        assert_eq!(form.published_date, "2021-08-09");
    }
}
