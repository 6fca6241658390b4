//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use quill_core::domain::{NewPost, Post, PostId};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub headline: String,
    pub author: String,
    pub published_date: DateTimeWithTimeZone,
    pub featured_image: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: PostId::from(model.id),
            headline: model.headline,
            author: model.author,
            published_date: model.published_date.into(),
            featured_image: model.featured_image,
            content: model.content,
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id.as_uuid()),
            headline: Set(post.headline),
            author: Set(post.author),
            published_date: Set(post.published_date.into()),
            featured_image: Set(post.featured_image),
            content: Set(post.content),
            created_at: Set(post.created_at.into()),
        }
    }
}

/// Column assignments for a full replace. `id` and `created_at` stay untouched.
pub(crate) fn replacement(record: NewPost) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        headline: Set(record.headline),
        author: Set(record.author),
        published_date: Set(record.published_date.into()),
        featured_image: Set(record.featured_image),
        content: Set(record.content),
        created_at: NotSet,
    }
}
