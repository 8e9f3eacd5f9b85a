//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use cms_core::domain::Post;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub featured: bool,
    pub cover: String,
    pub author: String,
    pub read_time: String,
    pub views: String,
    pub date: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            category: model.category,
            excerpt: model.excerpt,
            content: model.content,
            tags: serde_json::from_value(model.tags).unwrap_or_default(),
            featured: model.featured,
            cover: model.cover,
            author: model.author,
            read_time: model.read_time,
            views: model.views,
            date: model.date,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            category: Set(post.category),
            excerpt: Set(post.excerpt),
            content: Set(post.content),
            tags: Set(Json::from(post.tags)),
            featured: Set(post.featured),
            cover: Set(post.cover),
            author: Set(post.author),
            read_time: Set(post.read_time),
            views: Set(post.views),
            date: Set(post.date),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
