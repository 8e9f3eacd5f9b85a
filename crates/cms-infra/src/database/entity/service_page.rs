//! Service page entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use cms_core::domain::ServicePage;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "service_pages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub image: Option<String>,
    pub icon: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub detail: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ServicePage {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            title: model.title,
            text: model.text,
            image: model.image,
            icon: model.icon,
            detail: model
                .detail
                .and_then(|json| serde_json::from_value(json).ok()),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<ServicePage> for ActiveModel {
    fn from(page: ServicePage) -> Self {
        Self {
            id: Set(page.id),
            slug: Set(page.slug),
            title: Set(page.title),
            text: Set(page.text),
            image: Set(page.image),
            icon: Set(page.icon),
            detail: Set(page
                .detail
                .and_then(|detail| serde_json::to_value(detail).ok())),
            created_at: Set(page.created_at.into()),
            updated_at: Set(page.updated_at.into()),
        }
    }
}
