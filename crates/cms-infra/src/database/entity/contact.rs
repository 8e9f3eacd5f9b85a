//! Contact message entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use cms_core::domain::ContactMessage;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub ip: String,
    pub user_agent: String,
    pub spam_score: i32,
    pub handled: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,
    pub source: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContactMessage {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            message: model.message,
            ip: model.ip,
            user_agent: model.user_agent,
            spam_score: model.spam_score,
            handled: model.handled,
            note: model.note,
            source: model.source,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<ContactMessage> for ActiveModel {
    fn from(message: ContactMessage) -> Self {
        Self {
            id: Set(message.id),
            name: Set(message.name),
            email: Set(message.email),
            phone: Set(message.phone),
            message: Set(message.message),
            ip: Set(message.ip),
            user_agent: Set(message.user_agent),
            spam_score: Set(message.spam_score),
            handled: Set(message.handled),
            note: Set(message.note),
            source: Set(message.source),
            created_at: Set(message.created_at.into()),
            updated_at: Set(message.updated_at.into()),
        }
    }
}
