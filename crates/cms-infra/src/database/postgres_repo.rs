//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use cms_core::domain::{
    ContactFilter, ContactMessage, Page, PageRequest, Post, ServicePage, ServiceSummary,
};
use cms_core::error::RepoError;
use cms_core::ports::{ContactRepository, PostRepository, ServiceRepository};

use super::entity::contact::{self, Entity as ContactEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::service_page::{self, Entity as ServicePageEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL service page repository.
pub type PostgresServiceRepository = PostgresBaseRepository<ServicePageEntity>;

/// PostgreSQL contact message repository.
pub type PostgresContactRepository = PostgresBaseRepository<ContactEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, FromQueryResult)]
struct SummaryRow {
    slug: String,
    title: String,
    text: String,
    image: Option<String>,
    icon: Option<String>,
}

impl From<SummaryRow> for ServiceSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            slug: row.slug,
            title: row.title,
            text: row.text,
            image: row.image,
            icon: row.icon,
        }
    }
}

#[async_trait]
impl ServiceRepository for PostgresServiceRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ServicePage>, RepoError> {
        let result = ServicePageEntity::find()
            .filter(service_page::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_summaries(&self) -> Result<Vec<ServiceSummary>, RepoError> {
        // Skip the detail column; it is the bulk of each row.
        let rows = ServicePageEntity::find()
            .select_only()
            .columns([
                service_page::Column::Slug,
                service_page::Column::Title,
                service_page::Column::Text,
                service_page::Column::Image,
                service_page::Column::Icon,
            ])
            .order_by_desc(service_page::Column::CreatedAt)
            .into_model::<SummaryRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<bool, RepoError> {
        let result = ServicePageEntity::delete_many()
            .filter(service_page::Column::Slug.eq(slug))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }
}

/// Escape LIKE metacharacters so user text matches literally.
pub(crate) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn contact_condition(filter: &ContactFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(handled) = filter.handled {
        condition = condition.add(contact::Column::Handled.eq(handled));
    }
    if let Some(needle) = filter.needle() {
        let pattern = format!("%{}%", escape_like(&needle));
        let mut any = Condition::any();
        for column in [
            contact::Column::Name,
            contact::Column::Email,
            contact::Column::Message,
        ] {
            any = any.add(
                Expr::expr(Func::lower(Expr::col(column)))
                    .like(LikeExpr::new(pattern.clone()).escape('\\')),
            );
        }
        condition = condition.add(any);
    }
    condition
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn search(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<Page<ContactMessage>, RepoError> {
        let query = ContactEntity::find().filter(contact_condition(filter));

        let total = query.clone().count(&self.db).await.map_err(map_db_err)?;
        let rows = query
            .order_by_desc(contact::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(total, page = page.page, "Contact search");
        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            total,
            page,
        ))
    }
}
