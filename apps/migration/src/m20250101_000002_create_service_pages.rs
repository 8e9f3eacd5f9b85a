use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServicePages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServicePages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServicePages::Slug).string().not_null())
                    .col(ColumnDef::new(ServicePages::Title).string().not_null())
                    .col(ColumnDef::new(ServicePages::Text).text().not_null())
                    .col(ColumnDef::new(ServicePages::Image).string().null())
                    .col(ColumnDef::new(ServicePages::Icon).string().null())
                    .col(ColumnDef::new(ServicePages::Detail).json_binary().null())
                    .col(
                        ColumnDef::new(ServicePages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServicePages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups are by slug; the unique index also backs the 409 on reuse.
        manager
            .create_index(
                Index::create()
                    .name("idx_service_pages_slug")
                    .table(ServicePages::Table)
                    .col(ServicePages::Slug)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServicePages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServicePages {
    Table,
    Id,
    Slug,
    Title,
    Text,
    Image,
    Icon,
    Detail,
    CreatedAt,
    UpdatedAt,
}
