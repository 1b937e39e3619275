//! Create `post` table.
//! Slug uniqueness is enforced here; the service layer check is only a fast path.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Post::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Post::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Post::Slug).string_len(255).not_null())
                    .col(ColumnDef::new(Post::Body).text().not_null())
                    .col(ColumnDef::new(Post::Excerpt).string_len(500).null())
                    .col(ColumnDef::new(Post::Author).string_len(100).null())
                    .col(ColumnDef::new(Post::FeaturedImage).string_len(1024).null())
                    .col(ColumnDef::new(Post::Tags).string_len(512).null())
                    .col(ColumnDef::new(Post::Published).boolean().not_null().default(false))
                    .col(ColumnDef::new(Post::PublishedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Post::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Post::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_post_slug")
                    .table(Post::Table)
                    .col(Post::Slug)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Post::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Post {
    Table,
    Id,
    Title,
    Slug,
    Body,
    Excerpt,
    Author,
    FeaturedImage,
    Tags,
    Published,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}
