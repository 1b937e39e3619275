use crate::post;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, NotSet, QueryFilter, Set};
use anyhow::Result;
use uuid::Uuid;

use super::try_setup_db;

fn new_post(slug: &str) -> post::ActiveModel {
    let now = Utc::now().into();
    post::ActiveModel {
        id: NotSet,
        title: Set("Crud title".into()),
        slug: Set(slug.to_string()),
        body: Set("crud body".into()),
        excerpt: Set(None),
        author: Set(Some("crud".into())),
        featured_image: Set(None),
        tags: Set(Some("rust,orm".into())),
        published: Set(false),
        published_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Test post CRUD operations
#[tokio::test]
async fn test_post_crud() -> Result<()> {
    let Some(db) = try_setup_db().await else { return Ok(()) };

    let slug = format!("crud-{}", Uuid::new_v4());
    let created = new_post(&slug).insert(&db).await?;
    assert!(created.id > 0);
    assert_eq!(created.slug, slug);

    let found = post::Entity::find()
        .filter(post::Column::Slug.eq(slug.clone()))
        .one(&db)
        .await?;
    assert_eq!(found.map(|p| p.id), Some(created.id));

    let mut am: post::ActiveModel = created.clone().into();
    am.title = Set("Updated".into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.title, "Updated");

    post::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(post::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

/// The unique index rejects a second row with the same slug
#[tokio::test]
async fn test_slug_unique_index() -> Result<()> {
    let Some(db) = try_setup_db().await else { return Ok(()) };

    let slug = format!("uniq-{}", Uuid::new_v4());
    let first = new_post(&slug).insert(&db).await?;
    let err = new_post(&slug).insert(&db).await.expect_err("duplicate slug must fail");
    assert!(matches!(err.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))));

    post::Entity::delete_by_id(first.id).exec(&db).await?;
    Ok(())
}
