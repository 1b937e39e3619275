use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Storage-independent handle for a post field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PostField {
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

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    Boolean,
    Timestamp,
}

/// One row of the explicit post schema.
#[derive(Copy, Clone, Debug)]
pub struct FieldDef {
    pub field: PostField,
    /// external (camelCase) name used on the wire and in `sortBy`
    pub name: &'static str,
    pub kind: FieldKind,
    pub nullable: bool,
    pub unique: bool,
    pub sortable: bool,
}

const fn def(field: PostField, name: &'static str, kind: FieldKind, nullable: bool, unique: bool, sortable: bool) -> FieldDef {
    FieldDef { field, name, kind, nullable, unique, sortable }
}

pub const SCHEMA: &[FieldDef] = &[
    def(PostField::Id, "id", FieldKind::Integer, false, true, false),
    def(PostField::Title, "title", FieldKind::Text, false, false, true),
    def(PostField::Slug, "slug", FieldKind::Text, false, true, false),
    def(PostField::Body, "body", FieldKind::Text, false, false, false),
    def(PostField::Excerpt, "excerpt", FieldKind::Text, true, false, false),
    def(PostField::Author, "author", FieldKind::Text, true, false, false),
    def(PostField::FeaturedImage, "featuredImage", FieldKind::Text, true, false, false),
    def(PostField::Tags, "tags", FieldKind::Text, true, false, false),
    def(PostField::Published, "published", FieldKind::Boolean, false, false, false),
    def(PostField::PublishedAt, "publishedAt", FieldKind::Timestamp, true, false, true),
    def(PostField::CreatedAt, "createdAt", FieldKind::Timestamp, false, false, true),
    def(PostField::UpdatedAt, "updatedAt", FieldKind::Timestamp, false, false, true),
];

impl PostField {
    pub fn def(self) -> &'static FieldDef {
        // every variant has exactly one SCHEMA row
        SCHEMA.iter().find(|d| d.field == self).unwrap_or(&SCHEMA[0])
    }

    pub fn from_name(name: &str) -> Option<PostField> {
        SCHEMA.iter().find(|d| d.name == name).map(|d| d.field)
    }

    pub fn column(self) -> Column {
        match self {
            PostField::Id => Column::Id,
            PostField::Title => Column::Title,
            PostField::Slug => Column::Slug,
            PostField::Body => Column::Body,
            PostField::Excerpt => Column::Excerpt,
            PostField::Author => Column::Author,
            PostField::FeaturedImage => Column::FeaturedImage,
            PostField::Tags => Column::Tags,
            PostField::Published => Column::Published,
            PostField::PublishedAt => Column::PublishedAt,
            PostField::CreatedAt => Column::CreatedAt,
            PostField::UpdatedAt => Column::UpdatedAt,
        }
    }
}

/// Fields that may be used for `sortBy`.
pub fn sortable_fields() -> impl Iterator<Item = &'static FieldDef> {
    SCHEMA.iter().filter(|d| d.sortable)
}

/// Fields the store must keep unique, besides the primary key.
pub fn unique_fields() -> impl Iterator<Item = &'static FieldDef> {
    SCHEMA.iter().filter(|d| d.unique && d.field != PostField::Id)
}

pub fn validate_title(t: &str) -> Result<(), errors::ModelError> {
    if t.trim().is_empty() {
        return Err(errors::ModelError::Validation("title must not be empty".into()));
    }
    Ok(())
}

pub fn validate_slug(s: &str) -> Result<(), errors::ModelError> {
    if s.trim().is_empty() {
        return Err(errors::ModelError::Validation("slug must not be empty".into()));
    }
    Ok(())
}
