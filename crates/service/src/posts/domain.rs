use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use models::post::PostField;

/// A blog post as the service layer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Text value of a field, `None` for null or non-text fields.
    pub fn text(&self, field: PostField) -> Option<&str> {
        match field {
            PostField::Title => Some(&self.title),
            PostField::Slug => Some(&self.slug),
            PostField::Body => Some(&self.body),
            PostField::Excerpt => self.excerpt.as_deref(),
            PostField::Author => self.author.as_deref(),
            PostField::FeaturedImage => self.featured_image.as_deref(),
            PostField::Tags => self.tags.as_deref(),
            _ => None,
        }
    }

    pub fn flag(&self, field: PostField) -> Option<bool> {
        match field {
            PostField::Published => Some(self.published),
            _ => None,
        }
    }

    pub fn timestamp(&self, field: PostField) -> Option<DateTime<Utc>> {
        match field {
            PostField::PublishedAt => self.published_at,
            PostField::CreatedAt => Some(self.created_at),
            PostField::UpdatedAt => Some(self.updated_at),
            _ => None,
        }
    }
}

/// Row handed to the store on insert; id and audit timestamps are the store's job.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

/// Create request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    pub title: String,
    pub slug: String,
    #[serde(alias = "content")]
    pub body: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default, alias = "isPublished")]
    pub published: bool,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, alias = "content")]
    pub body: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default, alias = "isPublished")]
    pub published: Option<bool>,
}

/// Raw list parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListParams {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, alias = "isPublished")]
    pub published: Option<bool>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
}
