use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use common::types::Page;
use models::post::{validate_slug, validate_title};

use super::domain::{CreatePostInput, NewPost, Post, PostListParams, UpdatePostInput};
use super::filter::build_query;
use super::repository::{PostRepository, RepoError};
use crate::errors::ServiceError;

pub const SLUG_TAKEN: &str = "slug already exists";
pub const POST_NOT_FOUND: &str = "post not found";

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        match e {
            // slug is the only unique business field, so every violation is a slug clash
            RepoError::UniqueViolation(_) => ServiceError::Conflict(SLUG_TAKEN.into()),
            RepoError::Backend(msg) => ServiceError::Internal(msg),
        }
    }
}

/// Post lifecycle: creation, edits, publish state and deletion.
///
/// Keeps slugs unique and `published_at` set exactly while a post is published.
/// Holds no post state between calls.
pub struct PostService<R: PostRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: PostRepository + ?Sized> PostService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a post; a `published` post is stamped with the current time.
    ///
    /// # Examples
    /// ```
    /// use service::posts::{domain::CreatePostInput, repository::memory::InMemoryPostRepository, PostService};
    /// use std::sync::Arc;
    /// let svc = PostService::new(Arc::new(InMemoryPostRepository::new()));
    /// let input = CreatePostInput {
    ///     title: "Hello".into(), slug: "hello".into(), body: "first post".into(),
    ///     excerpt: None, author: None, featured_image: None, tags: None, published: false,
    /// };
    /// let post = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(post.slug, "hello");
    /// assert!(post.published_at.is_none());
    /// ```
    #[instrument(skip(self, input), fields(slug = %input.slug))]
    pub async fn create(&self, input: CreatePostInput) -> Result<Post, ServiceError> {
        validate_title(&input.title)?;
        validate_slug(&input.slug)?;
        if self.repo.get_by_slug(&input.slug).await?.is_some() {
            warn!("slug_conflict");
            return Err(ServiceError::Conflict(SLUG_TAKEN.into()));
        }

        let new = NewPost {
            published_at: input.published.then(Utc::now),
            title: input.title,
            slug: input.slug,
            body: input.body,
            excerpt: input.excerpt,
            author: input.author,
            featured_image: input.featured_image,
            tags: input.tags,
            published: input.published,
        };
        let post = self.repo.insert(new).await?;
        info!(post_id = post.id, slug = %post.slug, published = post.published, "post_created");
        Ok(post)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Post, ServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(POST_NOT_FOUND.into()))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Post, ServiceError> {
        self.repo
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| ServiceError::NotFound(POST_NOT_FOUND.into()))
    }

    /// Filtered, sorted page of posts; `total` counts every match.
    #[instrument(skip(self))]
    pub async fn list(&self, params: &PostListParams) -> Result<Page<Post>, ServiceError> {
        let query = build_query(params)?;
        let (items, total) = self.repo.list(&query).await?;
        debug!(returned = items.len(), total, "posts_listed");
        Ok(Page { items, total, page: query.pagination.page, limit: query.pagination.limit })
    }

    /// Same as [`list`](Self::list) restricted to published posts.
    pub async fn list_published(&self, params: &PostListParams) -> Result<Page<Post>, ServiceError> {
        let params = PostListParams { published: Some(true), ..params.clone() };
        self.list(&params).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: UpdatePostInput) -> Result<Post, ServiceError> {
        let mut post = self.find_by_id(id).await?;

        if let Some(slug) = patch.slug.as_deref() {
            if slug != post.slug {
                validate_slug(slug)?;
                if let Some(other) = self.repo.get_by_slug(slug).await? {
                    if other.id != id {
                        warn!(slug, "slug_conflict");
                        return Err(ServiceError::Conflict(SLUG_TAKEN.into()));
                    }
                }
            }
        }
        if let Some(title) = patch.title.as_deref() {
            validate_title(title)?;
        }

        match patch.published {
            Some(true) if !post.published => post.published_at = Some(Utc::now()),
            Some(false) => post.published_at = None,
            _ => {}
        }

        let UpdatePostInput { title, slug, body, excerpt, author, featured_image, tags, published } = patch;
        if let Some(v) = title { post.title = v; }
        if let Some(v) = slug { post.slug = v; }
        if let Some(v) = body { post.body = v; }
        if let Some(v) = excerpt { post.excerpt = Some(v); }
        if let Some(v) = author { post.author = Some(v); }
        if let Some(v) = featured_image { post.featured_image = Some(v); }
        if let Some(v) = tags { post.tags = Some(v); }
        if let Some(v) = published { post.published = v; }

        let updated = self
            .repo
            .update(post)
            .await?
            .ok_or_else(|| ServiceError::NotFound(POST_NOT_FOUND.into()))?;
        info!(post_id = updated.id, slug = %updated.slug, published = updated.published, "post_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: i64) -> Result<(), ServiceError> {
        let post = self.find_by_id(id).await?;
        if !self.repo.delete(post.id).await? {
            return Err(ServiceError::NotFound(POST_NOT_FOUND.into()));
        }
        info!(post_id = post.id, slug = %post.slug, "post_removed");
        Ok(())
    }

    pub async fn publish(&self, id: i64) -> Result<Post, ServiceError> {
        self.update(id, UpdatePostInput { published: Some(true), ..Default::default() }).await
    }

    pub async fn unpublish(&self, id: i64) -> Result<Post, ServiceError> {
        self.update(id, UpdatePostInput { published: Some(false), ..Default::default() }).await
    }
}
