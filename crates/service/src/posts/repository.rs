use async_trait::async_trait;
use thiserror::Error;

use super::domain::{NewPost, Post};
use super::filter::PostQuery;

/// Failures reported by a post store.
#[derive(Debug, Error)]
pub enum RepoError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("storage error: {0}")]
    Backend(String),
}

/// Persistence port for posts. Absence is reported as `Ok(None)` / `Ok(false)`,
/// never as an error.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;
    /// Overwrite the stored row with `post`; `Ok(None)` when the id no longer exists.
    async fn update(&self, post: Post) -> Result<Option<Post>, RepoError>;
    async fn delete(&self, id: i64) -> Result<bool, RepoError>;
    /// One page of matching posts plus the total number of matches ignoring paging.
    async fn list(&self, query: &PostQuery) -> Result<(Vec<Post>, u64), RepoError>;
}

/// In-memory store for tests, demos and doc examples
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;

    use chrono::Utc;
    use models::post::unique_fields;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryPostRepository {
        inner: RwLock<State>,
    }

    #[derive(Default)]
    struct State {
        rows: BTreeMap<i64, Post>,
        last_id: i64,
    }

    impl State {
        /// First unique field of `candidate` already held by another row.
        fn unique_clash(&self, candidate: &Post) -> Option<&'static str> {
            unique_fields().find_map(|def| {
                let value = candidate.text(def.field)?;
                self.rows
                    .values()
                    .any(|p| p.id != candidate.id && p.text(def.field) == Some(value))
                    .then_some(def.name)
            })
        }
    }

    impl InMemoryPostRepository {
        pub fn new() -> Self { Self::default() }

        pub async fn len(&self) -> usize { self.inner.read().await.rows.len() }

        pub async fn is_empty(&self) -> bool { self.len().await == 0 }
    }

    #[async_trait]
    impl PostRepository for InMemoryPostRepository {
        async fn get_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
            Ok(self.inner.read().await.rows.get(&id).cloned())
        }

        async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
            let state = self.inner.read().await;
            Ok(state.rows.values().find(|p| p.slug == slug).cloned())
        }

        async fn insert(&self, new: NewPost) -> Result<Post, RepoError> {
            let mut state = self.inner.write().await;
            let now = Utc::now();
            let post = Post {
                id: state.last_id + 1,
                title: new.title,
                slug: new.slug,
                body: new.body,
                excerpt: new.excerpt,
                author: new.author,
                featured_image: new.featured_image,
                tags: new.tags,
                published: new.published,
                published_at: new.published_at,
                created_at: now,
                updated_at: now,
            };
            if let Some(field) = state.unique_clash(&post) {
                return Err(RepoError::UniqueViolation(format!("post.{field}")));
            }
            state.last_id = post.id;
            state.rows.insert(post.id, post.clone());
            Ok(post)
        }

        async fn update(&self, mut post: Post) -> Result<Option<Post>, RepoError> {
            let mut state = self.inner.write().await;
            let Some(existing) = state.rows.get(&post.id) else { return Ok(None) };
            if let Some(field) = state.unique_clash(&post) {
                return Err(RepoError::UniqueViolation(format!("post.{field}")));
            }
            post.created_at = existing.created_at;
            post.updated_at = Utc::now();
            state.rows.insert(post.id, post.clone());
            Ok(Some(post))
        }

        async fn delete(&self, id: i64) -> Result<bool, RepoError> {
            Ok(self.inner.write().await.rows.remove(&id).is_some())
        }

        async fn list(&self, query: &PostQuery) -> Result<(Vec<Post>, u64), RepoError> {
            let state = self.inner.read().await;
            let mut matched: Vec<&Post> = state.rows.values().filter(|p| query.filter.matches(p)).collect();
            let total = matched.len() as u64;
            matched.sort_by(|a, b| query.sort.compare(a, b));
            let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
            let limit = usize::try_from(query.limit()).unwrap_or(usize::MAX);
            let page = matched.into_iter().skip(offset).take(limit).cloned().collect();
            Ok((page, total))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::posts::domain::PostListParams;
        use crate::posts::filter::build_query;

        fn new_post(slug: &str) -> NewPost {
            NewPost {
                title: format!("Title {slug}"),
                slug: slug.into(),
                body: "body".into(),
                excerpt: None,
                author: None,
                featured_image: None,
                tags: None,
                published: false,
                published_at: None,
            }
        }

        #[tokio::test]
        async fn insert_assigns_increasing_ids_and_timestamps() {
            let repo = InMemoryPostRepository::new();
            let a = repo.insert(new_post("a")).await.unwrap();
            let b = repo.insert(new_post("b")).await.unwrap();
            assert_eq!((a.id, b.id), (1, 2));
            assert_eq!(a.created_at, a.updated_at);
            assert_eq!(repo.len().await, 2);
        }

        #[tokio::test]
        async fn duplicate_slug_is_a_unique_violation() {
            let repo = InMemoryPostRepository::new();
            repo.insert(new_post("same")).await.unwrap();
            let err = repo.insert(new_post("same")).await.unwrap_err();
            assert!(matches!(err, RepoError::UniqueViolation(ref f) if f == "post.slug"));
        }

        #[tokio::test]
        async fn update_checks_uniqueness_against_other_rows_only() {
            let repo = InMemoryPostRepository::new();
            let a = repo.insert(new_post("a")).await.unwrap();
            repo.insert(new_post("b")).await.unwrap();

            let mut same = a.clone();
            same.title = "renamed".into();
            assert!(repo.update(same).await.unwrap().is_some());

            let mut clash = a.clone();
            clash.slug = "b".into();
            assert!(matches!(repo.update(clash).await, Err(RepoError::UniqueViolation(_))));
        }

        #[tokio::test]
        async fn update_of_missing_row_is_none() {
            let repo = InMemoryPostRepository::new();
            let a = repo.insert(new_post("a")).await.unwrap();
            assert!(repo.delete(a.id).await.unwrap());
            assert!(repo.update(a).await.unwrap().is_none());
            assert!(!repo.delete(1).await.unwrap());
        }

        #[tokio::test]
        async fn list_counts_all_matches_but_returns_one_page() {
            let repo = InMemoryPostRepository::new();
            for i in 0..7 {
                repo.insert(new_post(&format!("s{i}"))).await.unwrap();
            }
            let q = build_query(&PostListParams { page: Some(2), limit: Some(3), ..Default::default() }).unwrap();
            let (items, total) = repo.list(&q).await.unwrap();
            assert_eq!(total, 7);
            // newest first: ids 7..=1, page 2 holds 4, 3, 2
            assert_eq!(items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![4, 3, 2]);
        }
    }
}
