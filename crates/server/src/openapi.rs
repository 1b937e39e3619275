use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PostDoc {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub featured_image: Option<String>,
    /// comma-separated
    pub tags: Option<String>,
    pub published: bool,
    /// RFC 3339, null while unpublished
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct PostPageDoc {
    pub items: Vec<PostDoc>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreatePostRequestDoc {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Option<String>,
    pub published: Option<bool>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdatePostRequestDoc {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Option<String>,
    pub published: Option<bool>,
}

#[derive(IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListPostsQueryDoc {
    /// 1-based, default 1
    pub page: Option<u64>,
    /// 1..=100, default 10
    pub limit: Option<u64>,
    /// substring of title, body or excerpt
    pub search: Option<String>,
    pub published: Option<bool>,
    pub author: Option<String>,
    pub tags: Option<String>,
    /// createdAt | updatedAt | publishedAt | title
    pub sort_by: Option<String>,
    /// ASC | DESC
    pub sort_order: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::posts::create,
        crate::routes::posts::list,
        crate::routes::posts::list_published,
        crate::routes::posts::get,
        crate::routes::posts::get_by_slug,
        crate::routes::posts::update,
        crate::routes::posts::remove,
        crate::routes::posts::publish,
        crate::routes::posts::unpublish,
    ),
    components(
        schemas(
            HealthResponse,
            PostDoc,
            PostPageDoc,
            CreatePostRequestDoc,
            UpdatePostRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "posts")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_post_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for p in ["/health", "/posts", "/posts/{id}", "/posts/slug/{slug}", "/posts/{id}/publish"] {
            assert!(paths.iter().any(|k| k == p), "missing {p}");
        }
    }
}
