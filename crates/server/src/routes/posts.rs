//! Post resource handlers. Handlers return bare values; the envelope layer wraps them.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use common::types::Page;
use service::posts::domain::{CreatePostInput, Post, PostListParams, UpdatePostInput};

use super::ServerState;
use crate::errors::ApiResult;
use crate::observability;

#[utoipa::path(
    post, path = "/posts", tag = "posts",
    request_body = crate::openapi::CreatePostRequestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::PostDoc),
        (status = 400, description = "Invalid input or slug already exists")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreatePostInput>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let post = state.posts.create(input).await?;
    observability::record_post_created();
    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    get, path = "/posts", tag = "posts",
    params(crate::openapi::ListPostsQueryDoc),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PostPageDoc),
        (status = 400, description = "Invalid paging")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<PostListParams>,
) -> ApiResult<Json<Page<Post>>> {
    Ok(Json(state.posts.list(&params).await?))
}

#[utoipa::path(
    get, path = "/posts/published", tag = "posts",
    params(crate::openapi::ListPostsQueryDoc),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PostPageDoc),
        (status = 400, description = "Invalid paging")
    )
)]
pub async fn list_published(
    State(state): State<ServerState>,
    Query(params): Query<PostListParams>,
) -> ApiResult<Json<Page<Post>>> {
    Ok(Json(state.posts.list_published(&params).await?))
}

#[utoipa::path(
    get, path = "/posts/{id}", tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    responses((status = 200, description = "OK", body = crate::openapi::PostDoc), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i64>) -> ApiResult<Json<Post>> {
    Ok(Json(state.posts.find_by_id(id).await?))
}

#[utoipa::path(
    get, path = "/posts/slug/{slug}", tag = "posts",
    params(("slug" = String, Path, description = "Post slug")),
    responses((status = 200, description = "OK", body = crate::openapi::PostDoc), (status = 404, description = "Not Found"))
)]
pub async fn get_by_slug(State(state): State<ServerState>, Path(slug): Path<String>) -> ApiResult<Json<Post>> {
    Ok(Json(state.posts.find_by_slug(&slug).await?))
}

#[utoipa::path(
    patch, path = "/posts/{id}", tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    request_body = crate::openapi::UpdatePostRequestDoc,
    responses(
        (status = 200, description = "OK", body = crate::openapi::PostDoc),
        (status = 400, description = "Invalid input or slug already exists"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(patch): Json<UpdatePostInput>,
) -> ApiResult<Json<Post>> {
    Ok(Json(state.posts.update(id, patch).await?))
}

#[utoipa::path(
    delete, path = "/posts/{id}", tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn remove(State(state): State<ServerState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.posts.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch, path = "/posts/{id}/publish", tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    responses((status = 200, description = "OK", body = crate::openapi::PostDoc), (status = 404, description = "Not Found"))
)]
pub async fn publish(State(state): State<ServerState>, Path(id): Path<i64>) -> ApiResult<Json<Post>> {
    Ok(Json(state.posts.publish(id).await?))
}

#[utoipa::path(
    patch, path = "/posts/{id}/unpublish", tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    responses((status = 200, description = "OK", body = crate::openapi::PostDoc), (status = 404, description = "Not Found"))
)]
pub async fn unpublish(State(state): State<ServerState>, Path(id): Path<i64>) -> ApiResult<Json<Post>> {
    Ok(Json(state.posts.unpublish(id).await?))
}
