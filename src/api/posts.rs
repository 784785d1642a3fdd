// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! Post endpoints.
//!
//! Listing is public; creation, update, and deletion require a bearer
//! token. Mutations go through the repository's owner-conditional
//! operations, so a non-owner gets the same 403 whether the post exists or
//! not.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreatePostRequest, PostResponse, PostWithAuthor, UpdatePostRequest},
    state::AppState,
    storage::{AccountRepository, PostRepository},
};

/// List all posts with their author's display name. Public.
#[utoipa::path(
    get,
    path = "/v1/posts",
    tag = "Posts",
    responses((status = 200, description = "All posts", body = [PostWithAuthor]))
)]
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostWithAuthor>>, ApiError> {
    let posts = PostRepository::new(&state.db).list_all()?;
    let authors: HashMap<Uuid, String> = AccountRepository::new(&state.db)
        .list_all()?
        .into_iter()
        .map(|account| (account.id, account.name))
        .collect();

    let listing = posts
        .into_iter()
        .filter_map(|post| {
            // Cascade deletion removes orphans; an unmatched owner here
            // would be a bug, not a display case.
            let author = authors.get(&post.owner_id)?.clone();
            Some(PostWithAuthor {
                id: post.id,
                title: post.title,
                content: post.content,
                author,
            })
        })
        .collect();

    Ok(Json(listing))
}

/// Create a post owned by the authenticated account.
#[utoipa::path(
    post,
    path = "/v1/posts",
    request_body = CreatePostRequest,
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn create_post(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let post =
        PostRepository::new(&state.db).create(user.account_id, &request.title, &request.content)?;
    tracing::info!(post_id = %post.id, owner_id = %post.owner_id, "post created");
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// Update a post. Owner only.
#[utoipa::path(
    put,
    path = "/v1/posts/{post_id}",
    params(("post_id" = Uuid, Path, description = "Identifier of the post to update")),
    request_body = UpdatePostRequest,
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Post not found or not owned by the caller"),
    )
)]
pub async fn update_post(
    Auth(user): Auth,
    Path(post_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let updated = PostRepository::new(&state.db).update_owned(
        post_id,
        user.account_id,
        &request.title,
        &request.content,
    )?;

    match updated {
        Some(post) => Ok(Json(post.into())),
        None => Err(forbidden()),
    }
}

/// Delete a post. Owner only. Returns the deleted post.
#[utoipa::path(
    delete,
    path = "/v1/posts/{post_id}",
    params(("post_id" = Uuid, Path, description = "Identifier of the post to delete")),
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Deleted post", body = PostResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Post not found or not owned by the caller"),
    )
)]
pub async fn delete_post(
    Auth(user): Auth,
    Path(post_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<PostResponse>, ApiError> {
    let deleted = PostRepository::new(&state.db).delete_owned(post_id, user.account_id)?;

    match deleted {
        Some(post) => {
            tracing::info!(post_id = %post.id, "post deleted");
            Ok(Json(post.into()))
        }
        None => Err(forbidden()),
    }
}

// One message for "missing" and "not owned": existence must not leak.
fn forbidden() -> ApiError {
    ApiError::forbidden("Post not found or not owned by the authenticated account")
}
