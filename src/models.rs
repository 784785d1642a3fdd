// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! Request and response bodies for the HTTP API.
//!
//! Secret material (passwords, password hashes) appears only in request
//! types; no response type carries it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::storage::{Account, Post};

/// Body for `POST /v1/register`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Unique email address (compared case-sensitively, as stored)
    pub email: String,
    /// Plaintext password; hashed before it touches the store
    pub password: String,
}

/// Body for `POST /v1/login`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of an account. Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AccountResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
        }
    }
}

/// Successful login result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
}

/// Body for `POST /v1/posts`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// Body for `PUT /v1/posts/{post_id}`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
}

/// Full view of a post, returned to its owner on mutation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PostResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            owner_id: post.owner_id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
        }
    }
}

/// Public listing entry: a post joined with its author's display name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
}

/// Entry for the authenticated `GET /v1/users` listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AccountWithPosts {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub posts: Vec<PostResponse>,
}
