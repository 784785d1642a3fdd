// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! Post repository and the ownership guard.
//!
//! Mutations on a post are owner-conditional: the owner comparison and the
//! write happen inside a single redb write transaction, so there is no
//! fetch-then-check race with a concurrent mutation. A failed condition
//! returns `None`, which deliberately does not distinguish "no such post"
//! from "not your post".

use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::database::{owner_index_bounds, owner_index_key, POSTS, POST_OWNER_INDEX};
use super::{Database, StorageResult};

/// Stored post record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Unique post identifier
    pub id: Uuid,
    /// Owning account; immutable after creation
    pub owner_id: Uuid,
    /// Title
    pub title: String,
    /// Body content
    pub content: String,
    /// When the post was created
    pub created_at: DateTime<Utc>,
}

/// Repository for post operations.
pub struct PostRepository<'a> {
    db: &'a Database,
}

impl<'a> PostRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a post owned by `owner_id`.
    pub fn create(&self, owner_id: Uuid, title: &str, content: &str) -> StorageResult<Post> {
        let post = Post {
            id: Uuid::new_v4(),
            owner_id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_vec(&post)?;
        let id_str = post.id.to_string();
        let owner_str = owner_id.to_string();

        let write_txn = self.db.db.begin_write()?;
        {
            let mut posts = write_txn.open_table(POSTS)?;
            posts.insert(id_str.as_str(), json.as_slice())?;

            let mut owner_index = write_txn.open_table(POST_OWNER_INDEX)?;
            owner_index.insert(
                owner_index_key(&owner_str, &id_str).as_str(),
                id_str.as_str(),
            )?;
        }
        write_txn.commit()?;

        Ok(post)
    }

    /// Look up a post by ID.
    pub fn get(&self, post_id: Uuid) -> StorageResult<Option<Post>> {
        let read_txn = self.db.db.begin_read()?;
        let posts = read_txn.open_table(POSTS)?;
        match posts.get(post_id.to_string().as_str())? {
            Some(raw) => Ok(Some(serde_json::from_slice(raw.value())?)),
            None => Ok(None),
        }
    }

    /// List every post.
    pub fn list_all(&self) -> StorageResult<Vec<Post>> {
        let read_txn = self.db.db.begin_read()?;
        let posts = read_txn.open_table(POSTS)?;

        let mut result = Vec::new();
        for entry in posts.iter()? {
            let (_, raw) = entry?;
            result.push(serde_json::from_slice(raw.value())?);
        }
        Ok(result)
    }

    /// List all posts owned by one account.
    pub fn list_by_owner(&self, owner_id: Uuid) -> StorageResult<Vec<Post>> {
        let read_txn = self.db.db.begin_read()?;
        let owner_index = read_txn.open_table(POST_OWNER_INDEX)?;
        let posts = read_txn.open_table(POSTS)?;

        let (start, end) = owner_index_bounds(&owner_id.to_string());
        let mut result = Vec::new();
        for entry in owner_index.range(start.as_str()..end.as_str())? {
            let (_, post_id) = entry?;
            if let Some(raw) = posts.get(post_id.value())? {
                result.push(serde_json::from_slice(raw.value())?);
            }
        }
        Ok(result)
    }

    /// Update a post, but only if `owner_id` owns it.
    ///
    /// Returns the updated post, or `None` when the post does not exist or
    /// belongs to someone else; callers map `None` to a single `Forbidden`
    /// outcome so non-owners learn nothing about existence.
    pub fn update_owned(
        &self,
        post_id: Uuid,
        owner_id: Uuid,
        title: &str,
        content: &str,
    ) -> StorageResult<Option<Post>> {
        let id_str = post_id.to_string();

        let write_txn = self.db.db.begin_write()?;
        let updated;
        {
            let mut posts = write_txn.open_table(POSTS)?;

            let current: Option<Post> = match posts.get(id_str.as_str())? {
                Some(raw) => Some(serde_json::from_slice(raw.value())?),
                None => None,
            };

            match current {
                Some(mut post) if post.owner_id == owner_id => {
                    post.title = title.to_string();
                    post.content = content.to_string();
                    let json = serde_json::to_vec(&post)?;
                    posts.insert(id_str.as_str(), json.as_slice())?;
                    updated = Some(post);
                }
                // Missing and foreign are the same non-answer.
                _ => return Ok(None),
            }
        }
        write_txn.commit()?;

        Ok(updated)
    }

    /// Delete a post, but only if `owner_id` owns it.
    ///
    /// Same `None` semantics as [`Self::update_owned`]. Returns the deleted
    /// post on success.
    pub fn delete_owned(&self, post_id: Uuid, owner_id: Uuid) -> StorageResult<Option<Post>> {
        let id_str = post_id.to_string();

        let write_txn = self.db.db.begin_write()?;
        let deleted;
        {
            let mut posts = write_txn.open_table(POSTS)?;

            let current: Option<Post> = match posts.get(id_str.as_str())? {
                Some(raw) => Some(serde_json::from_slice(raw.value())?),
                None => None,
            };

            match current {
                Some(post) if post.owner_id == owner_id => {
                    posts.remove(id_str.as_str())?;
                    let mut owner_index = write_txn.open_table(POST_OWNER_INDEX)?;
                    owner_index
                        .remove(owner_index_key(&post.owner_id.to_string(), &id_str).as_str())?;
                    deleted = Some(post);
                }
                _ => return Ok(None),
            }
        }
        write_txn.commit()?;

        Ok(deleted)
    }
}
