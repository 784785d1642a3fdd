// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! Embedded database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `accounts`: account_id → serialized Account (JSON bytes)
//! - `account_email_index`: email → account_id (uniqueness enforcement)
//! - `posts`: post_id → serialized Post (JSON bytes)
//! - `post_owner_index`: composite key (owner_id|post_id) → post_id
//!
//! Writers are serialized by redb, so any check-then-mutate sequence inside
//! a single write transaction is atomic. The repositories rely on that for
//! duplicate-email rejection and owner-conditional mutations.

use std::path::Path;

use redb::TableDefinition;

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: account_id → serialized Account (JSON bytes).
pub(super) const ACCOUNTS: TableDefinition<&str, &[u8]> = TableDefinition::new("accounts");

/// Index: email → account_id. One entry per account; insertion checks this
/// table first, which is what makes email uniqueness atomic.
pub(super) const ACCOUNT_EMAIL_INDEX: TableDefinition<&str, &str> =
    TableDefinition::new("account_email_index");

/// Primary table: post_id → serialized Post (JSON bytes).
pub(super) const POSTS: TableDefinition<&str, &[u8]> = TableDefinition::new("posts");

/// Index: composite key `owner_id|post_id` → post_id, for owner scans and
/// cascade deletion.
pub(super) const POST_OWNER_INDEX: TableDefinition<&str, &str> =
    TableDefinition::new("post_owner_index");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("an account already exists for email {0}")]
    DuplicateEmail(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Index Key Helpers
// =============================================================================

/// Build a composite key for the post_owner_index table.
pub(super) fn owner_index_key(owner_id: &str, post_id: &str) -> String {
    format!("{owner_id}|{post_id}")
}

/// Range bounds covering every index entry for one owner.
///
/// UUID strings contain only hex digits and dashes, all of which sort below
/// `|` (0x7C), and `}` (0x7D) sorts just above it, so `[owner|, owner})`
/// covers exactly this owner's entries.
pub(super) fn owner_index_bounds(owner_id: &str) -> (String, String) {
    (format!("{owner_id}|"), format!("{owner_id}}}"))
}

// =============================================================================
// Database
// =============================================================================

/// Embedded ACID database handle, injected into the application state.
///
/// Tests substitute a temp-dir instance; nothing in the repositories knows
/// where the file lives.
pub struct Database {
    pub(super) db: redb::Database,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = redb::Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ACCOUNTS)?;
            let _ = write_txn.open_table(ACCOUNT_EMAIL_INDEX)?;
            let _ = write_txn.open_table(POSTS)?;
            let _ = write_txn.open_table(POST_OWNER_INDEX)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}
