// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! Account repository.
//!
//! Accounts are the identity records behind registration and login. The
//! email index is maintained in the same write transaction as the account
//! record, so two concurrent registrations for one email cannot both
//! succeed.

use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::database::{
    owner_index_bounds, ACCOUNTS, ACCOUNT_EMAIL_INDEX, POSTS, POST_OWNER_INDEX,
};
use super::{Database, StorageError, StorageResult};

/// Stored account record.
///
/// `secret_hash` is the Argon2id PHC string; it never leaves the service
/// through any response type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Unique account identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Unique email address (case-sensitive, as stored)
    pub email: String,
    /// One-way hash of the account password
    pub secret_hash: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Repository for account operations.
pub struct AccountRepository<'a> {
    db: &'a Database,
}

impl<'a> AccountRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a new account.
    ///
    /// # Errors
    /// Returns `StorageError::DuplicateEmail` if an account already exists
    /// for `email`. The check and the insert share one write transaction.
    pub fn create(&self, name: &str, email: &str, secret_hash: &str) -> StorageResult<Account> {
        let account = Account {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            secret_hash: secret_hash.to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_vec(&account)?;
        let id_str = account.id.to_string();

        let write_txn = self.db.db.begin_write()?;
        {
            let mut index = write_txn.open_table(ACCOUNT_EMAIL_INDEX)?;
            if index.get(email)?.is_some() {
                // Dropping the transaction aborts it; nothing was written.
                return Err(StorageError::DuplicateEmail(email.to_string()));
            }
            index.insert(email, id_str.as_str())?;

            let mut accounts = write_txn.open_table(ACCOUNTS)?;
            accounts.insert(id_str.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;

        Ok(account)
    }

    /// Look up an account by email (exact, case-sensitive match).
    pub fn find_by_email(&self, email: &str) -> StorageResult<Option<Account>> {
        let read_txn = self.db.db.begin_read()?;
        let index = read_txn.open_table(ACCOUNT_EMAIL_INDEX)?;

        let id = match index.get(email)? {
            Some(guard) => guard.value().to_string(),
            None => return Ok(None),
        };

        let accounts = read_txn.open_table(ACCOUNTS)?;
        match accounts.get(id.as_str())? {
            Some(raw) => Ok(Some(serde_json::from_slice(raw.value())?)),
            None => Ok(None),
        }
    }

    /// Look up an account by ID.
    pub fn get(&self, account_id: Uuid) -> StorageResult<Option<Account>> {
        let read_txn = self.db.db.begin_read()?;
        let accounts = read_txn.open_table(ACCOUNTS)?;
        match accounts.get(account_id.to_string().as_str())? {
            Some(raw) => Ok(Some(serde_json::from_slice(raw.value())?)),
            None => Ok(None),
        }
    }

    /// List every account.
    pub fn list_all(&self) -> StorageResult<Vec<Account>> {
        let read_txn = self.db.db.begin_read()?;
        let accounts = read_txn.open_table(ACCOUNTS)?;

        let mut result = Vec::new();
        for entry in accounts.iter()? {
            let (_, raw) = entry?;
            result.push(serde_json::from_slice(raw.value())?);
        }
        Ok(result)
    }

    /// Delete an account and cascade-delete every post it owns.
    ///
    /// Returns `true` if the account existed. The cascade runs in the same
    /// write transaction as the account removal.
    pub fn delete(&self, account_id: Uuid) -> StorageResult<bool> {
        let id_str = account_id.to_string();

        let write_txn = self.db.db.begin_write()?;
        let existed;
        {
            let mut accounts = write_txn.open_table(ACCOUNTS)?;
            let removed: Option<Account> = match accounts.remove(id_str.as_str())? {
                Some(raw) => Some(serde_json::from_slice(raw.value())?),
                None => None,
            };
            existed = removed.is_some();

            if let Some(account) = removed {
                let mut index = write_txn.open_table(ACCOUNT_EMAIL_INDEX)?;
                index.remove(account.email.as_str())?;

                // Cascade: collect the owner's post ids, then remove them.
                let mut owner_index = write_txn.open_table(POST_OWNER_INDEX)?;
                let (start, end) = owner_index_bounds(&id_str);
                let mut doomed: Vec<(String, String)> = Vec::new();
                for entry in owner_index.range(start.as_str()..end.as_str())? {
                    let (key, post_id) = entry?;
                    doomed.push((key.value().to_string(), post_id.value().to_string()));
                }

                let mut posts = write_txn.open_table(POSTS)?;
                for (key, post_id) in doomed {
                    owner_index.remove(key.as_str())?;
                    posts.remove(post_id.as_str())?;
                }
            }
        }
        write_txn.commit()?;

        Ok(existed)
    }
}
