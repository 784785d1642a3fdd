// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! # Storage Module
//!
//! Persistent storage on an embedded ACID database (redb). The database
//! handle is injected into the application state; repositories borrow it
//! per call, and tests substitute a temp-dir instance.
//!
//! ## Layout
//!
//! - `database` - redb handle, table definitions, error type
//! - `accounts` - identity records behind registration/login
//! - `posts` - ownership-scoped content records and the ownership guard

pub mod accounts;
pub mod database;
pub mod posts;

pub use accounts::{Account, AccountRepository};
pub use database::{Database, StorageError, StorageResult};
pub use posts::{Post, PostRepository};
