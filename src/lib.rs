// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! Postboard - Multi-User Content Service
//!
//! Accounts register and authenticate; posts are ownership-scoped records
//! that only their creator may mutate or delete.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Authentication and authorization (credential hashing, bearer tokens)
//! - `storage` - Embedded ACID storage (redb)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
