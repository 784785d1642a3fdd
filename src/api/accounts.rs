// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! Account endpoints: registration, login, and account listings.

use axum::{extract::State, Json};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{
        AccountResponse, AccountWithPosts, LoginRequest, RegisterRequest, TokenResponse,
    },
    state::AppState,
    storage::{AccountRepository, PostRepository},
};

/// Register a new account.
///
/// The password is hashed (Argon2id, per-call salt) before anything touches
/// the store; neither the password nor the hash is echoed back.
#[utoipa::path(
    post,
    path = "/v1/register",
    request_body = RegisterRequest,
    tag = "Accounts",
    responses(
        (status = 200, description = "Account created", body = AccountResponse),
        (status = 409, description = "An account with this email already exists"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("email and password are required"));
    }

    let secret_hash = state.credentials.hash(&request.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        ApiError::internal("Failed to process registration")
    })?;

    let repo = AccountRepository::new(&state.db);
    let account = repo.create(&request.name, &request.email, &secret_hash)?;

    tracing::info!(account_id = %account.id, "account registered");
    Ok(Json(account.into()))
}

/// Log in and receive a bearer token.
///
/// Unknown email and wrong password produce the same error and burn the
/// same hashing work, so the response leaks nothing about which it was.
#[utoipa::path(
    post,
    path = "/v1/login",
    request_body = LoginRequest,
    tag = "Accounts",
    responses(
        (status = 200, description = "Bearer token", body = TokenResponse),
        (status = 400, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let repo = AccountRepository::new(&state.db);
    let account = repo.find_by_email(&request.email)?;

    match account {
        Some(account) if state.credentials.verify(&request.password, &account.secret_hash) => {
            let token = state.tokens.issue(account.id).map_err(|e| {
                tracing::error!(error = %e, "token issuance failed");
                ApiError::internal("Failed to issue token")
            })?;
            tracing::debug!(account_id = %account.id, "login succeeded");
            Ok(Json(TokenResponse { token }))
        }
        Some(_) => Err(invalid_credentials()),
        None => {
            state.credentials.verify_dummy(&request.password);
            Err(invalid_credentials())
        }
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::bad_request("Invalid credentials")
}

/// List every account together with its posts.
#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "Accounts",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All accounts with their posts", body = [AccountWithPosts]),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn list_users(
    Auth(_user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountWithPosts>>, ApiError> {
    let accounts = AccountRepository::new(&state.db).list_all()?;
    let posts = PostRepository::new(&state.db);

    let mut result = Vec::with_capacity(accounts.len());
    for account in accounts {
        let owned = posts.list_by_owner(account.id)?;
        result.push(AccountWithPosts {
            id: account.id,
            name: account.name,
            email: account.email,
            posts: owned.into_iter().map(Into::into).collect(),
        });
    }
    Ok(Json(result))
}

/// Get the authenticated account's own record.
#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Accounts",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The authenticated account", body = AccountResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn me(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = AccountRepository::new(&state.db)
        .get(user.account_id)?
        .ok_or_else(|| ApiError::not_found("Account no longer exists"))?;
    Ok(Json(account.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, TokenService};
    use crate::storage::Database;
    use axum::http::StatusCode;
    use chrono::Duration;
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::open(&dir.path().join("test.redb")).expect("Failed to open db");
        let tokens = TokenService::new(b"accounts-test-secret", Duration::hours(1));
        let credentials = Credentials::new(8, 1).expect("Failed to build credentials");
        (AppState::new(db, tokens, credentials), dir)
    }

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: "alice".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn register_returns_account_without_secret() {
        let (state, _dir) = test_state();

        let Json(response) = register(
            State(state.clone()),
            Json(register_request("alice@x.com", "pw1")),
        )
        .await
        .expect("registration succeeds");

        assert_eq!(response.email, "alice@x.com");

        // The stored record has a hash, never the plaintext.
        let stored = AccountRepository::new(&state.db)
            .find_by_email("alice@x.com")
            .unwrap()
            .unwrap();
        assert_ne!(stored.secret_hash, "pw1");
        assert!(stored.secret_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let (state, _dir) = test_state();

        register(
            State(state.clone()),
            Json(register_request("alice@x.com", "pw1")),
        )
        .await
        .unwrap();

        let err = register(
            State(state.clone()),
            Json(register_request("alice@x.com", "pw2")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn empty_password_is_rejected() {
        let (state, _dir) = test_state();
        let err = register(State(state), Json(register_request("a@x.com", "")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_round_trips_to_the_registered_account() {
        let (state, _dir) = test_state();
        let Json(account) = register(
            State(state.clone()),
            Json(register_request("alice@x.com", "pw1")),
        )
        .await
        .unwrap();

        let Json(response) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "alice@x.com".to_string(),
                password: "pw1".to_string(),
            }),
        )
        .await
        .expect("login succeeds");

        let claims = state.tokens.verify(&response.token).unwrap();
        assert_eq!(claims.sub, account.id);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let (state, _dir) = test_state();
        register(
            State(state.clone()),
            Json(register_request("alice@x.com", "pw1")),
        )
        .await
        .unwrap();

        let wrong_password = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "alice@x.com".to_string(),
                password: "nope".to_string(),
            }),
        )
        .await
        .unwrap_err();

        let unknown_email = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "ghost@x.com".to_string(),
                password: "nope".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(wrong_password.status, StatusCode::BAD_REQUEST);
        assert_eq!(unknown_email.status, StatusCode::BAD_REQUEST);
        assert_eq!(wrong_password.message, unknown_email.message);
    }

    #[tokio::test]
    async fn me_returns_the_token_subject() {
        let (state, _dir) = test_state();
        let Json(account) = register(
            State(state.clone()),
            Json(register_request("alice@x.com", "pw1")),
        )
        .await
        .unwrap();

        let user = crate::auth::AuthenticatedUser {
            account_id: account.id,
            expires_at: 0,
        };

        let Json(response) = me(Auth(user), State(state)).await.unwrap();
        assert_eq!(response.id, account.id);
    }
}
