//! User registration and login.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::AuthService;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::{MAX_PASSWORD_BYTES, hash_password, verify_password};

/// Service for creating accounts and exchanging credentials for sessions.
pub struct UserService<U: UserRepository, S: SessionRepository> {
    user_repository: Arc<U>,
    auth_service: Arc<AuthService<S>>,
}

impl<U: UserRepository, S: SessionRepository> UserService<U, S> {
    pub fn new(user_repository: Arc<U>, auth_service: Arc<AuthService<S>>) -> Self {
        Self {
            user_repository,
            auth_service,
        }
    }

    /// Registers a new user and opens a session for them.
    ///
    /// Returns the created user together with a raw session token.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if username or password is empty, or the
    ///   password is longer than [`MAX_PASSWORD_BYTES`]
    /// - [`AppError::Conflict`] if the username is taken
    /// - [`AppError::Storage`] on database errors
    /// - [`AppError::Internal`] if hashing fails
    pub async fn register(
        &self,
        username: String,
        password: String,
    ) -> Result<(User, String), AppError> {
        validate_credentials(&username, &password)?;

        let password_hash = hash_password(password).await?;

        let user = self
            .user_repository
            .create(NewUser {
                username: username.clone(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::conflict(
                    "User with that username already exists",
                    json!({ "username": username }),
                ),
                other => other,
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        let token = self.auth_service.issue_session(user.id).await?;

        Ok((user, token))
    }

    /// Verifies credentials and opens a session.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if username or password is empty
    /// - [`AppError::Unauthorized`] if the user is unknown or the password is
    ///   wrong (indistinguishable to the caller)
    pub async fn login(
        &self,
        username: String,
        password: String,
    ) -> Result<(User, String), AppError> {
        validate_credentials(&username, &password)?;

        let Some(user) = self.user_repository.find_by_username(&username).await? else {
            tracing::debug!(username = %username, "Login for unknown user");
            return Err(invalid_credentials());
        };

        if !verify_password(password, user.password_hash.clone()).await? {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(invalid_credentials());
        }

        let token = self.auth_service.issue_session(user.id).await?;

        Ok((user, token))
    }

    /// Ends the session identified by `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the session is unknown or already revoked.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.auth_service.revoke_session(token).await
    }
}

fn validate_credentials(username: &str, password: &str) -> Result<(), AppError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::bad_request(
            "Username and password are required",
            json!({ "fields": ["username", "password"] }),
        ));
    }

    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::bad_request(
            "Password is too long",
            json!({ "max_bytes": MAX_PASSWORD_BYTES }),
        ));
    }

    Ok(())
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(
        "Unauthorized",
        json!({ "reason": "Invalid username or password" }),
    )
}
