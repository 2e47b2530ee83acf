//! Authentication service
//!
//! A single admin account signs in with email and password and receives a
//! bearer token. Protected routes resolve the token back to a user id.

use crate::db::repositories::UserRepository;
use crate::models::{PublicUser, User};
use crate::services::password::{hash_password, verify_password};
use crate::services::token::TokenSigner;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password, deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: PublicUser,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    signer: TokenSigner,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, signer: TokenSigner) -> Self {
        Self { users, signer }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let user = self
            .users
            .get_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            tracing::debug!("Rejected login for {}", email);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.signer.issue(&user.id);
        tracing::info!("User {} logged in", user.email);
        Ok(LoginOutcome {
            token,
            user: user.into(),
        })
    }

    /// Resolve a bearer token to the user id it was issued for
    pub fn authenticate(&self, token: &str) -> Result<String, AuthError> {
        self.signer
            .verify(token)
            .map(|claims| claims.user_id)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AuthError::InvalidToken
            })
    }

    pub async fn current_user(&self, user_id: &str) -> Result<PublicUser, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or(AuthError::UserNotFound)
    }

    /// Create the admin account unless one with this email exists.
    ///
    /// Returns whether an account was created.
    pub async fn ensure_admin(&self, email: &str, password: &str, name: &str) -> Result<bool, AuthError> {
        if self.users.get_by_email(email).await?.is_some() {
            return Ok(false);
        }

        let user = User::new(email.to_string(), hash_password(password)?, name.to_string());
        self.users.create(&user).await?;
        tracing::info!("Created admin account {}", email);
        Ok(true)
    }
}
