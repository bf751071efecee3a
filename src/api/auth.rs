//! Account and credential endpoints.
//!
//! Registration, token issuance/refresh, and the password flows. Rejection
//! messages follow the collaborator's structured field errors in the fixed
//! precedence email → username → password → detail, with per-operation
//! fallbacks.

use super::{bearer, ApiClient};
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Token pair as issued by the collaborator's token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

#[derive(Deserialize)]
struct DetailResponse {
    detail: String,
}

impl ApiClient {
    /// Create an account. The email doubles as the username, matching the
    /// collaborator's registration contract.
    pub async fn register(&self, email: &str, password: &str) -> ApiResult<()> {
        let response = self
            .post("register/")
            .json(&RegisterRequest {
                email,
                username: email,
                password,
            })
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::rejection(
                response,
                &["email", "username", "password"],
                "Signup failed.",
            )
            .await)
        }
    }

    /// Exchange credentials for a token pair.
    pub async fn obtain_token_pair(&self, email: &str, password: &str) -> ApiResult<TokenPair> {
        let response = self
            .post("auth/token/")
            .json(&CredentialsRequest { email, password })
            .send()
            .await?;

        self.expect_json(response, &[], "Login failed. Check your credentials.")
            .await
    }

    /// Mint a new access token from a refresh token.
    pub async fn refresh_access(&self, refresh_token: &str) -> ApiResult<String> {
        let response = self
            .post("auth/token/refresh/")
            .json(&serde_json::json!({ "refresh": refresh_token }))
            .send()
            .await?;

        let body: RefreshResponse = self
            .expect_json(response, &[], "Session refresh failed. Please log in again.")
            .await?;
        Ok(body.access)
    }

    /// Request a password-reset email. Returns the collaborator's
    /// confirmation message.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<String> {
        let response = self
            .post("auth/forgot-password/")
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;

        let body: DetailResponse = self
            .expect_json(
                response,
                &["email"],
                "Failed to send password reset email. Please try again.",
            )
            .await?;
        Ok(body.detail)
    }

    /// Complete a password reset from the emailed `uidb64`/`token` pair.
    ///
    /// A new/confirm mismatch is a local validation error: no request is
    /// issued.
    pub async fn reset_password(
        &self,
        uidb64: &str,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> ApiResult<String> {
        if new_password != confirm_password {
            return Err(ApiError::Validation("Passwords do not match.".into()));
        }

        let response = self
            .post("auth/reset-password/")
            .json(&serde_json::json!({
                "uidb64": uidb64,
                "token": token,
                "new_password": new_password,
                "confirm_password": confirm_password,
            }))
            .send()
            .await?;

        let body: DetailResponse = self
            .expect_json(
                response,
                &["new_password"],
                "Something went wrong. Try again.",
            )
            .await?;
        Ok(body.detail)
    }

    /// Change the password of the authenticated account.
    ///
    /// Mismatch and minimum-length checks run locally before any request.
    pub async fn change_password(
        &self,
        access_token: &str,
        old_password: &str,
        new_password: &str,
        confirm_new_password: &str,
    ) -> ApiResult<String> {
        if new_password != confirm_new_password {
            return Err(ApiError::Validation("Passwords do not match.".into()));
        }
        if new_password.len() < 8 {
            return Err(ApiError::Validation(
                "Passwords must be 8 characters long.".into(),
            ));
        }

        let response = bearer(self.post("auth/change-password/"), access_token)
            .json(&serde_json::json!({
                "old_password": old_password,
                "new_password": new_password,
                "confirm_new_password": confirm_new_password,
            }))
            .send()
            .await?;

        let body: DetailResponse = self
            .expect_json(
                response,
                &["old_password", "new_password", "confirm_new_password"],
                "Failed to change password.",
            )
            .await?;
        Ok(body.detail)
    }
}
