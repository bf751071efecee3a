//! Profile endpoints for the authenticated account.
//!
//! `profile/me` returns a paginated list whose only element is the caller;
//! updates go through `PATCH profile/me/`, which also accepts a multipart
//! photo upload.

use super::{bearer, ApiClient, Paginated};
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The collaborator's user profile record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// URL of the uploaded profile photo, when present.
    #[serde(default)]
    pub photo: Option<String>,
}

/// Partial profile update. Unset fields are omitted from the PATCH body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}

impl ApiClient {
    /// Fetch the caller's profile.
    pub async fn fetch_profile(&self, access_token: &str) -> ApiResult<Profile> {
        let response = bearer(self.get("profile/me"), access_token).send().await?;
        let page: Paginated<Profile> = self
            .expect_json(response, &[], "Failed to fetch user profile.")
            .await?;
        page.results
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Rejected("Failed to fetch user profile.".into()))
    }

    /// Update profile fields.
    pub async fn update_profile(
        &self,
        access_token: &str,
        update: &ProfileUpdate,
    ) -> ApiResult<Profile> {
        if update.is_empty() {
            return Err(ApiError::Validation("Nothing to update.".into()));
        }

        let response = bearer(self.patch("profile/me/"), access_token)
            .json(update)
            .send()
            .await?;
        self.expect_json(response, &["email"], "Failed to update profile.")
            .await
    }

    /// Upload a profile photo as a multipart PATCH.
    pub async fn upload_profile_photo(
        &self,
        access_token: &str,
        photo_path: &Path,
    ) -> ApiResult<Profile> {
        let bytes = tokio::fs::read(photo_path).await?;
        let file_name = photo_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        let mime = mime_guess::from_path(photo_path).first_or_octet_stream();

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.essence_str())?;
        let form = reqwest::multipart::Form::new().part("photo", part);

        let response = bearer(self.patch("profile/me/"), access_token)
            .multipart(form)
            .send()
            .await?;
        self.expect_json(response, &["photo"], "Failed to update profile.")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_serializes_only_set_fields() {
        let update = ProfileUpdate {
            email: Some("new@test.com".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"email":"new@test.com"}"#);
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(ProfileUpdate::default().is_empty());
        assert!(!ProfileUpdate {
            first_name: Some("Ada".into()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn profile_tolerates_missing_optional_fields() {
        let profile: Profile = serde_json::from_str(
            r#"{"id":3,"username":"ada","email":"a@test.com"}"#,
        )
        .unwrap();
        assert_eq!(profile.id, 3);
        assert!(profile.first_name.is_none());
        assert!(profile.photo.is_none());
    }
}
