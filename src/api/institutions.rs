//! Institution search and detail endpoints.
//!
//! Unauthenticated: the institution catalogue is public.

use super::{ApiClient, Paginated};
use crate::error::{ApiError, ApiResult};
use serde::Deserialize;

/// A university, polytechnic, or college of education.
#[derive(Debug, Clone, Deserialize)]
pub struct Institution {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// "university" | "polytechnic" | "college_of_education"
    #[serde(default)]
    pub institution_type: Option<String>,
    /// "federal" | "state" | "private"
    #[serde(default)]
    pub ownership_type: Option<String>,
    #[serde(default)]
    pub year_of_establishment: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ApiClient {
    /// Search institutions by name fragment.
    pub async fn search_institutions(&self, term: &str) -> ApiResult<Paginated<Institution>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(ApiError::Validation("Search term cannot be empty.".into()));
        }

        let response = self
            .get(&format!("institutions/?search={}", urlencoding::encode(term)))
            .send()
            .await?;
        self.expect_json(response, &[], "Failed to fetch institutions")
            .await
    }

    /// Fetch a single institution by identifier.
    pub async fn institution_detail(&self, id: u64) -> ApiResult<Institution> {
        let response = self.get(&format!("institutions/{id}/")).send().await?;
        self.expect_json(response, &[], "Failed to fetch institutions")
            .await
    }
}
