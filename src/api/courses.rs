//! Course search endpoint.
//!
//! Unauthenticated, like the institution catalogue. Each record carries the
//! admission requirements the collaborator knows about.

use super::{ApiClient, Paginated};
use crate::error::{ApiError, ApiResult};
use serde::Deserialize;

/// A course offered by an institution, with its admission requirements.
#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: u64,
    pub name: String,
    /// Identifier of the owning institution.
    pub institution: u64,
    #[serde(default)]
    pub institution_name: Option<String>,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub duration_years: u32,
    #[serde(default)]
    pub olevel_requirements: Option<String>,
    #[serde(default)]
    pub jamb_requirements: Option<String>,
    #[serde(default)]
    pub post_utme_details: Option<String>,
}

impl ApiClient {
    /// Search courses by name fragment.
    pub async fn search_courses(&self, term: &str) -> ApiResult<Paginated<Course>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(ApiError::Validation("Search term cannot be empty.".into()));
        }

        let response = self
            .get(&format!("courses/?search={}", urlencoding::encode(term)))
            .send()
            .await?;
        self.expect_json(response, &[], "Failed to fetch courses")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_deserializes_with_requirements() {
        let course: Course = serde_json::from_str(
            r#"{
                "id": 10,
                "name": "Computer Science",
                "institution": 1,
                "institution_name": "University of Ibadan",
                "faculty": "Physical Sciences",
                "duration_years": 4,
                "jamb_requirements": "English, Mathematics, Physics"
            }"#,
        )
        .unwrap();
        assert_eq!(course.duration_years, 4);
        assert_eq!(
            course.institution_name.as_deref(),
            Some("University of Ibadan")
        );
        assert!(course.olevel_requirements.is_none());
    }

    #[tokio::test]
    async fn empty_search_term_is_rejected_locally() {
        let client = ApiClient::new("http://127.0.0.1:1/api/").unwrap();
        let err = client.search_courses("").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
