//! AI assistant endpoints: eligibility analysis, chatbot, chat history, and
//! institution overviews.
//!
//! All inference runs on the collaborator; this module only shapes requests
//! and parses replies. Eligibility and chat require a bearer token, the
//! institution overview does not.

use super::{bearer, ApiClient};
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One text fragment of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePart {
    pub text: String,
}

/// A chat message in the collaborator's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub parts: Vec<MessagePart>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![MessagePart { text: text.into() }],
        }
    }

    /// Concatenated text of all parts.
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Eligibility analysis request. Sittings and score travel as strings,
/// matching the collaborator's contract.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityRequest {
    pub institution_name: String,
    pub desired_course: String,
    pub o_level_sittings: String,
    pub o_level_sitting_1: String,
    pub o_level_sitting_2: String,
    pub jamb_score: String,
    pub jamb_subjects: String,
}

/// Result of an eligibility analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct EligibilityReport {
    pub is_eligible: bool,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub missing_requirements: Vec<String>,
    #[serde(default)]
    pub suggested_courses: Vec<String>,
    #[serde(default)]
    pub o_level_credits_required: u32,
    #[serde(default)]
    pub o_level_sittings_accepted: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    chat_history: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatResponse {
    bot_reply: String,
}

#[derive(Deserialize)]
struct OverviewResponse {
    overview: String,
}

impl ApiClient {
    /// Run the AI eligibility analysis for an already-validated request.
    pub async fn check_eligibility(
        &self,
        access_token: &str,
        request: &EligibilityRequest,
    ) -> ApiResult<EligibilityReport> {
        let response = bearer(self.post("eligibility-check/"), access_token)
            .json(request)
            .send()
            .await?;
        self.expect_json(response, &[], "Failed to analyze eligibility.")
            .await
    }

    /// Send the running conversation (latest user message last) and return
    /// the model's reply.
    pub async fn send_chat(
        &self,
        access_token: &str,
        chat_history: &[ChatMessage],
    ) -> ApiResult<String> {
        let response = bearer(self.post("ai/chatbot/"), access_token)
            .json(&ChatRequest { chat_history })
            .send()
            .await?;
        let body: ChatResponse = self
            .expect_json(
                response,
                &[],
                "An unexpected error occurred. Please try again.",
            )
            .await?;
        Ok(body.bot_reply)
    }

    /// Fetch the stored conversation for the authenticated account.
    pub async fn chat_history(&self, access_token: &str) -> ApiResult<Vec<ChatMessage>> {
        let response = bearer(self.get("ai/chat_history/"), access_token)
            .send()
            .await?;
        self.expect_json(response, &[], "Failed to fetch chat history.")
            .await
    }

    /// AI-generated overview of an institution (history, faculties, notable
    /// alumni, campus life).
    pub async fn institution_overview(&self, institution_name: &str) -> ApiResult<String> {
        let response = self
            .post("ai/institution-overview/")
            .json(&serde_json::json!({ "institution_name": institution_name }))
            .send()
            .await?;
        let body: OverviewResponse = self
            .expect_json(response, &[], "Failed to fetch overview")
            .await?;
        Ok(body.overview)
    }
}
