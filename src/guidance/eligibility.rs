//! Local validation of the eligibility form.
//!
//! Every check here runs before any network call: required fields, sitting
//! results matching the declared sitting count, and the JAMB score range
//! (0–400). Only a form that validates becomes an [`EligibilityRequest`].

use crate::api::assistant::EligibilityRequest;
use crate::error::{ApiError, ApiResult};

/// Declared number of O'Level sittings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sittings {
    #[default]
    One,
    Two,
}

impl Sittings {
    /// Wire representation ("1" or "2").
    pub fn as_str(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
        }
    }
}

/// Raw user input for an eligibility analysis.
#[derive(Debug, Clone, Default)]
pub struct EligibilityForm {
    pub institution_name: String,
    pub desired_course: String,
    pub sittings: Sittings,
    /// e.g. "Maths: B2, English: C4, Physics: A1"
    pub o_level_sitting_1: String,
    pub o_level_sitting_2: String,
    /// Kept as entered; parsed and range-checked during validation.
    pub jamb_score: String,
    /// e.g. "English, Physics, Chemistry, Biology"
    pub jamb_subjects: String,
}

impl EligibilityForm {
    /// Validate the form and produce the wire request.
    pub fn validate(&self) -> ApiResult<EligibilityRequest> {
        if self.institution_name.trim().is_empty()
            || self.desired_course.trim().is_empty()
            || self.jamb_score.trim().is_empty()
            || self.jamb_subjects.trim().is_empty()
        {
            return Err(ApiError::Validation(
                "Please fill in all required fields (Institution Name, Desired Course, JAMB Score, JAMB Subjects).".into(),
            ));
        }

        match self.sittings {
            Sittings::One => {
                if self.o_level_sitting_1.trim().is_empty() {
                    return Err(ApiError::Validation(
                        "Please enter your O'Level results for the 1st sitting.".into(),
                    ));
                }
            }
            Sittings::Two => {
                if self.o_level_sitting_1.trim().is_empty()
                    || self.o_level_sitting_2.trim().is_empty()
                {
                    return Err(ApiError::Validation(
                        "Please enter your O'Level results for both sittings.".into(),
                    ));
                }
            }
        }

        let score: i32 = self.jamb_score.trim().parse().map_err(|_| {
            ApiError::Validation("JAMB Score must be a number between 0 and 400.".into())
        })?;
        if !(0..=400).contains(&score) {
            return Err(ApiError::Validation(
                "JAMB Score must be a number between 0 and 400.".into(),
            ));
        }

        Ok(EligibilityRequest {
            institution_name: self.institution_name.clone(),
            desired_course: self.desired_course.clone(),
            o_level_sittings: self.sittings.as_str().to_string(),
            o_level_sitting_1: self.o_level_sitting_1.clone(),
            o_level_sitting_2: self.o_level_sitting_2.clone(),
            jamb_score: self.jamb_score.trim().to_string(),
            jamb_subjects: self.jamb_subjects.clone(),
        })
    }
}
