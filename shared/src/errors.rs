//! Error types for profile assembly
//!
//! The calculator itself never fails. These errors come from the
//! collection side: building a profile out of partial onboarding data.

use thiserror::Error;

/// Errors raised while turning collected data into a [`crate::UserProfile`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Profile incomplete, missing: {}", .0.join(", "))]
    Incomplete(Vec<String>),

    #[error("Meals per day must be between 2 and 6, got {0}")]
    InvalidMealsPerDay(u8),

    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Onboarding not finished: on step {step} of {total}")]
    NotFinished { step: usize, total: usize },
}

impl ProfileError {
    /// Field the error refers to, when there is exactly one
    pub fn field(&self) -> Option<&str> {
        match self {
            ProfileError::Incomplete(fields) if fields.len() == 1 => Some(fields[0].as_str()),
            ProfileError::Incomplete(_) => None,
            ProfileError::InvalidMealsPerDay(_) => Some("meals_per_day"),
            ProfileError::Validation { field, .. } => Some(field.as_str()),
            ProfileError::NotFinished { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_message_lists_fields() {
        let err = ProfileError::Incomplete(vec!["sex".to_string(), "goal".to_string()]);
        assert_eq!(err.to_string(), "Profile incomplete, missing: sex, goal");
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_field_context() {
        assert_eq!(ProfileError::InvalidMealsPerDay(9).field(), Some("meals_per_day"));
        let err = ProfileError::Validation {
            field: "age".to_string(),
            message: "out of range".to_string(),
        };
        assert_eq!(err.field(), Some("age"));
    }

    #[test]
    fn test_not_finished_message() {
        let err = ProfileError::NotFinished { step: 4, total: 14 };
        assert_eq!(err.to_string(), "Onboarding not finished: on step 4 of 14");
    }
}
