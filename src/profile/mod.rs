//! Profile snapshots consumed by the encoder and the concept tagger.
//!
//! Profiles are owned by the external profile store; the engine only reads them.

use serde::{Deserialize, Serialize};

/// One education entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
}

impl Education {
    pub fn new(school: impl Into<String>) -> Self {
        Self {
            school: school.into(),
            ..Default::default()
        }
    }

    pub fn with_degree(mut self, degree: impl Into<String>) -> Self {
        self.degree = Some(degree.into());
        self
    }

    pub fn with_field_of_study(mut self, field: impl Into<String>) -> Self {
        self.field_of_study = Some(field.into());
        self
    }
}

/// Read-only snapshot of a user's profile.
///
/// Categorical fields hold raw strings; values outside the configured
/// [`Vocabulary`](crate::vocabulary::Vocabulary) are ignored by the encoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub id: String,

    pub intention: Option<String>,
    pub experience_level: Option<String>,
    pub career_stage: Option<String>,
    pub industry: Option<String>,

    pub skills: Vec<String>,
    pub hobbies: Vec<String>,
    pub values: Vec<String>,
    pub skills_to_learn: Vec<String>,
    pub skills_to_teach: Vec<String>,

    pub years_of_experience: f32,
    /// Fraction of the profile filled in, expected in `[0, 1]`.
    pub profile_completion: f32,
    pub is_verified: bool,

    pub current_company: Option<String>,
    pub education: Vec<Education>,
}

impl Profile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Returns `true` if `other` names the same user (ids compare case-insensitively).
    pub fn is_same_user(&self, other_id: &str) -> bool {
        self.id.eq_ignore_ascii_case(other_id)
    }
}
