//! Scheme catalog records and user profiles

use serde::{Deserialize, Serialize};

/// Sentinel value for schemes applicable in every state.
pub const STATE_NATIONAL: &str = "National";

/// Sentinel value for schemes applicable to every gender.
pub const GENDER_ALL: &str = "All";

/// A government welfare scheme record.
///
/// Loaded once from the static catalog file and never mutated.
/// `state` and `gender` may hold the sentinel values [`STATE_NATIONAL`]
/// and [`GENDER_ALL`] meaning "matches any value of this dimension".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    /// Unique identifier across the catalog
    pub id: String,
    /// Scheme name
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Free-text eligibility criteria
    pub eligibility: String,
    /// Free-text benefits summary
    pub benefits: String,
    /// A specific state name or "National"
    pub state: String,
    /// Free-text category; may carry multiple comma-separated tags
    pub sector: String,
    /// A specific gender value or "All"
    pub gender: String,
    /// Official website
    pub url: String,
}

/// Gender values accepted in a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Demographic profile describing one citizen for matching.
///
/// Created per request; never persisted server-side. The optional
/// `description` feeds AI personalization only, not matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years (positive)
    pub age: u32,
    /// One of the closed gender enumeration
    pub gender: Gender,
    /// One of the fixed state list
    pub state: String,
    /// One of the fixed sector list
    pub sector: String,
    /// Optional free-text description of the citizen's need
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UserProfile {
    pub fn new(age: u32, gender: Gender, state: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            age,
            gender,
            state: state.into(),
            sector: sector.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A scheme paired with its computed relevance score.
///
/// Ephemeral; ordering defines the ranking.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    pub scheme: &'a Scheme,
    pub score: u32,
}

/// AI-generated personalized explanation for a scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiExplanation {
    /// Plain-language explanation of how the scheme applies to the user
    pub explanation: String,
    /// Documents likely needed to apply
    pub required_documents: Vec<String>,
    /// Clear next steps to apply
    pub next_steps: String,
}

/// AI-generated grievance letter template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrievanceTemplate {
    pub template: String,
}

/// Fixed list of regions accepted in a profile's `state` field.
pub const INDIAN_STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "National",
];

/// Fixed list of sector values accepted in a profile's `sector` field.
pub const SECTORS: &[&str] = &[
    "Housing",
    "Financial Inclusion",
    "Agriculture",
    "Insurance",
    "Pension",
    "Energy",
    "Education",
    "Health",
    "Employment",
    "Skill Development",
    "Rural Development",
    "Urban Development",
    "Water Supply",
    "Social Welfare",
    "Infrastructure",
    "Fisheries",
    "Food Processing",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_builder() {
        let profile = UserProfile::new(30, Gender::Female, "Kerala", "Health")
            .with_description("Looking for maternal health support");
        assert_eq!(profile.gender.as_str(), "Female");
        assert!(profile.description.is_some());
    }

    #[test]
    fn test_scheme_roundtrip() {
        let json = r#"{
            "id": "pmay",
            "title": "Pradhan Mantri Awas Yojana",
            "description": "Affordable housing",
            "eligibility": "EWS/LIG households",
            "benefits": "Interest subsidy on home loans",
            "state": "National",
            "sector": "Housing, Urban Development",
            "gender": "All",
            "url": "https://pmay.example.gov.in"
        }"#;
        let scheme: Scheme = serde_json::from_str(json).unwrap();
        assert_eq!(scheme.state, STATE_NATIONAL);
        assert_eq!(scheme.gender, GENDER_ALL);
    }
}
