//! Deterministic local fallbacks
//!
//! Produced whenever a remote backend is unconfigured or fails. Built
//! purely from catalog data and the user profile, always in English,
//! the base language of the system. Generic but accurate; the document
//! list is the standard set most schemes require.

use saarthi_core::{AiExplanation, GrievanceTemplate, Scheme, UserProfile};

/// Standard document set cited when no personalized list is available.
pub const FALLBACK_DOCUMENTS: &[&str] = &[
    "Aadhaar Card",
    "PAN Card",
    "Income Certificate",
    "Residence Proof",
    "Bank Account Details",
];

/// Templated explanation assembled from scheme and profile fields.
pub fn scheme_explanation(scheme: &Scheme, user: &UserProfile) -> AiExplanation {
    AiExplanation {
        explanation: format!(
            "{} provides {}. Based on your profile as a {}-year-old {} from {}, \
             you may be eligible if you meet these criteria: {}",
            scheme.title, scheme.benefits, user.age, user.gender, user.state, scheme.eligibility
        ),
        required_documents: FALLBACK_DOCUMENTS.iter().map(|d| d.to_string()).collect(),
        next_steps: format!(
            "Visit the official website ({}) to apply online or visit your nearest \
             government office with your documents.",
            scheme.url
        ),
    }
}

/// Formal grievance letter skeleton with bracketed placeholders for
/// everything the citizen must fill in by hand.
pub fn grievance_template(scheme: &Scheme, user: &UserProfile) -> GrievanceTemplate {
    GrievanceTemplate {
        template: format!(
            "\
Respected Sir/Madam,

Subject: Grievance Regarding {title}

I, [Your Name], a [{age}]-year-old [{gender}] resident of [Your Address], {state}, \
would like to register a grievance regarding my application for the {title}.

Application Details:
- Application Number: [Your Application Number]
- Date of Application: [Date of Application]
- Current Status: [Status if known]

Issue Description:
[Describe your issue here - e.g., application pending for extended period, \
rejection without proper reason, subsidy not received, etc.]

I have already attempted to resolve this issue by [mention previous attempts to resolve], \
but have not received a satisfactory response.

I request your immediate attention to this matter and would appreciate if you could \
provide a resolution at the earliest.

Thank you for your assistance.

Sincerely,
[Your Name]
[Your Contact Number]
[Your Email Address]
Date: [Current Date]",
            title = scheme.title,
            age = user.age,
            gender = user.gender,
            state = user.state,
        ),
    }
}

/// Apology message when the live lookup is unavailable.
pub fn additional_info(scheme_name: &str) -> String {
    format!(
        "Sorry, I couldn't retrieve additional information about {} at this time. \
         Please refer to the scheme details provided or visit the official website.",
        scheme_name
    )
}
