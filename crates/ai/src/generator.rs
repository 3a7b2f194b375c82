//! Content generator with fallback dispatch
//!
//! Single entry point for all AI-assisted content. Each operation
//! tries its remote backend once and falls back to the deterministic
//! local content on any failure, so these methods never return an
//! error to the caller.

use std::sync::Arc;

use saarthi_config::AiConfig;
use saarthi_core::{AiExplanation, ContentBackend, GrievanceTemplate, Language, Scheme, UserProfile};

use crate::backend::{ChatBackend, SearchBackend};
use crate::fallback;

/// Generates explanations, grievance templates and supplementary
/// scheme information.
pub struct ContentGenerator {
    chat: Option<Arc<dyn ContentBackend>>,
    search: Option<Arc<dyn ContentBackend>>,
}

impl ContentGenerator {
    /// Build from configuration. Backends whose API key is missing are
    /// left unconfigured and their operations use the local fallback.
    pub fn from_config(config: &AiConfig) -> Self {
        let chat = match ChatBackend::new(config) {
            Ok(backend) => {
                tracing::info!(model = %backend.model_name(), "Chat backend configured");
                Some(Arc::new(backend) as Arc<dyn ContentBackend>)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat backend unavailable; using local fallbacks");
                None
            }
        };

        let search = match SearchBackend::new(config) {
            Ok(backend) => {
                tracing::info!(model = %backend.model_name(), "Search backend configured");
                Some(Arc::new(backend) as Arc<dyn ContentBackend>)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Search backend unavailable; using local fallbacks");
                None
            }
        };

        Self { chat, search }
    }

    /// Build with explicit backends. Used by tests and embedders.
    pub fn with_backends(
        chat: Option<Arc<dyn ContentBackend>>,
        search: Option<Arc<dyn ContentBackend>>,
    ) -> Self {
        Self { chat, search }
    }

    /// Personalized explanation of how a scheme applies to the user, in
    /// the requested language.
    pub async fn explain_scheme(
        &self,
        scheme: &Scheme,
        user: &UserProfile,
        language: Language,
    ) -> AiExplanation {
        let Some(chat) = &self.chat else {
            record_fallback("explain");
            return fallback::scheme_explanation(scheme, user);
        };

        let system = explanation_system_prompt(language);
        let prompt = explanation_prompt(scheme, user, language);

        match chat.complete(&system, &prompt, true).await {
            Ok(content) => match serde_json::from_str::<AiExplanation>(&content) {
                Ok(explanation) => explanation,
                Err(e) => {
                    tracing::warn!(error = %e, scheme = %scheme.id, "Malformed explanation JSON; using fallback");
                    record_fallback("explain");
                    fallback::scheme_explanation(scheme, user)
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, scheme = %scheme.id, "Explanation generation failed; using fallback");
                record_fallback("explain");
                fallback::scheme_explanation(scheme, user)
            }
        }
    }

    /// Formal grievance letter template for a scheme, in the requested
    /// language.
    pub async fn grievance_template(
        &self,
        scheme: &Scheme,
        user: &UserProfile,
        language: Language,
    ) -> GrievanceTemplate {
        let Some(chat) = &self.chat else {
            record_fallback("grievance");
            return fallback::grievance_template(scheme, user);
        };

        let system = grievance_system_prompt(language);
        let prompt = grievance_prompt(scheme, user, language);

        match chat.complete(&system, &prompt, false).await {
            Ok(template) if !template.trim().is_empty() => GrievanceTemplate { template },
            Ok(_) => {
                tracing::warn!(scheme = %scheme.id, "Empty grievance template; using fallback");
                record_fallback("grievance");
                fallback::grievance_template(scheme, user)
            }
            Err(e) => {
                tracing::warn!(error = %e, scheme = %scheme.id, "Grievance generation failed; using fallback");
                record_fallback("grievance");
                fallback::grievance_template(scheme, user)
            }
        }
    }

    /// Live supplementary information about a scheme by name, in the
    /// requested language.
    pub async fn additional_info(&self, scheme_name: &str, language: Language) -> String {
        let Some(search) = &self.search else {
            record_fallback("search");
            return fallback::additional_info(scheme_name);
        };

        let system = search_system_prompt(language);
        let prompt = search_prompt(scheme_name, language);

        match search.complete(&system, &prompt, false).await {
            Ok(content) if !content.trim().is_empty() => content,
            Ok(_) => {
                record_fallback("search");
                fallback::additional_info(scheme_name)
            }
            Err(e) => {
                tracing::warn!(error = %e, scheme = scheme_name, "Scheme lookup failed; using fallback");
                record_fallback("search");
                fallback::additional_info(scheme_name)
            }
        }
    }
}

fn record_fallback(operation: &'static str) {
    metrics::counter!("saarthi_ai_fallback_total", "operation" => operation).increment(1);
}

fn explanation_system_prompt(language: Language) -> String {
    format!(
        "You are a helpful government services assistant that explains Indian government \
         schemes in simple language and provides practical guidance. You can communicate \
         fluently in {lang} and should adapt your response to this language.",
        lang = language.name()
    )
}

fn explanation_prompt(scheme: &Scheme, user: &UserProfile, language: Language) -> String {
    let need = user
        .description
        .as_deref()
        .map(|d| format!("- User's described need: {}\n", d))
        .unwrap_or_default();

    format!(
        "I need a personalized explanation about a government scheme for a user with the \
         following profile:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - State: {state}\n\
         - Sector of interest: {sector}\n\
         {need}\n\
         The government scheme details:\n\
         - Name: {title}\n\
         - Description: {description}\n\
         - Eligibility: {eligibility}\n\
         - Benefits: {benefits}\n\
         - State coverage: {scheme_state}\n\
         - Sector: {scheme_sector}\n\
         - URL: {url}\n\n\
         Please provide:\n\
         1. A personalized explanation of how this scheme applies to the user's situation in simple language\n\
         2. A list of required documents they'll likely need to apply\n\
         3. Clear next steps to apply for the scheme\n\n\
         Format the response as valid JSON with these keys:\n\
         - explanation (string)\n\
         - requiredDocuments (array of strings)\n\
         - nextSteps (string)\n\n\
         IMPORTANT: Respond in {lang} language. Use simple, conversational {lang} that's easy to understand.",
        age = user.age,
        gender = user.gender,
        state = user.state,
        sector = user.sector,
        need = need,
        title = scheme.title,
        description = scheme.description,
        eligibility = scheme.eligibility,
        benefits = scheme.benefits,
        scheme_state = scheme.state,
        scheme_sector = scheme.sector,
        url = scheme.url,
        lang = language.name(),
    )
}

fn grievance_system_prompt(language: Language) -> String {
    format!(
        "You are a helpful assistant that creates formal templates for government \
         communication. You are fluent in {lang} and should create your response in this language.",
        lang = language.name()
    )
}

fn grievance_prompt(scheme: &Scheme, user: &UserProfile, language: Language) -> String {
    format!(
        "Create a formal grievance letter template for a citizen who wants to file a \
         complaint regarding a government scheme.\n\n\
         Citizen's details:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - State: {state}\n\n\
         Scheme details:\n\
         - Name: {title}\n\
         - Description: {description}\n\n\
         The template should include placeholders for:\n\
         - Citizen's name\n\
         - Contact details\n\
         - Application number\n\
         - Date of application\n\
         - Specific issue description\n\
         - Previous attempts to resolve\n\
         - Date\n\
         - Signature\n\n\
         Make it formal but accessible. Format it as a proper letter with standard \
         grievance format used in Indian government offices.\n\n\
         IMPORTANT: Write the template in {lang} language. Use proper formal {lang} \
         suitable for an official letter.",
        age = user.age,
        gender = user.gender,
        state = user.state,
        title = scheme.title,
        description = scheme.description,
        lang = language.name(),
    )
}

fn search_system_prompt(language: Language) -> String {
    format!(
        "You are a government services assistant focused on Indian government schemes. \
         Provide accurate, concise information with relevant details. You should respond \
         in {lang} language.",
        lang = language.name()
    )
}

fn search_prompt(scheme_name: &str, language: Language) -> String {
    format!(
        "Provide detailed information about the Indian government scheme \"{name}\" \
         including its purpose, eligibility criteria, benefits, application process, \
         and any recent updates or changes. Focus on facts. Respond in {lang} language.",
        name = scheme_name,
        lang = language.name(),
    )
}
