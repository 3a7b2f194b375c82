//! HTTP Endpoints
//!
//! REST API for scheme discovery, AI content and conversation sessions.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use saarthi_catalog::match_schemes;
use saarthi_conversation::{prompt, PromptKey, SessionSnapshot, StepOutcome};
use saarthi_core::{Gender, Language, Scheme, UserProfile, INDIAN_STATES, SECTORS};

use crate::metrics::{metrics_handler, record_request};
use crate::session::ServerSession;
use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let config = state.config.read();
    let cors_layer = build_cors_layer(&config.server.cors_origins, config.server.cors_enabled);
    drop(config);

    Router::new()
        // Scheme endpoints
        .route("/api/schemes", get(list_schemes))
        .route("/api/schemes/filter", post(filter_schemes))
        .route("/api/schemes/:id", get(get_scheme))
        .route("/api/schemes/:id/explain", post(explain_scheme))
        .route("/api/schemes/:id/additional-info", get(additional_info))
        // Grievance endpoint
        .route("/api/grievance/template", post(grievance_template))
        // Language list
        .route("/api/languages", get(list_languages))
        // Conversation session endpoints
        .route("/api/conversation/sessions", post(create_session))
        .route("/api/conversation/sessions/:id", get(get_session))
        .route("/api/conversation/sessions/:id", delete(delete_session))
        .route("/api/conversation/sessions/:id/input", post(session_input))
        .route("/api/conversation/sessions/:id/language", post(session_language))
        .route("/api/conversation/sessions/:id/restart", post(session_restart))
        // Health and metrics
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer)
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

/// Build CORS layer from configured origins.
///
/// - `cors_enabled = false` returns a permissive layer (development only)
/// - An empty origin list defaults to localhost:3000
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

    if origins.is_empty() {
        tracing::info!("No CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::error!("All configured CORS origins are invalid, falling back to localhost");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods(methods)
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods(methods)
        .allow_headers(Any)
        .allow_credentials(true)
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(serde_json::json!({ "message": message })))
}

fn parse_language(tag: Option<&str>) -> Language {
    tag.map(Language::from_tag).unwrap_or_default()
}

// =============================================================================
// Scheme endpoints
// =============================================================================

/// Get all schemes
async fn list_schemes(State(state): State<AppState>) -> Json<Vec<Scheme>> {
    record_request("list_schemes");
    Json(state.catalog.all().to_vec())
}

/// Filter request; every field except `description` is required
#[derive(Debug, Deserialize)]
struct FilterRequest {
    age: Option<u32>,
    gender: Option<Gender>,
    state: Option<String>,
    sector: Option<String>,
    description: Option<String>,
}

/// Filter and rank schemes; returns the top matches
async fn filter_schemes(
    State(state): State<AppState>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<Vec<Scheme>>, ApiError> {
    record_request("filter_schemes");

    let (Some(age), Some(gender), Some(user_state), Some(sector)) = (
        request.age.filter(|a| *a > 0),
        request.gender,
        request.state.filter(|s| !s.is_empty()),
        request.sector.filter(|s| !s.is_empty()),
    ) else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Missing required parameters",
        ));
    };

    if !INDIAN_STATES.contains(&user_state.as_str()) {
        return Err(api_error(StatusCode::BAD_REQUEST, "Unknown state"));
    }
    if !SECTORS.contains(&sector.as_str()) {
        return Err(api_error(StatusCode::BAD_REQUEST, "Unknown sector"));
    }

    let mut profile = UserProfile::new(age, gender, user_state, sector);
    if let Some(description) = request.description {
        profile = profile.with_description(description);
    }

    let matches = match_schemes(&profile, state.catalog.as_ref());
    Ok(Json(matches.into_iter().cloned().collect()))
}

/// Get scheme by ID
async fn get_scheme(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Scheme>, ApiError> {
    record_request("get_scheme");
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Scheme not found"))
}

#[derive(Debug, Deserialize)]
struct ExplainRequest {
    #[serde(rename = "userInfo")]
    user_info: Option<UserProfile>,
    language: Option<String>,
}

/// Generate a personalized explanation for a scheme
async fn explain_scheme(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ExplainRequest>,
) -> Result<impl IntoResponse, ApiError> {
    record_request("explain_scheme");

    let user_info = request
        .user_info
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Missing user information"))?;

    let scheme = state
        .catalog
        .get(&id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Scheme not found"))?;

    let language = parse_language(request.language.as_deref());
    let explanation = state
        .generator
        .explain_scheme(scheme, &user_info, language)
        .await;

    Ok(Json(explanation))
}

#[derive(Debug, Deserialize)]
struct GrievanceRequest {
    scheme: Option<Scheme>,
    #[serde(rename = "userInfo")]
    user_info: Option<UserProfile>,
    language: Option<String>,
}

/// Generate a grievance letter template
async fn grievance_template(
    State(state): State<AppState>,
    Json(request): Json<GrievanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    record_request("grievance_template");

    let (Some(scheme), Some(user_info)) = (request.scheme, request.user_info) else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Missing required parameters",
        ));
    };

    let language = parse_language(request.language.as_deref());
    let template = state
        .generator
        .grievance_template(&scheme, &user_info, language)
        .await;

    Ok(Json(template))
}

#[derive(Debug, Deserialize)]
struct LanguageQuery {
    language: Option<String>,
}

/// Fetch supplementary information about a scheme
async fn additional_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    record_request("additional_info");

    let scheme = state
        .catalog
        .get(&id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Scheme not found"))?;

    let language = parse_language(query.language.as_deref());
    let info = state.generator.additional_info(&scheme.title, language).await;

    Ok(Json(serde_json::json!({ "additionalInfo": info })))
}

#[derive(Debug, Serialize)]
struct LanguageEntry {
    code: &'static str,
    name: &'static str,
    #[serde(rename = "nativeName")]
    native_name: &'static str,
}

/// List supported languages
async fn list_languages() -> Json<serde_json::Value> {
    record_request("list_languages");

    let languages: Vec<LanguageEntry> = Language::ALL
        .iter()
        .map(|lang| LanguageEntry {
            code: lang.tag(),
            name: lang.name(),
            native_name: lang.native_name(),
        })
        .collect();

    Json(serde_json::json!({ "languages": languages }))
}

// =============================================================================
// Conversation session endpoints
// =============================================================================

#[derive(Debug, Deserialize, Default)]
struct CreateSessionRequest {
    language: Option<String>,
    #[serde(rename = "autoAdvance")]
    auto_advance: Option<bool>,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    #[serde(rename = "sessionId")]
    session_id: String,
    #[serde(flatten)]
    snapshot: SessionSnapshot,
}

fn session_response(session: &ServerSession) -> SessionResponse {
    SessionResponse {
        session_id: session.id.clone(),
        snapshot: session.conversation.lock().snapshot(),
    }
}

/// Create a conversation session.
///
/// Sessions created over HTTP have no speech runtime; prompt text is
/// returned in each response and the client renders or speaks it.
async fn create_session(
    State(state): State<AppState>,
    request: Option<Json<CreateSessionRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    record_request("create_session");

    let Json(request) = request.unwrap_or_default();
    let language = parse_language(request.language.as_deref());

    let session = state
        .sessions
        .create(language, saarthi_core::SpeechCapability::Unavailable)
        .map_err(|e| api_error(StatusCode::SERVICE_UNAVAILABLE, &e.to_string()))?;

    if let Some(auto_advance) = request.auto_advance {
        session.conversation.lock().set_auto_advance(auto_advance);
    }

    Ok((StatusCode::CREATED, Json(session_response(&session))))
}

/// Get a session snapshot
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    record_request("get_session");

    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Session not found"))?;
    session.touch();

    Ok(Json(session_response(&session)))
}

#[derive(Debug, Deserialize)]
struct InputRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct InputResponse {
    outcome: &'static str,
    #[serde(flatten)]
    session: SessionResponse,
}

/// Feed one user input into the session's state machine
async fn session_input(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<InputRequest>,
) -> Result<Json<InputResponse>, ApiError> {
    record_request("session_input");

    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Session not found"))?;
    session.touch();

    // Run the state machine event, releasing the lock before any await
    let (outcome_tag, speak_text) = {
        let mut conversation = session.conversation.lock();
        let language = conversation.language();

        match conversation.handle_input(&request.text) {
            StepOutcome::NoOp => ("noop", None),
            StepOutcome::Advanced { speak, .. } => {
                ("advanced", Some(prompt(language, speak).to_string()))
            }
            StepOutcome::Invalid(_) => ("invalid", None),
            StepOutcome::SubmissionStarted { generation } => {
                let result = match conversation.contact_record() {
                    Some(record) => {
                        tracing::info!(
                            session_id = %session.id,
                            name = %record.name,
                            "Contact form submitted"
                        );
                        metrics::counter!("saarthi_submissions_total").increment(1);
                        Ok(())
                    }
                    None => Err("Collected fields are incomplete".to_string()),
                };
                let speak = conversation
                    .finish_submission(generation, result)
                    .map(|key| prompt(language, key).to_string());
                ("submitted", speak)
            }
        }
    };

    if let Some(text) = speak_text {
        let language = session.conversation.lock().language();
        if let Err(e) = session.speech.speak(&text, language).await {
            tracing::warn!(session_id = %session.id, error = %e, "Prompt speech failed");
        }
    }

    Ok(Json(InputResponse {
        outcome: outcome_tag,
        session: session_response(&session),
    }))
}

#[derive(Debug, Deserialize)]
struct SessionLanguageRequest {
    language: String,
}

/// Change the session language; the current prompt is re-spoken in the
/// new language
async fn session_language(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SessionLanguageRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    record_request("session_language");

    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Session not found"))?;
    session.touch();

    let language = Language::from_tag(&request.language);
    let speak_key = session.conversation.lock().set_language(language);

    let text = prompt(language, speak_key);
    if let Err(e) = session.speech.speak(text, language).await {
        tracing::warn!(session_id = %session.id, error = %e, "Prompt speech failed");
    }

    Ok(Json(session_response(&session)))
}

/// Restart the conversation from the intro step
async fn session_restart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    record_request("session_restart");

    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Session not found"))?;
    session.touch();

    let delay_ms = state.get_config().conversation.restart_prompt_delay_ms;

    if let Err(e) = session.speech.stop_all().await {
        tracing::warn!(session_id = %session.id, error = %e, "Failed to cancel speech");
    }

    let (speak_key, generation) = {
        let mut conversation = session.conversation.lock();
        let key = conversation.restart();
        (key, conversation.generation())
    };

    // The intro prompt is spoken after a short delay so it does not
    // race the client-side reset
    tokio::spawn(speak_prompt_after_delay(
        session.clone(),
        generation,
        delay_ms,
        speak_key,
    ));

    Ok(Json(session_response(&session)))
}

/// Speak a prompt after a delay, unless the session has been restarted
/// or re-targeted meanwhile (its generation no longer matches).
async fn speak_prompt_after_delay(
    session: Arc<ServerSession>,
    generation: u64,
    delay_ms: u64,
    key: PromptKey,
) {
    tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;

    let language = {
        let conversation = session.conversation.lock();
        if conversation.generation() != generation {
            tracing::debug!(session_id = %session.id, "Skipping stale delayed prompt");
            return;
        }
        conversation.language()
    };

    let text = prompt(language, key);
    if let Err(e) = session.speech.speak(text, language).await {
        tracing::warn!(session_id = %session.id, error = %e, "Delayed prompt speech failed");
    }
}

/// Delete session
async fn delete_session(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    record_request("delete_session");
    state.sessions.remove(&id);
    StatusCode::NO_CONTENT
}

/// Health check; the catalog is the only hard dependency
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let catalog_ok = !state.catalog.is_empty();
    let status_code = if catalog_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if catalog_ok { "healthy" } else { "degraded" },
            "version": env!("CARGO_PKG_VERSION"),
            "checks": {
                "catalog": {
                    "status": if catalog_ok { "ok" } else { "empty" },
                    "schemes": state.catalog.len(),
                }
            }
        })),
    )
}

/// Readiness check
async fn readiness_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ready",
        "checks": {
            "sessions": {
                "status": "ok",
                "count": state.sessions.count(),
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use saarthi_ai::ContentGenerator;
    use saarthi_catalog::SchemeCatalog;
    use saarthi_config::Settings;
    use saarthi_core::{SpeechCapability, SpeechRecognizer, SpeechSynthesizer};

    #[derive(Default)]
    struct RecordingSynth {
        spoken: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SpeechSynthesizer for RecordingSynth {
        async fn speak(&self, text: &str, _language: Language) -> saarthi_core::Result<()> {
            self.spoken.lock().push(text.to_string());
            Ok(())
        }

        async fn stop(&self) -> saarthi_core::Result<()> {
            Ok(())
        }

        fn is_speaking(&self) -> bool {
            false
        }
    }

    struct IdleRecognizer;

    #[async_trait]
    impl SpeechRecognizer for IdleRecognizer {
        async fn start_capture(&self, _language: Language) -> saarthi_core::Result<()> {
            Ok(())
        }

        async fn stop_capture(&self) -> saarthi_core::Result<()> {
            Ok(())
        }

        fn set_language(&self, _language: Language) {}

        fn is_listening(&self) -> bool {
            false
        }
    }

    fn test_state() -> AppState {
        let schemes = vec![Scheme {
            id: "pmay".to_string(),
            title: "Pradhan Mantri Awas Yojana".to_string(),
            description: "Affordable housing".to_string(),
            eligibility: "EWS/LIG households".to_string(),
            benefits: "Interest subsidy".to_string(),
            state: "National".to_string(),
            sector: "Housing".to_string(),
            gender: "All".to_string(),
            url: "https://pmay.example.gov.in".to_string(),
        }];
        let catalog = SchemeCatalog::from_schemes(schemes).unwrap();
        let generator = ContentGenerator::with_backends(None, None);
        AppState::new(Settings::default(), catalog, generator)
    }

    #[test]
    fn test_router_creation() {
        let _ = create_router(test_state());
    }

    #[tokio::test]
    async fn test_filter_rejects_missing_parameters() {
        let state = test_state();
        let request = FilterRequest {
            age: Some(30),
            gender: Some(Gender::Female),
            state: None,
            sector: Some("Housing".to_string()),
            description: None,
        };
        let result = filter_schemes(State(state), Json(request)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_filter_rejects_unknown_state() {
        let state = test_state();
        let request = FilterRequest {
            age: Some(30),
            gender: Some(Gender::Female),
            state: Some("Atlantis".to_string()),
            sector: Some("Housing".to_string()),
            description: None,
        };
        let result = filter_schemes(State(state), Json(request)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_filter_returns_matches() {
        let state = test_state();
        let request = FilterRequest {
            age: Some(30),
            gender: Some(Gender::Female),
            state: Some("Kerala".to_string()),
            sector: Some("Housing".to_string()),
            description: None,
        };
        let result = filter_schemes(State(state), Json(request)).await.unwrap();
        assert_eq!(result.0.len(), 1);
        assert_eq!(result.0[0].id, "pmay");
    }

    #[tokio::test]
    async fn test_session_lifecycle_over_handlers() {
        let state = test_state();

        let created = create_session(
            State(state.clone()),
            Some(Json(CreateSessionRequest::default())),
        )
        .await
        .unwrap()
        .into_response();
        assert_eq!(created.status(), StatusCode::CREATED);

        // One session registered
        assert_eq!(state.sessions.count(), 1);
    }

    #[tokio::test]
    async fn test_input_walks_the_form() {
        let state = test_state();
        let session = state
            .sessions
            .create(
                Language::English,
                saarthi_core::SpeechCapability::Unavailable,
            )
            .unwrap();
        let id = session.id.clone();

        for (text, expected) in [
            ("hello", "advanced"),
            ("Anu Sharma", "advanced"),
            ("9876543210", "advanced"),
            ("anu@example.org", "advanced"),
            ("Need housing help", "advanced"),
            ("yes", "submitted"),
        ] {
            let response = session_input(
                State(state.clone()),
                Path(id.clone()),
                Json(InputRequest {
                    text: text.to_string(),
                }),
            )
            .await
            .unwrap();
            assert_eq!(response.0.outcome, expected, "input: {}", text);
        }

        let snapshot = session.conversation.lock().snapshot();
        assert_eq!(
            snapshot.step,
            saarthi_conversation::ConversationStep::Complete
        );
    }

    #[tokio::test]
    async fn test_delayed_prompt_dropped_when_generation_moves_on() {
        let synth = Arc::new(RecordingSynth::default());
        let session = Arc::new(ServerSession::new(
            "s1",
            Language::English,
            SpeechCapability::Available {
                synthesizer: synth.clone(),
                recognizer: Arc::new(IdleRecognizer),
            },
        ));

        // A second restart before the delay fires invalidates the first
        // restart's pending intro
        let stale = session.conversation.lock().generation();
        session.conversation.lock().restart();

        speak_prompt_after_delay(session.clone(), stale, 0, PromptKey::Intro).await;
        assert!(synth.spoken.lock().is_empty());

        let current = session.conversation.lock().generation();
        speak_prompt_after_delay(session.clone(), current, 0, PromptKey::Intro).await;
        assert_eq!(synth.spoken.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let state = test_state();
        let result = get_session(State(state), Path("missing".to_string())).await;
        assert!(result.is_err());
    }
}
