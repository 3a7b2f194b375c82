//! Application State
//!
//! Shared state across all handlers.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

use saarthi_ai::ContentGenerator;
use saarthi_catalog::SchemeCatalog;
use saarthi_config::Settings;

use crate::session::SessionManager;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration wrapped in RwLock for hot-reload support
    pub config: Arc<RwLock<Settings>>,
    /// Static scheme catalog, loaded once at startup
    pub catalog: Arc<SchemeCatalog>,
    /// Content generator (AI backends plus local fallbacks)
    pub generator: Arc<ContentGenerator>,
    /// Conversation session manager
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(config: Settings, catalog: SchemeCatalog, generator: ContentGenerator) -> Self {
        let sessions = SessionManager::with_config(
            config.conversation.max_sessions,
            Duration::from_secs(config.conversation.session_timeout_secs),
            Duration::from_secs(config.conversation.cleanup_interval_secs),
        );

        Self {
            config: Arc::new(RwLock::new(config)),
            catalog: Arc::new(catalog),
            generator: Arc::new(generator),
            sessions: Arc::new(sessions),
        }
    }

    /// Get a read guard to the current configuration
    pub fn get_config(&self) -> parking_lot::RwLockReadGuard<'_, Settings> {
        self.config.read()
    }
}
