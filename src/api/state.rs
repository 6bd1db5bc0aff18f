//! Application state for the DSA engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::records::{AuthorizationRegister, MissionLog};

/// Shared application state.
///
/// The loaded configuration is read-only. The mission log and the
/// authorization register are append-only lists behind async locks.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    missions: Arc<RwLock<MissionLog>>,
    authorizations: Arc<RwLock<AuthorizationRegister>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader
    /// and empty record lists.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            missions: Arc::new(RwLock::new(MissionLog::new())),
            authorizations: Arc::new(RwLock::new(AuthorizationRegister::new())),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the mission log.
    pub fn missions(&self) -> &RwLock<MissionLog> {
        &self.missions
    }

    /// Returns the travel authorization register.
    pub fn authorizations(&self) -> &RwLock<AuthorizationRegister> {
        &self.authorizations
    }
}
