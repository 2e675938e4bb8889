//! Service Container - Centralized service access.
//!
//! Services are built once at startup and shared behind `Arc`s; handlers
//! reach them through `AppState`.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, PredictionAdapter, PredictionService, SessionManager,
    SessionService, TableBrowser, TableService,
};
use crate::config::Config;
use crate::infra::{MemorySessionStore, Persistence};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get session service
    fn sessions(&self) -> Arc<dyn SessionService>;

    /// Get table browser service
    fn tables(&self) -> Arc<dyn TableService>;

    /// Get prediction service
    fn predictions(&self) -> Arc<dyn PredictionService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    session_service: Arc<dyn SessionService>,
    table_service: Arc<dyn TableService>,
    prediction_service: Arc<dyn PredictionService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let sessions = Arc::new(MemorySessionStore::new());

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone())),
            session_service: Arc::new(SessionManager::new(sessions, config.clone())),
            table_service: Arc::new(TableBrowser::new(uow)),
            prediction_service: Arc::new(PredictionAdapter::new(config.model_path.clone())),
        }
    }

    /// Replace the prediction service (e.g. with a preloaded pipeline)
    pub fn with_predictions(mut self, prediction_service: Arc<dyn PredictionService>) -> Self {
        self.prediction_service = prediction_service;
        self
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn sessions(&self) -> Arc<dyn SessionService> {
        self.session_service.clone()
    }

    fn tables(&self) -> Arc<dyn TableService> {
        self.table_service.clone()
    }

    fn predictions(&self) -> Arc<dyn PredictionService> {
        self.prediction_service.clone()
    }
}
