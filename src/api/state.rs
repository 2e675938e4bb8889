//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, PredictionService, ServiceContainer, Services, SessionService, TableService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Credential registration and verification
    pub auth_service: Arc<dyn AuthService>,
    /// Session lifecycle
    pub session_service: Arc<dyn SessionService>,
    /// Table browser
    pub table_service: Arc<dyn TableService>,
    /// Sales prediction
    pub prediction_service: Arc<dyn PredictionService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_services(&container, database)
    }

    /// Create application state from an already assembled service container.
    pub fn from_services(container: &impl ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            session_service: container.sessions(),
            table_service: container.tables(),
            prediction_service: container.predictions(),
            database,
        }
    }
}
