//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
pub mod container;
mod prediction_service;
mod session_service;
mod table_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use prediction_service::{PredictionAdapter, PredictionOutcome, PredictionService};
pub use session_service::{
    CurrentSession, SessionClaims, SessionManager, SessionService, SessionToken,
};
pub use table_service::{TableBrowser, TableService};
