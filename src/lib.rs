//! Sales Dashboard - Login, table browsing and sales prediction over HTTP.
//!
//! Users sign up or log in against a local SQLite credential store, then
//! browse the database's tables or submit a record to a pre-trained
//! regression pipeline for a sales prediction.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Credentials, sessions and prediction inputs
//! - **services**: Authentication, sessions, table browsing and prediction
//! - **infra**: Database, repositories, session registry and model loading
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! sales-dashboard serve --port 8080
//!
//! # Run migrations
//! sales-dashboard migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Credential, Password, PredictionForm, PredictionInput, Session};
pub use errors::{AppError, AppResult};
