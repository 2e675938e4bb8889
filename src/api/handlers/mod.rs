//! HTTP request handlers.

pub mod auth_handler;
pub mod dashboard_handler;
pub mod prediction_handler;
pub mod table_handler;

pub use auth_handler::{auth_routes, logout_routes};
pub use dashboard_handler::dashboard_routes;
pub use prediction_handler::prediction_routes;
pub use table_handler::table_routes;
