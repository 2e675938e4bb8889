//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod credential;
pub mod password;
pub mod prediction;
pub mod session;

pub use credential::Credential;
pub use password::Password;
pub use prediction::{
    FeatureKind, FeatureSchema, FeatureValue, ModelSchema, PredictionForm, PredictionInput,
    TrainedPipeline, FEATURE_ORDER,
};
pub use session::Session;

#[cfg(any(test, feature = "test-utils"))]
pub use prediction::MockTrainedPipeline;
