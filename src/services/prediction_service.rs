//! Prediction service - Loads the trained pipeline once and serves
//! single-row predictions.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use utoipa::ToSchema;

use crate::domain::{FeatureValue, ModelSchema, PredictionForm, PredictionInput, TrainedPipeline};
use crate::errors::{AppError, AppResult};
use crate::infra::LinearPipeline;

/// Result of one prediction
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PredictionOutcome {
    /// Predicted sales
    #[schema(example = 2097.5)]
    pub prediction: f64,
    /// Derived outlet age fed to the model
    #[schema(example = 25)]
    pub outlet_age: f64,
    /// Name of the pipeline that produced the prediction
    #[schema(example = "sales_pipeline")]
    pub model: String,
}

/// Prediction service trait for dependency injection.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Get the loaded pipeline, loading it on first use
    async fn pipeline(&self) -> AppResult<Arc<dyn TrainedPipeline>>;

    /// Describe the pipeline's inputs
    async fn schema(&self) -> AppResult<ModelSchema> {
        Ok(self.pipeline().await?.schema())
    }

    /// Predict for a form, deriving the outlet age from `current_year`
    async fn predict_at(&self, form: PredictionForm, current_year: i32)
        -> AppResult<PredictionOutcome>;

    /// Predict for a form using the current UTC year
    async fn predict(&self, form: PredictionForm) -> AppResult<PredictionOutcome> {
        self.predict_at(form, Utc::now().year()).await
    }

    /// Whether the pipeline has been loaded
    fn is_loaded(&self) -> bool;
}

/// Concrete implementation backed by a pipeline artifact on disk.
pub struct PredictionAdapter {
    model_path: PathBuf,
    pipeline: OnceCell<Arc<dyn TrainedPipeline>>,
}

impl PredictionAdapter {
    /// Create an adapter that loads `model_path` on first use.
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            pipeline: OnceCell::new(),
        }
    }

    /// Create an adapter around an already loaded pipeline.
    pub fn with_pipeline(pipeline: Arc<dyn TrainedPipeline>) -> Self {
        Self {
            model_path: PathBuf::new(),
            pipeline: OnceCell::new_with(Some(pipeline)),
        }
    }

    async fn load(&self) -> AppResult<Arc<dyn TrainedPipeline>> {
        tracing::info!(path = %self.model_path.display(), "Loading prediction pipeline");
        let pipeline = LinearPipeline::load(&self.model_path).await?;
        tracing::info!(
            name = %pipeline.name,
            version = %pipeline.version,
            "Prediction pipeline loaded"
        );
        Ok(Arc::new(pipeline))
    }
}

#[async_trait]
impl PredictionService for PredictionAdapter {
    async fn pipeline(&self) -> AppResult<Arc<dyn TrainedPipeline>> {
        // Failed loads are not cached; the next call retries.
        self.pipeline
            .get_or_try_init(|| self.load())
            .await
            .cloned()
    }

    async fn predict_at(
        &self,
        form: PredictionForm,
        current_year: i32,
    ) -> AppResult<PredictionOutcome> {
        let pipeline = self.pipeline().await?;
        let input = PredictionInput::assemble(&form, current_year)?;

        let outlet_age = match input.get("outlet_age") {
            Some(FeatureValue::Numeric(age)) => *age,
            _ => return Err(AppError::internal("outlet_age missing from assembled input")),
        };

        let prediction = pipeline.predict(&input).map_err(|e| {
            tracing::warn!("Prediction failed: {}", e);
            e
        })?;

        Ok(PredictionOutcome {
            prediction,
            outlet_age,
            model: pipeline.schema().name,
        })
    }

    fn is_loaded(&self) -> bool {
        self.pipeline.initialized()
    }
}
