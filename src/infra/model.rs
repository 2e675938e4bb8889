//! Trained pipeline artifact loading.
//!
//! The artifact is a JSON document describing a fitted preprocessing step
//! (standardisation for numeric columns, one-hot encoding for categorical
//! columns) followed by a linear regressor:
//!
//! ```json
//! {
//!   "name": "sales_pipeline",
//!   "version": "1",
//!   "features": [
//!     {"name": "item_weight", "kind": "numeric", "mean": 12.6, "scale": 4.2},
//!     {"name": "item_type", "kind": "categorical", "categories": ["Dairy", "Snack Foods"]}
//!   ],
//!   "coefficients": [0.5, 10.0, -3.0],
//!   "intercept": 2000.0
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{
    FeatureKind, FeatureSchema, FeatureValue, ModelSchema, PredictionInput, TrainedPipeline,
};
use crate::errors::{AppError, AppResult};

/// One fitted input column
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeatureEncoder {
    Numeric {
        name: String,
        #[serde(default)]
        mean: f64,
        #[serde(default = "unit_scale")]
        scale: f64,
    },
    Categorical {
        name: String,
        categories: Vec<String>,
    },
}

fn unit_scale() -> f64 {
    1.0
}

impl FeatureEncoder {
    fn name(&self) -> &str {
        match self {
            FeatureEncoder::Numeric { name, .. } | FeatureEncoder::Categorical { name, .. } => {
                name.as_str()
            }
        }
    }

    fn kind(&self) -> FeatureKind {
        match self {
            FeatureEncoder::Numeric { .. } => FeatureKind::Numeric,
            FeatureEncoder::Categorical { .. } => FeatureKind::Categorical,
        }
    }

    /// Number of encoded columns this feature contributes
    fn width(&self) -> usize {
        match self {
            FeatureEncoder::Numeric { .. } => 1,
            FeatureEncoder::Categorical { categories, .. } => categories.len(),
        }
    }

    /// Append the encoded value to `out`. Unknown categories encode as zeros.
    fn encode(&self, value: &FeatureValue, out: &mut Vec<f64>) -> AppResult<()> {
        match (self, value) {
            (FeatureEncoder::Numeric { mean, scale, .. }, FeatureValue::Numeric(x)) => {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                out.push((x - mean) / scale);
                Ok(())
            }
            (FeatureEncoder::Categorical { categories, .. }, FeatureValue::Categorical(level)) => {
                out.extend(
                    categories
                        .iter()
                        .map(|c| if c == level { 1.0 } else { 0.0 }),
                );
                Ok(())
            }
            _ => Err(AppError::prediction_assembly(format!(
                "{} expects a {:?} value",
                self.name(),
                self.kind()
            ))),
        }
    }
}

/// Standardise/one-hot + linear regression pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct LinearPipeline {
    pub name: String,
    #[serde(default)]
    pub version: String,
    features: Vec<FeatureEncoder>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearPipeline {
    /// Load and validate an artifact from disk.
    ///
    /// # Errors
    /// Returns `ArtifactLoad` if the file is missing, unreadable or
    /// inconsistent.
    pub async fn load(path: &Path) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::artifact_load(format!("cannot read {}: {}", path.display(), e))
        })?;

        Self::from_json(&raw).map_err(|e| match e {
            AppError::ArtifactLoad(msg) => {
                AppError::artifact_load(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse and validate an artifact document.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let pipeline: Self = serde_json::from_str(raw)
            .map_err(|e| AppError::artifact_load(format!("malformed artifact: {}", e)))?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    fn validate(&self) -> AppResult<()> {
        if self.features.is_empty() {
            return Err(AppError::artifact_load("artifact declares no features"));
        }

        let mut seen = HashSet::new();
        for feature in &self.features {
            if !seen.insert(feature.name()) {
                return Err(AppError::artifact_load(format!(
                    "duplicate feature {}",
                    feature.name()
                )));
            }
        }

        let width: usize = self.features.iter().map(FeatureEncoder::width).sum();
        if width != self.coefficients.len() {
            return Err(AppError::artifact_load(format!(
                "expected {} coefficients for the encoded features, found {}",
                width,
                self.coefficients.len()
            )));
        }

        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AppError::artifact_load("non-finite model parameter"));
        }

        for feature in &self.features {
            if let FeatureEncoder::Numeric { name, mean, scale } = feature {
                if !mean.is_finite() || !scale.is_finite() {
                    return Err(AppError::artifact_load(format!(
                        "non-finite standardisation for {}",
                        name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Encode one input row into the regressor's design vector
    fn encode(&self, input: &PredictionInput) -> AppResult<Vec<f64>> {
        if input.len() != self.features.len() {
            return Err(AppError::prediction_assembly(format!(
                "model expects {} features, got {}",
                self.features.len(),
                input.len()
            )));
        }

        let mut row = Vec::with_capacity(self.coefficients.len());
        for (encoder, (name, value)) in self.features.iter().zip(input.features()) {
            if encoder.name() != name {
                return Err(AppError::prediction_assembly(format!(
                    "model expects feature {} where {} was given",
                    encoder.name(),
                    name
                )));
            }
            encoder.encode(value, &mut row)?;
        }

        Ok(row)
    }
}

impl TrainedPipeline for LinearPipeline {
    fn schema(&self) -> ModelSchema {
        ModelSchema {
            name: self.name.clone(),
            version: self.version.clone(),
            features: self
                .features
                .iter()
                .map(|feature| FeatureSchema {
                    name: feature.name().to_string(),
                    kind: feature.kind(),
                    categories: match feature {
                        FeatureEncoder::Categorical { categories, .. } => Some(categories.clone()),
                        FeatureEncoder::Numeric { .. } => None,
                    },
                })
                .collect(),
        }
    }

    fn predict(&self, input: &PredictionInput) -> AppResult<f64> {
        let row = self.encode(input)?;
        let prediction = self.intercept
            + row
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>();

        if !prediction.is_finite() {
            return Err(AppError::internal("model produced a non-finite prediction"));
        }

        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT: &str = r#"{
        "name": "tiny",
        "version": "1",
        "features": [
            {"name": "weight", "kind": "numeric", "mean": 10.0, "scale": 2.0},
            {"name": "size", "kind": "categorical", "categories": ["Small", "Large"]}
        ],
        "coefficients": [3.0, 1.0, 5.0],
        "intercept": 100.0
    }"#;

    fn input(weight: f64, size: &str) -> PredictionInput {
        PredictionInput::from_features(vec![
            ("weight".to_string(), FeatureValue::Numeric(weight)),
            ("size".to_string(), FeatureValue::Categorical(size.to_string())),
        ])
    }

    #[test]
    fn test_predict_standardises_and_one_hot_encodes() {
        let pipeline = LinearPipeline::from_json(ARTIFACT).unwrap();

        // (14 - 10) / 2 * 3 + 5 (Large) + 100
        let prediction = pipeline.predict(&input(14.0, "Large")).unwrap();
        assert!((prediction - 111.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_category_encodes_as_zeros() {
        let pipeline = LinearPipeline::from_json(ARTIFACT).unwrap();

        let prediction = pipeline.predict(&input(10.0, "Medium")).unwrap();
        assert!((prediction - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_coefficient_count_mismatch() {
        let raw = ARTIFACT.replace("[3.0, 1.0, 5.0]", "[3.0, 1.0]");

        let err = LinearPipeline::from_json(&raw).unwrap_err();
        assert!(matches!(err, AppError::ArtifactLoad(_)));
    }

    #[test]
    fn test_rejects_non_finite_standardisation() {
        let mut pipeline = LinearPipeline::from_json(ARTIFACT).unwrap();
        pipeline.features[0] = FeatureEncoder::Numeric {
            name: "weight".to_string(),
            mean: 10.0,
            scale: f64::NAN,
        };

        let err = pipeline.validate().unwrap_err();
        assert!(matches!(err, AppError::ArtifactLoad(_)));
        assert!(err.to_string().contains("weight"));
    }

    #[test]
    fn test_rejects_malformed_document() {
        let err = LinearPipeline::from_json("not json").unwrap_err();
        assert!(matches!(err, AppError::ArtifactLoad(_)));
    }

    #[test]
    fn test_rejects_duplicate_features() {
        let raw = ARTIFACT.replace("\"size\"", "\"weight\"");

        let err = LinearPipeline::from_json(&raw).unwrap_err();
        assert!(err.to_string().contains("duplicate feature"));
    }

    #[test]
    fn test_mismatched_input_is_an_assembly_error() {
        let pipeline = LinearPipeline::from_json(ARTIFACT).unwrap();
        let swapped = PredictionInput::from_features(vec![
            ("size".to_string(), FeatureValue::Categorical("Small".to_string())),
            ("weight".to_string(), FeatureValue::Numeric(1.0)),
        ]);

        assert!(matches!(
            pipeline.predict(&swapped),
            Err(AppError::PredictionAssembly(_))
        ));
    }

    #[test]
    fn test_schema_lists_categories() {
        let schema = LinearPipeline::from_json(ARTIFACT).unwrap().schema();

        assert_eq!(schema.name, "tiny");
        assert_eq!(schema.features.len(), 2);
        assert_eq!(schema.features[0].categories, None);
        assert_eq!(
            schema.features[1].categories,
            Some(vec!["Small".to_string(), "Large".to_string()])
        );
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = LinearPipeline::load(Path::new("does/not/exist.json"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ArtifactLoad(_)));
    }
}
