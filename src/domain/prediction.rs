//! Prediction input assembly and the trained-pipeline contract.
//!
//! The form arrives with every field optional; `PredictionInput::assemble`
//! checks presence, derives the outlet age and lays the values out in the
//! fixed feature order the pipeline was trained on.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Kind of a model input column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Numeric,
    Categorical,
}

/// Model input columns, in the order the pipeline consumes them.
pub const FEATURE_ORDER: &[(&str, FeatureKind)] = &[
    ("item_weight", FeatureKind::Numeric),
    ("item_fat_content", FeatureKind::Categorical),
    ("item_visibility", FeatureKind::Numeric),
    ("item_type", FeatureKind::Categorical),
    ("item_rating", FeatureKind::Numeric),
    ("outlet_size", FeatureKind::Categorical),
    ("outlet_location_type", FeatureKind::Categorical),
    ("outlet_type", FeatureKind::Categorical),
    ("outlet_age", FeatureKind::Numeric),
];

/// A single feature value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Numeric(f64),
    Categorical(String),
}

impl FeatureValue {
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureValue::Numeric(_) => FeatureKind::Numeric,
            FeatureValue::Categorical(_) => FeatureKind::Categorical,
        }
    }
}

/// Raw prediction form as submitted by the client
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PredictionForm {
    #[schema(example = 9.3)]
    pub item_weight: Option<f64>,
    #[schema(example = "Low Fat")]
    pub item_fat_content: Option<String>,
    #[schema(example = 0.016)]
    pub item_visibility: Option<f64>,
    #[schema(example = "Dairy")]
    pub item_type: Option<String>,
    #[schema(example = 4.2)]
    pub item_rating: Option<f64>,
    #[schema(example = 1999)]
    pub outlet_establishment_year: Option<i32>,
    #[schema(example = "Medium")]
    pub outlet_size: Option<String>,
    #[schema(example = "Tier 1")]
    pub outlet_location_type: Option<String>,
    #[schema(example = "Supermarket Type1")]
    pub outlet_type: Option<String>,
}

/// One-row model input, ordered per `FEATURE_ORDER`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionInput {
    features: Vec<(String, FeatureValue)>,
}

impl PredictionInput {
    /// Build the model input from a submitted form.
    ///
    /// Every field must be present (blank strings count as missing). The
    /// establishment year is replaced by `outlet_age = current_year - year`.
    ///
    /// # Errors
    /// Returns `PredictionAssembly` naming every missing or malformed field.
    pub fn assemble(form: &PredictionForm, current_year: i32) -> AppResult<Self> {
        let mut problems = Vec::new();

        let weight = numeric("item_weight", form.item_weight, &mut problems);
        let fat_content = categorical("item_fat_content", &form.item_fat_content, &mut problems);
        let visibility = numeric("item_visibility", form.item_visibility, &mut problems);
        let item_type = categorical("item_type", &form.item_type, &mut problems);
        let rating = numeric("item_rating", form.item_rating, &mut problems);
        let outlet_size = categorical("outlet_size", &form.outlet_size, &mut problems);
        let location = categorical("outlet_location_type", &form.outlet_location_type, &mut problems);
        let outlet_type = categorical("outlet_type", &form.outlet_type, &mut problems);

        let age = match form.outlet_establishment_year {
            None => {
                problems.push("outlet_establishment_year is required".to_string());
                None
            }
            Some(year) if year > current_year => {
                problems.push(format!(
                    "outlet_establishment_year {} is after the current year {}",
                    year, current_year
                ));
                None
            }
            Some(year) => match current_year.checked_sub(year) {
                Some(age) => Some(f64::from(age)),
                None => {
                    problems.push(format!(
                        "outlet_establishment_year {} is out of range",
                        year
                    ));
                    None
                }
            },
        };

        if !problems.is_empty() {
            return Err(AppError::prediction_assembly(problems.join(", ")));
        }

        // All present once problems is empty
        let values = [
            weight.map(FeatureValue::Numeric),
            fat_content.map(FeatureValue::Categorical),
            visibility.map(FeatureValue::Numeric),
            item_type.map(FeatureValue::Categorical),
            rating.map(FeatureValue::Numeric),
            outlet_size.map(FeatureValue::Categorical),
            location.map(FeatureValue::Categorical),
            outlet_type.map(FeatureValue::Categorical),
            age.map(FeatureValue::Numeric),
        ];

        let features = FEATURE_ORDER
            .iter()
            .zip(values)
            .map(|((name, _), value)| {
                value
                    .map(|v| (name.to_string(), v))
                    .ok_or_else(|| AppError::internal(format!("feature {} not assembled", name)))
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self { features })
    }

    /// Build an input from explicit columns. Used for pipelines whose
    /// feature list differs from the form layout.
    pub fn from_features(features: Vec<(String, FeatureValue)>) -> Self {
        Self { features }
    }

    pub fn features(&self) -> &[(String, FeatureValue)] {
        &self.features
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.features
            .iter()
            .find(|(feature, _)| feature == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

fn numeric(name: &str, value: Option<f64>, problems: &mut Vec<String>) -> Option<f64> {
    match value {
        None => {
            problems.push(format!("{} is required", name));
            None
        }
        Some(v) if !v.is_finite() => {
            problems.push(format!("{} must be a finite number", name));
            None
        }
        Some(v) => Some(v),
    }
}

fn categorical(name: &str, value: &Option<String>, problems: &mut Vec<String>) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => {
            problems.push(format!("{} is required", name));
            None
        }
    }
}

/// Description of one pipeline input column
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FeatureSchema {
    #[schema(example = "item_type")]
    pub name: String,
    pub kind: FeatureKind,
    /// Known levels for categorical columns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

/// Public description of a loaded pipeline
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ModelSchema {
    #[schema(example = "sales_pipeline")]
    pub name: String,
    #[schema(example = "1")]
    pub version: String,
    pub features: Vec<FeatureSchema>,
}

/// A pre-trained, immutable prediction pipeline.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TrainedPipeline: Send + Sync {
    /// Describe the pipeline's inputs
    fn schema(&self) -> ModelSchema;

    /// Predict one scalar for a one-row input
    fn predict(&self, input: &PredictionInput) -> AppResult<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> PredictionForm {
        PredictionForm {
            item_weight: Some(9.3),
            item_fat_content: Some("Low Fat".to_string()),
            item_visibility: Some(0.016),
            item_type: Some("Dairy".to_string()),
            item_rating: Some(4.2),
            outlet_establishment_year: Some(2000),
            outlet_size: Some("Medium".to_string()),
            outlet_location_type: Some("Tier 1".to_string()),
            outlet_type: Some("Supermarket Type1".to_string()),
        }
    }

    #[test]
    fn test_assemble_derives_age_once() {
        let input = PredictionInput::assemble(&complete_form(), 2024).unwrap();

        assert_eq!(input.get("outlet_age"), Some(&FeatureValue::Numeric(24.0)));
        let age_count = input
            .features()
            .iter()
            .filter(|(name, _)| name == "outlet_age")
            .count();
        assert_eq!(age_count, 1);
        assert!(input.get("outlet_establishment_year").is_none());
    }

    #[test]
    fn test_assemble_follows_feature_order() {
        let input = PredictionInput::assemble(&complete_form(), 2024).unwrap();

        assert_eq!(input.len(), FEATURE_ORDER.len());
        for ((name, value), (expected, kind)) in input.features().iter().zip(FEATURE_ORDER) {
            assert_eq!(name, expected);
            assert_eq!(value.kind(), *kind);
        }
    }

    #[test]
    fn test_assemble_reports_every_missing_field() {
        let form = PredictionForm {
            item_weight: None,
            item_type: Some("   ".to_string()),
            ..complete_form()
        };

        let err = PredictionInput::assemble(&form, 2024).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, AppError::PredictionAssembly(_)));
        assert!(message.contains("item_weight is required"));
        assert!(message.contains("item_type is required"));
    }

    #[test]
    fn test_assemble_rejects_future_year() {
        let form = PredictionForm {
            outlet_establishment_year: Some(2030),
            ..complete_form()
        };

        assert!(matches!(
            PredictionInput::assemble(&form, 2024),
            Err(AppError::PredictionAssembly(_))
        ));
    }

    #[test]
    fn test_assemble_rejects_year_whose_age_overflows() {
        let form = PredictionForm {
            outlet_establishment_year: Some(i32::MIN),
            ..complete_form()
        };

        let err = PredictionInput::assemble(&form, 2024).unwrap_err();
        assert!(matches!(err, AppError::PredictionAssembly(_)));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_assemble_accepts_year_zero() {
        let form = PredictionForm {
            outlet_establishment_year: Some(0),
            ..complete_form()
        };

        let input = PredictionInput::assemble(&form, 2024).unwrap();
        assert_eq!(input.get("outlet_age"), Some(&FeatureValue::Numeric(2024.0)));
    }

    #[test]
    fn test_assemble_rejects_non_finite_numbers() {
        let form = PredictionForm {
            item_visibility: Some(f64::NAN),
            ..complete_form()
        };

        let err = PredictionInput::assemble(&form, 2024).unwrap_err();
        assert!(err.to_string().contains("item_visibility must be a finite number"));
    }

    #[test]
    fn test_assemble_trims_categorical_values() {
        let form = PredictionForm {
            outlet_size: Some("  Small ".to_string()),
            ..complete_form()
        };

        let input = PredictionInput::assemble(&form, 2024).unwrap();
        assert_eq!(
            input.get("outlet_size"),
            Some(&FeatureValue::Categorical("Small".to_string()))
        );
    }

    #[test]
    fn test_same_year_gives_zero_age() {
        let form = PredictionForm {
            outlet_establishment_year: Some(2024),
            ..complete_form()
        };

        let input = PredictionInput::assemble(&form, 2024).unwrap();
        assert_eq!(input.get("outlet_age"), Some(&FeatureValue::Numeric(0.0)));
    }
}
