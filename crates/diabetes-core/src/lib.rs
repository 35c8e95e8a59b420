//! Core domain types and error definitions for diabetes prediction.
//!
//! This crate provides the fundamental types shared across the workspace:
//!
//! - [`FEATURE_NAMES`] — The eight clinical features, in training order
//! - [`FeatureRecord`] — A validated, strongly typed patient record
//! - [`Label`] and [`Prediction`] — Classifier output and its wire form
//! - [`Classifier`] — The capability a fitted model artifact provides
//! - [`PredictError`] — Error type for the request-to-prediction path
//!
//! # Example
//!
//! ```rust
//! use diabetes_core::{FeatureRecord, Label, Prediction};
//!
//! let body = serde_json::json!({
//!     "Pregnancies": 2.0, "Glucose": 100.0, "BloodPressure": 80.0,
//!     "SkinThickness": 32.0, "Insulin": 80.0, "BMI": 32.0,
//!     "DiabetesPedigreeFunction": 0.37, "Age": 29.0
//! });
//!
//! let record = FeatureRecord::from_json(&body).unwrap();
//! assert_eq!(record.to_ordered()[1], 100.0);
//!
//! let prediction = Prediction::from(Label::NonDiabetic);
//! assert_eq!(prediction.description, "Pacient is non-diabetic");
//! ```

mod record;

pub use record::FeatureRecord;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 8;

/// Feature names in the exact column order the model was fitted on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Pregnancies",
    "Glucose",
    "BloodPressure",
    "SkinThickness",
    "Insulin",
    "BMI",
    "DiabetesPedigreeFunction",
    "Age",
];

/// Errors that can occur while turning a request into a prediction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// The model artifact failed to load at startup.
    #[error("Prediction function not loaded.")]
    ArtifactUnavailable,

    /// The input record is missing fields, has non-numeric values, or is not an object.
    #[error("{0}")]
    MalformedRecord(String),

    /// The classifier failed on an otherwise well-formed record.
    #[error("Prediction failed: {0}")]
    InferenceFailure(String),
}

/// Failure raised from inside a classifier's decision function.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct ClassifierError(pub String);

impl ClassifierError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A fitted binary classifier over the ordered feature vector.
///
/// Implementations must be read-only after construction so that a single
/// instance can serve concurrent requests without locking.
pub trait Classifier: Send + Sync {
    /// Returns the predicted class for one patient.
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<u8, ClassifierError>;
}

/// Binary outcome of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    NonDiabetic = 0,
    Diabetic = 1,
}

impl Label {
    /// Converts a raw class index, rejecting anything outside {0, 1}.
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            0 => Some(Label::NonDiabetic),
            1 => Some(Label::Diabetic),
            _ => None,
        }
    }

    pub fn as_class(self) -> u8 {
        self as u8
    }

    /// Human-readable description returned to API clients.
    pub fn description(self) -> &'static str {
        match self {
            Label::NonDiabetic => "Pacient is non-diabetic",
            Label::Diabetic => "Pacient is diabetic",
        }
    }
}

/// Response body for a successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 0 for non-diabetic, 1 for diabetic.
    pub prediction: u8,
    pub description: String,
}

impl From<Label> for Prediction {
    fn from(label: Label) -> Self {
        Self {
            prediction: label.as_class(),
            description: label.description().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_class() {
        assert_eq!(Label::from_class(0), Some(Label::NonDiabetic));
        assert_eq!(Label::from_class(1), Some(Label::Diabetic));
        assert_eq!(Label::from_class(2), None);
        assert_eq!(Label::Diabetic.as_class(), 1);
    }

    #[test]
    fn test_prediction_from_label() {
        let p = Prediction::from(Label::Diabetic);
        assert_eq!(p.prediction, 1);
        assert_eq!(p.description, "Pacient is diabetic");

        let json = serde_json::to_value(Prediction::from(Label::NonDiabetic)).unwrap();
        assert_eq!(json["prediction"], 0);
        assert_eq!(json["description"], "Pacient is non-diabetic");
    }

    #[test]
    fn test_unavailable_message_is_fixed() {
        assert_eq!(PredictError::ArtifactUnavailable.to_string(), "Prediction function not loaded.");
    }
}
