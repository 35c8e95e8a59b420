//! Process-wide owner of the loaded pipeline.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use diabetes_core::{Classifier, FeatureRecord, Label, PredictError};
use serde_json::Value;
use tracing::{error, info};

use crate::artifact::load_artifact;

/// Terminal load state of the pipeline.
///
/// Entered once at startup and never changed afterwards.
#[derive(Clone)]
pub enum ModelState {
    Ready(Arc<dyn Classifier>),
    Unavailable { reason: String },
}

impl fmt::Debug for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelState::Ready(_) => f.write_str("Ready"),
            ModelState::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
        }
    }
}

/// Maps feature records to labels using a read-only classifier.
///
/// Cloning shares the underlying classifier.
#[derive(Clone, Debug)]
pub struct InferenceAdapter {
    state: ModelState,
}

impl InferenceAdapter {
    /// Wraps an already constructed classifier.
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { state: ModelState::Ready(classifier) }
    }

    /// Creates an adapter that rejects every prediction.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self { state: ModelState::Unavailable { reason: reason.into() } }
    }

    /// Loads the artifact at `path`.
    ///
    /// Never fails: a missing, corrupt or incompatible artifact is logged and
    /// leaves the adapter in [`ModelState::Unavailable`].
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        info!("Loading prediction pipeline from {}", path.display());

        match load_artifact(path) {
            Ok(pipeline) => {
                info!("Prediction pipeline '{}' loaded successfully", pipeline.name());
                Self::new(Arc::new(pipeline))
            }
            Err(e) => {
                error!("Prediction pipeline unavailable ({}): {}", path.display(), e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }

    /// Predicts the label for one validated record.
    pub fn predict(&self, record: &FeatureRecord) -> Result<Label, PredictError> {
        let ModelState::Ready(classifier) = &self.state else {
            return Err(PredictError::ArtifactUnavailable);
        };

        let class = classifier.predict(&record.to_ordered()).map_err(|e| {
            error!("Classifier failed on {:?}: {}", record, e);
            PredictError::InferenceFailure(e.to_string())
        })?;

        Label::from_class(class).ok_or_else(|| {
            error!("Classifier returned out-of-range class {}", class);
            PredictError::InferenceFailure(format!("unexpected class {}", class))
        })
    }

    /// Validates a raw JSON body and predicts its label.
    ///
    /// Availability is checked first, so an unavailable pipeline reports
    /// [`PredictError::ArtifactUnavailable`] even for malformed input.
    pub fn predict_json(&self, value: &Value) -> Result<Label, PredictError> {
        if !self.is_ready() {
            return Err(PredictError::ArtifactUnavailable);
        }
        let record = FeatureRecord::from_json(value)?;
        self.predict(&record)
    }
}
