//! On-disk artifact schema and loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::FittedPipeline;

/// The only artifact layout this crate understands.
pub const FORMAT_VERSION: u32 = 1;

/// Errors from reading or validating an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Incompatible artifact: {0}")]
    Schema(String),
}

/// Serialized form of a fitted pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub format_version: u32,
    #[serde(default)]
    pub name: String,
    /// Column order the pipeline was fitted on.
    pub feature_names: Vec<String>,
    /// Preprocessing steps, applied in order.
    #[serde(default)]
    pub steps: Vec<TransformSpec>,
    pub estimator: EstimatorSpec,
}

/// A fitted preprocessing step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformSpec {
    /// Replaces zero readings in `columns` with the paired fitted `values`.
    ReplaceZeros { columns: Vec<usize>, values: Vec<f64> },
    /// Standardizes every feature as `(x - mean) / scale`.
    StandardScaler { mean: Vec<f64>, scale: Vec<f64> },
}

/// The fitted decision function.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EstimatorSpec {
    LogisticRegression {
        coef: Vec<f64>,
        intercept: f64,
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
    /// Flat node array; node 0 is the root.
    DecisionTree { nodes: Vec<TreeNode> },
}

fn default_threshold() -> f64 {
    0.5
}

/// One decision tree node. Samples with `x[feature] <= threshold` go left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { class: u8 },
}

/// Reads the artifact at `path` and validates it into a runnable pipeline.
pub fn load_artifact(path: impl AsRef<Path>) -> Result<FittedPipeline, ArtifactError> {
    let content = fs::read_to_string(path)?;
    let spec: ArtifactSpec = serde_json::from_str(&content)?;
    FittedPipeline::try_from(spec)
}
