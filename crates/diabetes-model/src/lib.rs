//! Inference adapter for the diabetes prediction pipeline.
//!
//! A fitted pipeline is produced offline and stored as a JSON artifact. This
//! crate loads it once, validates it against the feature contract in
//! [`diabetes_core`], and exposes it through [`InferenceAdapter`]:
//!
//! - [`load_artifact`] — Reads and validates an artifact into a [`FittedPipeline`]
//! - [`InferenceAdapter`] — Owns the loaded pipeline, or records why it is unavailable
//!
//! # Example
//!
//! ```rust,no_run
//! use diabetes_model::InferenceAdapter;
//!
//! let adapter = InferenceAdapter::load("models_output/full_prediction_pipeline.json");
//! if !adapter.is_ready() {
//!     eprintln!("pipeline unavailable");
//! }
//! ```

mod adapter;
mod artifact;
mod pipeline;

pub use adapter::{InferenceAdapter, ModelState};
pub use artifact::{load_artifact, ArtifactError, ArtifactSpec, EstimatorSpec, TransformSpec, TreeNode, FORMAT_VERSION};
pub use pipeline::FittedPipeline;

/// Default artifact location, relative to the working directory.
pub const DEFAULT_ARTIFACT_PATH: &str = "models_output/full_prediction_pipeline.json";
