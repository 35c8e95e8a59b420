//! Loads the prediction pipeline and classifies a sample patient.
//!
//! Run with: cargo run -p diabetes-model --example predict_sample [artifact-path]

use diabetes_core::{FeatureRecord, Prediction};
use diabetes_model::{InferenceAdapter, DEFAULT_ARTIFACT_PATH};

fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_ARTIFACT_PATH.to_string());
    let adapter = InferenceAdapter::load(&path);

    // Replace with real measurements.
    let sample = FeatureRecord {
        pregnancies: 2.0,
        glucose: 100.0,
        blood_pressure: 80.0,
        skin_thickness: 32.0,
        insulin: 80.0,
        bmi: 32.0,
        diabetes_pedigree_function: 0.37,
        age: 29.0,
    };

    match adapter.predict(&sample) {
        Ok(label) => {
            println!("Sample data: {:?}", sample);
            println!("Predicted diabetes: {}", Prediction::from(label).prediction);
        }
        Err(e) => println!("Prediction failed: {}", e),
    }
}
