//! Validated, runnable form of an artifact.

use diabetes_core::{Classifier, ClassifierError, FEATURE_COUNT, FEATURE_NAMES};

use crate::artifact::{ArtifactError, ArtifactSpec, EstimatorSpec, TransformSpec, TreeNode, FORMAT_VERSION};

type Features = [f64; FEATURE_COUNT];

#[derive(Debug, Clone)]
enum Transform {
    ReplaceZeros(Vec<(usize, f64)>),
    StandardScaler { mean: Features, scale: Features },
}

impl Transform {
    fn name(&self) -> &'static str {
        match self {
            Transform::ReplaceZeros(_) => "replace_zeros",
            Transform::StandardScaler { .. } => "standard_scaler",
        }
    }

    fn apply(&self, x: &mut Features) {
        match self {
            Transform::ReplaceZeros(replacements) => {
                for &(column, value) in replacements {
                    if x[column] == 0.0 {
                        x[column] = value;
                    }
                }
            }
            Transform::StandardScaler { mean, scale } => {
                for i in 0..FEATURE_COUNT {
                    x[i] = (x[i] - mean[i]) / scale[i];
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Estimator {
    LogisticRegression { coef: Features, intercept: f64, threshold: f64 },
    DecisionTree(Vec<TreeNode>),
}

impl Estimator {
    fn decide(&self, x: &Features) -> Result<u8, ClassifierError> {
        match self {
            Estimator::LogisticRegression { coef, intercept, threshold } => {
                let z = intercept + coef.iter().zip(x).map(|(c, v)| c * v).sum::<f64>();
                // Saturated scores are fine: the sigmoid maps ±inf to exactly 1.0 or 0.0.
                if z.is_nan() {
                    return Err(ClassifierError::new("decision score is NaN"));
                }
                let probability = 1.0 / (1.0 + (-z).exp());
                Ok(u8::from(probability >= *threshold))
            }
            Estimator::DecisionTree(nodes) => {
                let mut idx = 0;
                for _ in 0..nodes.len() {
                    match nodes[idx] {
                        TreeNode::Leaf { class } => return Ok(class),
                        TreeNode::Split { feature, threshold, left, right } => {
                            idx = if x[feature] <= threshold { left } else { right };
                        }
                    }
                }
                Err(ClassifierError::new("decision tree walk did not reach a leaf"))
            }
        }
    }
}

/// A fitted preprocessing + estimator pipeline over the ordered features.
#[derive(Debug, Clone)]
pub struct FittedPipeline {
    name: String,
    steps: Vec<Transform>,
    estimator: Estimator,
}

impl FittedPipeline {
    /// Parses and validates an artifact held in memory.
    pub fn from_json_str(json: &str) -> Result<Self, ArtifactError> {
        let spec: ArtifactSpec = serde_json::from_str(json)?;
        Self::try_from(spec)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Classifier for FittedPipeline {
    fn predict(&self, features: &Features) -> Result<u8, ClassifierError> {
        let mut x = *features;
        for step in &self.steps {
            step.apply(&mut x);
            if let Some(i) = x.iter().position(|v| v.is_nan()) {
                return Err(ClassifierError::new(format!(
                    "{} produced NaN for {}",
                    step.name(),
                    FEATURE_NAMES[i]
                )));
            }
        }
        self.estimator.decide(&x)
    }
}

impl TryFrom<ArtifactSpec> for FittedPipeline {
    type Error = ArtifactError;

    fn try_from(spec: ArtifactSpec) -> Result<Self, Self::Error> {
        if spec.format_version != FORMAT_VERSION {
            return Err(schema(format!(
                "unsupported format_version {} (expected {})",
                spec.format_version, FORMAT_VERSION
            )));
        }

        if spec.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(schema(format!(
                "feature_names {:?} do not match the expected order {:?}",
                spec.feature_names, FEATURE_NAMES
            )));
        }

        let steps = spec
            .steps
            .iter()
            .map(validate_step)
            .collect::<Result<Vec<_>, _>>()?;
        let estimator = validate_estimator(&spec.estimator)?;

        Ok(Self { name: spec.name, steps, estimator })
    }
}

fn validate_step(step: &TransformSpec) -> Result<Transform, ArtifactError> {
    match step {
        TransformSpec::ReplaceZeros { columns, values } => {
            if columns.len() != values.len() {
                return Err(schema(format!(
                    "replace_zeros has {} columns but {} values",
                    columns.len(),
                    values.len()
                )));
            }
            if let Some(c) = columns.iter().find(|&&c| c >= FEATURE_COUNT) {
                return Err(schema(format!("replace_zeros column {} is out of range", c)));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(schema("replace_zeros values must be finite"));
            }
            Ok(Transform::ReplaceZeros(columns.iter().copied().zip(values.iter().copied()).collect()))
        }
        TransformSpec::StandardScaler { mean, scale } => {
            let mean = fixed("standard_scaler.mean", mean)?;
            let scale = fixed("standard_scaler.scale", scale)?;
            if scale.contains(&0.0) {
                return Err(schema("standard_scaler.scale must be non-zero"));
            }
            Ok(Transform::StandardScaler { mean, scale })
        }
    }
}

fn validate_estimator(estimator: &EstimatorSpec) -> Result<Estimator, ArtifactError> {
    match estimator {
        EstimatorSpec::LogisticRegression { coef, intercept, threshold } => {
            let coef = fixed("logistic_regression.coef", coef)?;
            if !intercept.is_finite() {
                return Err(schema("logistic_regression.intercept must be finite"));
            }
            if !(*threshold > 0.0 && *threshold < 1.0) {
                return Err(schema(format!("logistic_regression.threshold {} must be in (0, 1)", threshold)));
            }
            Ok(Estimator::LogisticRegression { coef, intercept: *intercept, threshold: *threshold })
        }
        EstimatorSpec::DecisionTree { nodes } => {
            if nodes.is_empty() {
                return Err(schema("decision_tree has no nodes"));
            }
            for (i, node) in nodes.iter().enumerate() {
                match *node {
                    TreeNode::Leaf { class } if class > 1 => {
                        return Err(schema(format!("decision_tree node {} has class {}", i, class)));
                    }
                    TreeNode::Leaf { .. } => {}
                    TreeNode::Split { feature, threshold, left, right } => {
                        if feature >= FEATURE_COUNT || !threshold.is_finite() {
                            return Err(schema(format!("decision_tree node {} has an invalid split", i)));
                        }
                        if left >= nodes.len() || right >= nodes.len() {
                            return Err(schema(format!("decision_tree node {} points outside the tree", i)));
                        }
                    }
                }
            }
            Ok(Estimator::DecisionTree(nodes.clone()))
        }
    }
}

fn fixed(field: &str, values: &[f64]) -> Result<Features, ArtifactError> {
    let out: Features = values.try_into().map_err(|_| {
        schema(format!("{} has {} entries, expected {}", field, values.len(), FEATURE_COUNT))
    })?;
    if out.iter().any(|v| !v.is_finite()) {
        return Err(schema(format!("{} must be finite", field)));
    }
    Ok(out)
}

fn schema(message: impl Into<String>) -> ArtifactError {
    ArtifactError::Schema(message.into())
}
