//! Validated patient feature record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{PredictError, FEATURE_COUNT, FEATURE_NAMES};

/// One patient's clinical features.
///
/// Built from loosely typed JSON by [`FeatureRecord::from_json`]; the model
/// only ever sees it through [`FeatureRecord::to_ordered`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeatureRecord {
    /// Number of pregnancies.
    pub pregnancies: f64,
    /// Plasma glucose concentration (mg/dL).
    pub glucose: f64,
    /// Diastolic blood pressure (mm Hg).
    pub blood_pressure: f64,
    /// Triceps skin fold thickness (mm).
    pub skin_thickness: f64,
    /// 2-hour serum insulin (μU/ml).
    pub insulin: f64,
    /// Body mass index (kg/m²).
    #[serde(rename = "BMI")]
    pub bmi: f64,
    /// Family-history diabetes likelihood (unitless).
    pub diabetes_pedigree_function: f64,
    /// Age (years).
    pub age: f64,
}

impl FeatureRecord {
    /// Validates and coerces a JSON value into a record.
    ///
    /// The value must be an object holding every name in [`FEATURE_NAMES`].
    /// Numbers are taken as-is and numeric strings are parsed; anything else
    /// is rejected. Extra keys are ignored.
    pub fn from_json(value: &Value) -> Result<Self, PredictError> {
        let Value::Object(map) = value else {
            return Err(PredictError::MalformedRecord(format!(
                "request body must be a JSON object, got {}",
                kind(value)
            )));
        };

        let missing: Vec<&str> = FEATURE_NAMES
            .iter()
            .copied()
            .filter(|name| !map.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(PredictError::MalformedRecord(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let mut values = [0.0; FEATURE_COUNT];
        for (slot, name) in values.iter_mut().zip(FEATURE_NAMES) {
            *slot = coerce(name, &map[name])?;
        }

        Ok(Self::from_ordered(values))
    }

    /// Builds a record from values already in training order.
    pub fn from_ordered(values: [f64; FEATURE_COUNT]) -> Self {
        let [pregnancies, glucose, blood_pressure, skin_thickness, insulin, bmi, diabetes_pedigree_function, age] =
            values;
        Self {
            pregnancies,
            glucose,
            blood_pressure,
            skin_thickness,
            insulin,
            bmi,
            diabetes_pedigree_function,
            age,
        }
    }

    /// Returns the features in the order of [`FEATURE_NAMES`].
    pub fn to_ordered(&self) -> [f64; FEATURE_COUNT] {
        [
            self.pregnancies,
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.diabetes_pedigree_function,
            self.age,
        ]
    }
}

fn coerce(name: &str, value: &Value) -> Result<f64, PredictError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(PredictError::MalformedRecord(format!(
            "field '{}' must be numeric, got {}",
            name,
            kind(value)
        ))),
    }
}

fn kind(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(_) => "boolean".into(),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "array".into(),
        Value::Object(_) => "object".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "Pregnancies": 2.0,
            "Glucose": 100.0,
            "BloodPressure": 80.0,
            "SkinThickness": 32.0,
            "Insulin": 80.0,
            "BMI": 32.0,
            "DiabetesPedigreeFunction": 0.37,
            "Age": 29.0
        })
    }

    #[test]
    fn test_from_json_orders_features() {
        let record = FeatureRecord::from_json(&sample()).unwrap();
        assert_eq!(record.to_ordered(), [2.0, 100.0, 80.0, 32.0, 80.0, 32.0, 0.37, 29.0]);
    }

    #[test]
    fn test_key_order_on_the_wire_is_irrelevant() {
        let shuffled = json!({
            "Age": 29.0,
            "DiabetesPedigreeFunction": 0.37,
            "BMI": 32.0,
            "Insulin": 80.0,
            "SkinThickness": 32.0,
            "BloodPressure": 80.0,
            "Glucose": 100.0,
            "Pregnancies": 2.0
        });
        assert_eq!(
            FeatureRecord::from_json(&shuffled).unwrap(),
            FeatureRecord::from_json(&sample()).unwrap()
        );
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let mut body = sample();
        body.as_object_mut().unwrap().remove("Glucose");
        body.as_object_mut().unwrap().remove("Age");

        let err = FeatureRecord::from_json(&body).unwrap_err();
        assert_eq!(
            err,
            PredictError::MalformedRecord("missing required field(s): Glucose, Age".into())
        );
    }

    #[test]
    fn test_every_single_missing_field_is_rejected() {
        for name in FEATURE_NAMES {
            let mut body = sample();
            body.as_object_mut().unwrap().remove(name);
            let err = FeatureRecord::from_json(&body).unwrap_err();
            assert!(err.to_string().contains(name), "{}", err);
        }
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let mut body = sample();
        body["Glucose"] = json!(" 140.5 ");
        body["Age"] = json!("51");

        let record = FeatureRecord::from_json(&body).unwrap();
        assert_eq!(record.glucose, 140.5);
        assert_eq!(record.age, 51.0);
    }

    #[test]
    fn test_non_numeric_values_are_rejected() {
        for bad in [json!("abc"), json!(null), json!(true), json!([1.0]), json!({"v": 1}), json!("NaN"), json!("inf")] {
            let mut body = sample();
            body["BMI"] = bad.clone();
            let err = FeatureRecord::from_json(&body).unwrap_err();
            assert!(matches!(err, PredictError::MalformedRecord(_)), "{:?}", bad);
            assert!(err.to_string().contains("BMI"));
        }
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        let err = FeatureRecord::from_json(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            err,
            PredictError::MalformedRecord("request body must be a JSON object, got array".into())
        );
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let mut body = sample();
        body["Outcome"] = json!(1);
        assert!(FeatureRecord::from_json(&body).is_ok());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let record: FeatureRecord = serde_json::from_value(sample()).unwrap();
        assert_eq!(record.bmi, 32.0);
        let back = serde_json::to_value(record).unwrap();
        assert_eq!(back["DiabetesPedigreeFunction"], 0.37);
        assert_eq!(back["BMI"], 32.0);
    }
}
