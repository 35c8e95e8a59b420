//! Static Swagger 2.0 description of the HTTP API.

use std::sync::LazyLock;

use diabetes_core::FEATURE_NAMES;
use serde_json::{json, Value};

pub const API_TITLE: &str = "Diabetes Prediction API";
pub const API_VERSION: &str = "1.0.0";

/// The document rendered once; every request gets the same bytes.
pub static API_SPEC_JSON: LazyLock<String> = LazyLock::new(|| api_spec().to_string());

fn sample_record() -> Value {
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

/// Builds the API description.
pub fn api_spec() -> Value {
    json!({
        "swagger": "2.0",
        "info": {
            "version": API_VERSION,
            "title": API_TITLE
        },
        "paths": {
            "/predict": {
                "post": {
                    "summary": "Predict whether a patient is diabetic",
                    "consumes": ["application/json"],
                    "produces": ["application/json"],
                    "parameters": [
                        {
                            "in": "body",
                            "name": "body",
                            "description": "Patient clinical and biometric features",
                            "required": true,
                            "schema": {
                                "type": "object",
                                "required": FEATURE_NAMES,
                                "properties": {
                                    "Pregnancies": { "type": "number", "description": "Number of pregnancies (count)" },
                                    "Glucose": { "type": "number", "description": "Plasma glucose concentration (mg/dL)" },
                                    "BloodPressure": { "type": "number", "description": "Diastolic blood pressure (mm Hg)" },
                                    "SkinThickness": { "type": "number", "description": "Triceps skin fold thickness (mm)" },
                                    "Insulin": { "type": "number", "description": "2-hour serum insulin (μU/ml)" },
                                    "BMI": { "type": "number", "description": "Body mass index (kg/m²)" },
                                    "DiabetesPedigreeFunction": { "type": "number", "description": "Diabetes likelihood from family history (unitless)" },
                                    "Age": { "type": "number", "description": "Patient age (years)" }
                                },
                                "example": sample_record()
                            }
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "Successful prediction",
                            "schema": {
                                "type": "object",
                                "properties": {
                                    "prediction": { "type": "integer", "enum": [0, 1], "description": "0 for non-diabetic, 1 for diabetic" },
                                    "description": { "type": "string", "description": "Human-readable prediction" }
                                }
                            },
                            "examples": {
                                "application/json": { "prediction": 0, "description": "Pacient is non-diabetic" }
                            }
                        },
                        "400": {
                            "description": "Invalid input: unparsable JSON, missing fields or non-numeric values",
                            "schema": { "$ref": "#/definitions/Error" }
                        },
                        "500": {
                            "description": "Prediction pipeline not loaded or inference failed",
                            "schema": { "$ref": "#/definitions/Error" }
                        }
                    }
                }
            }
        },
        "definitions": {
            "Error": {
                "type": "object",
                "properties": {
                    "error": { "type": "string" }
                }
            }
        }
    })
}
