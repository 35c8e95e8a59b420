//! Server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use diabetes_model::DEFAULT_ARTIFACT_PATH;
use thiserror::Error;

const RESERVED_ROUTES: [&str; 3] = ["/", "/predict", "/health"];

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a port number, got {value:?}")]
    InvalidPort { var: &'static str, value: String },

    #[error("{var} is not a usable route ({value:?}): {reason}")]
    InvalidRoute {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Location of the fitted pipeline artifact.
    pub model_path: PathBuf,
    /// Route serving the interactive docs.
    pub docs_path: String,
    /// Route serving the API description document.
    pub spec_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            model_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            docs_path: "/swagger".into(),
            spec_path: "/static/swagger.json".into(),
        }
    }
}

impl ServerConfig {
    /// Reads `DIABETES_*` variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("DIABETES_PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: "DIABETES_PORT",
                value,
            })?,
            None => defaults.port,
        };

        let docs_path = route("DIABETES_DOCS_PATH", lookup("DIABETES_DOCS_PATH"), defaults.docs_path)?;
        let spec_path = route("DIABETES_SPEC_PATH", lookup("DIABETES_SPEC_PATH"), defaults.spec_path)?;
        if docs_path == spec_path {
            return Err(ConfigError::InvalidRoute {
                var: "DIABETES_SPEC_PATH",
                value: spec_path,
                reason: "must differ from the docs path",
            });
        }
        if spec_path.starts_with(&format!("{}/", docs_path)) {
            return Err(ConfigError::InvalidRoute {
                var: "DIABETES_SPEC_PATH",
                value: spec_path,
                reason: "must not be inside the docs path",
            });
        }

        Ok(Self {
            host: lookup("DIABETES_HOST").unwrap_or(defaults.host),
            port,
            model_path: lookup("DIABETES_MODEL_PATH").map(PathBuf::from).unwrap_or(defaults.model_path),
            docs_path,
            spec_path,
        })
    }
}

fn route(var: &'static str, value: Option<String>, default: String) -> Result<String, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let invalid = |reason| ConfigError::InvalidRoute { var, value: value.clone(), reason };

    if !value.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if value.contains(['{', '}', '*']) || value.chars().any(char::is_whitespace) {
        return Err(invalid("must be a plain path"));
    }

    let trimmed = value.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };
    if RESERVED_ROUTES.contains(&normalized) {
        return Err(invalid("collides with a built-in route"));
    }
    Ok(normalized.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg, ServerConfig::default());
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.docs_path, "/swagger");
        assert_eq!(cfg.model_path, PathBuf::from("models_output/full_prediction_pipeline.json"));
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("DIABETES_HOST", "127.0.0.1"),
            ("DIABETES_PORT", "8080"),
            ("DIABETES_MODEL_PATH", "/srv/model.json"),
            ("DIABETES_DOCS_PATH", "/docs/"),
            ("DIABETES_SPEC_PATH", "/openapi.json"),
        ])
        .unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.model_path, PathBuf::from("/srv/model.json"));
        assert_eq!(cfg.docs_path, "/docs");
        assert_eq!(cfg.spec_path, "/openapi.json");
    }

    #[test]
    fn test_invalid_port() {
        assert_eq!(
            config(&[("DIABETES_PORT", "http")]).unwrap_err(),
            ConfigError::InvalidPort { var: "DIABETES_PORT", value: "http".into() }
        );
        assert!(config(&[("DIABETES_PORT", "70000")]).is_err());
    }

    #[test]
    fn test_invalid_routes() {
        for bad in ["swagger", "/", "/predict", "/health/", "/{id}", "/a b"] {
            assert!(
                matches!(config(&[("DIABETES_DOCS_PATH", bad)]), Err(ConfigError::InvalidRoute { .. })),
                "{}",
                bad
            );
        }
        assert!(config(&[("DIABETES_DOCS_PATH", "/x"), ("DIABETES_SPEC_PATH", "/x")]).is_err());
    }

    #[test]
    fn test_spec_path_inside_docs_path_is_rejected() {
        for spec in ["/swagger/index.html", "/swagger/docs.css", "/swagger/swagger.json"] {
            assert_eq!(
                config(&[("DIABETES_SPEC_PATH", spec)]).unwrap_err(),
                ConfigError::InvalidRoute {
                    var: "DIABETES_SPEC_PATH",
                    value: spec.into(),
                    reason: "must not be inside the docs path",
                }
            );
        }
        assert!(config(&[("DIABETES_DOCS_PATH", "/docs"), ("DIABETES_SPEC_PATH", "/docs/index.html")]).is_err());
        assert!(config(&[("DIABETES_SPEC_PATH", "/swagger.json")]).is_ok());
    }
}
