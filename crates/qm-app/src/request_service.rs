//! Request loading, saving, validation and simulation setup.

use std::path::Path;

use qm_alloy::SimulationConfig;
use qm_diagrams::{Executor, Simulation};

use crate::error::{AppError, AppResult};
use crate::schema::{LATEST_VERSION, SimulationRequest};

/// Serialization format of a request file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Yaml,
    Json,
}

impl RequestFormat {
    /// JSON for `.json` files, YAML otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => RequestFormat::Json,
            _ => RequestFormat::Yaml,
        }
    }
}

pub fn parse_request(content: &str, format: RequestFormat) -> AppResult<SimulationRequest> {
    let request = match format {
        RequestFormat::Yaml => serde_yaml::from_str(content)?,
        RequestFormat::Json => serde_json::from_str(content)?,
    };
    Ok(request)
}

/// Load a request from a YAML or JSON file.
pub fn load_request(path: &Path) -> AppResult<SimulationRequest> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::RequestRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_request(&content, RequestFormat::from_path(path))
}

/// Save a request, in the format implied by the file extension.
pub fn save_request(path: &Path, request: &SimulationRequest) -> AppResult<()> {
    let content = match RequestFormat::from_path(path) {
        RequestFormat::Yaml => serde_yaml::to_string(request)?,
        RequestFormat::Json => serde_json::to_string_pretty(request)?,
    };
    std::fs::write(path, content).map_err(|e| AppError::RequestWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Check the request shape and derive its configuration.
pub fn validate_request(request: &SimulationRequest) -> AppResult<SimulationConfig> {
    if request.version == 0 || request.version > LATEST_VERSION {
        return Err(AppError::Validation(format!(
            "Unsupported request version {} (latest is {})",
            request.version, LATEST_VERSION
        )));
    }
    if request.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Request name must not be empty".to_string(),
        ));
    }
    if request.execution.threads == Some(0) {
        return Err(AppError::Validation(
            "Thread count must be at least 1".to_string(),
        ));
    }

    let config = SimulationConfig::from_composition(
        &request.composition,
        request.model,
        &request.overrides,
    )?;
    Ok(config)
}

/// Validate the request and build its simulation context.
pub fn build_simulation(request: &SimulationRequest) -> AppResult<Simulation> {
    let config = validate_request(request)?;
    let simulation = Simulation::builder()
        .composition(request.composition.clone())
        .config(config)
        .build()?;
    Ok(simulation)
}

/// Scheduler requested by the execution section.
pub fn executor(request: &SimulationRequest) -> AppResult<Executor> {
    Ok(Executor::from_options(
        request.execution.parallel,
        request.execution.threads,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
version: 1
name: test steel
composition:
  C: 0.2
  Mn: 1.2
  Si: 0.3
  Fe: 98.3
"#;

    #[test]
    fn yaml_defaults() {
        let req = parse_request(YAML, RequestFormat::Yaml).unwrap();
        assert_eq!(req.model, qm_alloy::KineticsModel::Li98);
        assert!(!req.execution.parallel);
        assert!(req.overrides.is_empty());
        validate_request(&req).unwrap();
    }

    #[test]
    fn unknown_element_is_parse_error() {
        let bad = YAML.replace("Si: 0.3", "Xx: 0.3");
        assert!(matches!(
            parse_request(&bad, RequestFormat::Yaml),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn version_checked() {
        let mut req = parse_request(YAML, RequestFormat::Yaml).unwrap();
        req.version = 7;
        assert!(matches!(
            validate_request(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            RequestFormat::from_path(Path::new("a/b.JSON")),
            RequestFormat::Json
        );
        assert_eq!(
            RequestFormat::from_path(Path::new("a/b.yml")),
            RequestFormat::Yaml
        );
    }
}
