//! Loading configuration files

use super::schema::AdvTrainSpec;
use super::validate::validate_config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read, parse and validate a YAML configuration file
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<AdvTrainSpec> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;
    parse_config(&yaml_content)
}

/// Parse and validate a YAML document
pub fn parse_config(yaml: &str) -> Result<AdvTrainSpec> {
    let spec: AdvTrainSpec = serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))?;
    validate_config(&spec)?;
    Ok(spec)
}
