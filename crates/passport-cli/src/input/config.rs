use serde::de::DeserializeOwned;
use std::fs;

use passport_core::report::EngineConfig;

use crate::input::file::resolve_path;

/// Read a config file, JSON or YAML by extension.
pub fn read_config<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let is_yaml = canonical
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    let value: T = if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    Ok(value)
}

/// Assemble the engine configuration from optional override files, falling
/// back to the built-in tables, and validate it up front: a malformed
/// table aborts the process before any request runs.
pub fn load_engine_config(
    aliases: &Option<String>,
    policy: &Option<String>,
    benchmark: &Option<String>,
) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = EngineConfig::default();
    if let Some(path) = aliases {
        config.aliases = read_config(path)?;
    }
    if let Some(path) = policy {
        config.policy = read_config(path)?;
    }
    if let Some(path) = benchmark {
        config.benchmark = read_config(path)?;
    }
    config.validate()?;
    Ok(config)
}
