use config::{Config as ConfigLoader, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use super::error::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    pub channel_capacity: usize,
    pub batch_size: usize,
    /// CSV destination for plans; stdout when absent.
    pub output_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorConfig {
    pub batches: usize,
    pub batch_size: usize,
    pub interval_ms: u64,
    pub max_resource: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Cores assumed for snapshots that do not specify any.
    pub default_cores: f64,
    /// Clamp out-of-range growth parameters instead of rejecting the snapshot.
    #[serde(default)]
    pub clamp_parameters: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub simulator: SimulatorConfig,
    pub model: ModelConfig,
}

/// Loads configuration from `crates/executor/Config.toml` and environment variables.
pub fn load_config() -> Result<Config, Error> {
    let base_path = env::current_dir().map_err(|e| {
        Error::ConfigLoadError(format!("Failed to determine current directory: {}", e))
    })?;

    let config_file_path: PathBuf = base_path
        .join("crates")
        .join("executor")
        .join("Config.toml");

    load_config_from(&config_file_path)
}

/// Loads configuration from an explicit TOML file, overlaid with `EXECUTOR_*`
/// environment variables (`EXECUTOR_PIPELINE__BATCH_SIZE=128`).
pub fn load_config_from(config_file_path: &Path) -> Result<Config, Error> {
    if !config_file_path.exists() {
        return Err(Error::ConfigLoadError(format!(
            "Configuration file not found at calculated path: {}",
            config_file_path.display()
        )));
    }

    let s = ConfigLoader::builder()
        .add_source(
            File::from(config_file_path)
                .format(FileFormat::Toml)
                .required(true),
        )
        .add_source(
            Environment::with_prefix("EXECUTOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    validate(&app_config)?;
    Ok(app_config)
}

/// Rejects values that would only fail later inside a running task.
fn validate(config: &Config) -> Result<(), Error> {
    if !config.simulator.max_resource.is_finite() {
        return Err(Error::ConfigLoadError(format!(
            "simulator.max_resource must be finite, got {}",
            config.simulator.max_resource
        )));
    }
    if !config.model.default_cores.is_finite() {
        return Err(Error::ConfigLoadError(format!(
            "model.default_cores must be finite, got {}",
            config.model.default_cores
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const MOCK_CONFIG: &str = r#"
[pipeline]
channel_capacity = 8
batch_size = 4

[simulator]
batches = 3
batch_size = 5
interval_ms = 10
max_resource = 1.0e9

[model]
default_cores = 2.0
"#;

    #[test]
    fn test_load_config_from_file() {
        let mut file = Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(MOCK_CONFIG.as_bytes())
            .expect("Failed to write mock config");

        let config = load_config_from(file.path()).expect("Config should load");

        assert_eq!(config.pipeline.channel_capacity, 8);
        assert_eq!(config.pipeline.batch_size, 4);
        assert!(config.pipeline.output_path.is_none());
        assert_eq!(config.simulator.batches, 3);
        assert_eq!(config.simulator.max_resource, 1.0e9);
        assert_eq!(config.model.default_cores, 2.0);
        assert!(!config.model.clamp_parameters);
    }

    #[test]
    fn test_load_config_rejects_infinite_max_resource() {
        let mut file = Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temp file");
        let contents = MOCK_CONFIG.replace("max_resource = 1.0e9", "max_resource = inf");
        file.write_all(contents.as_bytes())
            .expect("Failed to write mock config");

        match load_config_from(file.path()) {
            Err(Error::ConfigLoadError(msg)) => assert!(msg.contains("max_resource")),
            other => panic!("Expected ConfigLoadError, got: {:?}", other),
        }
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from(Path::new("does/not/exist/Config.toml"));
        match result {
            Err(Error::ConfigLoadError(msg)) => assert!(msg.contains("not found")),
            other => panic!("Expected ConfigLoadError, got: {:?}", other),
        }
    }

    #[test]
    fn test_load_config_rejects_incomplete_file() {
        let mut file = Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(b"[pipeline]\nchannel_capacity = 8\n")
            .expect("Failed to write mock config");

        assert!(matches!(
            load_config_from(file.path()),
            Err(Error::ConfigLoadError(_))
        ));
    }
}
