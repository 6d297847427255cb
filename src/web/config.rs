use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::coverage::{CoverageComposer, GeoEngine};
use crate::solver::{AzimuthReference, Solver, SolverKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Satellite catalog, JSON
    pub catalog: PathBuf,
    /// Country boundaries, GeoJSON feature collection
    pub countries: PathBuf,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub composer: ComposerConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolverConfig {
    #[serde(default)]
    pub strategy: SolverKind,
    #[serde(default)]
    pub azimuth_reference: AzimuthReference,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComposerConfig {
    #[serde(default = "default_circle_steps")]
    pub circle_steps: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            circle_steps: default_circle_steps(),
        }
    }
}

fn default_circle_steps() -> usize {
    64
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Cap on a single coverage computation
    #[serde(
        default = "default_request_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub request_timeout: Duration,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn solver(&self) -> Box<dyn Solver + Send + Sync> {
        self.solver.strategy.build(self.solver.azimuth_reference)
    }

    pub fn composer(&self) -> CoverageComposer {
        CoverageComposer::new(
            self.solver(),
            Box::new(GeoEngine {
                circle_steps: self.composer.circle_steps,
            }),
        )
    }
}
