use std::fmt::{self, Display};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use xyz_core::errors::{ErrorInfo, XyzError};
use xyz_core::Record;

/// YAML-configurable parameters governing a corpus run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Sampler name passed to the backend.
    #[serde(default = "default_sampler")]
    pub sampler: String,
    /// Sampling steps.
    #[serde(default = "default_steps")]
    pub steps: u32,
    /// Run seed, used unless `seed_policy` is `record`.
    #[serde(default = "default_seed")]
    pub seed: i64,
    /// Classifier-free guidance scale.
    #[serde(default = "default_cfg_scale")]
    pub cfg_scale: f64,
    /// Output width in pixels.
    #[serde(default = "default_dimension")]
    pub width: u32,
    /// Output height in pixels.
    #[serde(default = "default_dimension")]
    pub height: u32,
    /// Which seed each record is generated with.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Abort the run on the first failed record.
    #[serde(default)]
    pub fail_fast: bool,
    /// Backend connection settings.
    #[serde(default)]
    pub backend: BackendConfig,
}

fn default_sampler() -> String {
    "Euler a".to_string()
}

fn default_steps() -> u32 {
    20
}

fn default_seed() -> i64 {
    555
}

fn default_cfg_scale() -> f64 {
    7.0
}

fn default_dimension() -> u32 {
    512
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sampler: default_sampler(),
            steps: default_steps(),
            seed: default_seed(),
            cfg_scale: default_cfg_scale(),
            width: default_dimension(),
            height: default_dimension(),
            seed_policy: SeedPolicy::default(),
            fail_fast: false,
            backend: BackendConfig::default(),
        }
    }
}

impl RunConfig {
    /// Loads a YAML configuration file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, XyzError> {
        let text = fs::read_to_string(path).map_err(|err| XyzError::io("config-read", path, err))?;
        serde_yaml::from_str(&text).map_err(|err| {
            XyzError::Serde(ErrorInfo::new("config-parse", err.to_string()).with_path(path))
        })
    }

    /// Seed sent to the backend and embedded in artifact names for `record`.
    pub fn effective_seed(&self, record: &Record) -> i64 {
        match self.seed_policy {
            SeedPolicy::Run => self.seed,
            SeedPolicy::Record => record.seed,
        }
    }
}

/// Source of the per-record generation seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedPolicy {
    /// Every record uses the run seed.
    #[default]
    Run,
    /// Every record uses its own stored seed.
    Record,
}

impl FromStr for SeedPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "run" => Ok(SeedPolicy::Run),
            "record" => Ok(SeedPolicy::Record),
            other => Err(format!("unknown seed policy {other:?} (expected run|record)")),
        }
    }
}

impl Display for SeedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedPolicy::Run => f.write_str("run"),
            SeedPolicy::Record => f.write_str("record"),
        }
    }
}

/// Where the synthesis backend listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// URL scheme, `http` unless the backend sits behind TLS.
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Host name or address.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7860
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
            timeout_secs: None,
        }
    }
}

impl BackendConfig {
    /// `scheme://host:port` without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: RunConfig = serde_yaml::from_str(
            "steps: 30\nseed_policy: record\nbackend:\n  host: gpu-box\n",
        )
        .unwrap();
        assert_eq!(config.steps, 30);
        assert_eq!(config.sampler, "Euler a");
        assert_eq!(config.seed_policy, SeedPolicy::Record);
        assert_eq!(config.backend.base_url(), "http://gpu-box:7860");
    }

    #[test]
    fn effective_seed_follows_policy() {
        let record = Record {
            seed: 42,
            ..Record::new("p")
        };
        let mut config = RunConfig::default();
        assert_eq!(config.effective_seed(&record), 555);
        config.seed_policy = SeedPolicy::Record;
        assert_eq!(config.effective_seed(&record), 42);
    }

    #[test]
    fn seed_policy_parses() {
        assert_eq!("record".parse::<SeedPolicy>().unwrap(), SeedPolicy::Record);
        assert!("fixed".parse::<SeedPolicy>().is_err());
    }
}
