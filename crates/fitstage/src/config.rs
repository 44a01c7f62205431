use fitstage_linear::{ElasticNetParams, LinearError, Selection};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {path}: {message}")]
    Parse {
        path: PathBuf,
        format: ConfigFormat,
        message: String,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// On-disk format of the configuration document, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.json` and `.toml` select their formats, anything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => ConfigFormat::Json,
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigFormat::Yaml => write!(f, "YAML"),
            ConfigFormat::Json => write!(f, "JSON"),
            ConfigFormat::Toml => write!(f, "TOML"),
        }
    }
}

/// Stage configuration.
///
/// Only the keys below are read; the document may carry settings for other
/// pipeline stages, which are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub base: BaseConfig,
    pub split_data: SplitDataConfig,
    /// Directory receiving `model.joblib`
    pub model_dir: PathBuf,
    pub estimators: EstimatorsConfig,
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseConfig {
    pub random_state: u64,
    /// Column dropped from the feature matrix
    pub target_col: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitDataConfig {
    pub train_path: PathBuf,
    pub test_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorsConfig {
    #[serde(rename = "ElasticNet")]
    pub elastic_net: EstimatorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    pub params: ElasticNetConfig,
}

/// Elastic-net hyperparameters as they appear in the config document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticNetConfig {
    pub alpha: f64,
    pub l1_ratio: f64,

    #[serde(default = "default_max_iter")]
    pub max_iter: usize,

    #[serde(default = "default_tol")]
    pub tol: f64,

    #[serde(default = "default_fit_intercept")]
    pub fit_intercept: bool,

    #[serde(default)]
    pub selection: Selection,
}

fn default_max_iter() -> usize {
    ElasticNetParams::default().max_iter
}

fn default_tol() -> f64 {
    ElasticNetParams::default().tol
}

fn default_fit_intercept() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Path of the scores JSON
    pub scores: PathBuf,
    /// Path of the params JSON
    pub params: PathBuf,
}

impl StageConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let format = ConfigFormat::from_path(path);
        let config = Self::parse(&content, format).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse a document without validating it
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, String> {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base.target_col.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "base.target_col must not be empty".to_string(),
            ));
        }

        for (key, path) in [
            ("split_data.train_path", &self.split_data.train_path),
            ("split_data.test_path", &self.split_data.test_path),
            ("model_dir", &self.model_dir),
            ("reports.scores", &self.reports.scores),
            ("reports.params", &self.reports.params),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", key)));
            }
        }

        self.elastic_net_params().validate().map_err(|e| match e {
            LinearError::InvalidParams(msg) => {
                ConfigError::Invalid(format!("estimators.ElasticNet.params: {}", msg))
            }
            other => ConfigError::Invalid(other.to_string()),
        })
    }

    /// Engine parameters, with the seed taken from `base.random_state`
    pub fn elastic_net_params(&self) -> ElasticNetParams {
        let params = &self.estimators.elastic_net.params;
        ElasticNetParams::new(params.alpha, params.l1_ratio)
            .max_iter(params.max_iter)
            .tol(params.tol)
            .fit_intercept(params.fit_intercept)
            .selection(params.selection)
            .random_state(self.base.random_state)
    }

    /// Location of the serialized model inside `model_dir`
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(crate::artifact::MODEL_FILE_NAME)
    }
}
