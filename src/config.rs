use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_API_BASE: &str = "https://api.hahow.in/api";

/// Configuration for one download run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Course page URL; the course id is the path segment after `courses/`.
    #[serde(default)]
    pub course_url: String,

    /// Bearer-style token sent as the `authorization` header.
    #[serde(default)]
    pub authorization: String,

    /// Vendor API root.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Directory the course folder is created under.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            course_url: String::new(),
            authorization: String::new(),
            api_base: default_api_base(),
            output_dir: default_output_dir(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_paths = ["course-dl.toml", "config/course-dl.toml"];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Load configuration from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config = toml::from_str(&config_str)?;
        tracing::info!("📄 Loaded configuration from: {}", path);
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(course_url) = std::env::var("COURSE_DL_URL") {
            config.course_url = course_url;
        }

        if let Ok(authorization) = std::env::var("COURSE_DL_AUTHORIZATION") {
            config.authorization = authorization;
        }

        if let Ok(api_base) = std::env::var("COURSE_DL_API_BASE") {
            config.api_base = api_base;
        }

        if let Ok(output_dir) = std::env::var("COURSE_DL_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(output_dir);
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.course_url.is_empty() {
            return Err(anyhow!("course_url is not set"));
        }

        if self.authorization.is_empty() {
            return Err(anyhow!("authorization is not set"));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow!("request_timeout_secs must be greater than 0"));
        }

        Ok(())
    }
}
