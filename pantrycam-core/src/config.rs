use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_DETECTION_ENDPOINT: &str = "http://127.0.0.1:5000/analyze";
pub const DEFAULT_RECIPE_ENDPOINT: &str = "http://127.0.0.1:5000/get_recipes";
pub const DEFAULT_HEALTH_PATH_SUFFIX: &str = "health";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("endpoint has no path to derive a health url from: {0}")]
    NoBasePath(Url),
    #[error("retry.max_attempts must be at least 1")]
    InvalidRetry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

/// Endpoints and retry policy, injected into the pipeline controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub detection_endpoint: Url,
    pub recipe_endpoint: Url,
    pub health_path_suffix: String,
    pub retry: RetryConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            // Constants above are valid URLs; parsing them cannot fail.
            detection_endpoint: Url::parse(DEFAULT_DETECTION_ENDPOINT)
                .expect("valid default detection url"),
            recipe_endpoint: Url::parse(DEFAULT_RECIPE_ENDPOINT)
                .expect("valid default recipe url"),
            health_path_suffix: DEFAULT_HEALTH_PATH_SUFFIX.into(),
            retry: RetryConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidRetry);
        }
        self.health_url().map(|_| ())
    }

    /// Detection endpoint with its last path segment replaced by the health suffix.
    pub fn health_url(&self) -> Result<Url, ConfigError> {
        let mut url = self.detection_endpoint.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ConfigError::NoBasePath(self.detection_endpoint.clone()))?;
            segments.pop_if_empty().pop();
            segments.extend(
                self.health_path_suffix
                    .split('/')
                    .filter(|s| !s.is_empty()),
            );
        }
        Ok(url)
    }
}
