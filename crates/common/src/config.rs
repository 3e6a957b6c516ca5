use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(".")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/default")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/local")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_bind")]
    pub bind: String,
}

impl ApiConfig {
    fn default_bind() -> String {
        "0.0.0.0:5000".to_string()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: Self::default_bind(),
        }
    }
}

/// Tuning for the virality clustering core. The defaults are the decision
/// constants both policies share: a 12 hour retention window and a 0.25
/// similarity threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "AnalyzerConfig::default_window_hours")]
    pub window_hours: i64,
    #[serde(default = "AnalyzerConfig::default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "AnalyzerConfig::default_high_similarity_count")]
    pub high_similarity_count: usize,
}

impl AnalyzerConfig {
    const fn default_window_hours() -> i64 {
        12
    }

    const fn default_similarity_threshold() -> f64 {
        0.25
    }

    const fn default_high_similarity_count() -> usize {
        2
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window_hours: Self::default_window_hours(),
            similarity_threshold: Self::default_similarity_threshold(),
            high_similarity_count: Self::default_high_similarity_count(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "ObservabilityConfig::default_metrics_path")]
    pub metrics_path: String,
}

impl ObservabilityConfig {
    fn default_metrics_path() -> String {
        "/metrics".to_string()
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_path: Self::default_metrics_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_config_files() {
        let config = AppConfig::load_from_path("/nonexistent").expect("defaults");
        assert_eq!(config.analyzer.window_hours, 12);
        assert_eq!(config.analyzer.similarity_threshold, 0.25);
        assert_eq!(config.analyzer.high_similarity_count, 2);
        assert_eq!(config.observability.metrics_path, "/metrics");
    }
}
