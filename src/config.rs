use serde::Deserialize;
use std::str::FromStr;

/// Which prediction API deployment the demo talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiEnvironment {
    /// Locally running prediction service.
    Local,
    /// Hosted prediction service.
    Hosted,
}

impl FromStr for ApiEnvironment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(ApiEnvironment::Local),
            "hosted" => Ok(ApiEnvironment::Hosted),
            other => anyhow::bail!("API_ENVIRONMENT must be 'local' or 'hosted', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_environment: ApiEnvironment,
    pub local_endpoint: String,
    pub hosted_endpoint: String,
    pub database_path: String,
    pub explanations_path: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let validate_endpoint = |name: &str, value: String| -> anyhow::Result<String> {
            if value.trim().is_empty() {
                anyhow::bail!("{} cannot be empty", name);
            }
            url::Url::parse(&value)
                .map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", name, e))?;
            if !value.starts_with("http://") && !value.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
            Ok(value)
        };

        let config = Self {
            api_environment: std::env::var("API_ENVIRONMENT")
                .unwrap_or_else(|_| "local".to_string())
                .parse()?,
            local_endpoint: validate_endpoint(
                "LOCAL_ENDPOINT",
                std::env::var("LOCAL_ENDPOINT")
                    .unwrap_or_else(|_| "http://localhost:5000/predict/".to_string()),
            )?,
            hosted_endpoint: validate_endpoint(
                "HOSTED_ENDPOINT",
                std::env::var("HOSTED_ENDPOINT").unwrap_or_else(|_| {
                    "https://credit-prediction-demo.onrender.com/predict/".to_string()
                }),
            )?,
            database_path: std::env::var("CLIENT_DATABASE_PATH")
                .unwrap_or_else(|_| "data/client_database_sample.csv".to_string())
                .trim()
                .to_string(),
            explanations_path: std::env::var("SHAP_VALUES_PATH")
                .unwrap_or_else(|_| "data/shap_values_sample.json.gz".to_string())
                .trim()
                .to_string(),
        };

        if config.database_path.is_empty() {
            anyhow::bail!("CLIENT_DATABASE_PATH cannot be empty");
        }
        if config.explanations_path.is_empty() {
            anyhow::bail!("SHAP_VALUES_PATH cannot be empty");
        }

        // Log successful configuration load
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("API environment: {:?}", config.api_environment);
        tracing::debug!("Active endpoint: {}", config.endpoint_url());
        tracing::debug!("Client database: {}", config.database_path);
        tracing::debug!("SHAP values file: {}", config.explanations_path);

        Ok(config)
    }

    /// Resolves the prediction endpoint for the active environment.
    pub fn endpoint_url(&self) -> &str {
        match self.api_environment {
            ApiEnvironment::Local => &self.local_endpoint,
            ApiEnvironment::Hosted => &self.hosted_endpoint,
        }
    }
}
