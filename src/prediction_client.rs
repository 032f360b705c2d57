use crate::errors::AppError;
use crate::models::{FeatureVector, PredictionResult};
use reqwest::StatusCode;
use serde_json::json;

/// Client for the remote credit prediction API.
///
/// One blocking attempt per invocation: no retry and no request timeout, the
/// call is scoped to a single operator action.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: reqwest::Client,
    endpoint_url: String,
}

impl PredictionClient {
    /// Creates a new `PredictionClient` for a resolved endpoint URL.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint_url: endpoint_url.into(),
        }
    }

    /// The endpoint this client posts to.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Sends one feature vector to the prediction endpoint.
    ///
    /// The API contract wraps the vector as a single-element list under an
    /// `inputs` key. Any status other than 200 is an error carrying the
    /// status code and the raw response body.
    pub async fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult, AppError> {
        let body = json!({ "inputs": [vector] });
        tracing::info!("Posting prediction request to {}", self.endpoint_url);

        let response = self
            .client
            .post(&self.endpoint_url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalApiError(format!("Prediction request failed: {}", e))
            })?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Prediction API returned {}: {}", status, error_text);
            return Err(AppError::ExternalApiError(format!(
                "Request failed with status {}, {}",
                status.as_u16(),
                error_text
            )));
        }

        let result: PredictionResult = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse prediction response: {}", e))
        })?;

        tracing::info!(
            "Prediction received: class {}, failure probability {}",
            result.classe,
            result.proba_echec
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_keeps_endpoint_url() {
        let client = PredictionClient::new("http://localhost:5000/predict/");
        assert_eq!(client.endpoint_url(), "http://localhost:5000/predict/");
    }
}
