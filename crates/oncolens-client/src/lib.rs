//! Prediction request dispatcher.
//!
//! Sends one feature vector plus a model key to the remote classification
//! service and maps the answer onto `Prediction` / `PredictionError`.
//!
//! Request body:
//!
//! ```json
//! {"model": "rf", "features": [17.99, 10.38, 0.1184, 0.2776, 0.3001, 0.1471, 0.2419, 0.0787]}
//! ```
//!
//! One attempt per call, bounded by the client timeout. Callers re-trigger
//! on failure; nothing here retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Serialize;
use tracing::{info, instrument, warn};

use oncolens_common::config::PredictionConfig;
use oncolens_common::error::{OncolensError, PredictionError};
use oncolens_common::prediction::{ErrorBody, Prediction};
use oncolens_common::{FeatureVector, ModelSelection};

/// Wire format of the outbound request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PredictionRequest {
    pub model: ModelSelection,
    pub features: FeatureVector,
}

impl PredictionRequest {
    pub fn new(model: ModelSelection, features: FeatureVector) -> Self {
        Self { model, features }
    }
}

#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(
        &self,
        model: ModelSelection,
        features: &FeatureVector,
    ) -> Result<Prediction, PredictionError>;

    /// Where requests go, for display.
    fn endpoint(&self) -> &str;
}

/// reqwest-backed predictor for the HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    endpoint: String,
    client: Client,
}

impl HttpPredictor {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, OncolensError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()?;
        Ok(Self { endpoint: endpoint.into(), client })
    }

    pub fn from_config(config: &PredictionConfig) -> Result<Self, OncolensError> {
        Self::new(config.endpoint.clone(), config.timeout())
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    #[instrument(skip(self, features), fields(model = model.key()))]
    async fn predict(
        &self,
        model: ModelSelection,
        features: &FeatureVector,
    ) -> Result<Prediction, PredictionError> {
        let payload = PredictionRequest::new(model, *features);

        let resp = self.client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "Prediction request failed"))?;

        let status = resp.status();
        let body = resp.text().await?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Prediction service rejected request");
            return Err(PredictionError::Rejected {
                status: status.as_u16(),
                body: ErrorBody::parse(&body),
            });
        }

        let prediction = Prediction::from_body(&body)
            .inspect_err(|e| warn!(error = %e, "Unusable prediction response"))?;
        info!(label = %prediction.label, "Prediction received");
        Ok(prediction)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
