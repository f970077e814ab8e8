//! Named operations against the prediction backend.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use pdrisk_model::PredictionResponse;

use crate::config::Backend;
use crate::error::{ApiError, Result};
use crate::gateway::{RequestDescriptor, RequestGateway};
use crate::upload::FilePayload;

/// Default number of entries requested from the importance endpoint.
pub const DEFAULT_IMPORTANCE_TOP_N: usize = 50;

/// Client for predictions and feature metadata.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    gateway: Arc<RequestGateway>,
}

impl PredictionClient {
    /// Create a client over a shared gateway.
    #[must_use]
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self { gateway }
    }

    /// Upload a biomarker file and return the typed prediction response.
    ///
    /// # Errors
    ///
    /// Besides the gateway's taxonomy, a response that parses as JSON but
    /// not as a [`PredictionResponse`] is a
    /// [`ApiError::MalformedResponse`].
    pub fn predict_from_file(&self, payload: FilePayload) -> Result<PredictionResponse> {
        let file_name = payload.name.clone();
        let value = self.gateway.send(
            RequestDescriptor::post(Backend::Prediction, "/model/predict-csv").with_file(payload),
        )?;
        let response: PredictionResponse = serde_json::from_value(value)
            .map_err(|err| ApiError::MalformedResponse(err.to_string()))?;
        info!(
            file = %file_name,
            total_patients = response.summary.total_patients,
            pd_positive = response.summary.pd_positive,
            "prediction completed"
        );
        Ok(response)
    }

    /// Feature names the model requires in the uploaded file.
    pub fn required_features(&self) -> Result<Value> {
        self.gateway
            .send(RequestDescriptor::get(Backend::Prediction, "/model/required-features"))
    }

    /// A sample of the expected input format.
    pub fn sample_data(&self) -> Result<Value> {
        self.gateway
            .send(RequestDescriptor::get(Backend::Prediction, "/model/sample-data"))
    }

    /// Global feature importance, top `top_n` entries.
    pub fn feature_importance(&self, top_n: usize) -> Result<Value> {
        self.gateway.send(RequestDescriptor::get(
            Backend::Prediction,
            format!("/features/importance?top_n={top_n}"),
        ))
    }

    /// Biomarker detail list.
    pub fn biomarkers(&self) -> Result<Value> {
        self.gateway
            .send(RequestDescriptor::get(Backend::Prediction, "/features/biomarkers"))
    }

    /// Protein category list.
    pub fn categories(&self) -> Result<Value> {
        self.gateway
            .send(RequestDescriptor::get(Backend::Prediction, "/features/categories"))
    }
}
