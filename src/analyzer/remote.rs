use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::model::AnalyzeResponse;
use super::{MealAnalyzer, MealItem};
use crate::capture::CapturedImage;
use crate::config::Configuration;
use crate::error::AnalysisError;

const ANALYZE_PATH: &str = "/api/food/analyze/";
const GENERIC_FAILURE: &str = "analysis failed";

/// HTTP client for the remote food analyzer. One pooled client per analyzer,
/// with request and connect timeouts taken from configuration.
pub struct RemoteAnalyzer {
    client: Client,
    endpoint: String,
}

impl RemoteAnalyzer {
    pub fn new(configuration: &Configuration) -> Self {
        Self::with_base_url(configuration, &configuration.analyzer_base_url)
    }

    pub fn with_base_url(configuration: &Configuration, base_url: &str) -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(configuration.request_timeout_secs))
            .connect_timeout(Duration::from_secs(configuration.connect_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ANALYZE_PATH),
        }
    }

    /// Prefer the server-supplied message when the body carries one.
    async fn failure_message(response: Response) -> String {
        #[derive(Deserialize)]
        struct ErrorBody {
            detail: Option<String>,
            error: Option<String>,
            message: Option<String>,
        }

        match response.json::<ErrorBody>().await {
            Ok(body) => body
                .detail
                .or(body.error)
                .or(body.message)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            Err(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

#[async_trait]
impl MealAnalyzer for RemoteAnalyzer {
    async fn analyze(&self, image: &CapturedImage) -> Result<Vec<MealItem>, AnalysisError> {
        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name())
            .mime_str(image.mime_type())
            .map_err(|err| AnalysisError::Transport(err.to_string()))?;
        let form = Form::new().part("image", part);

        debug!(image_id = %image.id(), endpoint = %self.endpoint, "uploading image to analyzer");
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| AnalysisError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Analyzer {
                status: status.as_u16(),
                message: Self::failure_message(response).await,
            });
        }

        let body: AnalyzeResponse = response
            .json()
            .await
            .map_err(|err| AnalysisError::Parse(err.to_string()))?;
        if body.items.iter().any(|item| item.label.trim().is_empty()) {
            return Err(AnalysisError::Parse(
                "response contains an item with an empty label".to_string(),
            ));
        }

        Ok(body.items)
    }
}
