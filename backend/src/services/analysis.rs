//! Photo nutrition analysis
//!
//! Sends a meal photo to a vision model and turns its answer into a
//! [`NutritionEstimate`]. The estimate is returned to the client for
//! confirmation; nothing is stored here.

use crate::config::AnalyzerConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use diet_tracker_shared::validation::{validate_image_mime, validate_image_size};
use diet_tracker_shared::{parse_estimate, NutritionEstimate, ANALYSIS_PROMPT};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Something that can estimate nutrition from an image
#[async_trait]
pub trait NutritionAnalyzer: Send + Sync {
    async fn analyze(&self, image: &[u8], mime_type: &str) -> Result<NutritionEstimate, ApiError>;
}

/// Build the analyzer selected by configuration
pub fn from_config(config: &AnalyzerConfig) -> anyhow::Result<Arc<dyn NutritionAnalyzer>> {
    match (&config.api_key, config.enabled) {
        (Some(key), true) if config.has_api_key() => {
            info!(model = %config.model, "Photo analysis enabled");
            Ok(Arc::new(GeminiAnalyzer::new(
                &config.api_base_url,
                key.clone(),
                &config.model,
                Duration::from_secs(config.timeout_secs),
            )?))
        }
        (_, true) => {
            anyhow::bail!("photo analyzer is enabled but analyzer.api_key is not set")
        }
        _ => {
            info!("Photo analysis disabled");
            Ok(Arc::new(DisabledAnalyzer))
        }
    }
}

// ============================================================================
// Gemini generateContent API
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiAnalyzer {
    base_url: String,
    api_key: SecretString,
    model: String,
    client: Client,
}

impl GeminiAnalyzer {
    pub fn new(
        base_url: &str,
        api_key: SecretString,
        model: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
            client,
        })
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            self.api_key.expose_secret()
        )
    }

    /// Text of the first part of the first candidate
    fn extract_text(response: GenerateResponse) -> Result<String, ApiError> {
        let candidate = response
            .candidates
            .and_then(|c| c.into_iter().next())
            .ok_or_else(|| ApiError::ExternalService("no candidates in response".to_string()))?;

        if let Some(reason) = candidate.finish_reason.as_deref() {
            debug!(finish_reason = reason, "Analysis finished");
        }

        candidate
            .content
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| ApiError::ExternalService("no text in response".to_string()))
    }

    /// Map an unsuccessful status to an error, preferring the API's own message
    fn map_api_error(status: u16, response_text: &str) -> ApiError {
        let message = serde_json::from_str::<GenerateResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);
        ApiError::ExternalService(format!("analysis API error ({status}): {message}"))
    }
}

#[async_trait]
impl NutritionAnalyzer for GeminiAnalyzer {
    #[instrument(skip(self, image), fields(model = %self.model, bytes = image.len()))]
    async fn analyze(&self, image: &[u8], mime_type: &str) -> Result<NutritionEstimate, ApiError> {
        let encoded = general_purpose::STANDARD.encode(image);
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::Text {
                        text: ANALYSIS_PROMPT,
                    },
                    RequestPart::InlineData {
                        inline_data: InlineData {
                            mime_type,
                            data: encoded,
                        },
                    },
                ],
            }],
        };

        debug!("Sending image to analysis API");

        let response = self
            .client
            .post(self.build_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::ExternalService(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::ExternalService(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Analysis API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let parsed: GenerateResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!(error = %e, "Failed to parse analysis response");
            ApiError::ExternalService(format!("Failed to parse response: {e}"))
        })?;

        if let Some(error) = parsed.error {
            return Err(ApiError::ExternalService(error.message));
        }

        let text = Self::extract_text(parsed)?;
        Ok(parse_estimate(&text)?)
    }
}

impl fmt::Debug for GeminiAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiAnalyzer")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Stand-in used when photo analysis is switched off
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAnalyzer;

#[async_trait]
impl NutritionAnalyzer for DisabledAnalyzer {
    async fn analyze(&self, _image: &[u8], _mime_type: &str) -> Result<NutritionEstimate, ApiError> {
        Err(ApiError::ServiceUnavailable(
            "Photo analysis is not configured".to_string(),
        ))
    }
}

// ============================================================================
// Service
// ============================================================================

/// Photo analysis service
pub struct AnalysisService;

impl AnalysisService {
    /// Validate an upload and run it through `analyzer`
    pub async fn analyze(
        analyzer: &dyn NutritionAnalyzer,
        image: &[u8],
        mime_type: &str,
    ) -> Result<NutritionEstimate, ApiError> {
        validate_image_mime(mime_type).map_err(|m| ApiError::field("image", m))?;
        validate_image_size(image.len()).map_err(|m| {
            if image.is_empty() {
                ApiError::field("image", m)
            } else {
                ApiError::PayloadTooLarge(m)
            }
        })?;

        let result = analyzer.analyze(image, mime_type).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(ApiError::ServiceUnavailable(_)) => "disabled",
            Err(_) => "failure",
        };
        metrics::counter!("photo_analysis_total", "outcome" => outcome).increment(1);

        if let Ok(estimate) = &result {
            info!(menu_name = %estimate.menu_name, calories = estimate.calories, "Photo analyzed");
        }
        result
    }
}
