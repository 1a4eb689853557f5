//! Google Gemini provider implementation

use super::types::{LlmRequest, LlmResponse, MessageRole, Usage};
use super::{LlmError, LlmService};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DIRECT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini service implementation
pub struct GeminiService {
    client: Client,
    api_key: String,
    endpoint: String,
    model_id: String,
}

impl GeminiService {
    /// `gateway` replaces the public endpoint; the gateway handles auth
    pub fn new(api_key: String, model: &str, gateway: Option<&str>) -> Result<Self, LlmError> {
        let endpoint = match gateway {
            Some(gw) => format!(
                "{}/gemini/v1beta/models/{model}:generateContent",
                gw.trim_end_matches('/')
            ),
            None => format!("{DIRECT_BASE_URL}/models/{model}:generateContent"),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            endpoint,
            model_id: model.to_string(),
        })
    }

    fn translate_request(request: &LlmRequest) -> GeminiRequest {
        let system_instruction = request.system.as_ref().map(|text| GeminiContent {
            role: None,
            parts: vec![GeminiPart { text: text.clone() }],
        });

        let contents = request
            .messages
            .iter()
            .filter(|m| !m.text.is_empty())
            .map(|msg| GeminiContent {
                role: Some(
                    match msg.role {
                        MessageRole::User => "user",
                        MessageRole::Assistant => "model",
                    }
                    .to_string(),
                ),
                parts: vec![GeminiPart {
                    text: msg.text.clone(),
                }],
            })
            .collect();

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: request.max_tokens.map(|max| GeminiGenerationConfig {
                max_output_tokens: Some(max),
            }),
        }
    }

    /// A blocked prompt comes back without candidates; that is a blank
    /// completion, not a transport failure
    fn normalize_response(resp: GeminiResponse) -> LlmResponse {
        let usage = resp.usage_metadata.unwrap_or_default();
        let usage = Usage {
            input_tokens: u64::from(usage.prompt_token_count),
            output_tokens: u64::from(usage.candidates_token_count),
        };

        let Some(candidate) = resp.candidates.into_iter().next() else {
            let block_reason = resp.prompt_feedback.and_then(|f| f.block_reason);
            tracing::warn!(block_reason = ?block_reason, "Gemini returned no candidates");
            return LlmResponse {
                text: String::new(),
                end_turn: false,
                usage,
            };
        };

        let text = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        LlmResponse {
            text,
            end_turn: candidate.finish_reason.is_some_and(|r| r == "STOP"),
            usage,
        }
    }
}

#[async_trait]
impl LlmService for GeminiService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let gemini_request = Self::translate_request(request);

        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&gemini_request);
        if self.api_key != IMPLICIT_KEY {
            builder = builder.header("x-goog-api-key", &self.api_key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::network(format!("Request timeout: {e}"))
            } else if e.is_connect() {
                LlmError::network(format!("Connection failed: {e}"))
            } else {
                LlmError::unknown(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiErrorResponse>(&body)
                .map_or(body, |err| err.error.message);
            return Err(LlmError::from_status(status.as_u16(), message));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::unknown(format!("Failed to parse response: {e}")))?;

        Ok(Self::normalize_response(gemini_response))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Placeholder key used in gateway mode
pub const IMPLICIT_KEY: &str = "implicit";

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsageMetadata>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}
