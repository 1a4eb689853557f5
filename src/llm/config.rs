//! Provider configuration

use super::gemini::{GeminiService, IMPLICIT_KEY};
use super::{LlmService, LoggingService};
use std::sync::Arc;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the hosted generation service
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    /// Gateway base URL; when set no API key is needed
    pub gateway: Option<String>,
    pub model: Option<String>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: first_non_blank(
                ["GEMINI_API_KEY", "API_KEY"].map(|name| std::env::var(name).ok()),
            ),
            gateway: std::env::var("LLM_GATEWAY").ok(),
            model: std::env::var("GEMINI_MODEL").ok(),
        }
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_MODEL)
    }

    fn gateway(&self) -> Option<&str> {
        self.gateway.as_deref().filter(|g| !g.trim().is_empty())
    }

    /// Credential to send, if the service is reachable at all
    fn credential(&self) -> Option<String> {
        if self.gateway().is_some() {
            return Some(IMPLICIT_KEY.to_string());
        }
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    }

    /// Build the logging-wrapped service, or `None` without credentials
    pub fn build_service(&self) -> Option<Arc<dyn LlmService>> {
        let api_key = self.credential()?;
        match GeminiService::new(api_key, self.model(), self.gateway()) {
            Ok(service) => Some(Arc::new(LoggingService::new(Arc::new(service)))),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create Gemini service");
                None
            }
        }
    }
}

/// First value that is set and not whitespace
fn first_non_blank(values: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    values
        .into_iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
}
