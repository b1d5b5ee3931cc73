use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::chat::GroundingSource;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MAX_RETRIES: u32 = 3;

/// Reasoning model used for profile enhancement and market search.
pub const PRO_MODEL: &str = "gemini-3-pro-preview";
/// Fast model used for discovery, outreach, calendar and support turns.
pub const FLASH_MODEL: &str = "gemini-3-flash-preview";
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Model returned empty content")]
    EmptyContent,

    #[error("Invalid inline payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Response violated the output contract: {0}")]
    Contract(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    /// Single-turn user request, the common case.
    pub fn user(text: impl Into<String>) -> Self {
        GenerateRequest {
            contents: vec![Content::user(text)],
            system_instruction: None,
            tools: None,
            generation_config: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Content {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Content {
            role: Some("model".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Content {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64-encoded payload.
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_declarations: Option<Vec<serde_json::Value>>,
}

impl Tool {
    pub fn google_search() -> Self {
        Tool {
            google_search: Some(serde_json::json!({})),
            ..Default::default()
        }
    }

    pub fn functions(declarations: Vec<serde_json::Value>) -> Self {
        Tool {
            function_declarations: Some(declarations),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<serde_json::Value>,
}

impl GenerationConfig {
    /// JSON output locked to the given response schema.
    pub fn json(schema: serde_json::Value) -> Self {
        GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

impl GenerateResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
    }

    /// First text block across all candidates.
    pub fn text(&self) -> Option<&str> {
        self.parts().find_map(|p| p.text.as_deref())
    }

    pub fn inline_data(&self) -> Option<&InlineData> {
        self.parts().find_map(|p| p.inline_data.as_ref())
    }

    pub fn function_call(&self) -> Option<&FunctionCall> {
        self.parts().find_map(|p| p.function_call.as_ref())
    }

    /// Web grounding citations, de-duplicated by URI in first-seen order.
    pub fn sources(&self) -> Vec<GroundingSource> {
        let mut seen = std::collections::HashSet::new();
        let mut sources = Vec::new();
        for chunk in self
            .candidates
            .iter()
            .filter_map(|c| c.grounding_metadata.as_ref())
            .flat_map(|g| g.grounding_chunks.iter())
        {
            let Some(web) = &chunk.web else { continue };
            let (Some(uri), Some(title)) = (&web.uri, &web.title) else {
                continue;
            };
            if seen.insert(uri.clone()) {
                sources.push(GroundingSource {
                    title: title.clone(),
                    uri: uri.clone(),
                });
            }
        }
        sources
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The single entry point for all Gemini calls in the engine.
/// Wraps the generateContent REST API with retry logic and typed helpers.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        GeminiClient {
            client: Client::new(),
            api_key,
            base_url: API_BASE.to_string(),
        }
    }

    /// Raw generateContent call. Retries on 429 and 5xx with exponential
    /// backoff, like every other transient-failure path in this service.
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, GatewayError> {
        let url = format!("{}/{}:generateContent", self.base_url, model);
        let mut last_error: Option<GatewayError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Gemini call attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .header("content-type", "application/json")
                .json(request)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(GatewayError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Gemini API returned {status}: {body}");
                last_error = Some(GatewayError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(GatewayError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: GenerateResponse = response.json().await?;
            debug!("Gemini call to {model} succeeded");
            return Ok(parsed);
        }

        Err(last_error.unwrap_or(GatewayError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Calls the model with a strict response schema and deserializes the
    /// text payload. Returns grounding citations when search was enabled.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        model: &str,
        mut request: GenerateRequest,
        schema: serde_json::Value,
    ) -> Result<(T, Vec<GroundingSource>), GatewayError> {
        let mut config = request.generation_config.take().unwrap_or_default();
        config.response_mime_type = Some("application/json".to_string());
        config.response_schema = Some(schema);
        request.generation_config = Some(config);

        let response = self.generate(model, &request).await?;
        let text = response.text().ok_or(GatewayError::EmptyContent)?;
        let value = serde_json::from_str(strip_json_fences(text))?;
        Ok((value, response.sources()))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn strip_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn strip_fences_noop_on_plain_json() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn response_text_and_sources_extraction() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "{\"reply\": \"hi\"}"}]
                },
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://a.example", "title": "A"}},
                        {"web": {"uri": "https://a.example", "title": "A again"}},
                        {"web": {"uri": "https://b.example", "title": "B"}},
                        {"web": null}
                    ]
                }
            }]
        });
        let response: GenerateResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.text(), Some("{\"reply\": \"hi\"}"));

        let sources = response.sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].uri, "https://a.example");
        assert_eq!(sources[1].title, "B");
    }

    #[test]
    fn response_function_call_extraction() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "Taking you there now."},
                        {"functionCall": {"name": "navigateApp", "args": {"step": "report"}}}
                    ]
                }
            }]
        });
        let response: GenerateResponse = serde_json::from_value(raw).unwrap();
        let call = response.function_call().unwrap();
        assert_eq!(call.name, "navigateApp");
        assert_eq!(call.args["step"], "report");
    }

    #[test]
    fn request_serializes_camel_case_wire_names() {
        let mut request = GenerateRequest::user("hello");
        request.tools = Some(vec![Tool::google_search()]);
        request.generation_config = Some(GenerationConfig::json(serde_json::json!({
            "type": "OBJECT"
        })));
        let wire = serde_json::to_value(&request).unwrap();
        assert!(wire["generationConfig"]["responseMimeType"]
            .as_str()
            .unwrap()
            .contains("json"));
        assert!(wire["tools"][0]["googleSearch"].is_object());
        assert_eq!(wire["contents"][0]["parts"][0]["text"], "hello");
    }
}
