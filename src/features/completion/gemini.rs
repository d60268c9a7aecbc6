//! Gemini generateContent backend
//!
//! Plain `reqwest` client against the REST API. System messages go into
//! `systemInstruction`, assistant turns are sent with the `model` role.

use super::{CompletionRequest, CompletionService, PromptRole};
use crate::core::CompletionPayload;
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

pub struct GeminiCompletionService {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize, Debug)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize, Debug)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiTextPart>,
}

#[derive(Serialize, Debug)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiTextPart>,
}

#[derive(Serialize, Debug)]
struct GeminiTextPart {
    text: String,
}

#[derive(Serialize, Debug)]
struct GeminiGenerationConfig {
    temperature: f32,
}

impl GeminiCompletionService {
    pub fn new(api_key: String, model: String, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

fn build_request(request: &CompletionRequest) -> GeminiRequest {
    let mut system_parts = Vec::new();
    let mut contents: Vec<GeminiContent> = Vec::new();

    for message in &request.messages {
        // The API rejects empty text parts, and an empty reply is a legal turn
        if message.content.trim().is_empty() {
            continue;
        }
        let part = GeminiTextPart {
            text: message.content.clone(),
        };
        let role = match message.role {
            PromptRole::System => {
                system_parts.push(part);
                continue;
            }
            PromptRole::User => "user",
            PromptRole::Assistant => "model",
        };
        // Skipped turns can leave two messages of one role next to each other
        match contents.last_mut() {
            Some(last) if last.role == role => last.parts.push(part),
            _ => contents.push(GeminiContent {
                role,
                parts: vec![part],
            }),
        }
    }

    GeminiRequest {
        contents,
        system_instruction: if system_parts.is_empty() {
            None
        } else {
            Some(GeminiSystemInstruction {
                parts: system_parts,
            })
        },
        generation_config: GeminiGenerationConfig {
            temperature: request.temperature,
        },
    }
}

/// Pull the reply text out of a generateContent body.
///
/// Text parts of the first candidate are concatenated. A body without any
/// text part is handed back as raw JSON.
fn extract_payload(body: Value) -> CompletionPayload {
    let parts = body
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array());

    let texts: Vec<&str> = parts
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect()
        })
        .unwrap_or_default();

    if texts.is_empty() {
        if let Some(reason) = body.pointer("/promptFeedback/blockReason").and_then(|r| r.as_str()) {
            warn!("Gemini blocked the prompt: {reason}");
        }
        CompletionPayload::Opaque(body.to_string())
    } else {
        CompletionPayload::Text(texts.concat())
    }
}

#[async_trait]
impl CompletionService for GeminiCompletionService {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionPayload> {
        let request_id = request.request_id;
        let body = build_request(&request);

        debug!(
            "[{request_id}] Sending {} contents to Gemini ({})",
            body.contents.len(),
            self.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read Gemini response body")?;

        parse_response(status, text)
    }
}

/// Turn a generateContent HTTP response into a payload.
///
/// Non-success statuses are errors carrying the API's own message when the
/// body has one. A success body that is not JSON is kept as raw text.
fn parse_response(status: StatusCode, text: String) -> Result<CompletionPayload> {
    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .map(String::from)
            })
            .unwrap_or(text);
        return Err(anyhow::anyhow!("Gemini API error ({}): {}", status, message));
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(value) => Ok(extract_payload(value)),
        Err(_) => {
            warn!("Gemini returned a non-JSON body");
            Ok(CompletionPayload::Opaque(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::completion::PromptMessage;
    use serde_json::json;
    use uuid::Uuid;

    fn sample_request() -> CompletionRequest {
        CompletionRequest {
            messages: vec![
                PromptMessage::new(PromptRole::System, "You are a patient and clear teacher."),
                PromptMessage::new(PromptRole::User, "What is mass?"),
                PromptMessage::new(PromptRole::Assistant, "Mass is..."),
                PromptMessage::new(PromptRole::User, "What is gravity?"),
            ],
            temperature: 0.5,
            request_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_build_request_body() {
        let body = serde_json::to_value(build_request(&sample_request())).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "What is mass?"}]},
                    {"role": "model", "parts": [{"text": "Mass is..."}]},
                    {"role": "user", "parts": [{"text": "What is gravity?"}]}
                ],
                "systemInstruction": {
                    "parts": [{"text": "You are a patient and clear teacher."}]
                },
                "generationConfig": {"temperature": 0.5}
            })
        );
    }

    #[test]
    fn test_build_request_without_system() {
        let request = CompletionRequest {
            messages: vec![PromptMessage::new(PromptRole::User, "hi")],
            temperature: 0.0,
            request_id: Uuid::new_v4(),
        };
        let body = serde_json::to_value(build_request(&request)).unwrap();
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_extract_text_parts() {
        let body = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": " Gravity is "}, {"text": "a force... "}]}
            }]
        });
        assert_eq!(
            extract_payload(body),
            CompletionPayload::Text(" Gravity is a force... ".to_string())
        );
    }

    #[test]
    fn test_extract_without_candidates_is_opaque() {
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        match extract_payload(body) {
            CompletionPayload::Opaque(raw) => assert!(raw.contains("SAFETY")),
            other => panic!("expected opaque payload, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_non_text_parts_is_opaque() {
        let body = json!({
            "candidates": [{"content": {"parts": [{"functionCall": {"name": "x", "args": {}}}]}}]
        });
        assert!(matches!(extract_payload(body), CompletionPayload::Opaque(_)));
    }

    #[test]
    fn test_endpoint() {
        let service = GeminiCompletionService::new(
            "key".to_string(),
            "gemini-2.5-flash".to_string(),
            "https://generativelanguage.googleapis.com/v1beta/".to_string(),
        )
        .unwrap();
        assert_eq!(
            service.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(service.name(), "gemini");
    }

    #[test]
    fn test_empty_reply_not_replayed_as_empty_part() {
        let request = CompletionRequest {
            messages: vec![
                PromptMessage::new(PromptRole::System, "You are a senior data analyst."),
                PromptMessage::new(PromptRole::User, "Summarize churn"),
                PromptMessage::new(PromptRole::Assistant, ""),
                PromptMessage::new(PromptRole::User, "Try again"),
            ],
            temperature: 0.5,
            request_id: Uuid::new_v4(),
        };
        let body = serde_json::to_value(build_request(&request)).unwrap();

        assert_eq!(
            body["contents"],
            json!([
                {"role": "user", "parts": [{"text": "Summarize churn"}, {"text": "Try again"}]}
            ])
        );
        let rendered = body.to_string();
        assert!(!rendered.contains(r#""text":"""#));
    }

    #[test]
    fn test_error_status_uses_api_message() {
        let err = parse_response(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"code":429,"message":"quota exceeded"}}"#.to_string(),
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("quota exceeded"));
        assert!(message.contains("429"));
    }

    #[test]
    fn test_error_status_with_plain_body() {
        let err = parse_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "upstream connect error".to_string(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("upstream connect error"));
    }

    #[test]
    fn test_success_with_non_json_body_is_opaque() {
        let payload = parse_response(StatusCode::OK, "<html>oops</html>".to_string()).unwrap();
        assert_eq!(payload, CompletionPayload::Opaque("<html>oops</html>".to_string()));
    }

    #[test]
    fn test_success_with_candidates() {
        let body = json!({"candidates": [{"content": {"parts": [{"text": "Mass is..."}]}}]});
        let payload = parse_response(StatusCode::OK, body.to_string()).unwrap();
        assert_eq!(payload, CompletionPayload::Text("Mass is...".to_string()));
    }
}
