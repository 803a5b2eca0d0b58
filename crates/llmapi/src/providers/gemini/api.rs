use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::types::{GenerationConfig, LLMClient, LLMMessage, LLMMessageType, LLMUserType};
use crate::utils::detect_mime_type;

use super::models::GeminiResponse;

pub fn convert_body_parts_gemini(body_part: Vec<LLMMessageType>) -> Vec<Value> {
    body_part
        .into_iter()
        .map(|part| match part {
            LLMMessageType::TEXT(text) => json!({ "text": text }),
            LLMMessageType::IMAGE {
                data_b64,
                file_path,
                mime_type,
            } => {
                let mime = mime_type
                    .filter(|mime| !mime.trim().is_empty())
                    .or_else(|| file_path.as_ref().map(detect_mime_type))
                    .unwrap_or_else(|| "image/jpeg".into());
                json!({
                    "inlineData": {
                        "mimeType": mime,
                        "data": data_b64
                    }
                })
            }
        })
        .collect()
}
pub fn convert_messages_to_gemini_contents(messages: Vec<LLMMessage>) -> Vec<Value> {
    messages
        .into_iter()
        .map(|m| {
            let parts = convert_body_parts_gemini(m.content);
            json!({
                "role": role_to_str(m.role),
                "parts": parts
            })
        })
        .collect()
}
fn role_to_str(role: LLMUserType) -> &'static str {
    match role {
        LLMUserType::Human => "user",
        LLMUserType::AI => "model",
        LLMUserType::System => "system",
    }
}

fn generation_config_json(config: GenerationConfig) -> Value {
    json!({
        "temperature": config.temperature,
        "topK": config.top_k
    })
}

pub fn build_generate_body(api_client: &LLMClient, messages: Vec<LLMMessage>) -> Value {
    json!({
        "contents": convert_messages_to_gemini_contents(messages),
        "generationConfig": generation_config_json(api_client.generation_config())
    })
}

pub async fn send_generate_request(
    api_client: &LLMClient,
    body_part: Vec<LLMMessage>,
) -> Result<GeminiResponse> {
    if api_client.api_key().trim().is_empty() {
        bail!("Gemini API key is missing; set GOOGLE_API_KEY");
    }

    let endpoint = api_client.endpoint().trim_end_matches('/');
    let model = api_client
        .default_model()
        .strip_prefix("models/")
        .unwrap_or(api_client.default_model());
    let url = format!("{}/{}:generateContent", endpoint, model);

    log_request_payload(model, &body_part);
    let body = build_generate_body(api_client, body_part);

    let client = Client::new();
    let response = client
        .post(&url)
        .header("x-goog-api-key", api_client.api_key())
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .context("HTTP request (generateContent) failed")?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .context("Reading generateContent response body failed")?;

    if !status.is_success() {
        bail!(
            "Gemini generateContent failed: status {} body {}",
            status,
            response_text
        );
    }

    let response: GeminiResponse = serde_json::from_str(&response_text).with_context(|| {
        format!(
            "Failed to decode Gemini response JSON. Raw response: {}",
            response_text
        )
    })?;

    Ok(response)
}

fn log_request_payload(model: &str, messages: &[LLMMessage]) {
    let (text_parts, image_bytes) = messages
        .iter()
        .flat_map(|message| message.content.iter())
        .fold((0usize, 0usize), |(texts, images), part| match part {
            LLMMessageType::TEXT(_) => (texts + 1, images),
            LLMMessageType::IMAGE { data_b64, .. } => (texts, images + data_b64.len()),
        });
    debug!(
        model,
        message_count = messages.len(),
        text_parts,
        image_b64_len = image_bytes,
        "sending Gemini generateContent request"
    );
}

pub fn response_to_text_data(response: &GeminiResponse) -> Result<String> {
    //get only 1 text response
    let Some(candidate) = response.candidates.first() else {
        bail!("No candidates found");
    };

    let texts: Vec<&str> = candidate
        .content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();
    if texts.is_empty() {
        bail!(
            "Gemini returned no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        );
    }
    Ok(texts.concat())
}
