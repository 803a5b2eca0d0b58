mod api;
pub mod models;
pub use api::{
    build_generate_body, convert_body_parts_gemini, response_to_text_data, send_generate_request,
};

use crate::types::{ChatFn, ChatFuture, LLMClient, LLMMessage, LLMMessageType};
use std::sync::Arc;

/// Wraps `generateContent` as a reusable chat function.
///
/// Every failure (transport, status, decoding, empty candidates) is returned
/// to the caller untouched; nothing is retried.
pub fn chat(client: LLMClient) -> ChatFn {
    Arc::new(move |messages: Vec<LLMMessage>| -> ChatFuture {
        let client = client.clone();
        Box::pin(async move {
            let response = send_generate_request(&client, messages).await?;
            let text = response_to_text_data(&response)?;
            Ok::<_, anyhow::Error>(LLMMessage::new(
                response.response_id.clone(),
                "AI",
                vec![LLMMessageType::text(text)],
            ))
        })
    })
}
