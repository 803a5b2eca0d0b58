use crate::utils;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub enum LLMMessageType {
    TEXT(String),
    IMAGE {
        data_b64: String,
        file_path: Option<String>,
        mime_type: Option<String>,
    },
}
impl LLMMessageType {
    pub fn text(text: impl Into<String>) -> Self {
        LLMMessageType::TEXT(text.into())
    }
    pub fn image_b64(data_b64: impl Into<String>) -> Self {
        LLMMessageType::IMAGE {
            data_b64: data_b64.into(),
            file_path: None,
            mime_type: None,
        }
    }
    /// Inline image whose MIME type is later inferred from `file_name`
    /// unless one is attached with [`LLMMessageType::with_mime_type`].
    pub fn image_bytes(bytes: &[u8], file_name: impl Into<String>) -> Self {
        LLMMessageType::IMAGE {
            data_b64: utils::encode_byte_to_base64(bytes),
            file_path: Some(file_name.into()),
            mime_type: None,
        }
    }
    pub fn with_mime_type(self, mime: impl Into<String>) -> Self {
        match self {
            LLMMessageType::IMAGE {
                data_b64,
                file_path,
                ..
            } => LLMMessageType::IMAGE {
                data_b64,
                file_path,
                mime_type: Some(mime.into()),
            },
            text => text,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LLMUserType {
    Human,
    AI,
    System,
}
impl LLMUserType {
    pub fn from_str(role_str: &str) -> Option<Self> {
        match role_str.trim().to_lowercase().as_str() {
            "user" | "human" => Some(LLMUserType::Human),
            "model" | "ai" | "assistant" => Some(LLMUserType::AI),
            "system" => Some(LLMUserType::System),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LLMMessage {
    pub id: String,
    pub role: LLMUserType,
    pub content: Vec<LLMMessageType>,
    pub created_at: i64,
}

impl LLMMessage {
    pub fn new(id: Option<String>, role: &str, content: Vec<LLMMessageType>) -> Self {
        let id = id.unwrap_or_else(|| utils::current_timestamp_millis().to_string());
        Self {
            id,
            role: LLMUserType::from_str(role).unwrap_or(LLMUserType::Human),
            content,
            created_at: utils::current_timestamp_millis() as i64,
        }
    }

    /// Concatenated text parts, images skipped.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                LLMMessageType::TEXT(text) => Some(text.as_str()),
                LLMMessageType::IMAGE { .. } => None,
            })
            .collect()
    }
}

/// Sampling parameters sent as `generationConfig`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 0,
        }
    }
}

#[derive(Clone)]
pub struct LLMClient {
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
    pub(crate) default_model: String,
    pub(crate) generation_config: GenerationConfig,
}

impl LLMClient {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        default_model: impl Into<String>,
        generation_config: GenerationConfig,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            default_model: default_model.into(),
            generation_config,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn generation_config(&self) -> GenerationConfig {
        self.generation_config
    }
}

impl std::fmt::Debug for LLMClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMClient")
            .field("endpoint", &self.endpoint)
            .field("default_model", &self.default_model)
            .field("generation_config", &self.generation_config)
            .finish_non_exhaustive()
    }
}

pub type ChatFuture = Pin<Box<dyn Future<Output = anyhow::Result<LLMMessage>> + Send + 'static>>;

pub type ChatFn = Arc<dyn Fn(Vec<LLMMessage>) -> ChatFuture + Send + Sync>;
