pub mod providers;
pub mod types;
pub mod utils;

pub use providers::gemini::{chat, send_generate_request};
pub use types::{ChatFn, ChatFuture, GenerationConfig, LLMClient, LLMMessage, LLMMessageType, LLMUserType};
