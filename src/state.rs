use std::sync::Arc;

use llmapi::ChatFn;

use crate::config::AppConfig;
use crate::session::SessionHandle;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub chat: ChatFn,
    pub session: SessionHandle,
}

impl AppState {
    /// Production wiring: the Gemini client built from `config`.
    pub fn new(config: AppConfig) -> Self {
        let chat = llmapi::chat(config.llm_client());
        Self::with_chat(config, chat)
    }

    /// Wiring with an arbitrary model function, used to stub the API.
    pub fn with_chat(config: AppConfig, chat: ChatFn) -> Self {
        Self {
            config: Arc::new(config),
            chat,
            session: SessionHandle::new(),
        }
    }
}
