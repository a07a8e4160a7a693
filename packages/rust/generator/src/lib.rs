//! Generative text backends.
//!
//! Both LLM use sites (website summaries and outreach drafts) go through the
//! [`TextGenerator`] trait. The backend is chosen once at startup by
//! [`from_config`]: a remote chat-completions client when a credential is
//! configured, otherwise the deterministic [`StubGenerator`].

mod openai;
mod stub;

use std::sync::Arc;

use async_trait::async_trait;
use leadgen_shared::{OpenAiConfig, Result, read_api_key};
use tracing::{info, warn};

pub use openai::OpenAiGenerator;
pub use stub::StubGenerator;

/// What a generation request is for. Stub replies are keyed on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    SummarizeWebsite,
    ComposeOutreach,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SummarizeWebsite => "summarize_website",
            Self::ComposeOutreach => "compose_outreach",
        }
    }
}

/// A single-turn generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub task: TaskType,
    /// Company the request is about.
    pub company_name: String,
    /// Full user prompt.
    pub prompt: String,
    pub temperature: f32,
}

/// Strategy for turning a prompt into reply text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce the raw reply text for `request`.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Backend name for tracing.
    fn name(&self) -> &str;
}

/// Pick the generator backend from configuration.
///
/// A missing or empty credential selects the stub; that is not an error.
pub fn from_config(config: &OpenAiConfig) -> Result<Arc<dyn TextGenerator>> {
    match read_api_key(&config.api_key_env) {
        Some(api_key) => {
            info!(model = %config.model, "using remote text generator");
            Ok(Arc::new(OpenAiGenerator::new(config, api_key)?))
        }
        None => {
            warn!(
                env = %config.api_key_env,
                "no generative-service key found, using stubbed replies"
            );
            Ok(Arc::new(StubGenerator))
        }
    }
}
