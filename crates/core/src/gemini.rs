// Environment variables
static GOOGLE_API_KEY: std::sync::LazyLock<Result<String, std::env::VarError>> =
    std::sync::LazyLock::new(|| std::env::var("GOOGLE_API_KEY"));

use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;
use futures::StreamExt;
use rig::{
    agent::Agent,
    client::completion::CompletionClient,
    message::Message,
    providers::gemini,
    streaming::{StreamedAssistantContent, StreamingCompletion},
};

use tracing::debug;

use crate::client::{FragmentStream, ModelClient, ModelError};
use crate::prompts;
use crate::types::{to_rig_messages, Turn};

const GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Production model collaborator backed by Google's Gemini API.
pub struct GeminiModel {
    agent: Arc<Agent<gemini::completion::CompletionModel>>,
}

impl GeminiModel {
    /// Fails fast when the API credential is missing: a service that
    /// cannot reach its model must refuse to start.
    pub fn new() -> Result<Self> {
        let api_key = GOOGLE_API_KEY
            .as_ref()
            .map_err(|_| eyre::eyre!("GOOGLE_API_KEY not set"))?
            .clone();

        let client = gemini::Client::new(&api_key);
        let agent = client
            .agent(GEMINI_MODEL)
            .preamble(prompts::PREAMBLE)
            .build();

        Ok(Self {
            agent: Arc::new(agent),
        })
    }
}

#[async_trait]
impl ModelClient for GeminiModel {
    async fn submit(&self, history: &[Turn], input: &str) -> Result<FragmentStream, ModelError> {
        let chat_history = to_rig_messages(history);
        debug!(
            model = GEMINI_MODEL,
            history_len = history.len(),
            "streaming completion"
        );

        let mut stream = self
            .agent
            .stream_completion(Message::user(input), chat_history)
            .await?
            .stream()
            .await?;

        let fragments = async_stream::stream! {
            while let Some(item) = stream.next().await {
                match item {
                    Ok(StreamedAssistantContent::Text(text)) => yield Ok(text.text),
                    Ok(_) => {}
                    Err(err) => {
                        yield Err(ModelError::Completion(err));
                        return;
                    }
                }
            }
        };

        Ok(Box::pin(fragments))
    }
}
