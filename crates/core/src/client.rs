use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use thiserror::Error;

use crate::types::Turn;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("CompletionError: {0}")]
    Completion(#[from] rig::completion::CompletionError),
    #[error("provider failure: {0}")]
    Provider(String),
}

/// Lazily produced text deltas from one model invocation. The stream is
/// not restartable and may fail before yielding anything.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, ModelError>> + Send>>;

/// The external model collaborator. Implementations receive the full
/// prior history plus the current input and stream back text fragments;
/// the concrete upstream integration stays swappable behind this trait.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn submit(&self, history: &[Turn], input: &str) -> Result<FragmentStream, ModelError>;
}
