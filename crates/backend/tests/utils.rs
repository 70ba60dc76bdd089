use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chatterbox_core::{FragmentStream, ModelClient, ModelError, Turn};
use futures::stream;

/// One scripted model invocation.
pub struct MockInteraction {
    pub expected_input: Option<String>,
    pub outcome: MockOutcome,
}

pub enum MockOutcome {
    /// Stream the fragments, then end normally.
    Fragments(Vec<&'static str>),
    /// Stream the fragments, then fail mid-stream.
    FailAfter(Vec<&'static str>, &'static str),
    /// Fail before yielding anything.
    SubmitError(&'static str),
}

impl MockInteraction {
    pub fn streaming(fragments: Vec<&'static str>) -> Self {
        Self {
            expected_input: None,
            outcome: MockOutcome::Fragments(fragments),
        }
    }

    pub fn expecting(input: &str, fragments: Vec<&'static str>) -> Self {
        Self {
            expected_input: Some(input.to_string()),
            outcome: MockOutcome::Fragments(fragments),
        }
    }

    pub fn failing_after(fragments: Vec<&'static str>, error: &'static str) -> Self {
        Self {
            expected_input: None,
            outcome: MockOutcome::FailAfter(fragments, error),
        }
    }

    pub fn failing_submit(error: &'static str) -> Self {
        Self {
            expected_input: None,
            outcome: MockOutcome::SubmitError(error),
        }
    }
}

/// Scripted stand-in for the external model collaborator. Interactions
/// are consumed in order; running out of script is a test bug.
pub struct MockModel {
    interactions: Mutex<VecDeque<MockInteraction>>,
    calls: AtomicUsize,
    history_lengths: Mutex<Vec<usize>>,
}

impl MockModel {
    pub fn new(interactions: Vec<MockInteraction>) -> Self {
        Self {
            interactions: Mutex::new(interactions.into()),
            calls: AtomicUsize::new(0),
            history_lengths: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn history_lengths(&self) -> Vec<usize> {
        self.history_lengths.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for MockModel {
    async fn submit(&self, history: &[Turn], input: &str) -> Result<FragmentStream, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.history_lengths.lock().unwrap().push(history.len());

        let interaction = self
            .interactions
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted interaction remaining");

        if let Some(expected) = &interaction.expected_input {
            assert_eq!(expected, input, "unexpected input routed to the model");
        }

        let items: Vec<Result<String, ModelError>> = match interaction.outcome {
            MockOutcome::Fragments(fragments) => {
                fragments.into_iter().map(|f| Ok(f.to_string())).collect()
            }
            MockOutcome::FailAfter(fragments, error) => fragments
                .into_iter()
                .map(|f| Ok(f.to_string()))
                .chain(std::iter::once(Err(ModelError::Provider(error.to_string()))))
                .collect(),
            MockOutcome::SubmitError(error) => {
                return Err(ModelError::Provider(error.to_string()));
            }
        };

        Ok(Box::pin(stream::iter(items)))
    }
}
