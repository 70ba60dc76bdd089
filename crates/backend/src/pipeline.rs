use std::pin::Pin;
use std::sync::Arc;

use chatterbox_core::{ModelClient, Turn};
use futures::{Stream, StreamExt};
use tracing::{error, warn};

use crate::guardrails::{
    self, RollingBuffer, CANNED_RESPONSE_INPUT_TRIGGERED, CANNED_RESPONSE_OUTPUT_TRIGGERED,
    OUTPUT_SCAN_WINDOW,
};
use crate::manager::SessionManager;

/// Apologetic in-band reply when the model invocation fails. The turn's
/// stream still ends cleanly; the failure never becomes a transport
/// error.
pub const MODEL_FAILURE_RESPONSE: &str = "Oh, wow. My stream of consciousness just... stopped. \
    Could this BE a server hiccup?";

/// Client-visible fragments for one turn. Guardrail and failure
/// short-circuits arrive in-band as ordinary fragments.
pub type TurnStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// The unit of work for one interaction.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub session_id: String,
    pub user_text: String,
    pub context_notes: Option<String>,
}

/// Folds optional side-channel notes into the model input. Guardrails
/// only ever see the base user text, not the notes.
pub fn combine_input(user_text: &str, notes: Option<&str>) -> String {
    match notes {
        Some(notes) if !notes.is_empty() => {
            format!("{user_text} [User has provided an image with the following context: {notes}]")
        }
        _ => user_text.to_string(),
    }
}

/// Orchestrates one conversation turn: input guardrail, history lookup,
/// model invocation, streamed output guardrail, history commit.
pub struct ResponseGenerator {
    model: Arc<dyn ModelClient>,
    sessions: Arc<SessionManager>,
}

impl ResponseGenerator {
    pub fn new(model: Arc<dyn ModelClient>, sessions: Arc<SessionManager>) -> Self {
        Self { model, sessions }
    }

    /// Runs one turn lazily: nothing happens until the returned stream
    /// is polled, and dropping it mid-flight cancels the model stream
    /// without committing partial history.
    pub fn run_turn(&self, request: TurnRequest) -> TurnStream {
        let model = Arc::clone(&self.model);
        let sessions = Arc::clone(&self.sessions);

        Box::pin(async_stream::stream! {
            if let Some(phrase) = guardrails::check_input(&request.user_text) {
                warn!(session_id = %request.session_id, phrase, "input guardrail tripped");
                yield CANNED_RESPONSE_INPUT_TRIGGERED.to_string();
                return;
            }

            let combined = combine_input(&request.user_text, request.context_notes.as_deref());

            let history = sessions.get_or_create(&request.session_id);
            // Held for the whole turn so overlapping requests on one
            // session run one at a time.
            let mut history = history.lock().await;

            let mut fragments = match model.submit(&history, &combined).await {
                Ok(stream) => stream,
                Err(err) => {
                    error!(session_id = %request.session_id, error = %err, "model submit failed");
                    yield MODEL_FAILURE_RESPONSE.to_string();
                    return;
                }
            };

            let mut window = RollingBuffer::new(OUTPUT_SCAN_WINDOW);
            let mut reply = String::new();
            let mut tripped = None;

            while let Some(item) = fragments.next().await {
                match item {
                    Ok(fragment) => {
                        if fragment.is_empty() {
                            continue;
                        }
                        window.push(&fragment);
                        reply.push_str(&fragment);
                        if let Some(phrase) = guardrails::check_output(window.as_str()) {
                            tripped = Some(phrase);
                            break;
                        }
                        yield fragment;
                    }
                    Err(err) => {
                        error!(session_id = %request.session_id, error = %err, "model stream failed");
                        yield MODEL_FAILURE_RESPONSE.to_string();
                        return;
                    }
                }
            }
            // Stop pulling from the model; anything it would still
            // generate is discarded.
            drop(fragments);

            if let Some(phrase) = tripped {
                warn!(session_id = %request.session_id, phrase, "output guardrail tripped");
                yield CANNED_RESPONSE_OUTPUT_TRIGGERED.to_string();
                // The canned reply is what goes into history, so the
                // violating text cannot resurface as context later.
                history.push(Turn::user(combined));
                history.push(Turn::assistant(CANNED_RESPONSE_OUTPUT_TRIGGERED));
                return;
            }

            history.push(Turn::user(combined));
            history.push(Turn::assistant(reply));
        })
    }
}
