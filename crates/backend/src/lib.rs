pub mod guardrails;
pub mod manager;
pub mod pipeline;
pub mod wire;

pub use manager::{generate_session_id, SessionHistory, SessionManager, DEFAULT_SESSION_ID};
pub use pipeline::{
    combine_input, ResponseGenerator, TurnRequest, TurnStream, MODEL_FAILURE_RESPONSE,
};
