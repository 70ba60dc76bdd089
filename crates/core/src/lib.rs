pub mod client;
pub mod gemini;
pub mod prompts;
pub mod types;

pub use client::{FragmentStream, ModelClient, ModelError};
pub use gemini::GeminiModel;
pub use types::{to_rig_messages, Turn};
