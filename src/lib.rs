pub mod config;
pub mod emotion;
pub mod error;
pub mod memory;
pub mod pipeline;
pub mod prompt;
pub mod services;
pub mod telemetry;

// Re-export the caller-facing surface
pub use emotion::EmotionLabel;
pub use memory::{ConversationTurn, HistoryStore, InMemoryHistoryStore, SessionId};
pub use pipeline::responder::{ChatReply, ChatResponse, DegradedReason, ModelHandles, ReplyOutcome, Responder};
