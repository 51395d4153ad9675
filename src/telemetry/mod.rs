//! Responder telemetry.
//!
//! # PRIVACY INVARIANT
//! Events must **NEVER** contain user content (utterances, replies, history).
//! Only labels, enum reasons, counts and durations are allowed.
//!
//! Telemetry is a read-only side channel; pipeline decisions never consult it.

pub mod event;
pub mod metrics;
pub mod recorder;

pub use event::*;
pub use metrics::*;
pub use recorder::*;
