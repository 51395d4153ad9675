use std::collections::{HashMap, VecDeque};

use super::event::{FailureKind, OutcomeKind, TelemetryEvent};
use crate::emotion::EmotionLabel;
use crate::pipeline::RejectReason;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponderStats {
    pub replies: ReplyStats,
    pub emotions: HashMap<EmotionLabel, u64>,
    pub degraded_classifications: u64,
    pub guard_rejections: HashMap<RejectReason, u64>,
    pub fallbacks: u64,
    pub failures: FailureStats,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplyStats {
    pub total: u64,
    pub generated: u64,
    pub guarded: u64,
    pub fallback: u64,
    pub degraded: u64,
    pub total_latency_ms: u64,
    pub avg_latency_ms: f64,
    pub max_latency_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailureStats {
    pub model_unavailable: u64,
    pub inference: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> ResponderStats {
    let mut snap = ResponderStats::default();

    for event in events {
        match event {
            TelemetryEvent::Classified { emotion, degraded } => {
                *snap.emotions.entry(*emotion).or_insert(0) += 1;
                if *degraded {
                    snap.degraded_classifications += 1;
                }
            }
            TelemetryEvent::GenerationFailed { kind } => match kind {
                FailureKind::ModelUnavailable => snap.failures.model_unavailable += 1,
                FailureKind::Inference => snap.failures.inference += 1,
            },
            TelemetryEvent::GuardRejected { reason, .. } => {
                *snap.guard_rejections.entry(*reason).or_insert(0) += 1;
            }
            TelemetryEvent::FallbackApplied { .. } => snap.fallbacks += 1,
            TelemetryEvent::ReplyEmitted { outcome, latency_ms } => {
                snap.replies.total += 1;
                snap.replies.total_latency_ms += latency_ms;
                if *latency_ms > snap.replies.max_latency_ms {
                    snap.replies.max_latency_ms = *latency_ms;
                }
                match outcome {
                    OutcomeKind::Generated => snap.replies.generated += 1,
                    OutcomeKind::Guarded => snap.replies.guarded += 1,
                    OutcomeKind::Fallback => snap.replies.fallback += 1,
                    OutcomeKind::Degraded => snap.replies.degraded += 1,
                }
            }
        }
    }

    if snap.replies.total > 0 {
        snap.replies.avg_latency_ms = snap.replies.total_latency_ms as f64 / snap.replies.total as f64;
    }

    snap
}
