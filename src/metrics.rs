//! Metric helpers for `amqp_command`.
//!
//! This module defines metric names and simple helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. Without the `metrics` feature
//! the helpers compile to no-ops.

#[cfg(feature = "metrics")]
use metrics::counter;

use crate::frame::FrameType;

/// Name of the counter tracking frames handed to assemblers.
pub const FRAMES_HANDLED: &str = "amqp_command_frames_handled_total";
/// Name of the counter tracking completed commands.
pub const COMMANDS_ASSEMBLED: &str = "amqp_command_commands_assembled_total";
/// Name of the counter tracking peer protocol violations.
pub const PROTOCOL_VIOLATIONS: &str = "amqp_command_protocol_violations_total";
/// Name of the counter tracking assembler invariant violations.
pub const INVARIANT_VIOLATIONS: &str = "amqp_command_invariant_violations_total";

/// Record a frame handed to an assembler.
#[cfg(feature = "metrics")]
pub fn inc_frames(frame_type: FrameType) {
    counter!(FRAMES_HANDLED, "frame_type" => frame_type.as_str()).increment(1);
}

/// Record a frame handed to an assembler.
#[cfg(not(feature = "metrics"))]
pub fn inc_frames(_frame_type: FrameType) {}

/// Record a completed command.
#[cfg(feature = "metrics")]
pub fn inc_commands() { counter!(COMMANDS_ASSEMBLED).increment(1); }

/// Record a completed command.
#[cfg(not(feature = "metrics"))]
pub fn inc_commands() {}

/// Record a protocol violation of the given kind.
#[cfg(feature = "metrics")]
pub fn inc_protocol_violations(kind: &'static str) {
    counter!(PROTOCOL_VIOLATIONS, "kind" => kind).increment(1);
}

/// Record a protocol violation of the given kind.
#[cfg(not(feature = "metrics"))]
pub fn inc_protocol_violations(_kind: &'static str) {}

/// Record an assembler invariant violation.
#[cfg(feature = "metrics")]
pub fn inc_invariant_violations() { counter!(INVARIANT_VIOLATIONS).increment(1); }

/// Record an assembler invariant violation.
#[cfg(not(feature = "metrics"))]
pub fn inc_invariant_violations() {}
