//! Error taxonomy for command assembly.
//!
//! Errors fall into two categories:
//!
//! - [`ProtocolViolation`]: the peer sent frames that do not form a valid
//!   command (wrong frame type, overlong body, undecodable payload, body over
//!   the configured limit). The stream is unusable afterwards and higher
//!   layers should close the channel.
//! - [`InvariantViolation`]: the assembler was driven incorrectly, for
//!   example after a codec panicked mid-frame. This points at a bug in the
//!   calling layer rather than at the peer.
//!
//! [`AssemblyError`] wraps both so callers can propagate either with `?` and
//! still tell them apart.

use std::{fmt, num::NonZeroU64};

use thiserror::Error;

use super::AssemblyState;
use crate::{
    codec::DecodeError,
    frame::{ChannelId, InboundFrame},
};

/// Part of a command a codec failed to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandPart {
    /// The method frame payload.
    Method,
    /// The leading fields of the content header payload.
    ContentHeader,
    /// The declared body size inside the content header payload.
    BodySize,
}

impl fmt::Display for CommandPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Method => "method",
            Self::ContentHeader => "content header",
            Self::BodySize => "body size",
        })
    }
}

/// Peer-caused violations of the command framing rules.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// The frame type does not match what the current state requires.
    #[error("unexpected {frame} while {expected}")]
    UnexpectedFrame {
        /// State the assembler was in.
        expected: AssemblyState,
        /// Frame that was rejected.
        frame: InboundFrame,
    },

    /// A body fragment is longer than the bytes still owed.
    #[error(
        "overlong content body received on channel {channel} - {remaining} bytes remaining, \
         {received} bytes received"
    )]
    MalformedFrame {
        /// Channel the fragment arrived on.
        channel: ChannelId,
        /// Body bytes still expected before the fragment.
        remaining: u64,
        /// Length of the rejected fragment.
        received: u64,
    },

    /// The content header declares a body larger than the configured limit.
    #[error("content body on channel {channel} declares {declared} bytes, limit is {limit} bytes")]
    BodyTooLarge {
        /// Channel the header arrived on.
        channel: ChannelId,
        /// Body size declared by the header.
        declared: u64,
        /// Configured limit.
        limit: NonZeroU64,
    },

    /// The codec could not decode a method or header payload.
    #[error("failed to decode {part} on channel {channel}: {source}")]
    Decode {
        /// Channel the frame arrived on.
        channel: ChannelId,
        /// Part that failed to decode.
        part: CommandPart,
        /// Error reported by the codec.
        source: DecodeError,
    },
}

impl ProtocolViolation {
    /// Channel the violation occurred on.
    #[must_use]
    pub fn channel(&self) -> ChannelId {
        match self {
            Self::UnexpectedFrame { frame, .. } => frame.channel(),
            Self::MalformedFrame { channel, .. }
            | Self::BodyTooLarge { channel, .. }
            | Self::Decode { channel, .. } => *channel,
        }
    }

    /// Stable identifier for the violation kind, suitable for metric labels.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnexpectedFrame { .. } => "unexpected_frame",
            Self::MalformedFrame { .. } => "malformed_frame",
            Self::BodyTooLarge { .. } => "body_too_large",
            Self::Decode { .. } => "decode",
        }
    }
}

/// A frame was handed to an assembler that is not accepting frames.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("received {frame} in invalid state {state}")]
pub struct InvariantViolation {
    /// State the assembler was stuck in.
    pub state: AssemblyState,
    /// Frame that was rejected.
    pub frame: InboundFrame,
}

/// Errors returned by [`CommandAssembler::handle_frame`](super::CommandAssembler::handle_frame).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AssemblyError {
    /// The peer violated the framing rules.
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),

    /// The assembler itself was misused.
    #[error("assembler invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl AssemblyError {
    /// Whether the error was caused by the peer.
    #[must_use]
    pub const fn is_protocol_violation(&self) -> bool { matches!(self, Self::Protocol(_)) }

    /// Whether the error reflects a bug in the calling layer.
    #[must_use]
    pub const fn is_defect(&self) -> bool { matches!(self, Self::Invariant(_)) }

    /// Channel the error concerns.
    #[must_use]
    pub fn channel(&self) -> ChannelId {
        match self {
            Self::Protocol(violation) => violation.channel(),
            Self::Invariant(violation) => violation.frame.channel(),
        }
    }
}
