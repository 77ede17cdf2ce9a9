//! Assembly states and the per-state accumulators behind them.

use std::fmt;

use bytes::Bytes;

/// Which part of a command the assembler expects next.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AssemblyState {
    /// Waiting for the method frame that starts a command.
    ExpectingMethod,
    /// Method decoded; waiting for its content header frame.
    ExpectingContentHeader,
    /// Header decoded; waiting for body frames.
    ExpectingContentBody,
    /// A command finished assembling. Never observable between successful
    /// calls; seeing it means the assembler did not reset.
    Complete,
}

impl AssemblyState {
    /// Human-readable description used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExpectingMethod => "expecting method",
            Self::ExpectingContentHeader => "expecting content header",
            Self::ExpectingContentBody => "expecting content body",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for AssemblyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Assembler state together with the partial command it owns.
pub(crate) enum Stage<M, H> {
    ExpectingMethod,
    ExpectingContentHeader {
        method: M,
    },
    ExpectingContentBody {
        method: M,
        header: H,
        body: Vec<Bytes>,
        remaining: u64,
    },
    /// Placeholder held while a frame is being processed.
    Complete,
}

impl<M, H> Stage<M, H> {
    pub(crate) const fn state(&self) -> AssemblyState {
        match self {
            Self::ExpectingMethod => AssemblyState::ExpectingMethod,
            Self::ExpectingContentHeader { .. } => AssemblyState::ExpectingContentHeader,
            Self::ExpectingContentBody { .. } => AssemblyState::ExpectingContentBody,
            Self::Complete => AssemblyState::Complete,
        }
    }

    pub(crate) const fn remaining_body_bytes(&self) -> u64 {
        match self {
            Self::ExpectingContentBody { remaining, .. } => *remaining,
            _ => 0,
        }
    }

    pub(crate) fn buffered_body_bytes(&self) -> usize {
        match self {
            Self::ExpectingContentBody { body, .. } => body.iter().map(Bytes::len).sum(),
            _ => 0,
        }
    }
}
