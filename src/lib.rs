#![doc(html_root_url = "https://docs.rs/amqp_command/latest")]
//! Public API for the `amqp_command` library.
//!
//! This crate reassembles AMQP 0-9-1 style commands from the frames of a
//! single channel. A method frame, and for content-bearing methods a content
//! header frame plus any number of body frames, are fed one at a time to a
//! [`CommandAssembler`], which validates their ordering and declared body
//! length and yields a [`Command`] once every part has arrived.
//!
//! Method and header payloads are decoded through a [`ProtocolCodec`]
//! supplied by the caller; [`RawCodec`](codec::RawCodec) decodes only the
//! fixed identifier prefixes and keeps arguments and properties as bytes.

pub mod assembler;
pub mod codec;
pub mod command;
pub mod frame;
pub mod metrics;

#[cfg(test)]
mod test_helpers;

pub use assembler::{
    AssembledCommand,
    AssemblerConfig,
    AssemblyError,
    AssemblyState,
    CommandAssembler,
    CommandPart,
    InvariantViolation,
    ProtocolViolation,
};
pub use codec::{ContentHeader, DecodeError, MethodValue, ProtocolCodec};
pub use command::Command;
pub use frame::{ChannelId, FrameType, InboundFrame, UnknownFrameType};
