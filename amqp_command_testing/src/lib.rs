//! Utilities for driving a [`CommandAssembler`](amqp_command::CommandAssembler)
//! with wire-shaped frames during tests.
//!
//! The builders encode method and content header payloads using the fixed
//! AMQP 0-9-1 layouts understood by
//! [`RawCodec`](amqp_command::codec::RawCodec).
//!
//! ```rust
//! use amqp_command::{ChannelId, CommandAssembler, codec::RawCodec};
//! use amqp_command_testing::{content_command_frames, drive_frames};
//!
//! let frames = content_command_frames(ChannelId(1), (60, 40), b"hello", 2);
//! let mut assembler = CommandAssembler::new(RawCodec);
//! let commands = drive_frames(&mut assembler, frames).expect("frames assemble");
//! assert_eq!(commands[0].body().as_ref(), b"hello");
//! ```

pub mod frames;
pub mod logging;

pub use frames::{
    body_frame,
    content_command_frames,
    drive_frames,
    header_frame,
    header_frame_with_properties,
    method_frame,
};
pub use logging::{LoggerHandle, logger};
