//! Inbound frame values handed to the command assembler.
//!
//! Frames arrive already parsed by the transport layer: the frame decoder has
//! stripped the length prefix and frame-end octet and resolved the channel.
//! [`InboundFrame`] is the unit the assembler consumes, one per call.

use std::fmt;

use bytes::Bytes;
use thiserror::Error;

/// Wire octet identifying a method frame.
pub const FRAME_METHOD: u8 = 1;
/// Wire octet identifying a content header frame.
pub const FRAME_HEADER: u8 = 2;
/// Wire octet identifying a content body frame.
pub const FRAME_BODY: u8 = 3;
/// Wire octet identifying a heartbeat frame.
pub const FRAME_HEARTBEAT: u8 = 8;

/// Type tag carried by every frame.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FrameType {
    /// Carries an encoded method invocation.
    Method,
    /// Carries the content header for a content-bearing method.
    Header,
    /// Carries one fragment of a content body.
    Body,
    /// Connection keep-alive; never part of a command.
    Heartbeat,
}

impl FrameType {
    /// Wire octet for this frame type.
    ///
    /// # Examples
    ///
    /// ```
    /// use amqp_command::frame::FrameType;
    ///
    /// assert_eq!(FrameType::Body.as_u8(), 3);
    /// ```
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Method => FRAME_METHOD,
            Self::Header => FRAME_HEADER,
            Self::Body => FRAME_BODY,
            Self::Heartbeat => FRAME_HEARTBEAT,
        }
    }

    /// Short lowercase name used in diagnostics and metric labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Header => "header",
            Self::Body => "body",
            Self::Heartbeat => "heartbeat",
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Returned when a wire octet does not name a known frame type.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("unknown frame type: {0}")]
pub struct UnknownFrameType(pub u8);

impl TryFrom<u8> for FrameType {
    type Error = UnknownFrameType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            FRAME_METHOD => Ok(Self::Method),
            FRAME_HEADER => Ok(Self::Header),
            FRAME_BODY => Ok(Self::Body),
            FRAME_HEARTBEAT => Ok(Self::Heartbeat),
            other => Err(UnknownFrameType(other)),
        }
    }
}

impl From<FrameType> for u8 {
    fn from(value: FrameType) -> Self { value.as_u8() }
}

/// Identifies the multiplexed channel a frame belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ChannelId(pub u16);

impl From<u16> for ChannelId {
    fn from(value: u16) -> Self { Self(value) }
}

impl From<ChannelId> for u16 {
    fn from(value: ChannelId) -> Self { value.0 }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// A single parsed frame, owned by the assembler once handed over.
///
/// # Examples
///
/// ```
/// use amqp_command::frame::{ChannelId, FrameType, InboundFrame};
/// use bytes::Bytes;
///
/// let frame = InboundFrame::new(FrameType::Body, ChannelId(1), Bytes::from_static(b"hi"));
/// assert_eq!(frame.len(), 2);
/// assert_eq!(frame.channel(), ChannelId(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundFrame {
    frame_type: FrameType,
    channel: ChannelId,
    payload: Bytes,
}

impl InboundFrame {
    /// Construct a frame from its decoded parts.
    #[must_use]
    pub fn new(frame_type: FrameType, channel: ChannelId, payload: impl Into<Bytes>) -> Self {
        Self {
            frame_type,
            channel,
            payload: payload.into(),
        }
    }

    /// Convenience constructor for a method frame.
    #[must_use]
    pub fn method(channel: ChannelId, payload: impl Into<Bytes>) -> Self {
        Self::new(FrameType::Method, channel, payload)
    }

    /// Convenience constructor for a content header frame.
    #[must_use]
    pub fn header(channel: ChannelId, payload: impl Into<Bytes>) -> Self {
        Self::new(FrameType::Header, channel, payload)
    }

    /// Convenience constructor for a content body frame.
    #[must_use]
    pub fn body(channel: ChannelId, payload: impl Into<Bytes>) -> Self {
        Self::new(FrameType::Body, channel, payload)
    }

    /// Type tag of the frame.
    #[must_use]
    pub const fn frame_type(&self) -> FrameType { self.frame_type }

    /// Channel the frame was received on.
    #[must_use]
    pub const fn channel(&self) -> ChannelId { self.channel }

    /// Borrow the raw payload.
    #[must_use]
    pub fn payload(&self) -> &[u8] { &self.payload }

    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.payload.len() }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.payload.is_empty() }

    /// Cursor over the payload for codec calls.
    ///
    /// The returned [`Bytes`] shares the frame's buffer; advancing it does not
    /// affect the frame.
    #[must_use]
    pub fn reader(&self) -> Bytes { self.payload.clone() }

    /// Consume the frame, returning its payload.
    #[must_use]
    pub fn into_payload(self) -> Bytes { self.payload }
}

impl fmt::Display for InboundFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frame on channel {} ({} bytes)",
            self.frame_type,
            self.channel,
            self.payload.len()
        )
    }
}
