//! Test-only helpers for shared test utilities.

use std::sync::{Mutex, MutexGuard, OnceLock};

use bytes::{BufMut, Bytes, BytesMut};
use logtest::Logger;
use rstest::fixture;

use crate::{
    codec::{DecodeError, ProtocolCodec, RawCodec, RawContentHeader, RawMethod},
    frame::{ChannelId, InboundFrame},
};

/// Channel used by single-channel tests.
pub const CHANNEL: ChannelId = ChannelId(1);

/// Method frame for `basic.publish`, which carries content.
pub fn publish_frame(channel: ChannelId) -> InboundFrame { method_frame(channel, 60, 40) }

/// Method frame for `channel.open`, which carries no content.
pub fn channel_open_frame(channel: ChannelId) -> InboundFrame { method_frame(channel, 20, 10) }

/// Method frame with the given identifiers and no arguments.
pub fn method_frame(channel: ChannelId, class_id: u16, method_id: u16) -> InboundFrame {
    let mut buf = BytesMut::with_capacity(4);
    buf.put_u16(class_id);
    buf.put_u16(method_id);
    InboundFrame::method(channel, buf.freeze())
}

/// `basic` content header frame declaring `body_size` bytes and no properties.
pub fn header_frame(channel: ChannelId, body_size: u64) -> InboundFrame {
    let mut buf = BytesMut::with_capacity(14);
    buf.put_u16(60);
    buf.put_u16(0);
    buf.put_u64(body_size);
    buf.put_u16(0);
    InboundFrame::header(channel, buf.freeze())
}

/// Body frame carrying `fragment`.
pub fn body_frame(channel: ChannelId, fragment: &[u8]) -> InboundFrame {
    InboundFrame::body(channel, Bytes::copy_from_slice(fragment))
}

/// Codec whose method decoding panics, leaving the assembler mid-transition.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanickingCodec;

impl ProtocolCodec for PanickingCodec {
    type Method = RawMethod;
    type Header = RawContentHeader;

    fn decode_method(&self, _reader: &mut Bytes) -> Result<RawMethod, DecodeError> {
        panic!("method codec exploded");
    }

    fn decode_content_header(&self, reader: &mut Bytes) -> Result<RawContentHeader, DecodeError> {
        RawCodec.decode_content_header(reader)
    }
}

/// Handle to the global logger with exclusive access.
pub struct LoggerHandle {
    guard: MutexGuard<'static, Logger>,
}

impl LoggerHandle {
    /// Acquire the global [`Logger`] instance.
    pub fn new() -> Self {
        static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

        let logger = LOGGER.get_or_init(|| Mutex::new(Logger::start()));
        let guard = logger
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        Self { guard }
    }

    /// Discard every captured record.
    pub fn clear(&mut self) { while self.pop().is_some() {} }

    /// Drain captured records, returning the messages logged at `level`.
    pub fn drain_messages(&mut self, level: log::Level) -> Vec<String> {
        let mut messages = Vec::new();
        while let Some(record) = self.pop() {
            if record.level() == level {
                messages.push(record.args().to_owned());
            }
        }
        messages
    }
}

impl std::ops::Deref for LoggerHandle {
    type Target = Logger;

    fn deref(&self) -> &Self::Target { &self.guard }
}

impl std::ops::DerefMut for LoggerHandle {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.guard }
}

#[fixture]
pub fn logger() -> LoggerHandle { LoggerHandle::new() }
