//! Frame builders and drivers for assembler tests.

use amqp_command::{
    AssembledCommand,
    AssemblyError,
    ChannelId,
    CommandAssembler,
    InboundFrame,
    ProtocolCodec,
};
use bytes::{BufMut, Bytes, BytesMut};

/// Build a method frame with the given `(class-id, method-id)` and arguments.
pub fn method_frame(
    channel: ChannelId,
    (class_id, method_id): (u16, u16),
    arguments: &[u8],
) -> InboundFrame {
    let mut buf = BytesMut::with_capacity(4 + arguments.len());
    buf.put_u16(class_id);
    buf.put_u16(method_id);
    buf.put_slice(arguments);
    InboundFrame::method(channel, buf.freeze())
}

/// Build a content header frame declaring `body_size` with no properties.
pub fn header_frame(channel: ChannelId, class_id: u16, body_size: u64) -> InboundFrame {
    header_frame_with_properties(channel, class_id, body_size, &[0x00, 0x00])
}

/// Build a content header frame with a raw property flags and list section.
pub fn header_frame_with_properties(
    channel: ChannelId,
    class_id: u16,
    body_size: u64,
    properties: &[u8],
) -> InboundFrame {
    let mut buf = BytesMut::with_capacity(12 + properties.len());
    buf.put_u16(class_id);
    buf.put_u16(0);
    buf.put_u64(body_size);
    buf.put_slice(properties);
    InboundFrame::header(channel, buf.freeze())
}

/// Build a content body frame.
pub fn body_frame(channel: ChannelId, fragment: &[u8]) -> InboundFrame {
    InboundFrame::body(channel, Bytes::copy_from_slice(fragment))
}

/// Frames for a content-bearing command with `body` split into chunks of at
/// most `max_fragment` bytes.
///
/// # Panics
///
/// Panics if `max_fragment` is zero.
pub fn content_command_frames(
    channel: ChannelId,
    method: (u16, u16),
    body: &[u8],
    max_fragment: usize,
) -> Vec<InboundFrame> {
    assert!(max_fragment > 0, "fragment size must be non-zero");
    let body_size = u64::try_from(body.len()).expect("body length fits in u64");
    let mut frames = vec![
        method_frame(channel, method, &[]),
        header_frame(channel, method.0, body_size),
    ];
    frames.extend(body.chunks(max_fragment).map(|chunk| body_frame(channel, chunk)));
    frames
}

/// Feed `frames` to `assembler`, collecting every completed command.
///
/// # Errors
///
/// Returns the first [`AssemblyError`] raised by the assembler.
pub fn drive_frames<C, I>(
    assembler: &mut CommandAssembler<C>,
    frames: I,
) -> Result<Vec<AssembledCommand<C>>, AssemblyError>
where
    C: ProtocolCodec,
    I: IntoIterator<Item = InboundFrame>,
{
    let mut commands = Vec::new();
    for frame in frames {
        if let Some(command) = assembler.handle_frame(frame)? {
            commands.push(command);
        }
    }
    Ok(commands)
}
