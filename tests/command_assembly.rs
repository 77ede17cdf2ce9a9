//! End-to-end assembly of wire-shaped frame sequences.

use amqp_command::{
    AssemblyError,
    AssemblyState,
    ChannelId,
    CommandAssembler,
    ProtocolViolation,
    codec::RawCodec,
};
use amqp_command_testing::{
    LoggerHandle,
    body_frame,
    content_command_frames,
    drive_frames,
    header_frame,
    header_frame_with_properties,
    logger,
    method_frame,
};
use rstest::rstest;

const CHANNEL: ChannelId = ChannelId(5);

#[rstest]
#[case::unfragmented(b"hello world".as_slice(), 64)]
#[case::byte_at_a_time(b"hello world".as_slice(), 1)]
#[case::uneven_chunks(b"hello world".as_slice(), 4)]
#[case::empty_body(b"".as_slice(), 8)]
fn deliver_commands_reassemble(#[case] body: &[u8], #[case] max_fragment: usize) {
    let mut assembler = CommandAssembler::new(RawCodec);
    let frames = content_command_frames(CHANNEL, (60, 60), body, max_fragment);

    let commands = drive_frames(&mut assembler, frames).expect("frames assemble");

    assert_eq!(commands.len(), 1);
    let command = &commands[0];
    assert_eq!(command.method().method_id, 60);
    assert_eq!(command.body().as_ref(), body);
    assert_eq!(assembler.state(), AssemblyState::ExpectingMethod);
}

#[test]
fn interleaved_content_and_plain_commands() {
    let mut assembler = CommandAssembler::new(RawCodec);
    let mut frames = content_command_frames(CHANNEL, (60, 40), b"first", 2);
    frames.push(method_frame(CHANNEL, (60, 80), &[0, 0, 0, 0, 0, 0, 0, 1, 0]));
    frames.extend(content_command_frames(CHANNEL, (60, 40), b"second", 6));

    let commands = drive_frames(&mut assembler, frames).expect("frames assemble");

    let summary: Vec<(u16, Option<usize>)> = commands
        .iter()
        .map(|command| (command.method().method_id, command.header().map(|_| command.body_len())))
        .collect();
    assert_eq!(summary, [(40, Some(5)), (80, None), (40, Some(6))]);
}

#[test]
fn header_properties_are_preserved() {
    let mut assembler = CommandAssembler::new(RawCodec);
    let frames = [
        method_frame(CHANNEL, (60, 40), &[]),
        header_frame_with_properties(CHANNEL, 60, 3, b"\x10\x00\x02"),
        body_frame(CHANNEL, b"abc"),
    ];

    let commands = drive_frames(&mut assembler, frames).expect("frames assemble");
    let header = commands[0].header().expect("content header present");
    assert_eq!(header.body_size, 3);
    assert_eq!(header.properties.as_ref(), b"\x10\x00\x02");
}

#[test]
fn hello_arrives_in_two_fragments() {
    let mut assembler = CommandAssembler::new(RawCodec);

    assert!(
        assembler
            .handle_frame(method_frame(CHANNEL, (60, 40), &[]))
            .expect("method accepted")
            .is_none()
    );
    assert!(
        assembler
            .handle_frame(header_frame(CHANNEL, 60, 5))
            .expect("header accepted")
            .is_none()
    );
    assert!(
        assembler
            .handle_frame(body_frame(CHANNEL, b"he"))
            .expect("fragment accepted")
            .is_none()
    );
    let command = assembler
        .handle_frame(body_frame(CHANNEL, b"llo"))
        .expect("fragment accepted")
        .expect("command completes");
    assert_eq!(command.body().as_ref(), b"hello");
}

#[rstest]
fn stray_body_frame_is_rejected_and_logged(mut logger: LoggerHandle) {
    let mut assembler = CommandAssembler::new(RawCodec);
    logger.clear();

    let err = drive_frames(&mut assembler, [body_frame(CHANNEL, b"orphan")])
        .expect_err("stray body must be rejected");

    assert!(matches!(
        err,
        AssemblyError::Protocol(ProtocolViolation::UnexpectedFrame {
            expected: AssemblyState::ExpectingMethod,
            ..
        })
    ));
    assert_eq!(err.channel(), CHANNEL);
    let warnings = logger.drain_messages(log::Level::Warn);
    assert!(
        warnings
            .iter()
            .any(|message| message.contains("rejecting frame") && message.contains("channel=5")),
        "missing rejection warning: {warnings:?}"
    );
}

#[test]
fn overlong_body_stops_the_stream() {
    let mut assembler = CommandAssembler::new(RawCodec);
    let frames = [
        method_frame(CHANNEL, (60, 40), &[]),
        header_frame(CHANNEL, 60, 4),
        body_frame(CHANNEL, b"abc"),
        body_frame(CHANNEL, b"de"),
        body_frame(CHANNEL, b"never seen"),
    ];

    let err = drive_frames(&mut assembler, frames).expect_err("overlong body must fail");

    assert_eq!(
        err,
        AssemblyError::Protocol(ProtocolViolation::MalformedFrame {
            channel: CHANNEL,
            remaining: 1,
            received: 2,
        })
    );
    assert_eq!(assembler.buffered_body_bytes(), 3);
}
