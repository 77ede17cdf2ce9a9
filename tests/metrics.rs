#![cfg(feature = "metrics")]
//! Tests for `amqp_command` metrics.
//!
//! These tests verify that counters update as frames are assembled using
//! `metrics_util::debugging::DebuggingRecorder`.
use amqp_command::{
    ChannelId,
    CommandAssembler,
    codec::RawCodec,
    metrics::{COMMANDS_ASSEMBLED, FRAMES_HANDLED, PROTOCOL_VIOLATIONS},
};
use amqp_command_testing::{body_frame, content_command_frames, drive_frames};
use metrics_util::{
    CompositeKey,
    debugging::{DebugValue, DebuggingRecorder, Snapshotter},
};

type SnapshotEntry = (
    CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
);

/// Creates a debugging recorder and snapshotter for metrics testing.
fn debugging_recorder_setup() -> (Snapshotter, DebuggingRecorder) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    (snapshotter, recorder)
}

fn counter_value(entries: &[SnapshotEntry], name: &str, label: Option<(&str, &str)>) -> u64 {
    entries
        .iter()
        .filter(|(key, _, _, _)| {
            key.key().name() == name
                && label.is_none_or(|(k, v)| {
                    key.key()
                        .labels()
                        .any(|l| l.key() == k && l.value() == v)
                })
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(count) => *count,
            _ => 0,
        })
        .sum()
}

#[test]
fn assembled_command_updates_counters() {
    let (snapshotter, recorder) = debugging_recorder_setup();
    metrics::with_local_recorder(&recorder, || {
        let mut assembler = CommandAssembler::new(RawCodec);
        let frames = content_command_frames(ChannelId(1), (60, 40), b"hello", 2);
        drive_frames(&mut assembler, frames).expect("frames assemble");
    });
    let entries = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_value(&entries, FRAMES_HANDLED, Some(("frame_type", "body"))),
        3
    );
    assert_eq!(
        counter_value(&entries, FRAMES_HANDLED, Some(("frame_type", "method"))),
        1
    );
    assert_eq!(counter_value(&entries, COMMANDS_ASSEMBLED, None), 1);
}

#[test]
fn rejected_frame_counts_violation_kind() {
    let (snapshotter, recorder) = debugging_recorder_setup();
    metrics::with_local_recorder(&recorder, || {
        let mut assembler = CommandAssembler::new(RawCodec);
        drive_frames(&mut assembler, [body_frame(ChannelId(1), b"stray")])
            .expect_err("stray body must be rejected");
    });
    let entries = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_value(
            &entries,
            PROTOCOL_VIOLATIONS,
            Some(("kind", "unexpected_frame"))
        ),
        1
    );
    assert_eq!(counter_value(&entries, COMMANDS_ASSEMBLED, None), 0);
}
