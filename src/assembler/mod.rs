//! Per-channel reconstruction of commands from frames.
//!
//! A [`CommandAssembler`] consumes the frames of one channel in wire order and
//! yields a [`Command`] each time a method, and for content-bearing methods
//! its content header and body, have fully arrived:
//!
//! ```text
//! ExpectingMethod --method--> ExpectingContentHeader --header--> ExpectingContentBody
//!        |                              |                          |   ^
//!        | (no content)                 | (body size 0)            |   | body (bytes left)
//!        v                              v                          v   |
//!     Complete <------------------------+--------------------------+---+
//!        |
//!        +--> reset to ExpectingMethod, command returned
//! ```
//!
//! Any frame that does not fit the current state is rejected with a
//! [`ProtocolViolation`]. Rejected frames leave the assembler untouched, but
//! the stream cannot be resynchronised and should be closed by the caller.
//!
//! Routing frames from a multiplexed connection to the right assembler is the
//! caller's job; keep one assembler per channel.

pub mod config;
pub mod error;
mod state;

use std::{fmt, mem};

use bytes::Bytes;
use log::{debug, warn};

pub use config::AssemblerConfig;
pub use error::{AssemblyError, CommandPart, InvariantViolation, ProtocolViolation};
pub use state::AssemblyState;
use state::Stage;

use crate::{
    codec::{ContentHeader, DecodeError, MethodValue, ProtocolCodec},
    command::Command,
    frame::{FrameType, InboundFrame},
    metrics,
};

/// Command produced by an assembler using codec `C`.
pub type AssembledCommand<C> =
    Command<<C as ProtocolCodec>::Method, <C as ProtocolCodec>::Header>;

type CodecStage<C> = Stage<<C as ProtocolCodec>::Method, <C as ProtocolCodec>::Header>;

/// Outcome of applying one accepted frame.
enum Step<C: ProtocolCodec> {
    Pending(CodecStage<C>),
    Complete(AssembledCommand<C>),
}

/// Why a frame was not applied.
enum Rejection<C: ProtocolCodec> {
    /// The stage the frame was checked against, handed back unchanged.
    Protocol {
        stage: CodecStage<C>,
        violation: ProtocolViolation,
    },
    Defect(InvariantViolation),
}

impl<C: ProtocolCodec> Rejection<C> {
    fn unexpected(stage: CodecStage<C>, frame: InboundFrame) -> Self {
        let expected = stage.state();
        Self::Protocol {
            stage,
            violation: ProtocolViolation::UnexpectedFrame { expected, frame },
        }
    }

    fn decode(
        stage: CodecStage<C>,
        frame: &InboundFrame,
        part: CommandPart,
        source: DecodeError,
    ) -> Self {
        Self::Protocol {
            stage,
            violation: ProtocolViolation::Decode {
                channel: frame.channel(),
                part,
                source,
            },
        }
    }
}

/// Finite-state machine assembling the commands of a single channel.
///
/// # Examples
///
/// ```
/// use amqp_command::{
///     CommandAssembler,
///     codec::RawCodec,
///     frame::{ChannelId, InboundFrame},
/// };
/// use bytes::{BufMut, BytesMut};
///
/// let channel = ChannelId(1);
/// let mut assembler = CommandAssembler::new(RawCodec);
///
/// // basic.publish
/// let method = InboundFrame::method(channel, &[0x00, 0x3c, 0x00, 0x28][..]);
/// assert!(assembler.handle_frame(method).expect("method accepted").is_none());
///
/// let mut header = BytesMut::new();
/// header.put_u16(60);
/// header.put_u16(0);
/// header.put_u64(5);
/// header.put_u16(0);
/// let header = InboundFrame::header(channel, header.freeze());
/// assert!(assembler.handle_frame(header).expect("header accepted").is_none());
///
/// let body = InboundFrame::body(channel, &b"hello"[..]);
/// let command = assembler
///     .handle_frame(body)
///     .expect("body accepted")
///     .expect("command complete");
/// assert_eq!(command.body().as_ref(), b"hello");
/// ```
pub struct CommandAssembler<C: ProtocolCodec> {
    codec: C,
    config: AssemblerConfig,
    stage: CodecStage<C>,
}

impl<C: ProtocolCodec> CommandAssembler<C> {
    /// Create an assembler with no body size limit.
    #[must_use]
    pub fn new(codec: C) -> Self { Self::with_config(codec, AssemblerConfig::default()) }

    /// Create an assembler applying `config`.
    #[must_use]
    pub fn with_config(codec: C, config: AssemblerConfig) -> Self {
        Self {
            codec,
            config,
            stage: Stage::ExpectingMethod,
        }
    }

    /// Current assembly state.
    #[must_use]
    pub const fn state(&self) -> AssemblyState { self.stage.state() }

    /// Body bytes still owed; zero outside [`AssemblyState::ExpectingContentBody`].
    #[must_use]
    pub const fn remaining_body_bytes(&self) -> u64 { self.stage.remaining_body_bytes() }

    /// Body bytes accumulated for the command in progress.
    #[must_use]
    pub fn buffered_body_bytes(&self) -> usize { self.stage.buffered_body_bytes() }

    /// Limits applied by this assembler.
    #[must_use]
    pub const fn config(&self) -> &AssemblerConfig { &self.config }

    /// Codec used to decode methods and headers.
    #[must_use]
    pub const fn codec(&self) -> &C { &self.codec }

    /// Feed the next frame of this channel.
    ///
    /// Returns `Ok(Some(command))` when the frame completes a command, after
    /// which the assembler is ready for the next method frame. Returns
    /// `Ok(None)` while more frames are required.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::Protocol`] when the frame does not fit the
    /// current state, a body fragment overruns the declared size, the codec
    /// rejects a payload, or the declared body exceeds the configured limit.
    /// The assembler state is left as it was before the call.
    ///
    /// Returns [`AssemblyError::Invariant`] when the assembler is stuck in
    /// [`AssemblyState::Complete`], which only happens if an earlier call
    /// unwound before finishing.
    pub fn handle_frame(
        &mut self,
        frame: InboundFrame,
    ) -> Result<Option<AssembledCommand<C>>, AssemblyError> {
        metrics::inc_frames(frame.frame_type());
        let channel = frame.channel();

        // The stage stays `Complete` if the codec panics.
        let stage = mem::replace(&mut self.stage, Stage::Complete);
        match self.advance(stage, frame) {
            Ok(Step::Pending(next)) => {
                self.stage = next;
                Ok(None)
            }
            Ok(Step::Complete(command)) => {
                self.stage = Stage::ExpectingMethod;
                metrics::inc_commands();
                debug!(
                    "command assembled: channel={channel}, fragments={}, body_len={}",
                    command.body_fragments().len(),
                    command.body_len()
                );
                Ok(Some(command))
            }
            Err(Rejection::Protocol { stage, violation }) => {
                self.stage = stage;
                metrics::inc_protocol_violations(violation.kind());
                warn!("rejecting frame: channel={channel}, error={violation}");
                Err(violation.into())
            }
            Err(Rejection::Defect(violation)) => {
                metrics::inc_invariant_violations();
                tracing::error!(
                    channel = %channel,
                    frame_type = %violation.frame.frame_type(),
                    state = %violation.state,
                    "frame received in invalid assembler state"
                );
                Err(violation.into())
            }
        }
    }

    fn advance(
        &self,
        stage: CodecStage<C>,
        frame: InboundFrame,
    ) -> Result<Step<C>, Rejection<C>> {
        match stage {
            Stage::ExpectingMethod => {
                if frame.frame_type() != FrameType::Method {
                    return Err(Rejection::unexpected(stage, frame));
                }
                let mut reader = frame.reader();
                let method = match self.codec.decode_method(&mut reader) {
                    Ok(method) => method,
                    Err(source) => {
                        return Err(Rejection::decode(stage, &frame, CommandPart::Method, source));
                    }
                };
                if method.has_content() {
                    Ok(Step::Pending(Stage::ExpectingContentHeader { method }))
                } else {
                    Ok(Step::Complete(Command::without_content(method)))
                }
            }
            Stage::ExpectingContentHeader { method } => {
                if frame.frame_type() != FrameType::Header {
                    return Err(Rejection::unexpected(
                        Stage::ExpectingContentHeader { method },
                        frame,
                    ));
                }
                let mut reader = frame.reader();
                let mut header = match self.codec.decode_content_header(&mut reader) {
                    Ok(header) => header,
                    Err(source) => {
                        return Err(Rejection::decode(
                            Stage::ExpectingContentHeader { method },
                            &frame,
                            CommandPart::ContentHeader,
                            source,
                        ));
                    }
                };
                let declared = match header.read_body_size(&mut reader) {
                    Ok(size) => size,
                    Err(source) => {
                        return Err(Rejection::decode(
                            Stage::ExpectingContentHeader { method },
                            &frame,
                            CommandPart::BodySize,
                            source,
                        ));
                    }
                };
                if let Some(limit) = self
                    .config
                    .max_body_size
                    .filter(|limit| declared > limit.get())
                {
                    return Err(Rejection::Protocol {
                        stage: Stage::ExpectingContentHeader { method },
                        violation: ProtocolViolation::BodyTooLarge {
                            channel: frame.channel(),
                            declared,
                            limit,
                        },
                    });
                }
                Ok(Self::body_step(method, header, Vec::new(), declared))
            }
            Stage::ExpectingContentBody {
                method,
                header,
                mut body,
                remaining,
            } => {
                let stage_back = |method, header, body| Stage::ExpectingContentBody {
                    method,
                    header,
                    body,
                    remaining,
                };
                if frame.frame_type() != FrameType::Body {
                    return Err(Rejection::unexpected(stage_back(method, header, body), frame));
                }
                let received = u64::try_from(frame.len()).unwrap_or(u64::MAX);
                let Some(left) = remaining.checked_sub(received) else {
                    return Err(Rejection::Protocol {
                        stage: stage_back(method, header, body),
                        violation: ProtocolViolation::MalformedFrame {
                            channel: frame.channel(),
                            remaining,
                            received,
                        },
                    });
                };
                body.push(frame.into_payload());
                Ok(Self::body_step(method, header, body, left))
            }
            Stage::Complete => Err(Rejection::Defect(InvariantViolation {
                state: AssemblyState::Complete,
                frame,
            })),
        }
    }

    fn body_step(method: C::Method, header: C::Header, body: Vec<Bytes>, remaining: u64) -> Step<C> {
        if remaining > 0 {
            Step::Pending(Stage::ExpectingContentBody {
                method,
                header,
                body,
                remaining,
            })
        } else {
            Step::Complete(Command::new(method, Some(header), body))
        }
    }
}

impl<C: ProtocolCodec> fmt::Debug for CommandAssembler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandAssembler")
            .field("state", &self.state())
            .field("remaining_body_bytes", &self.remaining_body_bytes())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
