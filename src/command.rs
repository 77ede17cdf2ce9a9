//! Fully assembled protocol commands.
//!
//! A [`Command`] is produced by the [`CommandAssembler`](crate::CommandAssembler)
//! once a method, and for content-bearing methods its header and every body
//! fragment, have arrived. Body fragments are kept as received so no copy is
//! made until the caller asks for a contiguous body.

use bytes::{Bytes, BytesMut};

/// A method with its optional content header and body.
///
/// # Examples
///
/// ```
/// use amqp_command::Command;
/// use bytes::Bytes;
///
/// let command = Command::new(
///     "basic.publish",
///     Some("header"),
///     vec![Bytes::from_static(b"he"), Bytes::from_static(b"llo")],
/// );
/// assert_eq!(command.body_len(), 5);
/// assert_eq!(command.body().as_ref(), b"hello");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command<M, H> {
    method: M,
    header: Option<H>,
    body: Vec<Bytes>,
}

impl<M, H> Command<M, H> {
    /// Create a command from its parts.
    #[must_use]
    pub fn new(method: M, header: Option<H>, body: Vec<Bytes>) -> Self {
        Self {
            method,
            header,
            body,
        }
    }

    /// Create a command for a method that carries no content.
    #[must_use]
    pub fn without_content(method: M) -> Self { Self::new(method, None, Vec::new()) }

    /// The decoded method.
    #[must_use]
    pub const fn method(&self) -> &M { &self.method }

    /// The decoded content header, if the method carries content.
    #[must_use]
    pub const fn header(&self) -> Option<&H> { self.header.as_ref() }

    /// Body fragments in arrival order.
    #[must_use]
    pub fn body_fragments(&self) -> &[Bytes] { &self.body }

    /// Total body length across all fragments.
    #[must_use]
    pub fn body_len(&self) -> usize { self.body.iter().map(Bytes::len).sum() }

    /// Contiguous body bytes.
    ///
    /// A single fragment is returned without copying; multiple fragments are
    /// concatenated into a fresh buffer.
    #[must_use]
    pub fn body(&self) -> Bytes {
        match self.body.as_slice() {
            [] => Bytes::new(),
            [single] => single.clone(),
            fragments => {
                let mut buf = BytesMut::with_capacity(self.body_len());
                for fragment in fragments {
                    buf.extend_from_slice(fragment);
                }
                buf.freeze()
            }
        }
    }

    /// Consume the command, returning method, header and body fragments.
    #[must_use]
    pub fn into_parts(self) -> (M, Option<H>, Vec<Bytes>) { (self.method, self.header, self.body) }
}
