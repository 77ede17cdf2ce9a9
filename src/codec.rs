//! Codec interface consumed by the command assembler.
//!
//! The assembler never interprets method arguments or header properties
//! itself. It hands the payload reader of method and content header frames to
//! a [`ProtocolCodec`], and asks the decoded header for the declared body
//! size. Protocol crates supply the codec; [`RawCodec`] is a pass-through
//! implementation that decodes only the fixed AMQP 0-9-1 prefixes.
//!
//! Codecs are stateless capabilities. One codec value can back any number of
//! per-channel assemblers through the blanket implementations for `&C` and
//! [`Arc<C>`](std::sync::Arc).

use std::sync::Arc;

use bytes::Bytes;

pub mod error;
pub mod raw;

pub use error::DecodeError;
pub use raw::{RawCodec, RawContentHeader, RawMethod};

/// A decoded method value.
pub trait MethodValue {
    /// Whether a content header and body follow this method on the wire.
    fn has_content(&self) -> bool;
}

/// A decoded content header value.
pub trait ContentHeader {
    /// Read the declared total body length from the header payload.
    ///
    /// `reader` is positioned just past the bytes consumed by
    /// [`ProtocolCodec::decode_content_header`]. Implementations may also
    /// consume trailing header fields such as the property list.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the remaining payload is malformed.
    fn read_body_size(&mut self, reader: &mut Bytes) -> Result<u64, DecodeError>;
}

/// Decodes method and content header payloads for the assembler.
///
/// # Examples
///
/// ```
/// use amqp_command::codec::{ContentHeader, DecodeError, MethodValue, ProtocolCodec};
/// use bytes::{Buf, Bytes};
///
/// struct Nop;
/// struct Header;
///
/// impl MethodValue for Nop {
///     fn has_content(&self) -> bool { false }
/// }
///
/// impl ContentHeader for Header {
///     fn read_body_size(&mut self, reader: &mut Bytes) -> Result<u64, DecodeError> {
///         Ok(reader.get_u64())
///     }
/// }
///
/// struct NopCodec;
///
/// impl ProtocolCodec for NopCodec {
///     type Method = Nop;
///     type Header = Header;
///
///     fn decode_method(&self, _reader: &mut Bytes) -> Result<Nop, DecodeError> { Ok(Nop) }
///
///     fn decode_content_header(&self, _reader: &mut Bytes) -> Result<Header, DecodeError> {
///         Ok(Header)
///     }
/// }
/// ```
pub trait ProtocolCodec {
    /// Method value produced from method frames.
    type Method: MethodValue;
    /// Header value produced from content header frames.
    type Header: ContentHeader;

    /// Decode a method from a method frame payload.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the payload cannot be decoded.
    fn decode_method(&self, reader: &mut Bytes) -> Result<Self::Method, DecodeError>;

    /// Decode the leading fields of a content header frame payload.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the payload cannot be decoded.
    fn decode_content_header(&self, reader: &mut Bytes) -> Result<Self::Header, DecodeError>;
}

impl<C: ProtocolCodec + ?Sized> ProtocolCodec for &C {
    type Method = C::Method;
    type Header = C::Header;

    fn decode_method(&self, reader: &mut Bytes) -> Result<Self::Method, DecodeError> {
        (**self).decode_method(reader)
    }

    fn decode_content_header(&self, reader: &mut Bytes) -> Result<Self::Header, DecodeError> {
        (**self).decode_content_header(reader)
    }
}

impl<C: ProtocolCodec + ?Sized> ProtocolCodec for Arc<C> {
    type Method = C::Method;
    type Header = C::Header;

    fn decode_method(&self, reader: &mut Bytes) -> Result<Self::Method, DecodeError> {
        (**self).decode_method(reader)
    }

    fn decode_content_header(&self, reader: &mut Bytes) -> Result<Self::Header, DecodeError> {
        (**self).decode_content_header(reader)
    }
}
