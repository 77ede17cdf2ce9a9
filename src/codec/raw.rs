//! Pass-through codec for the fixed AMQP 0-9-1 payload prefixes.
//!
//! `RawCodec` decodes only what the assembler needs: the class and method
//! identifiers of method frames and the class, weight and body size of
//! content header frames. Method arguments and header properties stay as
//! undecoded [`Bytes`] sharing the frame buffer.
//!
//! # Example
//!
//! ```
//! use amqp_command::codec::{MethodValue, ProtocolCodec, RawCodec};
//! use bytes::Bytes;
//!
//! // basic.publish with an empty argument list
//! let mut reader = Bytes::from_static(&[0x00, 0x3c, 0x00, 0x28]);
//! let method = RawCodec.decode_method(&mut reader).expect("method decodes");
//! assert_eq!((method.class_id, method.method_id), (60, 40));
//! assert!(method.has_content());
//! ```

use bytes::{Buf, Bytes};

use super::{ContentHeader, DecodeError, MethodValue, ProtocolCodec};

/// Class identifier of the `basic` class.
pub const BASIC_CLASS: u16 = 60;

/// `(class-id, method-id)` pairs of methods followed by content.
pub const CONTENT_METHODS: [(u16, u16); 4] = [
    (BASIC_CLASS, 40), // basic.publish
    (BASIC_CLASS, 50), // basic.return
    (BASIC_CLASS, 60), // basic.deliver
    (BASIC_CLASS, 71), // basic.get-ok
];

fn ensure_remaining(reader: &Bytes, field: &'static str, needed: usize) -> Result<(), DecodeError> {
    let available = reader.remaining();
    if available < needed {
        return Err(DecodeError::Truncated {
            field,
            needed,
            available,
        });
    }
    Ok(())
}

fn read_u16(reader: &mut Bytes, field: &'static str) -> Result<u16, DecodeError> {
    ensure_remaining(reader, field, 2)?;
    Ok(reader.get_u16())
}

/// A method whose arguments are left undecoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMethod {
    /// Class identifier.
    pub class_id: u16,
    /// Method identifier within the class.
    pub method_id: u16,
    /// Encoded argument list following the identifiers.
    pub arguments: Bytes,
}

impl MethodValue for RawMethod {
    fn has_content(&self) -> bool { CONTENT_METHODS.contains(&(self.class_id, self.method_id)) }
}

/// A content header whose property list is left undecoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawContentHeader {
    /// Class identifier; matches the class of the preceding method.
    pub class_id: u16,
    /// Unused weight field, zero on conforming peers.
    pub weight: u16,
    /// Declared total body length, populated by
    /// [`read_body_size`](ContentHeader::read_body_size).
    pub body_size: u64,
    /// Property flags followed by the property list.
    pub properties: Bytes,
}

impl ContentHeader for RawContentHeader {
    fn read_body_size(&mut self, reader: &mut Bytes) -> Result<u64, DecodeError> {
        ensure_remaining(reader, "body size", 8)?;
        self.body_size = reader.get_u64();
        self.properties = std::mem::take(reader);
        Ok(self.body_size)
    }
}

/// Codec producing [`RawMethod`] and [`RawContentHeader`] values.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawCodec;

impl ProtocolCodec for RawCodec {
    type Method = RawMethod;
    type Header = RawContentHeader;

    fn decode_method(&self, reader: &mut Bytes) -> Result<RawMethod, DecodeError> {
        let class_id = read_u16(reader, "class id")?;
        let method_id = read_u16(reader, "method id")?;
        Ok(RawMethod {
            class_id,
            method_id,
            arguments: std::mem::take(reader),
        })
    }

    fn decode_content_header(&self, reader: &mut Bytes) -> Result<RawContentHeader, DecodeError> {
        let class_id = read_u16(reader, "class id")?;
        let weight = read_u16(reader, "weight")?;
        Ok(RawContentHeader {
            class_id,
            weight,
            body_size: 0,
            properties: Bytes::new(),
        })
    }
}
