//! Game packet framing and typed field access.
//!
//! ```text
//! [0..4]  length (u32 BE) = 2 + body.len()
//! [4..6]  header id (u16 BE)
//! [6..]   body
//!
//! body fields:
//!   int     i32 BE
//!   short   i16 BE
//!   bool    u8 (0 = false)
//!   string  u16 BE byte length + UTF-8 bytes
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::ProtocolError;
use crate::wire_types::MAX_STRING_LEN;

/// One game packet: header id plus raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub header: u16,
    pub body: Bytes,
}

impl Packet {
    pub fn new(header: u16, body: impl Into<Bytes>) -> Self {
        Packet {
            header,
            body: body.into(),
        }
    }

    /// Decode one packet from a full frame (length prefix included).
    pub fn decode(frame: &[u8]) -> Result<Self, ProtocolError> {
        let mut buf = frame;
        need(&buf, 6)?;

        let len = buf.get_u32() as usize;
        if len < 2 {
            return Err(ProtocolError::InvalidField("length"));
        }
        need(&buf, len)?;

        let header = buf.get_u16();
        let body = Bytes::copy_from_slice(&buf[..len - 2]);
        Ok(Packet { header, body })
    }

    /// Encode this packet as a full frame, appended to `out`.
    pub fn encode(&self, out: &mut BytesMut) {
        out.reserve(6 + self.body.len());
        out.put_u32((self.body.len() + 2) as u32);
        out.put_u16(self.header);
        out.extend_from_slice(&self.body);
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut out = BytesMut::new();
        self.encode(&mut out);
        out.freeze()
    }

    /// Typed reader over the body.
    pub fn reader(&self) -> PacketReader {
        PacketReader {
            buf: self.body.clone(),
        }
    }
}

/// Sequential reader over a packet body.
#[derive(Debug, Clone)]
pub struct PacketReader {
    buf: Bytes,
}

impl PacketReader {
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn read_int(&mut self) -> Result<i32, ProtocolError> {
        need(&self.buf, 4)?;
        Ok(self.buf.get_i32())
    }

    pub fn read_short(&mut self) -> Result<i16, ProtocolError> {
        need(&self.buf, 2)?;
        Ok(self.buf.get_i16())
    }

    pub fn read_bool(&mut self) -> Result<bool, ProtocolError> {
        need(&self.buf, 1)?;
        Ok(self.buf.get_u8() != 0)
    }

    pub fn read_string(&mut self) -> Result<String, ProtocolError> {
        need(&self.buf, 2)?;
        let len = self.buf.get_u16() as usize;
        need(&self.buf, len)?;

        let raw = self.buf.split_to(len);
        String::from_utf8(raw.to_vec()).map_err(|_| ProtocolError::InvalidUtf8)
    }
}

/// Builder for a packet body.
#[derive(Debug, Default)]
pub struct PacketWriter {
    buf: BytesMut,
}

impl PacketWriter {
    pub fn new() -> Self {
        PacketWriter::default()
    }

    pub fn int(mut self, v: i32) -> Self {
        self.buf.put_i32(v);
        self
    }

    pub fn short(mut self, v: i16) -> Self {
        self.buf.put_i16(v);
        self
    }

    pub fn boolean(mut self, v: bool) -> Self {
        self.buf.put_u8(u8::from(v));
        self
    }

    pub fn string(mut self, s: &str) -> Result<Self, ProtocolError> {
        let bytes = s.as_bytes();
        if bytes.len() > MAX_STRING_LEN {
            return Err(ProtocolError::FieldTooLong(bytes.len()));
        }
        self.buf.put_u16(bytes.len() as u16);
        self.buf.extend_from_slice(bytes);
        Ok(self)
    }

    pub fn finish(self, header: u16) -> Packet {
        Packet::new(header, self.buf.freeze())
    }
}

fn need(buf: &impl Buf, n: usize) -> Result<(), ProtocolError> {
    if buf.remaining() < n {
        return Err(ProtocolError::Truncated {
            need: n,
            got: buf.remaining(),
        });
    }
    Ok(())
}
