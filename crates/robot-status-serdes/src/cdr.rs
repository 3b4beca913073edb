//! CDR framing for the status message
//!
//! The whole wire format is one frame shape: the 4-byte little-endian
//! encapsulation header, 4 padding bytes (alignment is computed relative to
//! the origin just past the header), then one 8-byte little-endian payload.

use crate::error::{DeserError, SerError};
use crate::CDR_LE_HEADER;

/// Writer for one status frame
///
/// Created with the encapsulation header already emitted; `write_i64` pads
/// to the 8-byte boundary and appends the payload.
pub struct CdrWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
    origin: usize,
}

impl<'a> CdrWriter<'a> {
    /// Create a writer, emitting the little-endian encapsulation header
    pub fn new_with_header(buf: &'a mut [u8]) -> Result<Self, SerError> {
        if buf.len() < 4 {
            return Err(SerError::BufferTooSmall);
        }
        buf[0..4].copy_from_slice(&CDR_LE_HEADER);
        Ok(Self {
            buf,
            pos: 4,
            origin: 4,
        })
    }

    /// Get current position in buffer
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get remaining capacity
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Get the written bytes, header included
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Pad to `alignment` bytes past the origin, zero-filling
    #[inline]
    fn align(&mut self, alignment: usize) -> Result<(), SerError> {
        let offset = self.pos - self.origin;
        let padding = (alignment - (offset % alignment)) % alignment;
        if self.remaining() < padding {
            return Err(SerError::BufferTooSmall);
        }
        for i in 0..padding {
            self.buf[self.pos + i] = 0;
        }
        self.pos += padding;
        Ok(())
    }

    /// Write an aligned little-endian i64
    pub fn write_i64(&mut self, value: i64) -> Result<(), SerError> {
        self.align(8)?;
        if self.remaining() < 8 {
            return Err(SerError::BufferTooSmall);
        }
        self.buf[self.pos..self.pos + 8].copy_from_slice(&value.to_le_bytes());
        self.pos += 8;
        Ok(())
    }
}

/// Reader for one status frame
pub struct CdrReader<'a> {
    buf: &'a [u8],
    pos: usize,
    origin: usize,
}

impl<'a> CdrReader<'a> {
    /// Create a reader, validating the encapsulation header
    pub fn new_with_header(buf: &'a [u8]) -> Result<Self, DeserError> {
        if buf.len() < 4 {
            return Err(DeserError::UnexpectedEof);
        }
        // Only little-endian CDR is supported
        if buf[0] != 0x00 || buf[1] != 0x01 {
            return Err(DeserError::InvalidHeader);
        }
        Ok(Self {
            buf,
            pos: 4,
            origin: 4,
        })
    }

    /// Get current position in buffer
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get remaining bytes
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Skip padding up to `alignment` bytes past the origin
    #[inline]
    fn align(&mut self, alignment: usize) -> Result<(), DeserError> {
        let offset = self.pos - self.origin;
        let padding = (alignment - (offset % alignment)) % alignment;
        if self.remaining() < padding {
            return Err(DeserError::UnexpectedEof);
        }
        self.pos += padding;
        Ok(())
    }

    /// Read an aligned little-endian i64
    pub fn read_i64(&mut self) -> Result<i64, DeserError> {
        self.align(8)?;
        if self.remaining() < 8 {
            return Err(DeserError::UnexpectedEof);
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.buf[self.pos..self.pos + 8]);
        self.pos += 8;
        Ok(i64::from_le_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_is_header_padding_payload() {
        let mut buf = [0u8; 32];
        let mut writer = CdrWriter::new_with_header(&mut buf).unwrap();
        assert_eq!(writer.position(), 4);
        writer.write_i64(-1).unwrap();

        // 4 header + 4 padding + 8 payload
        assert_eq!(writer.position(), 16);
        assert_eq!(&buf[0..4], &CDR_LE_HEADER);
        assert_eq!(&buf[4..8], &[0, 0, 0, 0]);
        assert_eq!(&buf[8..16], &[0xFF; 8]);
    }

    #[test]
    fn round_trip() {
        let mut buf = [0u8; 16];
        let mut writer = CdrWriter::new_with_header(&mut buf).unwrap();
        writer.write_i64(i64::MIN).unwrap();
        assert_eq!(writer.as_slice().len(), 16);

        let mut reader = CdrReader::new_with_header(&buf).unwrap();
        assert_eq!(reader.read_i64().unwrap(), i64::MIN);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn buffer_too_small() {
        let mut buf = [0u8; 8];
        let mut writer = CdrWriter::new_with_header(&mut buf).unwrap();
        assert_eq!(writer.write_i64(42), Err(SerError::BufferTooSmall));

        let mut tiny = [0u8; 2];
        assert!(CdrWriter::new_with_header(&mut tiny).is_err());
    }

    #[test]
    fn rejects_big_endian_header() {
        let buf = [0x00u8, 0x00, 0x00, 0x00, 0, 0, 0, 0];
        assert_eq!(
            CdrReader::new_with_header(&buf).err(),
            Some(DeserError::InvalidHeader)
        );
    }

    #[test]
    fn truncated_payload() {
        let buf = [0x00u8, 0x01, 0x00, 0x00, 1, 2];
        let mut reader = CdrReader::new_with_header(&buf).unwrap();
        assert_eq!(reader.read_i64(), Err(DeserError::UnexpectedEof));
    }
}
