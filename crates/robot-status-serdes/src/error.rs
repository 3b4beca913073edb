//! Encode/decode error types

use core::fmt;

/// Error while encoding a status frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerError {
    /// The output buffer cannot hold the frame
    BufferTooSmall,
}

impl fmt::Display for SerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerError::BufferTooSmall => write!(f, "output buffer too small for frame"),
        }
    }
}

impl std::error::Error for SerError {}

/// Error while decoding a status frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeserError {
    /// The frame ends before the payload does
    UnexpectedEof,
    /// The encapsulation header is missing or not little-endian CDR
    InvalidHeader,
}

impl fmt::Display for DeserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeserError::UnexpectedEof => write!(f, "frame truncated"),
            DeserError::InvalidHeader => write!(f, "bad encapsulation header"),
        }
    }
}

impl std::error::Error for DeserError {}
