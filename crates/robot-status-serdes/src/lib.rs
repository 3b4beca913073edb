//! CDR serialization for robot-status
//!
//! Implements exactly the subset of OMG Common Data Representation (CDR)
//! encoding the status channel needs: a 16-byte frame of encapsulation
//! header, alignment padding, and one little-endian i64.

pub mod cdr;
pub mod error;
pub mod traits;

pub use cdr::{CdrReader, CdrWriter};
pub use error::{DeserError, SerError};
pub use traits::{Deserialize, Message, Serialize};

/// CDR encapsulation header for little-endian encoding
pub const CDR_LE_HEADER: [u8; 4] = [0x00, 0x01, 0x00, 0x00];
