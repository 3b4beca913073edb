//! Serialization traits and message metadata

use crate::cdr::{CdrReader, CdrWriter};
use crate::error::{DeserError, SerError};

/// Trait for types that can be serialized to CDR format
pub trait Serialize {
    /// Serialize this value to the CDR writer
    fn serialize(&self, writer: &mut CdrWriter) -> Result<(), SerError>;
}

/// Trait for types that can be deserialized from CDR format
pub trait Deserialize: Sized {
    /// Deserialize a value from the CDR reader
    fn deserialize(reader: &mut CdrReader) -> Result<Self, DeserError>;
}

/// Trait for message types carried on a topic
///
/// The type name and hash are used for topic key derivation and type
/// matching between publishers and subscribers.
pub trait Message: Sized + Serialize + Deserialize {
    /// Full type name in DDS format
    ///
    /// Example: `"std_msgs::msg::dds_::Int64_"`
    const TYPE_NAME: &'static str;

    /// RIHS (ROS Interface Hashing Standard) type hash
    ///
    /// 64-character hex string, without the `RIHS01_` prefix.
    const TYPE_HASH: &'static str;
}
