//! Message types for the robot status channel
//!
//! The status channel carries a single 64-bit signed integer per message,
//! matching the `std_msgs/Int64` layout: counter values `0, 1, 2, …` while
//! the publisher is alive, and the sentinel `-1` as the final message.

use robot_status_serdes::{CdrReader, CdrWriter, Deserialize, DeserError, Message, SerError, Serialize};

/// Sentinel value published once, immediately before the publisher exits
pub const STATUS_SENTINEL: i64 = -1;

/// Int64 message type
///
/// Wire layout is the 4-byte CDR encapsulation header, 4 padding bytes for
/// 8-byte alignment, then the little-endian payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Int64 {
    pub data: i64,
}

impl Serialize for Int64 {
    fn serialize(&self, writer: &mut CdrWriter) -> Result<(), SerError> {
        writer.write_i64(self.data)
    }
}

impl Deserialize for Int64 {
    fn deserialize(reader: &mut CdrReader) -> Result<Self, DeserError> {
        Ok(Self {
            data: reader.read_i64()?,
        })
    }
}

impl Message for Int64 {
    const TYPE_NAME: &'static str = "std_msgs::msg::dds_::Int64_";
    // Type hashes only matter for interop with rmw_zenoh discovery; a zero
    // hash keeps local publishers and subscribers matched.
    const TYPE_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}
