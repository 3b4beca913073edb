//! Typed publisher handle

use std::marker::PhantomData;

use robot_status_serdes::Message;
use robot_status_transport::Publisher;

use crate::error::NodeError;

/// Serialization buffer size; comfortably above any status message
const TX_BUFFER_SIZE: usize = 256;

/// Typed handle to an outbound channel
///
/// The type parameter `M` ensures only the declared message type can be
/// published on this channel.
pub struct TopicPublisher<M, P> {
    handle: P,
    topic: String,
    _marker: PhantomData<M>,
}

impl<M: Message, P: Publisher> TopicPublisher<M, P> {
    pub(crate) fn new(handle: P, topic: String) -> Self {
        Self {
            handle,
            topic,
            _marker: PhantomData,
        }
    }

    /// Get the topic name this publisher is bound to
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Serialize and publish a message
    pub fn publish(&self, msg: &M) -> Result<(), NodeError> {
        let mut buf = [0u8; TX_BUFFER_SIZE];
        self.handle
            .publish(msg, &mut buf)
            .map_err(NodeError::Publish)
    }
}
