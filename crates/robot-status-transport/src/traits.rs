//! Transport abstraction traits
//!
//! These traits define the interface between the node layer and transport
//! backends (loopback, zenoh).

use robot_status_serdes::Message;
use thiserror::Error;

/// Topic information for pub/sub
#[derive(Debug, Clone)]
pub struct TopicInfo<'a> {
    /// Topic name (e.g., "robot1_status")
    pub name: &'a str,
    /// DDS type name (e.g., "std_msgs::msg::dds_::Int64_")
    pub type_name: &'a str,
    /// Type hash for compatibility checking
    pub type_hash: &'a str,
    /// Domain ID (default: 0)
    pub domain_id: u32,
}

impl<'a> TopicInfo<'a> {
    /// Create new topic info
    pub const fn new(name: &'a str, type_name: &'a str, type_hash: &'a str) -> Self {
        Self {
            name,
            type_name,
            type_hash,
            domain_id: 0,
        }
    }

    /// Create topic info with custom domain ID
    pub const fn with_domain(mut self, domain_id: u32) -> Self {
        self.domain_id = domain_id;
        self
    }

    /// Generate the full topic key
    ///
    /// Format: `<domain_id>/<topic_name>/<type_name>/RIHS01_<hash>`, with
    /// leading/trailing slashes stripped from the topic name.
    pub fn to_key(&self) -> String {
        format!(
            "{}/{}/{}/RIHS01_{}",
            self.domain_id,
            self.name.trim_matches('/'),
            self.type_name,
            self.type_hash
        )
    }

    /// Generate a wildcard topic key for subscribing
    ///
    /// Format: `<domain_id>/<topic_name>/<type_name>/*`, matching any type
    /// hash on the publisher side.
    pub fn to_key_wildcard(&self) -> String {
        format!(
            "{}/{}/{}/*",
            self.domain_id,
            self.name.trim_matches('/'),
            self.type_name
        )
    }
}

/// Transport error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Failed to open a transport session
    #[error("failed to open transport session")]
    ConnectionFailed,
    /// Failed to create publisher
    #[error("failed to create publisher")]
    PublisherCreationFailed,
    /// Failed to create subscriber
    #[error("failed to create subscriber")]
    SubscriberCreationFailed,
    /// Failed to publish message
    #[error("failed to publish message")]
    PublishFailed,
    /// Serialization error
    #[error("message serialization failed")]
    SerializationError,
    /// Deserialization error
    #[error("message deserialization failed")]
    DeserializationError,
    /// Buffer too small
    #[error("buffer too small")]
    BufferTooSmall,
    /// Invalid configuration
    #[error("invalid transport configuration")]
    InvalidConfig,
}

/// QoS (Quality of Service) settings
#[derive(Debug, Clone, Copy)]
pub struct QosSettings {
    /// Reliability: true for reliable, false for best-effort
    pub reliable: bool,
    /// History depth for subscribers
    pub history_depth: u32,
}

impl QosSettings {
    /// Best-effort QoS, suited to high-frequency low-value samples
    pub const BEST_EFFORT: Self = Self {
        reliable: false,
        history_depth: 1,
    };

    /// Reliable QoS (guaranteed, ordered delivery)
    pub const RELIABLE: Self = Self {
        reliable: true,
        history_depth: 10,
    };

    /// Set reliability to reliable
    pub const fn reliable(mut self) -> Self {
        self.reliable = true;
        self
    }

    /// Set reliability to best-effort
    pub const fn best_effort(mut self) -> Self {
        self.reliable = false;
        self
    }
}

impl Default for QosSettings {
    fn default() -> Self {
        Self::BEST_EFFORT
    }
}

/// Transport session configuration
#[derive(Debug, Clone, Default)]
pub struct TransportConfig<'a> {
    /// Peer locator (e.g., "tcp/127.0.0.1:7447")
    pub locator: Option<&'a str>,
    /// Session mode: client or peer
    pub mode: SessionMode,
}

/// Session mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionMode {
    /// Connect as client to a router
    #[default]
    Client,
    /// Connect as peer for peer-to-peer communication
    Peer,
}

/// Transport session trait
pub trait Session {
    /// Publisher handle type
    type PublisherHandle: Publisher;
    /// Subscriber handle type
    type SubscriberHandle: Subscriber;

    /// Create a publisher for a topic
    fn create_publisher(
        &mut self,
        topic: &TopicInfo,
        qos: QosSettings,
    ) -> Result<Self::PublisherHandle, TransportError>;

    /// Create a subscriber for a topic
    fn create_subscriber(
        &mut self,
        topic: &TopicInfo,
        qos: QosSettings,
    ) -> Result<Self::SubscriberHandle, TransportError>;

    /// Close the session
    fn close(&mut self) -> Result<(), TransportError>;
}

/// Publisher trait for sending messages
pub trait Publisher {
    /// Publish a serialized message
    fn publish_raw(&self, data: &[u8]) -> Result<(), TransportError>;

    /// Publish a typed message (serializes automatically)
    fn publish<M: Message>(&self, msg: &M, buf: &mut [u8]) -> Result<(), TransportError> {
        use robot_status_serdes::CdrWriter;

        let mut writer =
            CdrWriter::new_with_header(buf).map_err(|_| TransportError::BufferTooSmall)?;
        msg.serialize(&mut writer)
            .map_err(|_| TransportError::SerializationError)?;
        self.publish_raw(writer.as_slice())
    }
}

/// Subscriber trait for receiving messages
pub trait Subscriber {
    /// Try to receive a raw message (non-blocking)
    ///
    /// Returns the payload length, or None if no message is available.
    fn try_recv_raw(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError>;

    /// Try to receive a typed message (non-blocking)
    fn try_recv<M: Message>(&mut self, buf: &mut [u8]) -> Result<Option<M>, TransportError> {
        use robot_status_serdes::CdrReader;

        match self.try_recv_raw(buf)? {
            Some(len) => {
                let mut reader = CdrReader::new_with_header(&buf[..len])
                    .map_err(|_| TransportError::DeserializationError)?;
                let msg = M::deserialize(&mut reader)
                    .map_err(|_| TransportError::DeserializationError)?;
                Ok(Some(msg))
            }
            None => Ok(None),
        }
    }
}

/// Transport backend trait
pub trait Transport {
    /// Session type for this transport
    type Session: Session;

    /// Open a new session with the given configuration
    fn open(config: &TransportConfig) -> Result<Self::Session, TransportError>;
}
