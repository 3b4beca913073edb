//! Zenoh transport backend
//!
//! Opens a zenoh session and maps the transport traits onto zenoh
//! publishers and subscribers. Requires the `zenoh` feature flag.
//!
//! QoS mapping: the reliable profile publishes with blocking congestion
//! control (the session back-pressures rather than dropping), best-effort
//! publishes with dropping congestion control.
//!
//! # Example
//!
//! ```ignore
//! use robot_status_transport::{SessionMode, Transport, TransportConfig, ZenohTransport};
//!
//! let config = TransportConfig {
//!     locator: Some("tcp/127.0.0.1:7447"),
//!     mode: SessionMode::Client,
//! };
//! let mut session = ZenohTransport::open(&config)?;
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use ::zenoh::qos::CongestionControl;
use ::zenoh::Wait;

use crate::traits::{
    Publisher, QosSettings, Session, SessionMode, Subscriber, TopicInfo, Transport,
    TransportConfig, TransportError,
};

/// Zenoh transport backend
pub struct ZenohTransport;

impl Transport for ZenohTransport {
    type Session = ZenohSession;

    fn open(config: &TransportConfig) -> Result<Self::Session, TransportError> {
        ZenohSession::new(config)
    }
}

/// Zenoh session wrapping a `zenoh::Session`
pub struct ZenohSession {
    session: zenoh::Session,
}

impl ZenohSession {
    /// Open a new zenoh session with the given configuration
    ///
    /// Client mode requires a locator; peer mode uses zenoh's scouting.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut zconfig = zenoh::Config::default();

        match (&config.mode, config.locator) {
            (SessionMode::Client, Some(locator)) => {
                zconfig
                    .insert_json5("mode", "\"client\"")
                    .map_err(|_| TransportError::InvalidConfig)?;
                zconfig
                    .insert_json5("connect/endpoints", &format!("[\"{locator}\"]"))
                    .map_err(|_| TransportError::InvalidConfig)?;
            }
            (SessionMode::Client, None) => {
                return Err(TransportError::InvalidConfig);
            }
            (SessionMode::Peer, _) => {}
        }

        let session = zenoh::open(zconfig).wait().map_err(|e| {
            log::debug!("zenoh open failed: {e}");
            TransportError::ConnectionFailed
        })?;

        Ok(Self { session })
    }
}

impl Session for ZenohSession {
    type PublisherHandle = ZenohPublisher;
    type SubscriberHandle = ZenohSubscriber;

    fn create_publisher(
        &mut self,
        topic: &TopicInfo,
        qos: QosSettings,
    ) -> Result<Self::PublisherHandle, TransportError> {
        let key = topic.to_key();
        log::debug!("zenoh publisher keyexpr: {key}");

        let congestion = if qos.reliable {
            CongestionControl::Block
        } else {
            CongestionControl::Drop
        };

        let publisher = self
            .session
            .declare_publisher(key)
            .congestion_control(congestion)
            .wait()
            .map_err(|_| TransportError::PublisherCreationFailed)?;

        Ok(ZenohPublisher { publisher })
    }

    fn create_subscriber(
        &mut self,
        topic: &TopicInfo,
        _qos: QosSettings,
    ) -> Result<Self::SubscriberHandle, TransportError> {
        let key = topic.to_key_wildcard();
        log::debug!("zenoh subscriber keyexpr: {key}");

        let queue = Arc::new(Mutex::new(VecDeque::new()));
        let queue_clone = queue.clone();

        let subscriber = self
            .session
            .declare_subscriber(key)
            .callback(move |sample: zenoh::sample::Sample| {
                let payload = sample.payload().to_bytes().to_vec();
                let mut messages = queue_clone.lock().unwrap_or_else(|e| e.into_inner());
                messages.push_back(payload);
            })
            .wait()
            .map_err(|_| TransportError::SubscriberCreationFailed)?;

        Ok(ZenohSubscriber {
            _subscriber: subscriber,
            queue,
        })
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.session
            .close()
            .wait()
            .map_err(|_| TransportError::ConnectionFailed)
    }
}

/// Zenoh publisher handle
pub struct ZenohPublisher {
    publisher: zenoh::pubsub::Publisher<'static>,
}

impl Publisher for ZenohPublisher {
    fn publish_raw(&self, data: &[u8]) -> Result<(), TransportError> {
        self.publisher
            .put(data.to_vec())
            .wait()
            .map_err(|_| TransportError::PublishFailed)
    }
}

/// Zenoh subscriber handle
///
/// The callback stores payloads in a queue drained by `try_recv_raw`.
pub struct ZenohSubscriber {
    /// Keep the subscription alive
    _subscriber: zenoh::pubsub::Subscriber<()>,
    queue: Arc<Mutex<VecDeque<Vec<u8>>>>,
}

impl Subscriber for ZenohSubscriber {
    fn try_recv_raw(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError> {
        let payload = {
            let mut messages = self.queue.lock().unwrap_or_else(|e| e.into_inner());
            messages.pop_front()
        };
        match payload {
            Some(payload) => {
                if payload.len() > buf.len() {
                    return Err(TransportError::BufferTooSmall);
                }
                buf[..payload.len()].copy_from_slice(&payload);
                Ok(Some(payload.len()))
            }
            None => Ok(None),
        }
    }
}
