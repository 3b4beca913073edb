//! Loopback transport backend
//!
//! An in-process bus that fans published payloads out to subscriber queues.
//! This backend is always available: the test suite uses it to capture
//! published sequences, and binaries built without a middleware backend use
//! it so the emission loop runs with real transport plumbing underneath.
//!
//! Publishers and subscribers match when they share a domain, topic name,
//! and type name; the type hash is ignored, mirroring the wildcard key a
//! subscriber would use on a real middleware.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::traits::{
    Publisher, QosSettings, Session, Subscriber, TopicInfo, Transport, TransportConfig,
    TransportError,
};

/// Match key for pub/sub pairing: `<domain_id>/<topic>/<type_name>`
fn match_key(topic: &TopicInfo) -> String {
    format!(
        "{}/{}/{}",
        topic.domain_id,
        topic.name.trim_matches('/'),
        topic.type_name
    )
}

/// Queue shared between the bus and one subscriber
struct TopicQueue {
    messages: Mutex<VecDeque<Vec<u8>>>,
}

impl TopicQueue {
    fn new() -> Self {
        Self {
            messages: Mutex::new(VecDeque::new()),
        }
    }

    fn push(&self, payload: &[u8]) {
        let mut messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());
        messages.push_back(payload.to_vec());
    }

    fn pop(&self) -> Option<Vec<u8>> {
        let mut messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());
        messages.pop_front()
    }
}

/// The in-process bus: subscriber queues keyed by match key
struct LoopbackBus {
    subscribers: Mutex<Vec<(String, Arc<TopicQueue>)>>,
}

impl LoopbackBus {
    fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    fn register(&self, key: String) -> Arc<TopicQueue> {
        let queue = Arc::new(TopicQueue::new());
        let mut subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subscribers.push((key, queue.clone()));
        queue
    }

    fn dispatch(&self, key: &str, payload: &[u8]) {
        let subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        for (sub_key, queue) in subscribers.iter() {
            if sub_key == key {
                queue.push(payload);
            }
        }
    }
}

/// Loopback transport backend
pub struct LoopbackTransport;

impl Transport for LoopbackTransport {
    type Session = LoopbackSession;

    fn open(_config: &TransportConfig) -> Result<Self::Session, TransportError> {
        Ok(LoopbackSession {
            bus: Arc::new(LoopbackBus::new()),
        })
    }
}

/// Loopback session holding the shared bus
///
/// All publishers and subscribers created from one session share the bus.
pub struct LoopbackSession {
    bus: Arc<LoopbackBus>,
}

impl Session for LoopbackSession {
    type PublisherHandle = LoopbackPublisher;
    type SubscriberHandle = LoopbackSubscriber;

    fn create_publisher(
        &mut self,
        topic: &TopicInfo,
        _qos: QosSettings,
    ) -> Result<Self::PublisherHandle, TransportError> {
        let key = match_key(topic);
        log::debug!("loopback publisher keyexpr: {}", topic.to_key());
        Ok(LoopbackPublisher {
            bus: self.bus.clone(),
            key,
        })
    }

    fn create_subscriber(
        &mut self,
        topic: &TopicInfo,
        _qos: QosSettings,
    ) -> Result<Self::SubscriberHandle, TransportError> {
        let key = match_key(topic);
        log::debug!("loopback subscriber keyexpr: {}", topic.to_key_wildcard());
        let queue = self.bus.register(key);
        Ok(LoopbackSubscriber { queue })
    }

    fn close(&mut self) -> Result<(), TransportError> {
        // Remaining queues are dropped with their subscribers
        Ok(())
    }
}

/// Loopback publisher handle
pub struct LoopbackPublisher {
    bus: Arc<LoopbackBus>,
    key: String,
}

impl Publisher for LoopbackPublisher {
    fn publish_raw(&self, data: &[u8]) -> Result<(), TransportError> {
        self.bus.dispatch(&self.key, data);
        Ok(())
    }
}

/// Loopback subscriber handle
pub struct LoopbackSubscriber {
    queue: Arc<TopicQueue>,
}

impl Subscriber for LoopbackSubscriber {
    fn try_recv_raw(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError> {
        match self.queue.pop() {
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
