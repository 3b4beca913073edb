//! Transport abstraction for robot-status
//!
//! Defines the transport seam (sessions, publishers, subscribers, QoS) and
//! provides two backends:
//!
//! - [`LoopbackTransport`] — an in-process bus, always available. Used by
//!   the test suite and by binaries built without a middleware backend.
//! - `ZenohTransport` — a zenoh-backed session (feature `zenoh`) for
//!   publishing over a real router or in peer mode.

pub mod loopback;
pub mod traits;

#[cfg(feature = "zenoh")]
pub mod zenoh;

pub use loopback::{LoopbackPublisher, LoopbackSession, LoopbackSubscriber, LoopbackTransport};
pub use traits::{
    Publisher, QosSettings, Session, SessionMode, Subscriber, TopicInfo, Transport,
    TransportConfig, TransportError,
};

#[cfg(feature = "zenoh")]
pub use crate::zenoh::{ZenohPublisher, ZenohSession, ZenohSubscriber, ZenohTransport};
