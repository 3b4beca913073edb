//! Node layer for robot-status
//!
//! Provides the scoped messaging [`Context`], [`Node`] bound to a transport
//! session, and typed [`TopicPublisher`] handles.
//!
//! # Example
//!
//! ```ignore
//! use robot_status_node::{Context, InitOptions, NodeConfig, PublisherOptions};
//! use robot_status_transport::{LoopbackTransport, TransportConfig};
//!
//! let context = Context::from_env()?;
//! let mut node = context.create_node::<LoopbackTransport>(
//!     NodeConfig::new("robot_status_pub", "/"),
//!     &TransportConfig::default(),
//! )?;
//! let publisher = node.create_publisher::<Int64>(
//!     PublisherOptions::new("robot1_status").reliable(),
//! )?;
//! publisher.publish(&Int64 { data: 0 })?;
//! ```
//!
//! The session opened by the context is owned by the node and released when
//! the node drops, on every exit path.

mod context;
mod error;
mod node;
mod options;
mod publisher;

pub use context::{Context, InitOptions};
pub use error::NodeError;
pub use node::{Node, NodeConfig};
pub use options::{IntoPublisherOptions, PublisherOptions};
pub use publisher::TopicPublisher;

// Re-export transport types for convenience
pub use robot_status_transport::{QosSettings, SessionMode, TopicInfo, TransportConfig};
