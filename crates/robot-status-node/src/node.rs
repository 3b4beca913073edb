//! Node implementation

use robot_status_serdes::Message;
use robot_status_transport::{Session, TopicInfo};

use crate::error::NodeError;
use crate::options::IntoPublisherOptions;
use crate::publisher::TopicPublisher;

/// Node configuration
#[derive(Debug, Clone)]
pub struct NodeConfig<'a> {
    /// Node name
    pub name: &'a str,
    /// Node namespace
    pub namespace: &'a str,
}

impl<'a> NodeConfig<'a> {
    /// Create a new node configuration
    pub const fn new(name: &'a str, namespace: &'a str) -> Self {
        Self { name, namespace }
    }
}

impl Default for NodeConfig<'_> {
    fn default() -> Self {
        Self::new("robot_status_node", "/")
    }
}

/// A node bound to an open transport session
///
/// The node owns the session for its whole lifetime; dropping the node
/// releases the session on every exit path, including unwinding.
pub struct Node<S: Session> {
    name: String,
    namespace: String,
    domain_id: u32,
    session: S,
}

impl<S: Session> Node<S> {
    pub(crate) fn new(config: NodeConfig, domain_id: u32, session: S) -> Self {
        Self {
            name: config.name.to_owned(),
            namespace: config.namespace.to_owned(),
            domain_id,
            session,
        }
    }

    /// Get the node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the node namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the domain ID
    pub fn domain_id(&self) -> u32 {
        self.domain_id
    }

    /// Get the fully qualified node name
    pub fn fully_qualified_name(&self) -> String {
        if self.namespace.ends_with('/') {
            format!("{}{}", self.namespace, self.name)
        } else {
            format!("{}/{}", self.namespace, self.name)
        }
    }

    /// Create a publisher bound to a topic
    ///
    /// Opens exactly one outbound channel with the derived key and the
    /// chosen QoS. Failure is fatal ([`NodeError::ChannelSetup`]).
    pub fn create_publisher<'a, M: Message>(
        &mut self,
        options: impl IntoPublisherOptions<'a>,
    ) -> Result<TopicPublisher<M, S::PublisherHandle>, NodeError> {
        let options = options.into_publisher_options();
        let topic = TopicInfo::new(options.topic, M::TYPE_NAME, M::TYPE_HASH)
            .with_domain(self.domain_id);

        let handle = self
            .session
            .create_publisher(&topic, options.qos)
            .map_err(|source| NodeError::ChannelSetup {
                topic: options.topic.to_owned(),
                source,
            })?;

        log::info!(
            "publisher created for topic {} ({})",
            options.topic,
            if options.qos.reliable {
                "reliable"
            } else {
                "best-effort"
            }
        );

        Ok(TopicPublisher::new(handle, options.topic.to_owned()))
    }

    /// Create a subscriber bound to a topic
    ///
    /// Exists for the symmetric half of the transport seam; the status
    /// publisher itself never subscribes, but tests do.
    pub fn create_subscriber<'a, M: Message>(
        &mut self,
        options: impl IntoPublisherOptions<'a>,
    ) -> Result<S::SubscriberHandle, NodeError> {
        let options = options.into_publisher_options();
        let topic = TopicInfo::new(options.topic, M::TYPE_NAME, M::TYPE_HASH)
            .with_domain(self.domain_id);

        self.session
            .create_subscriber(&topic, options.qos)
            .map_err(|source| NodeError::ChannelSetup {
                topic: options.topic.to_owned(),
                source,
            })
    }
}

impl<S: Session> Drop for Node<S> {
    fn drop(&mut self) {
        if let Err(e) = self.session.close() {
            log::debug!("session close failed: {e}");
        }
    }
}
