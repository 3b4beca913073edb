//! Context and initialization
//!
//! The [`Context`] holds shared initialization state and is the entry point
//! for creating nodes. Opening a node acquires the transport session; the
//! session lives inside the node and is released when the node drops, so no
//! process-global middleware state is left behind on any exit path.

use robot_status_transport::{Session, Transport, TransportConfig};

use crate::error::NodeError;
use crate::node::{Node, NodeConfig};

/// Initialization options for creating a Context
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Domain ID (None means use default of 0)
    domain_id: Option<u32>,
}

impl InitOptions {
    /// Create new initialization options with defaults
    pub fn new() -> Self {
        Self { domain_id: None }
    }

    /// Set the domain ID
    pub fn with_domain_id(mut self, domain_id: Option<u32>) -> Self {
        self.domain_id = domain_id;
        self
    }
}

/// Context for creating nodes
#[derive(Debug, Clone)]
pub struct Context {
    domain_id: u32,
}

impl Context {
    /// Create a new context with the given options
    pub fn new(options: InitOptions) -> Self {
        Self {
            domain_id: options.domain_id.unwrap_or(0),
        }
    }

    /// Create a context from environment variables
    ///
    /// Reads `ROS_DOMAIN_ID` if set, falling back to domain ID 0.
    pub fn from_env() -> Self {
        let domain_id = std::env::var("ROS_DOMAIN_ID")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        Self { domain_id }
    }

    /// Get the domain ID for this context
    pub fn domain_id(&self) -> u32 {
        self.domain_id
    }

    /// Create a node backed by the given transport
    ///
    /// Opens the transport session; failure is fatal
    /// ([`NodeError::SessionSetup`]) and no node is returned.
    pub fn create_node<T>(
        &self,
        config: NodeConfig,
        transport_config: &TransportConfig,
    ) -> Result<Node<T::Session>, NodeError>
    where
        T: Transport,
        T::Session: Session,
    {
        let session = T::open(transport_config).map_err(NodeError::SessionSetup)?;
        log::debug!(
            "node {}{} on domain {}",
            config.namespace,
            config.name,
            self.domain_id
        );
        Ok(Node::new(config, self.domain_id, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_options() {
        let options = InitOptions::new();
        assert_eq!(options.domain_id, None);

        let options = InitOptions::new().with_domain_id(Some(42));
        assert_eq!(options.domain_id, Some(42));
    }

    #[test]
    fn context_creation() {
        let context = Context::new(InitOptions::new());
        assert_eq!(context.domain_id(), 0);

        let context = Context::new(InitOptions::new().with_domain_id(Some(42)));
        assert_eq!(context.domain_id(), 42);
    }
}
