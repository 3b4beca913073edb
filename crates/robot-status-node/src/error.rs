//! Node error types

use robot_status_transport::TransportError;
use thiserror::Error;

/// Error type for node operations
///
/// Setup errors (`SessionSetup`, `ChannelSetup`) are fatal at startup and
/// abort before the emission loop runs. `Publish` errors occur after startup
/// and callers decide whether to surface them.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Failed to open the transport session
    #[error("failed to open transport session: {0}")]
    SessionSetup(#[source] TransportError),

    /// Failed to create the outbound channel
    #[error("failed to create publisher on {topic}: {source}")]
    ChannelSetup {
        topic: String,
        #[source]
        source: TransportError,
    },

    /// Failed to publish a message
    #[error("failed to publish: {0}")]
    Publish(#[source] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_setup_names_the_topic() {
        let err = NodeError::ChannelSetup {
            topic: "robot1_status".into(),
            source: TransportError::PublisherCreationFailed,
        };
        assert!(err.to_string().contains("robot1_status"));
    }
}
