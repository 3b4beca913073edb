//! Publisher options with fluent API

use robot_status_transport::QosSettings;

/// Options for creating a publisher
///
/// # Examples
///
/// ```ignore
/// // Use string directly (uses default best-effort QoS)
/// let publisher = node.create_publisher::<Int64>("robot1_status")?;
///
/// // Use fluent builder
/// let publisher = node.create_publisher::<Int64>(
///     PublisherOptions::new("robot1_status").reliable(),
/// )?;
/// ```
#[derive(Debug, Clone)]
pub struct PublisherOptions<'a> {
    /// Topic name
    pub topic: &'a str,
    /// QoS settings
    pub qos: QosSettings,
}

impl<'a> PublisherOptions<'a> {
    /// Create new publisher options with the given topic and default QoS
    pub fn new(topic: &'a str) -> Self {
        Self {
            topic,
            qos: QosSettings::default(),
        }
    }

    /// Replace the QoS settings wholesale
    pub const fn with_qos(mut self, qos: QosSettings) -> Self {
        self.qos = qos;
        self
    }

    /// Set reliability to reliable
    pub const fn reliable(mut self) -> Self {
        self.qos = self.qos.reliable();
        self
    }

    /// Set reliability to best-effort
    pub const fn best_effort(mut self) -> Self {
        self.qos = self.qos.best_effort();
        self
    }
}

/// Trait for types that can be converted into PublisherOptions
pub trait IntoPublisherOptions<'a> {
    /// Convert into PublisherOptions
    fn into_publisher_options(self) -> PublisherOptions<'a>;
}

impl<'a> IntoPublisherOptions<'a> for &'a str {
    fn into_publisher_options(self) -> PublisherOptions<'a> {
        PublisherOptions::new(self)
    }
}

impl<'a> IntoPublisherOptions<'a> for PublisherOptions<'a> {
    fn into_publisher_options(self) -> PublisherOptions<'a> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_converts_to_default_options() {
        let options = "robot1_status".into_publisher_options();
        assert_eq!(options.topic, "robot1_status");
        assert!(!options.qos.reliable);
    }

    #[test]
    fn fluent_reliability() {
        let options = PublisherOptions::new("unitA_status").reliable();
        assert!(options.qos.reliable);
        assert!(!options.best_effort().qos.reliable);
    }
}
