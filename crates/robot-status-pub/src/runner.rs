//! The timed emission loop

use std::io::{self, Write};
use std::num::NonZeroU64;
use std::time::Duration;

use robot_status_msgs::{Int64, STATUS_SENTINEL};
use robot_status_node::TopicPublisher;
use robot_status_transport::Publisher;

use crate::interrupt::ShutdownToken;

/// Loop configuration, immutable once the loop starts
pub struct RunConfig {
    /// Exit normally after this many non-sentinel publications
    pub end_after: Option<NonZeroU64>,
    /// Fixed inter-publish interval
    pub period: Duration,
}

/// How the emission loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The `end_after` limit was reached; exit normally
    Completed,
    /// An interrupt arrived during the wait; exit through the interrupt path
    Interrupted,
}

/// Publish one status value and echo it to `out`, flushed immediately
///
/// Post-startup publish failures are fire-and-forget telemetry: logged at
/// warn level, never fatal, and they do not perturb the counter sequence.
fn publish_status<P: Publisher>(
    publisher: &TopicPublisher<Int64, P>,
    out: &mut impl Write,
    value: i64,
) -> io::Result<()> {
    if let Err(e) = publisher.publish(&Int64 { data: value }) {
        log::warn!("publish failed: {e}");
    }
    writeln!(out, "Publishing: \"{value}\"")?;
    out.flush()
}

/// Drive the emission loop until completion or interrupt
///
/// Each iteration publishes the current counter value, increments, then
/// waits one period. An interrupt observed during the wait publishes the
/// sentinel and returns [`Outcome::Interrupted`]; reaching `end_after`
/// (checked after the wait) publishes the sentinel and returns
/// [`Outcome::Completed`]. Either way the sentinel is the last value sent.
pub fn run<P: Publisher>(
    publisher: &TopicPublisher<Int64, P>,
    config: &RunConfig,
    shutdown: &ShutdownToken,
    out: &mut impl Write,
) -> io::Result<Outcome> {
    // Counted in u64 so the end_after comparison never truncates; the wire
    // value only wraps after 2^63 publications.
    let mut cycle_count: u64 = 0;

    loop {
        publish_status(publisher, out, cycle_count as i64)?;
        cycle_count += 1;

        if shutdown.wait_timeout(config.period) {
            publish_status(publisher, out, STATUS_SENTINEL)?;
            return Ok(Outcome::Interrupted);
        }

        if let Some(end_after) = config.end_after {
            if cycle_count >= end_after.get() {
                publish_status(publisher, out, STATUS_SENTINEL)?;
                return Ok(Outcome::Completed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robot_status_node::{Context, InitOptions, NodeConfig, PublisherOptions, QosSettings};
    use robot_status_transport::{LoopbackTransport, Subscriber, TransportConfig};

    fn short_config(end_after: Option<u64>) -> RunConfig {
        RunConfig {
            end_after: end_after.and_then(NonZeroU64::new),
            period: Duration::from_millis(5),
        }
    }

    /// Loopback node with a capture subscriber on the given topic
    fn capture_harness(
        topic: &str,
    ) -> (
        TopicPublisher<Int64, robot_status_transport::LoopbackPublisher>,
        robot_status_transport::LoopbackSubscriber,
    ) {
        let mut node = Context::new(InitOptions::new())
            .create_node::<LoopbackTransport>(
                NodeConfig::new("robot_status_pub", "/"),
                &TransportConfig::default(),
            )
            .unwrap();
        let sub = node
            .create_subscriber::<Int64>(
                PublisherOptions::new(topic).with_qos(QosSettings::RELIABLE),
            )
            .unwrap();
        let publisher = node.create_publisher::<Int64>(topic).unwrap();
        // The node (and its session) can drop; loopback handles keep the
        // bus alive through their own references.
        (publisher, sub)
    }

    fn drain(sub: &mut robot_status_transport::LoopbackSubscriber) -> Vec<i64> {
        let mut buf = [0u8; 64];
        let mut values = Vec::new();
        while let Some(msg) = sub.try_recv::<Int64>(&mut buf).unwrap() {
            values.push(msg.data);
        }
        values
    }

    #[test]
    fn bounded_run_publishes_sequence_then_sentinel() {
        let (publisher, mut sub) = capture_harness("robot1_status_best_effort");
        let shutdown = ShutdownToken::new();
        let mut out = Vec::new();

        let outcome = run(&publisher, &short_config(Some(3)), &shutdown, &mut out).unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(drain(&mut sub), vec![0, 1, 2, -1]);

        let echoed: Vec<String> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect();
        assert_eq!(
            echoed,
            vec![
                "Publishing: \"0\"",
                "Publishing: \"1\"",
                "Publishing: \"2\"",
                "Publishing: \"-1\"",
            ]
        );
    }

    #[test]
    fn first_published_value_is_zero() {
        let (publisher, mut sub) = capture_harness("robot1_status_best_effort");
        let shutdown = ShutdownToken::new();
        let mut out = Vec::new();

        run(&publisher, &short_config(Some(1)), &shutdown, &mut out).unwrap();
        assert_eq!(drain(&mut sub).first(), Some(&0));
    }

    #[test]
    fn interrupt_before_first_wait_yields_single_value_and_sentinel() {
        let (publisher, mut sub) = capture_harness("robot1_status_best_effort");
        let shutdown = ShutdownToken::new();
        shutdown.trigger();
        let mut out = Vec::new();

        let outcome = run(&publisher, &short_config(None), &shutdown, &mut out).unwrap();

        assert_eq!(outcome, Outcome::Interrupted);
        assert_eq!(drain(&mut sub), vec![0, -1]);
    }

    #[test]
    fn end_after_beyond_i64_range_does_not_end_the_run_early() {
        let (publisher, mut sub) = capture_harness("robot1_status_best_effort");
        let shutdown = ShutdownToken::new();
        let trigger = shutdown.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(60));
            trigger.trigger();
        });

        let mut out = Vec::new();
        let config = RunConfig {
            end_after: NonZeroU64::new(u64::MAX),
            period: Duration::from_millis(10),
        };
        let outcome = run(&publisher, &config, &shutdown, &mut out).unwrap();
        handle.join().unwrap();

        // The bound is nowhere near reached, so only the interrupt ends
        // the run, after more than one counter value.
        assert_eq!(outcome, Outcome::Interrupted);
        let values = drain(&mut sub);
        assert!(values.len() > 2, "run ended early: {values:?}");
        assert_eq!(*values.last().unwrap(), -1);
    }

    #[test]
    fn interrupt_mid_run_ends_with_sentinel() {
        let (publisher, mut sub) = capture_harness("robot1_status_best_effort");
        let shutdown = ShutdownToken::new();
        let trigger = shutdown.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(60));
            trigger.trigger();
        });

        let mut out = Vec::new();
        let config = RunConfig {
            end_after: None,
            period: Duration::from_millis(20),
        };
        let outcome = run(&publisher, &config, &shutdown, &mut out).unwrap();
        handle.join().unwrap();

        assert_eq!(outcome, Outcome::Interrupted);
        let values = drain(&mut sub);
        assert!(values.len() >= 2);
        assert_eq!(*values.last().unwrap(), -1);
        for (i, value) in values[..values.len() - 1].iter().enumerate() {
            assert_eq!(*value, i as i64);
        }
    }
}
