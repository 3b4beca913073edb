//! Command-line surface and channel-name derivation

use std::num::NonZeroU64;
use std::time::Duration;

use clap::Parser;

/// Time between status publications
pub const STATUS_PERIOD: Duration = Duration::from_millis(300);

/// Node name registered with the messaging context
pub const NODE_NAME: &str = "robot_status_pub";

/// Publish an incrementing status counter for a robot
///
/// Emits `0, 1, 2, …` on the robot's status topic every 300 ms, and the
/// sentinel `-1` as the final value before exiting.
#[derive(Debug, Parser)]
#[command(name = "robot-status-pub", version)]
pub struct Cli {
    /// Name of the robot (must be a valid topic-name segment)
    #[arg(default_value = "robot1", value_parser = parse_robot_name)]
    pub robot_name: String,

    /// Use the reliable delivery profile instead of best-effort
    #[arg(long)]
    pub reliable: bool,

    /// Exit after publishing this many status values
    #[arg(long, value_name = "COUNT")]
    pub end_after: Option<NonZeroU64>,
}

/// Derive the channel name for a robot
///
/// Best-effort channels carry a `_best_effort` suffix so a consumer can
/// tell the delivery semantics from the name alone.
pub fn status_topic_name(robot_name: &str, reliable: bool) -> String {
    if reliable {
        format!("{robot_name}_status")
    } else {
        format!("{robot_name}_status_best_effort")
    }
}

/// Validate a robot name as a topic-name segment
fn parse_robot_name(s: &str) -> Result<String, String> {
    let mut chars = s.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_alphabetic()
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(s.to_owned())
    } else {
        Err(format!(
            "'{s}' is not a valid topic-name segment (expected [A-Za-z][A-Za-z0-9_]*)"
        ))
    }
}
