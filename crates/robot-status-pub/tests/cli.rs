//! End-to-end tests driving the robot-status-pub binary
//!
//! These spawn the built binary and assert on the stdout echo, timing, and
//! exit codes — the externally observable contract.

use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

fn status_pub() -> Command {
    Command::new(env!("CARGO_BIN_EXE_robot-status-pub"))
}

/// Extract published values from the stdout echo lines
fn published_values(stdout: &[u8]) -> Vec<i64> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| {
            line.strip_prefix("Publishing: \"")?
                .strip_suffix('"')?
                .parse()
                .ok()
        })
        .collect()
}

#[test]
fn bounded_run_publishes_sequence_and_exits_zero() {
    let output = status_pub()
        .args(["robot1", "--end-after", "3"])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success(), "status: {:?}", output.status);
    assert_eq!(published_values(&output.stdout), vec![0, 1, 2, -1]);
}

#[test]
fn reliable_profile_run() {
    let output = status_pub()
        .args(["unitA", "--reliable", "--end-after", "1"])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    assert_eq!(published_values(&output.stdout), vec![0, -1]);
}

#[test]
fn inter_publish_spacing_is_at_least_the_period() {
    let start = Instant::now();
    let output = status_pub()
        .args(["--end-after", "2"])
        .output()
        .expect("failed to run binary");
    let elapsed = start.elapsed();

    assert!(output.status.success());
    // Two publications means two 300 ms waits before the sentinel
    assert!(
        elapsed >= Duration::from_millis(550),
        "finished too quickly: {elapsed:?}"
    );
}

#[test]
fn invalid_robot_name_is_rejected() {
    let output = status_pub()
        .args(["has space", "--end-after", "1"])
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
    assert!(published_values(&output.stdout).is_empty());
}

#[test]
fn end_after_zero_is_rejected() {
    let output = status_pub()
        .args(["--end-after", "0"])
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
}

#[cfg(unix)]
#[test]
fn sigint_publishes_sentinel_and_exits_nonzero() {
    let mut child = status_pub()
        .arg("robot1")
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    // Let a couple of publications happen, then interrupt
    std::thread::sleep(Duration::from_millis(700));
    unsafe {
        libc::kill(child.id() as libc::pid_t, libc::SIGINT);
    }

    let output = child.wait_with_output().expect("failed to wait for binary");

    assert!(!output.status.success());
    let values = published_values(&output.stdout);
    assert!(values.len() >= 2, "expected publications, got {values:?}");
    assert_eq!(*values.last().unwrap(), -1);
    for (i, value) in values[..values.len() - 1].iter().enumerate() {
        assert_eq!(*value, i as i64, "counter sequence broken: {values:?}");
    }
}
