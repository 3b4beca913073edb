//! robot-status-pub
//!
//! Publishes an incrementing heartbeat counter on a robot's status topic
//! every 300 ms, ending the stream with the sentinel `-1` on shutdown.
//!
//! Without a middleware backend enabled the publisher runs on the
//! in-process loopback bus; build with `--features zenoh` to publish over
//! zenoh (router at `tcp/127.0.0.1:7447`, falling back to peer mode).
//!
//! ```bash
//! robot-status-pub robot1 --end-after 3      # publishes 0, 1, 2, -1
//! robot-status-pub unitA --reliable          # reliable profile, Ctrl-C to stop
//! RUST_LOG=debug robot-status-pub            # with key-derivation logging
//! ```

mod cli;
mod interrupt;
mod runner;

use std::error::Error;
use std::io::{self, Write};
use std::process;

use clap::Parser;
use robot_status_msgs::Int64;
use robot_status_node::{
    Context, Node, NodeConfig, NodeError, PublisherOptions, QosSettings, TransportConfig,
};

use crate::cli::{status_topic_name, Cli, NODE_NAME, STATUS_PERIOD};
use crate::interrupt::{ShutdownToken, EXIT_INTERRUPTED};
use crate::runner::{Outcome, RunConfig};

#[cfg(feature = "zenoh")]
const DEFAULT_LOCATOR: &str = "tcp/127.0.0.1:7447";

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let shutdown = ShutdownToken::new();
    if let Err(e) = interrupt::install(&shutdown) {
        log::error!("failed to install interrupt handler: {e}");
        process::exit(1);
    }

    match run(&cli, &shutdown) {
        Ok(Outcome::Completed) => {}
        Ok(Outcome::Interrupted) => process::exit(EXIT_INTERRUPTED),
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    }
}

fn run(cli: &Cli, shutdown: &ShutdownToken) -> Result<Outcome, Box<dyn Error>> {
    let qos = if cli.reliable {
        log::info!("Reliable publisher");
        QosSettings::RELIABLE
    } else {
        log::info!("Best effort publisher");
        QosSettings::BEST_EFFORT
    };
    let topic = status_topic_name(&cli.robot_name, cli.reliable);

    let context = Context::from_env();
    let mut node = open_node(&context)?;

    let publisher = node.create_publisher::<Int64>(PublisherOptions::new(&topic).with_qos(qos))?;

    let config = RunConfig {
        end_after: cli.end_after,
        period: STATUS_PERIOD,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = runner::run(&publisher, &config, shutdown, &mut out)?;
    out.flush()?;

    Ok(outcome)
}

/// Open the node over the zenoh backend: local router first, then peer mode
#[cfg(feature = "zenoh")]
fn open_node(
    context: &Context,
) -> Result<Node<robot_status_transport::ZenohSession>, NodeError> {
    use robot_status_node::SessionMode;
    use robot_status_transport::ZenohTransport;

    let client = TransportConfig {
        locator: Some(DEFAULT_LOCATOR),
        mode: SessionMode::Client,
    };
    match context.create_node::<ZenohTransport>(NodeConfig::new(NODE_NAME, "/"), &client) {
        Ok(node) => Ok(node),
        Err(e) => {
            log::warn!("router connection failed ({e}); trying peer mode");
            let peer = TransportConfig {
                locator: None,
                mode: SessionMode::Peer,
            };
            context.create_node::<ZenohTransport>(NodeConfig::new(NODE_NAME, "/"), &peer)
        }
    }
}

/// Open the node over the in-process loopback bus
#[cfg(not(feature = "zenoh"))]
fn open_node(
    context: &Context,
) -> Result<Node<robot_status_transport::LoopbackSession>, NodeError> {
    use robot_status_transport::LoopbackTransport;

    log::info!("no middleware backend enabled; publishing on the in-process loopback bus");
    context.create_node::<LoopbackTransport>(
        NodeConfig::new(NODE_NAME, "/"),
        &TransportConfig::default(),
    )
}
