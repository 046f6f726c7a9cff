//! Headless load
//!
//! Runs a [`LoadSession`] to completion against the demo host without a
//! window. Each poll is followed by a simulated render pass, so every node
//! settles on the poll after it was created.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use node_pack_core::{Canvas, NodeTypeRegistry};
use node_pack_sidebar::{LoadProgress, LoadReport, LoadSession, SettlePolicy};

use crate::config::LoaderConfig;
use crate::host::{DemoCanvas, DemoGraph};

/// Load `category` into `graph` and frame it on `canvas`.
pub fn run_load(
    registry: &dyn NodeTypeRegistry,
    graph: &mut DemoGraph,
    canvas: &mut DemoCanvas,
    category: &str,
    columns: u32,
    config: &LoaderConfig,
) -> Result<LoadReport> {
    // Time is frozen, so the delay must be zero and the timeout must not fire
    let policy = SettlePolicy {
        delay: Duration::ZERO,
        max_wait: Duration::MAX,
    };
    let mut session =
        LoadSession::start(Some(category), registry, columns, config.layout, policy)?;

    let now = Instant::now();
    let (_, total) = session.progress();
    // One poll per node plus the final one
    for _ in 0..=total + 1 {
        match session.poll(now, registry, graph, Some(&mut *canvas as &mut dyn Canvas)) {
            LoadProgress::Finished(report) => return Ok(report),
            LoadProgress::Pending => {
                graph.settle_pending();
            }
        }
    }

    bail!("load of '{category}' did not settle after {} polls", total + 2)
}
