//! Royalty Analogy — One Expression, Stage by Stage
//!
//! Evaluates `king - queen + prince` over the built-in royalty set and
//! prints every stage of the reveal as the wall clock drives it.
//!
//! Run: cargo run --example royalty
//! Verbose: RUST_LOG=vectorscope=debug cargo run --example royalty

use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vectorscope::{datasets, Expression, Visualizer, VisualizerConfig, WallClock};

fn main() -> vectorscope::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Shorter interval than the on-screen default so the demo finishes quickly
    let config = VisualizerConfig {
        interval_ms: 300,
        ..VisualizerConfig::default()
    };
    let mut vis = Visualizer::new(datasets::royalty(), config, WallClock::new())?;

    vis.on_stage_change(|update| {
        if !update.running && update.revealed_result.is_some() {
            println!("done at stage {}", update.stage);
            return;
        }
        let r = &update.reveal;
        println!(
            "stage {} | arrow:{} base:{} moved:{} result:{} neighbors:{}",
            update.stage,
            r.direction_arrow as u8,
            r.base_marker as u8,
            r.transformed_arrow as u8,
            r.result_marker as u8,
            r.neighbors as u8,
        );
        if let (Some(op), true) = (&update.revealed_result, r.result_marker) {
            println!("        result = {:?}", op.result_vector.data());
        }
        for n in &update.revealed_neighbors {
            println!(
                "        +{:>4}ms  {}. {} ({:.4})",
                n.delay.as_millis(),
                n.entry.rank,
                n.entry.word,
                n.entry.distance
            );
        }
    });

    let expr: Expression = "king - queen + prince".parse()?;
    println!("{}", expr);
    vis.submit(&expr)?;

    while vis.state().running {
        let wait = vis.until_next().unwrap_or(Duration::from_millis(10));
        thread::sleep(wait);
        vis.poll()?;
    }

    Ok(())
}
