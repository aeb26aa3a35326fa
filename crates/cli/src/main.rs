// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! turnstile - counting-semaphore verification harness
//!
//! Runs one of two scenarios against every semaphore design and reports
//! the results: stress rows on stderr, fairness resumption lines on
//! stdout.

use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use turnstile_core::harness::{run_fairness, run_stress, FairnessConfig, StressConfig};
use turnstile_core::semaphore::SemaphoreKind;

/// Capacity used by both scenarios; effectively inexhaustible within one
/// run, so no unit is ever permanently starved by design.
const CAPACITY: usize = 1_000_000;
/// Both scenarios start with nothing available: every acquire is paid
/// for by a release.
const INITIAL: usize = 0;

#[derive(Parser)]
#[command(
    name = "turnstile",
    version,
    about = "Exercise three counting-semaphore designs under stress and fairness probes"
)]
struct Cli {
    /// Scenario to run: 1 = stress, 2 = fairness
    scenario: u32,

    /// Units that release in a loop (ignored by the fairness scenario)
    releasers: usize,

    /// Total unit count (stress), or the acquirer count (fairness)
    units: usize,

    /// Wall-clock window for the stress scenario
    #[arg(long, default_value = "1s", value_parser = humantime::parse_duration)]
    window: Duration,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.scenario {
        1 => stress(&cli).await,
        2 => fairness(&cli).await,
        other => anyhow::bail!("unknown scenario {other}: expected 1 (stress) or 2 (fairness)"),
    }
}

/// Stress every design and print one labeled ops row per design.
async fn stress(cli: &Cli) -> Result<()> {
    let config = StressConfig::new(cli.releasers, cli.units).with_window(cli.window);
    for kind in SemaphoreKind::ALL {
        tracing::info!(kind = kind.label(), "starting stress run");
        let sem = kind.build(CAPACITY, INITIAL);
        let report = run_stress(sem, &config).await?;
        eprintln!("{}", report.row(kind.label()));
    }
    Ok(())
}

/// Probe every design for fairness, printing resumptions as they occur.
async fn fairness(cli: &Cli) -> Result<()> {
    let config = FairnessConfig::new(cli.units);
    for kind in SemaphoreKind::ALL {
        tracing::info!(kind = kind.label(), "starting fairness run");
        let sem = kind.build(CAPACITY, INITIAL);
        println!("{}", kind.label());
        run_fairness(sem, &config, |unit| println!("unblocked: {unit}")).await?;
    }
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Keep the report rows clean: only warnings surface unless the
    // environment asks for more.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
