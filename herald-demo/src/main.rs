use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use herald_demo::{Host, Timing};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "herald-demo")]
#[command(bin_name = "herald-demo")]
#[command(version, about, long_about = None)]
struct Opts {
    /// Number of simulated VMs
    #[arg(long, default_value_t = 10)]
    vms: u32,

    /// Simulated boot time per VM, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 200)]
    boot_delay_ms: u64,

    /// Pause between two units of VM work, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 300)]
    work_interval_ms: u64,

    /// Time the host waits after each broadcast, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1_000)]
    settle_ms: u64,

    /// Units of work each VM performs before it stops
    #[arg(long, default_value_t = 3)]
    rounds: usize,

    /// Command to broadcast to every VM (repeatable)
    #[arg(long = "command", value_name = "TEXT", default_values_t = [
        "Do maintenance".to_string(),
        "Take backup".to_string(),
    ])]
    commands: Vec<String>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

impl Opts {
    fn timing(&self) -> Timing {
        Timing {
            boot_delay: Duration::from_millis(self.boot_delay_ms),
            work_interval: Duration::from_millis(self.work_interval_ms),
            settle: Duration::from_millis(self.settle_ms),
            ..Timing::default()
        }
    }
}

fn configure_tracing(verbose: &Verbosity<InfoLevel>) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(verbose.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_thread_names(true))
        .with(filter)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    configure_tracing(&opts.verbose)?;

    let host = Host::new(opts.vms, opts.timing()).with_rounds(opts.rounds);
    info!(vms = opts.vms, rounds = opts.rounds, "host starting");

    let summary = host.run(&opts.commands).context("host run failed")?;

    info!(
        booted = summary.booted,
        lines = summary.data().count(),
        "all {} vms shut down",
        summary.vms
    );

    Ok(())
}
