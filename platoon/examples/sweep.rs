//! Sweep example: estimate the reliability and the mean system time of a
//! platoon for every length from 1 to `--stations` trucks.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --release --example sweep -p platoon -- --trials 100

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use platoon::{ParallelSimulation, SimConfig, Simulation, SimulationTables, defaults};

#[derive(Parser)]
struct Command {
    #[arg(long, default_value_t = defaults::DEFAULT_INTER_ARRIVAL_RATE)]
    inter_arrival_rate: f64,

    #[arg(long, default_value_t = defaults::DEFAULT_SERVICE_RATE)]
    service_rate: f64,

    #[arg(long, default_value_t = defaults::DEFAULT_BUFFER_CAPACITY)]
    buffer_capacity: usize,

    #[arg(long, default_value_t = defaults::DEFAULT_PROPAGATION_DELAY)]
    delay: f64,

    #[arg(long, default_value_t = defaults::DEFAULT_PACKETS)]
    packets: usize,

    #[arg(long, default_value_t = defaults::DEFAULT_STATIONS)]
    stations: usize,

    #[arg(long, default_value_t = defaults::DEFAULT_TRIALS)]
    trials: usize,

    /// count packets slower than this (ms) as failed
    #[arg(long)]
    deadline: Option<f64>,

    #[arg(long, default_value_t = defaults::DEFAULT_SEED)]
    seed: u64,

    /// run the trials on this many threads (no progress bar)
    #[arg(long)]
    workers: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cmd = Command::parse();

    let mut builder = SimConfig::builder()
        .set_inter_arrival_rate(cmd.inter_arrival_rate)
        .set_service_rate(cmd.service_rate)
        .set_buffer_capacity(cmd.buffer_capacity)
        .set_propagation_delay(cmd.delay)
        .set_packets(cmd.packets)
        .set_stations(cmd.stations)
        .set_trials(cmd.trials);
    if let Some(deadline) = cmd.deadline {
        builder = builder.set_deadline(deadline);
    }
    let config = builder.build()?;

    let tables = if let Some(workers) = cmd.workers {
        let mut simulation = ParallelSimulation::new(config);
        simulation.set_workers(workers)?;
        simulation.set_seed(cmd.seed);
        simulation.run()?
    } else {
        let mut simulation = Simulation::new(config);
        simulation.set_seed(cmd.seed);

        let pb = ProgressBar::new(cmd.trials as u64);
        let tables = simulation.run_with(|_| pb.inc(1));
        pb.finish_and_clear();
        tables
    };

    report(&tables);

    Ok(())
}

fn report(tables: &SimulationTables) {
    println!("first trial:");
    if let Some(row) = tables.reliability.row(0) {
        for (k, reliability) in row.iter().enumerate() {
            println!("  {} truck(s): {reliability:.6}", k + 1);
        }
    }

    println!("average over {} trials:", tables.reliability.num_rows());
    for (header, mean) in tables
        .reliability
        .headers()
        .iter()
        .zip(tables.reliability.column_means())
    {
        println!("  {header}: {mean:.6}");
    }

    let means = tables.system_time.column_means();
    let overall = means.iter().sum::<f64>() / means.len().max(1) as f64;
    println!("mean system time per packet: {overall:.6}ms");
}
