//! Simple example: a small platoon with the default truck parameters.
//!
//! Run with:
//!   cargo run --example simple -p platoon

use anyhow::Result;
use platoon::{SimConfig, Simulation};

fn main() -> Result<()> {
    let config = SimConfig::builder()
        .set_packets(1_000)
        .set_stations(5)
        .set_trials(10)
        .build()?;

    let tables = Simulation::new(config).run();

    println!("{}", tables.reliability);
    for (header, mean) in tables
        .reliability
        .headers()
        .iter()
        .zip(tables.reliability.column_means())
    {
        println!("{header}: {mean:.6}");
    }

    Ok(())
}
