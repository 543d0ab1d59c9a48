/*!
# Platoon core

Deterministic primitives to estimate the reliability of a truck platoon
relaying packets, modelled as a tandem of finite buffer single server
queues.

* [`Packet`]: a unit of traffic and its timings, mutated by every truck;
* [`Station`]: a truck, computing arrival, waiting, service and departure
  of every packet and dropping arrivals when its buffer is full;
* [`ReliabilityModel`]: the discounted fraction of packets still alive;
* [`Trial`] and [`Simulation`]: reset, run the trucks `1..=K` recording
  the reliability after each, collect the system times, repeat.

All the randomness of a trial comes from a single [`VariateSource`] so
that a seeded simulation is reproducible.

```
use platoon_core::{SimConfig, Simulation};

let config = SimConfig::builder()
    .set_packets(1_000)
    .set_stations(4)
    .set_trials(3)
    .build()?;
let tables = Simulation::new(config).run();

for (k, mean) in tables.reliability.column_means().into_iter().enumerate() {
    println!("{} truck(s): {mean:.4}", k + 1);
}
# Ok::<(), platoon_core::ConfigError>(())
```
*/

mod config;
pub mod defaults;
mod packet;
mod reliability;
pub mod station;
pub mod stats;
mod table;
pub mod trial;
mod variate;

pub use self::{
    config::{ConfigError, SimConfig, SimConfigBuilder},
    packet::Packet,
    reliability::ReliabilityModel,
    station::{Station, StationId},
    stats::StationStats,
    table::{SimulationTables, Table},
    trial::{Simulation, Trial, TrialOutcome, TrialPhase},
    variate::{Exponential, Fixed, VariateSource},
};
