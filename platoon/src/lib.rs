/*!
# Platoon

Monte Carlo estimation of the reliability of a truck platoon.

This crate re-exports [`platoon_core`] and adds [`ParallelSimulation`],
running the trials of a simulation on several threads. Each thread owns
its own [`Trial`] and every trial keeps the random source it would have
had in a sequential [`Simulation`], so both produce the same tables.

```
use platoon::{ParallelSimulation, SimConfig, Simulation};

let config = SimConfig::builder()
    .set_packets(300)
    .set_stations(3)
    .set_trials(8)
    .build()?;

let mut parallel = ParallelSimulation::new(config.clone());
parallel.set_workers(4)?;

let tables = parallel.run()?;
assert_eq!(tables, Simulation::new(config).run());
# Ok::<(), anyhow::Error>(())
```
*/

mod parallel;

// convenient re-export of `platoon_core` core objects
pub use platoon_core::{
    ConfigError, Exponential, Fixed, Packet, ReliabilityModel, SimConfig, SimConfigBuilder,
    Simulation, SimulationTables, Station, StationId, StationStats, Table, Trial, TrialOutcome,
    TrialPhase, VariateSource, defaults,
};

pub use self::parallel::{ParallelSimulation, RunError};
