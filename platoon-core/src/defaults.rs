//! Default parameters of a platoon simulation.
//!
//! Time is expressed in milliseconds and rates in packets per millisecond.
//! These are the values used by [`SimConfig::default`].
//!
//! [`SimConfig::default`]: crate::SimConfig

/// Default inter-arrival rate (packets per millisecond)
///
/// The mean inter-arrival jitter is `1 / DEFAULT_INTER_ARRIVAL_RATE`.
///
/// ```
/// # use platoon_core::defaults::*;
/// assert_eq!(DEFAULT_INTER_ARRIVAL_RATE, 2_800.0);
/// ```
pub const DEFAULT_INTER_ARRIVAL_RATE: f64 = 2_800.0;

/// Default service rate (packets per millisecond)
///
/// The mean service time of a truck is `1 / DEFAULT_SERVICE_RATE`.
pub const DEFAULT_SERVICE_RATE: f64 = 3_000.0;

/// Default buffer capacity of a truck
///
/// This is the number of *waiting* packets a truck may hold before it
/// starts dropping new arrivals. Packets that are served immediately do
/// not count against it.
pub const DEFAULT_BUFFER_CAPACITY: usize = 50;

/// Default propagation delay between two trucks (milliseconds)
pub const DEFAULT_PROPAGATION_DELAY: f64 = 0.03;

/// Default number of packets sent through the platoon in one trial
pub const DEFAULT_PACKETS: usize = 10_000;

/// Default number of trucks in the platoon
///
/// Reliability is measured for every platoon length from `1` up to
/// this value.
pub const DEFAULT_STATIONS: usize = 15;

/// Default number of independent trials
pub const DEFAULT_TRIALS: usize = 100;

/// Default per-truck relay degradation
///
/// ```
/// # use platoon_core::defaults::*;
/// assert!(DEFAULT_DECAY < 1.0);
/// ```
pub const DEFAULT_DECAY: f64 = 0.999;

/// Default seed of the first trial
///
/// Trial `i` is seeded with `DEFAULT_SEED + i`.
pub const DEFAULT_SEED: u64 = 0;
