use crate::{
    SimConfig,
    packet::Packet,
    reliability::ReliabilityModel,
    station::{Station, StationId},
    stats::StationStats,
    table::{SimulationTables, Table},
    variate::{Exponential, VariateSource},
};
use log::{debug, trace};

/// Where a [`Trial`] is in its life cycle.
///
/// ```text
/// Reset -> Processing(1) -> .. -> Processing(K) -> Recorded -> Reset -> ..
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialPhase {
    /// fresh packets and trucks, nothing processed yet
    Reset,
    /// the given truck was the last one processed
    Processing(StationId),
    /// every truck was processed and the system times were collected
    Recorded,
}

/// The state of one trial: the packets and the trucks of the platoon.
///
/// A [`Trial`] exclusively owns its packets and trucks. [`Trial::reset`]
/// discards everything a previous trial left behind, so the same
/// allocation can be reused trial after trial without any state leaking
/// from one to the next.
#[derive(Debug)]
pub struct Trial {
    packets: Vec<Packet>,
    stations: Vec<Station>,
    reliability_model: ReliabilityModel,
    reliability: Vec<f64>,
    station_stats: Vec<StationStats>,
    phase: TrialPhase,
}

/// Everything recorded during one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    /// position of the trial in the simulation, from `0`
    pub index: usize,
    /// `reliability[k - 1]`: reliability after `k` trucks
    pub reliability: Vec<f64>,
    /// `system_time[i]`: system time of packet `i` after the last truck
    pub system_time: Vec<f64>,
    /// what every truck did, in platoon order
    pub stations: Vec<StationStats>,
}

/// Monte Carlo driver: runs independent trials and collects the tables.
///
/// Every trial draws from its own [`Exponential`] source seeded with
/// `seed + trial`, so a given trial can be replayed in isolation and the
/// result of a simulation only depends on the configuration and the seed.
///
/// # Example
///
/// ```
/// use platoon_core::{SimConfig, Simulation};
///
/// let config = SimConfig::builder()
///     .set_packets(200)
///     .set_stations(3)
///     .set_trials(4)
///     .build()
///     .unwrap();
/// let mut simulation = Simulation::new(config);
/// simulation.set_seed(42);
///
/// let tables = simulation.run();
/// assert_eq!(tables.reliability.num_rows(), 4);
/// assert_eq!(tables.system_time.num_columns(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    seed: u64,
}

impl Trial {
    pub fn new(config: &SimConfig) -> Self {
        let mut trial = Self {
            packets: Vec::with_capacity(config.packets()),
            stations: Vec::with_capacity(config.stations()),
            reliability_model: ReliabilityModel::from_config(config),
            reliability: Vec::with_capacity(config.stations()),
            station_stats: Vec::with_capacity(config.stations()),
            phase: TrialPhase::Reset,
        };
        trial.reset(config);
        trial
    }

    /// Re-create every packet and truck from the configuration.
    pub fn reset(&mut self, config: &SimConfig) {
        self.packets.clear();
        self.packets.resize_with(config.packets(), Packet::new);

        self.stations.clear();
        let mut id = StationId::FIRST;
        for _ in 0..config.stations() {
            self.stations.push(Station::new(id, config));
            id = id.next();
        }

        self.reliability_model = ReliabilityModel::from_config(config);
        self.reliability.clear();
        self.station_stats.clear();
        self.phase = TrialPhase::Reset;
    }

    pub fn phase(&self) -> TrialPhase {
        self.phase
    }

    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// reliability recorded so far, one value per processed truck
    pub fn reliability(&self) -> &[f64] {
        &self.reliability
    }

    /// Run the packets through the next truck of the platoon and record
    /// the reliability of the platoon so far.
    ///
    /// Returns `None` once every truck has been processed.
    pub fn process_next_station<V>(&mut self, source: &mut V) -> Option<StationStats>
    where
        V: VariateSource + ?Sized,
    {
        let next = match self.phase {
            TrialPhase::Reset => 0,
            TrialPhase::Processing(id) => id.platoon_len(),
            TrialPhase::Recorded => return None,
        };
        let station = self.stations.get(next)?;

        let stats = station.process(&mut self.packets, source);
        let reliability = self
            .reliability_model
            .evaluate(&self.packets, station.id().platoon_len());
        trace!(
            "{id}: admitted {admitted}, dropped {dropped}, peak buffer {peak}, reliability {reliability:.6}",
            id = stats.station,
            admitted = stats.admitted,
            dropped = stats.dropped,
            peak = stats.peak_pending,
        );

        self.reliability.push(reliability);
        self.station_stats.push(stats);
        self.phase = TrialPhase::Processing(station.id());

        Some(stats)
    }

    /// Collect the final system time of every packet.
    ///
    /// Trucks that were not processed yet are processed first.
    pub fn record<V>(&mut self, index: usize, source: &mut V) -> TrialOutcome
    where
        V: VariateSource + ?Sized,
    {
        while self.process_next_station(source).is_some() {}
        self.phase = TrialPhase::Recorded;

        TrialOutcome {
            index,
            reliability: self.reliability.clone(),
            system_time: self.packets.iter().map(Packet::system_time).collect(),
            stations: self.station_stats.clone(),
        }
    }

    /// Reset the trial and run it from the first to the last truck.
    pub fn run<V>(&mut self, config: &SimConfig, index: usize, source: &mut V) -> TrialOutcome
    where
        V: VariateSource + ?Sized,
    {
        self.reset(config);
        let outcome = self.record(index, source);

        debug!(
            "trial {index}: {alive}/{total} packets delivered, reliability {reliability:.6}",
            alive = self.packets.iter().filter(|p| p.is_alive()).count(),
            total = self.packets.len(),
            reliability = outcome.reliability.last().copied().unwrap_or_default(),
        );

        outcome
    }
}

impl TrialOutcome {
    /// packets dropped by all the trucks of the trial
    pub fn dropped(&self) -> usize {
        self.stations.iter().map(|stats| stats.dropped).sum()
    }
}

impl SimulationTables {
    /// empty tables with the headers for `config`
    pub fn new(config: &SimConfig) -> Self {
        Self {
            reliability: Table::reliability(config.stations()),
            system_time: Table::system_time(config.packets()),
        }
    }

    /// append the rows of a trial
    pub fn record(&mut self, outcome: TrialOutcome) {
        self.reliability.push_row(outcome.reliability);
        self.system_time.push_row(outcome.system_time);
    }
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            seed: crate::defaults::DEFAULT_SEED,
        }
    }

    /// Set the seed of the first trial.
    ///
    /// Trial `i` is seeded with `seed + i`. Running the same simulation
    /// twice with the same seed produces identical tables.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// the random source of the given trial
    pub fn trial_source(&self, trial: usize) -> Exponential {
        Exponential::seeded(self.seed.wrapping_add(trial as u64))
    }

    /// Run all the trials.
    pub fn run(&self) -> SimulationTables {
        self.run_with(|_| ())
    }

    /// Run all the trials, calling `on_trial` after each one.
    pub fn run_with<F>(&self, on_trial: F) -> SimulationTables
    where
        F: FnMut(&TrialOutcome),
    {
        self.run_sources(|trial| self.trial_source(trial), on_trial)
    }

    /// Run all the trials with the random source returned by `sources`
    /// for each trial.
    pub fn run_sources<V, S, F>(&self, mut sources: S, mut on_trial: F) -> SimulationTables
    where
        V: VariateSource,
        S: FnMut(usize) -> V,
        F: FnMut(&TrialOutcome),
    {
        let mut tables = SimulationTables::new(&self.config);
        let mut trial = Trial::new(&self.config);

        for index in 0..self.config.trials() {
            let mut source = sources(index);
            let outcome = trial.run(&self.config, index, &mut source);
            on_trial(&outcome);
            tables.record(outcome);
        }

        tables
    }
}
