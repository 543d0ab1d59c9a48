use log::{debug, info};
use platoon_core::{SimConfig, Simulation, SimulationTables, Trial, TrialOutcome};
use std::{num::NonZeroUsize, ops::Range, thread};
use thiserror::Error;

/// Runs the trials of a [`Simulation`] on several worker threads.
///
/// The trials are split in contiguous ranges, one per worker. A worker
/// owns a private [`Trial`] that it resets between trials, and draws each
/// trial from [`Simulation::trial_source`]: nothing is shared between the
/// workers but the (read only) configuration.
#[derive(Debug, Clone)]
pub struct ParallelSimulation {
    simulation: Simulation,
    workers: NonZeroUsize,
}

/// Error returned when a [`ParallelSimulation`] cannot run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("at least one worker is required")]
    NoWorkers,
    /// A worker thread panicked while running its trials.
    ///
    /// Only produced when panics unwind: the workspace release profile
    /// sets `panic = "abort"`, where a panicking worker aborts the process
    /// before it can be joined.
    #[error("Worker {worker} (trials {trials:?}) panicked: {reason}")]
    WorkerPanicked {
        worker: usize,
        trials: Range<usize>,
        reason: String,
    },
}

impl ParallelSimulation {
    /// Create a parallel simulation using all the available cores.
    pub fn new(config: SimConfig) -> Self {
        let workers = thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
        Self {
            simulation: Simulation::new(config),
            workers,
        }
    }

    /// Set the number of worker threads.
    ///
    /// # Errors
    ///
    /// [`RunError::NoWorkers`] if `workers` is `0`.
    pub fn set_workers(&mut self, workers: usize) -> Result<(), RunError> {
        self.workers = NonZeroUsize::new(workers).ok_or(RunError::NoWorkers)?;
        Ok(())
    }

    pub fn workers(&self) -> usize {
        self.workers.get()
    }

    /// See [`Simulation::set_seed`].
    pub fn set_seed(&mut self, seed: u64) {
        self.simulation.set_seed(seed);
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// split `0..trials` in at most `workers` contiguous ranges
    fn partition(&self) -> Vec<Range<usize>> {
        let trials = self.simulation.config().trials();
        let chunk = trials.div_ceil(self.workers.get()).max(1);

        (0..trials)
            .step_by(chunk)
            .map(|start| start..(start + chunk).min(trials))
            .collect()
    }

    /// Run all the trials and collect the tables in trial order.
    ///
    /// # Errors
    ///
    /// [`RunError::WorkerPanicked`] if one of the workers panicked.
    pub fn run(&self) -> Result<SimulationTables, RunError> {
        let partition = self.partition();
        info!(
            "running {trials} trials on {workers} workers",
            trials = self.simulation.config().trials(),
            workers = partition.len(),
        );

        let simulation = &self.simulation;
        let results = thread::scope(|scope| {
            let handles = partition
                .iter()
                .cloned()
                .map(|trials| scope.spawn(move || run_trials(simulation, trials)))
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Vec<_>>()
        });

        let mut tables = SimulationTables::new(self.simulation.config());
        for (worker, (result, trials)) in results.into_iter().zip(partition).enumerate() {
            let outcomes = result.map_err(|panic| RunError::WorkerPanicked {
                worker,
                trials: trials.clone(),
                reason: panic_reason(panic.as_ref()),
            })?;
            debug!("worker {worker} completed trials {trials:?}");

            for outcome in outcomes {
                tables.record(outcome);
            }
        }

        Ok(tables)
    }
}

fn run_trials(simulation: &Simulation, trials: Range<usize>) -> Vec<TrialOutcome> {
    let config = simulation.config();
    let mut trial = Trial::new(config);

    trials
        .map(|index| trial.run(config, index, &mut simulation.trial_source(index)))
        .collect()
}

fn panic_reason(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(reason) = panic.downcast_ref::<&str>() {
        (*reason).to_owned()
    } else if let Some(reason) = panic.downcast_ref::<String>() {
        reason.clone()
    } else {
        "unknown".to_owned()
    }
}
