use platoon::{ParallelSimulation, SimConfig, Simulation};

fn config(trials: usize) -> SimConfig {
    SimConfig::builder()
        .set_packets(400)
        .set_stations(4)
        .set_trials(trials)
        .build()
        .unwrap()
}

#[test]
fn parallel_matches_sequential() {
    for workers in [1, 2, 3, 7, 16] {
        let mut parallel = ParallelSimulation::new(config(7));
        parallel.set_workers(workers).unwrap();
        parallel.set_seed(2024);

        let mut sequential = Simulation::new(config(7));
        sequential.set_seed(2024);

        assert_eq!(
            parallel.run().unwrap(),
            sequential.run(),
            "{workers} workers diverged from the sequential run"
        );
    }
}

#[test]
fn rows_in_trial_order() {
    let mut parallel = ParallelSimulation::new(config(5));
    parallel.set_workers(5).unwrap();
    let tables = parallel.run().unwrap();

    let simulation = parallel.simulation();
    for index in 0..5 {
        let mut trial = platoon::Trial::new(simulation.config());
        let outcome = trial.run(
            simulation.config(),
            index,
            &mut simulation.trial_source(index),
        );
        assert_eq!(
            tables.system_time.row(index),
            Some(outcome.system_time.as_slice())
        );
    }
}

#[test]
fn congested_platoon_loses_packets() {
    let config = SimConfig::builder()
        .set_inter_arrival_rate(3.0)
        .set_service_rate(2.0)
        .set_buffer_capacity(3)
        .set_packets(2_000)
        .set_stations(3)
        .set_trials(4)
        .set_decay(1.0)
        .build()
        .unwrap();
    let mut parallel = ParallelSimulation::new(config);
    parallel.set_workers(2).unwrap();
    let tables = parallel.run().unwrap();

    for row in tables.reliability.rows() {
        assert!(row.iter().all(|r| *r < 1.0), "{row:?}");
        assert!(row.windows(2).all(|w| w[1] <= w[0]), "{row:?}");
    }
}
