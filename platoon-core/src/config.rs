use crate::defaults;
use thiserror::Error;

/// Parameters of a platoon simulation.
///
/// A [`SimConfig`] can only be obtained through [`SimConfig::builder`] (or
/// [`Default`]) so every instance has been validated: rates are positive,
/// the platoon has at least one truck and at least one packet and one
/// trial are run.
///
/// ## Defaults
///
/// | Setting | Default |
/// |---------|---------|
/// | Inter-arrival rate | 2800 packets/ms |
/// | Service rate | 3000 packets/ms |
/// | Buffer capacity | 50 waiting packets |
/// | Propagation delay | 0.03ms |
/// | Packets | 10 000 |
/// | Stations | 15 |
/// | Trials | 100 |
/// | Decay | 0.999 per truck |
/// | Deadline | none |
///
/// ## Example
///
/// ```
/// use platoon_core::SimConfig;
///
/// let config = SimConfig::builder()
///     .set_packets(1_000)
///     .set_stations(5)
///     .set_trials(10)
///     .build()
///     .unwrap();
/// assert_eq!(config.stations(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    inter_arrival_rate: f64,
    service_rate: f64,
    buffer_capacity: usize,
    propagation_delay: f64,
    packets: usize,
    stations: usize,
    trials: usize,
    decay: f64,
    deadline: Option<f64>,
}

/// Builder for a [`SimConfig`].
///
/// Obtained via [`SimConfig::builder`]. Nothing is checked until
/// [`build`](SimConfigBuilder::build) is called.
#[derive(Debug, Clone)]
pub struct SimConfigBuilder {
    config: SimConfig,
}

/// Error returned when a [`SimConfig`] is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("inter-arrival rate must be strictly positive, got {0}")]
    InterArrivalRate(f64),
    #[error("service rate must be strictly positive, got {0}")]
    ServiceRate(f64),
    #[error("buffer capacity must be at least 1 waiting packet")]
    BufferCapacity,
    #[error("propagation delay must be a finite, non negative duration, got {0}")]
    PropagationDelay(f64),
    #[error("at least one packet must be sent")]
    Packets,
    #[error("the platoon must have at least one truck")]
    Stations,
    #[error("at least one trial must be run")]
    Trials,
    #[error("decay must be in (0.0, 1.0], got {0}")]
    Decay(f64),
    #[error("deadline must be strictly positive, got {0}")]
    Deadline(f64),
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            inter_arrival_rate: defaults::DEFAULT_INTER_ARRIVAL_RATE,
            service_rate: defaults::DEFAULT_SERVICE_RATE,
            buffer_capacity: defaults::DEFAULT_BUFFER_CAPACITY,
            propagation_delay: defaults::DEFAULT_PROPAGATION_DELAY,
            packets: defaults::DEFAULT_PACKETS,
            stations: defaults::DEFAULT_STATIONS,
            trials: defaults::DEFAULT_TRIALS,
            decay: defaults::DEFAULT_DECAY,
            deadline: None,
        }
    }
}

impl SimConfig {
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder {
            config: Self::default(),
        }
    }

    pub fn inter_arrival_rate(&self) -> f64 {
        self.inter_arrival_rate
    }

    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    pub fn propagation_delay(&self) -> f64 {
        self.propagation_delay
    }

    pub fn packets(&self) -> usize {
        self.packets
    }

    pub fn stations(&self) -> usize {
        self.stations
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.inter_arrival_rate) {
            return Err(ConfigError::InterArrivalRate(self.inter_arrival_rate));
        }
        if !is_positive(self.service_rate) {
            return Err(ConfigError::ServiceRate(self.service_rate));
        }
        if self.buffer_capacity == 0 {
            return Err(ConfigError::BufferCapacity);
        }
        if !self.propagation_delay.is_finite() || self.propagation_delay < 0.0 {
            return Err(ConfigError::PropagationDelay(self.propagation_delay));
        }
        if self.packets == 0 {
            return Err(ConfigError::Packets);
        }
        if self.stations == 0 {
            return Err(ConfigError::Stations);
        }
        if self.trials == 0 {
            return Err(ConfigError::Trials);
        }
        if !is_positive(self.decay) || self.decay > 1.0 {
            return Err(ConfigError::Decay(self.decay));
        }
        if let Some(deadline) = self.deadline
            && !is_positive(deadline)
        {
            return Err(ConfigError::Deadline(deadline));
        }
        Ok(())
    }
}

/// `false` for NaN
fn is_positive(value: f64) -> bool {
    value > 0.0
}

impl SimConfigBuilder {
    /// Set the rate of the inter-arrival jitter drawn at every truck.
    ///
    /// `f64::INFINITY` disables the jitter: packets are then only spaced
    /// by the propagation delay.
    pub fn set_inter_arrival_rate(mut self, rate: f64) -> Self {
        self.config.inter_arrival_rate = rate;
        self
    }

    /// Set the service rate of every truck.
    pub fn set_service_rate(mut self, rate: f64) -> Self {
        self.config.service_rate = rate;
        self
    }

    /// Set how many waiting packets a truck may hold before dropping.
    pub fn set_buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.buffer_capacity = capacity;
        self
    }

    pub fn set_propagation_delay(mut self, delay: f64) -> Self {
        self.config.propagation_delay = delay;
        self
    }

    pub fn set_packets(mut self, packets: usize) -> Self {
        self.config.packets = packets;
        self
    }

    /// Set the largest platoon length to evaluate.
    pub fn set_stations(mut self, stations: usize) -> Self {
        self.config.stations = stations;
        self
    }

    pub fn set_trials(mut self, trials: usize) -> Self {
        self.config.trials = trials;
        self
    }

    /// Set the per-truck relay degradation applied by the reliability
    /// evaluator.
    pub fn set_decay(mut self, decay: f64) -> Self {
        self.config.decay = decay;
        self
    }

    /// Count packets whose accumulated system time exceeds `deadline` as
    /// failed even when they were not dropped.
    pub fn set_deadline(mut self, deadline: f64) -> Self {
        self.config.deadline = Some(deadline);
        self
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] of the first rejected parameter.
    pub fn build(self) -> Result<SimConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = SimConfig::builder().build().unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.deadline(), None);
    }

    #[test]
    fn setters() {
        let config = SimConfig::builder()
            .set_inter_arrival_rate(1.0)
            .set_service_rate(2.0)
            .set_buffer_capacity(3)
            .set_propagation_delay(4.0)
            .set_packets(5)
            .set_stations(6)
            .set_trials(7)
            .set_decay(0.5)
            .set_deadline(8.0)
            .build()
            .unwrap();

        assert_eq!(config.inter_arrival_rate(), 1.0);
        assert_eq!(config.service_rate(), 2.0);
        assert_eq!(config.buffer_capacity(), 3);
        assert_eq!(config.propagation_delay(), 4.0);
        assert_eq!(config.packets(), 5);
        assert_eq!(config.stations(), 6);
        assert_eq!(config.trials(), 7);
        assert_eq!(config.decay(), 0.5);
        assert_eq!(config.deadline(), Some(8.0));
    }

    #[test]
    fn infinite_inter_arrival_rate_accepted() {
        assert!(
            SimConfig::builder()
                .set_inter_arrival_rate(f64::INFINITY)
                .build()
                .is_ok()
        );
    }

    #[test]
    fn rates_rejected() {
        for rate in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                SimConfig::builder().set_inter_arrival_rate(rate).build(),
                Err(ConfigError::InterArrivalRate(_))
            ));
            assert!(matches!(
                SimConfig::builder().set_service_rate(rate).build(),
                Err(ConfigError::ServiceRate(_))
            ));
        }
    }

    #[test]
    fn counts_rejected() {
        assert_eq!(
            SimConfig::builder().set_buffer_capacity(0).build(),
            Err(ConfigError::BufferCapacity)
        );
        assert_eq!(
            SimConfig::builder().set_packets(0).build(),
            Err(ConfigError::Packets)
        );
        assert_eq!(
            SimConfig::builder().set_stations(0).build(),
            Err(ConfigError::Stations)
        );
        assert_eq!(
            SimConfig::builder().set_trials(0).build(),
            Err(ConfigError::Trials)
        );
    }

    #[test]
    fn delay_rejected() {
        assert_eq!(
            SimConfig::builder().set_propagation_delay(-0.5).build(),
            Err(ConfigError::PropagationDelay(-0.5))
        );
        assert!(
            SimConfig::builder()
                .set_propagation_delay(f64::INFINITY)
                .build()
                .is_err()
        );
        assert!(SimConfig::builder().set_propagation_delay(0.0).build().is_ok());
    }

    #[test]
    fn decay_and_deadline_rejected() {
        assert!(SimConfig::builder().set_decay(0.0).build().is_err());
        assert!(SimConfig::builder().set_decay(1.5).build().is_err());
        assert!(SimConfig::builder().set_decay(1.0).build().is_ok());
        assert!(SimConfig::builder().set_deadline(0.0).build().is_err());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ConfigError::ServiceRate(-2.0).to_string(),
            "service rate must be strictly positive, got -2"
        );
        assert_eq!(
            ConfigError::Trials.to_string(),
            "at least one trial must be run"
        );
    }
}
