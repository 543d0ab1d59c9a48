use crate::{SimConfig, packet::Packet};

/// Reliability of a platoon.
///
/// The reliability after `k` trucks is the fraction of the packets still
/// alive, discounted by the relay degradation of the trucks:
///
/// ```text
/// reliability(k) = alive / packets * decay^k * decay^(k - 1)
/// ```
///
/// The alive flags accumulate the drops of every truck processed so far
/// in the trial. Optionally, a packet that is alive but spent more than
/// the `deadline` in the platoon is counted as failed too.
///
/// # Example
///
/// ```
/// use platoon_core::{Packet, ReliabilityModel};
///
/// let model = ReliabilityModel::new(0.5);
/// let packets = vec![Packet::new(); 4];
/// assert_eq!(model.evaluate(&packets, 2), 0.125);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReliabilityModel {
    decay: f64,
    deadline: Option<f64>,
}

impl ReliabilityModel {
    pub fn new(decay: f64) -> Self {
        Self {
            decay,
            deadline: None,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            decay: config.decay(),
            deadline: config.deadline(),
        }
    }

    pub fn with_deadline(mut self, deadline: f64) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// discount applied to a platoon of `stations` trucks
    pub fn discount(&self, stations: usize) -> f64 {
        let exponent = |n: usize| i32::try_from(n).unwrap_or(i32::MAX);
        let current = self.decay.powi(exponent(stations));
        let previous = self.decay.powi(exponent(stations.saturating_sub(1)));
        current * previous
    }

    fn delivered(&self, packet: &Packet) -> bool {
        packet.is_alive()
            && self
                .deadline
                .is_none_or(|deadline| packet.system_time() <= deadline)
    }

    /// Evaluate the reliability of `packets` after `stations` trucks.
    ///
    /// Returns a value in `[0, 1]`; an empty set of packets has a
    /// reliability of `0`.
    pub fn evaluate(&self, packets: &[Packet], stations: usize) -> f64 {
        if packets.is_empty() {
            return 0.0;
        }

        let delivered = packets.iter().filter(|p| self.delivered(p)).count();
        let fraction = delivered as f64 / packets.len() as f64;

        fraction * self.discount(stations)
    }
}
