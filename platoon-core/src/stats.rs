//! Per-truck and per-trial statistics.
//!
//! [`StationStats`] is returned by [`Station::process`] and collected in
//! the [`TrialOutcome`] of every trial.
//!
//! [`Station::process`]: crate::station::Station::process
//! [`TrialOutcome`]: crate::trial::TrialOutcome

use crate::station::StationId;

/// Snapshot of what a single truck did during one pass over the packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationStats {
    /// The truck's identifier.
    pub station: StationId,
    /// Packets served by the truck.
    pub admitted: usize,
    /// Packets dropped by the truck because its buffer was full.
    pub dropped: usize,
    /// Packets already lost upstream, ignored by the truck.
    pub skipped: usize,
    /// Largest number of packets waiting in the buffer at once.
    pub peak_pending: usize,
}

impl StationStats {
    pub(crate) fn new(station: StationId) -> Self {
        Self {
            station,
            admitted: 0,
            dropped: 0,
            skipped: 0,
            peak_pending: 0,
        }
    }

    /// fraction of the packets reaching the truck that were dropped
    pub fn drop_rate(&self) -> f64 {
        let reached = self.admitted + self.dropped;
        if reached == 0 {
            0.0
        } else {
            self.dropped as f64 / reached as f64
        }
    }
}
