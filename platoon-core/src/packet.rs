use crate::station::StationId;

/// # A packet travelling through the platoon
///
/// A [`Packet`] is created zeroed and alive at the start of every trial
/// and is then mutated in place by each truck, in platoon order. The
/// timing fields (`inter_arrival_time`, `arrival_time`, `service_time`,
/// `waiting_time` and `departure_time`) describe the packet at the last
/// truck that handled it and are overwritten at every truck. The
/// `system_time` accumulates over the whole journey and never decreases.
///
/// Once a truck drops the packet it is frozen: no other truck will touch
/// it again during the trial.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Packet {
    lost_at: Option<StationId>,
    hops: u32,

    inter_arrival_time: f64,
    arrival_time: f64,
    service_time: f64,
    waiting_time: f64,
    departure_time: f64,

    send_time: f64,
    system_time: f64,
}

impl Packet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `false` once a truck dropped the packet
    pub fn is_alive(&self) -> bool {
        self.lost_at.is_none()
    }

    /// the truck that dropped the packet, if any
    pub fn lost_at(&self) -> Option<StationId> {
        self.lost_at
    }

    /// number of trucks that served the packet so far
    pub fn hops(&self) -> u32 {
        self.hops
    }

    pub fn inter_arrival_time(&self) -> f64 {
        self.inter_arrival_time
    }

    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    pub fn waiting_time(&self) -> f64 {
        self.waiting_time
    }

    pub fn departure_time(&self) -> f64 {
        self.departure_time
    }

    /// time the packet left the sender, set on the first truck
    pub fn send_time(&self) -> f64 {
        self.send_time
    }

    /// total time spent in the platoon so far
    pub fn system_time(&self) -> f64 {
        self.system_time
    }

    /// time at which the packet stops occupying a truck's buffer
    pub(crate) fn completes_at(&self) -> f64 {
        self.arrival_time + self.waiting_time
    }

    /// record the arrival at a new truck
    ///
    /// On the very first truck this also fixes the send time.
    pub(crate) fn arrive(&mut self, inter_arrival_time: f64, arrival_time: f64, delay: f64) {
        self.inter_arrival_time = inter_arrival_time;
        self.arrival_time = arrival_time;
        if self.hops == 0 {
            self.send_time = arrival_time - delay;
        }
    }

    /// the truck admitted the packet, complete the timings and accumulate
    /// the time spent in the system
    pub(crate) fn admit(&mut self, service_time: f64, waiting_time: f64, delay: f64) {
        debug_assert!(waiting_time >= 0.0);
        debug_assert!(service_time >= 0.0);

        self.service_time = service_time;
        self.waiting_time = waiting_time;
        self.departure_time = self.arrival_time + waiting_time + service_time;
        self.system_time += service_time + waiting_time + delay + self.inter_arrival_time;
        self.hops += 1;
    }

    /// the truck's buffer is full, the packet is lost
    ///
    /// The departure time is set to `departure_time`, the departure of the
    /// last packet the truck admitted.
    pub(crate) fn drop_at(&mut self, station: StationId, departure_time: f64) {
        debug_assert!(self.is_alive(), "a packet can only be lost once");

        self.departure_time = departure_time;
        self.lost_at = Some(station);
    }
}
