mod id;
mod pending;

pub use self::{
    id::StationId,
    pending::{Pending, PendingList},
};
use crate::{SimConfig, packet::Packet, stats::StationStats, variate::VariateSource};

/// A truck of the platoon: a single server queue with a finite buffer.
///
/// The truck only holds its configuration. All the state of a pass lives
/// in the packets it is given (and in a [`PendingList`] local to the
/// pass), so the same [`Station`] can be used for any number of trials.
///
/// # Processing
///
/// Packets are processed in sequence order, which is their arrival order
/// at the truck:
///
/// 1. a packet already lost upstream is ignored;
/// 2. it arrives one inter-arrival draw plus the propagation delay after
///    the previous packet the truck admitted (the first packet of the
///    sequence arrives after the propagation delay only, shifted by one
///    inter-arrival draw if it went through another truck already, a
///    draw that is not added to its system time);
/// 3. packets in the buffer that completed their wait by then are evicted;
/// 4. if the buffer is full the packet is lost;
/// 5. otherwise it waits for the previous admitted packet to depart, is
///    served, and enters the buffer if it had to wait.
///
/// The first packet of the sequence is always admitted.
///
/// # Example
///
/// ```
/// use platoon_core::{Exponential, Packet, SimConfig, Station, StationId};
///
/// let config = SimConfig::default();
/// let truck = Station::new(StationId::FIRST, &config);
///
/// let mut packets = vec![Packet::new(); 100];
/// let stats = truck.process(&mut packets, &mut Exponential::seeded(1));
/// assert_eq!(stats.admitted + stats.dropped, 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    id: StationId,
    inter_arrival_rate: f64,
    service_rate: f64,
    buffer_capacity: usize,
    propagation_delay: f64,
}

/// arrival and departure of the last packet the truck admitted
#[derive(Debug, Clone, Copy)]
struct Previous {
    arrival: f64,
    departure: f64,
}

impl Station {
    pub fn new(id: StationId, config: &SimConfig) -> Self {
        Self {
            id,
            inter_arrival_rate: config.inter_arrival_rate(),
            service_rate: config.service_rate(),
            buffer_capacity: config.buffer_capacity(),
            propagation_delay: config.propagation_delay(),
        }
    }

    /// Override the buffer capacity of this truck.
    ///
    /// A capacity of `0` is accepted here: every packet but the first one
    /// is then dropped.
    pub fn set_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    pub fn propagation_delay(&self) -> f64 {
        self.propagation_delay
    }

    /// Run the packets through the truck.
    ///
    /// Each alive packet's timings are overwritten with the ones at this
    /// truck and its system time is increased by the time spent getting
    /// here and through the truck. Packets dropped by this truck are
    /// marked lost and keep the departure time of the last admitted
    /// packet.
    pub fn process<V>(&self, packets: &mut [Packet], source: &mut V) -> StationStats
    where
        V: VariateSource + ?Sized,
    {
        let mut stats = StationStats::new(self.id);
        let mut pending = PendingList::new(self.buffer_capacity);
        let delay = self.propagation_delay;

        let Some((first, rest)) = packets.split_first_mut() else {
            return stats;
        };

        debug_assert!(first.is_alive(), "the first packet is never dropped");
        // jitter only shifts the first packet's arrival, it is not part of
        // its inter-arrival or system time
        let jitter = if first.hops() == 0 {
            0.0
        } else {
            source.exponential(self.inter_arrival_rate)
        };
        first.arrive(0.0, jitter + delay, delay);
        first.admit(source.exponential(self.service_rate), 0.0, delay);
        stats.admitted += 1;

        let mut previous = Previous {
            arrival: first.arrival_time(),
            departure: first.departure_time(),
        };

        for (index, packet) in rest.iter_mut().enumerate() {
            if !packet.is_alive() {
                stats.skipped += 1;
                continue;
            }

            let inter_arrival = source.exponential(self.inter_arrival_rate);
            let arrival = previous.arrival + inter_arrival + delay;
            packet.arrive(inter_arrival, arrival, delay);

            pending.evict_completed(arrival);
            if pending.is_full() {
                packet.drop_at(self.id, previous.departure);
                stats.dropped += 1;
                continue;
            }

            let service = source.exponential(self.service_rate);
            let waiting = (previous.departure - arrival).max(0.0);
            packet.admit(service, waiting, delay);
            stats.admitted += 1;

            if waiting > 0.0 {
                // `rest` starts at the second packet of the sequence
                pending.push(index + 1, packet.completes_at());
            }

            previous = Previous {
                arrival: packet.arrival_time(),
                departure: packet.departure_time(),
            };
        }

        stats.peak_pending = pending.peak();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variate::{Exponential, Fixed};

    fn config(inter_arrival_rate: f64, service_rate: f64, delay: f64, capacity: usize) -> SimConfig {
        SimConfig::builder()
            .set_inter_arrival_rate(inter_arrival_rate)
            .set_service_rate(service_rate)
            .set_propagation_delay(delay)
            .set_buffer_capacity(capacity)
            .build()
            .unwrap()
    }

    fn packets(n: usize) -> Vec<Packet> {
        vec![Packet::new(); n]
    }

    #[test]
    fn empty_sequence() {
        let truck = Station::new(StationId::FIRST, &SimConfig::default());
        let stats = truck.process(&mut [], &mut Fixed);
        assert_eq!(stats, StationStats::new(StationId::FIRST));
    }

    #[test]
    fn first_packet_no_jitter_on_first_truck() {
        let config = config(4.0, 8.0, 0.5, 10);
        let mut packets = packets(1);

        Station::new(StationId::FIRST, &config).process(&mut packets, &mut Fixed);
        assert_eq!(packets[0].arrival_time(), 0.5);
        assert_eq!(packets[0].inter_arrival_time(), 0.0);
        assert_eq!(packets[0].departure_time(), 0.625);

        Station::new(StationId::new(2), &config).process(&mut packets, &mut Fixed);
        assert_eq!(packets[0].arrival_time(), 0.75);
        assert_eq!(packets[0].inter_arrival_time(), 0.0);
        assert_eq!(packets[0].departure_time(), 0.875);
        // the jitter moved the arrival but is not accounted as time in the system
        assert_eq!(packets[0].system_time(), (0.125 + 0.5) + (0.125 + 0.5));
    }

    #[test]
    fn arithmetic_progression() {
        // jitter 0.25, delay 0.5, service 0.125: nobody waits
        let config = config(4.0, 8.0, 0.5, 10);
        let mut packets = packets(20);

        let stats = Station::new(StationId::FIRST, &config).process(&mut packets, &mut Fixed);

        assert_eq!(stats.admitted, 20);
        assert_eq!(stats.peak_pending, 0);
        for (i, packet) in packets.iter().enumerate() {
            assert_eq!(packet.arrival_time(), 0.5 + i as f64 * 0.75);
            assert_eq!(packet.waiting_time(), 0.0);
            assert_eq!(packet.send_time(), i as f64 * 0.75);
        }
    }

    #[test]
    fn zero_capacity_drops_all_but_first() {
        let config = config(4.0, 8.0, 0.5, 10);
        let mut packets = packets(50);

        let truck = Station::new(StationId::FIRST, &config).set_buffer_capacity(0);
        let stats = truck.process(&mut packets, &mut Exponential::seeded(3));

        assert_eq!(stats.admitted, 1);
        assert_eq!(stats.dropped, 49);
        assert!(packets[0].is_alive());
        assert!(packets[1..].iter().all(|p| !p.is_alive()));
        assert!(
            packets[1..]
                .iter()
                .all(|p| p.lost_at() == Some(StationId::FIRST))
        );

        // the next truck only sees the first packet
        let truck = Station::new(StationId::new(2), &config).set_buffer_capacity(0);
        let stats = truck.process(&mut packets, &mut Exponential::seeded(4));
        assert_eq!(stats.admitted, 1);
        assert_eq!(stats.dropped, 0);
        assert_eq!(stats.skipped, 49);
    }

    /// jitter 0.25, no delay, service 1.0 and a single buffer slot: the
    /// second packet waits, the third finds the buffer full. Lost packets
    /// do not move the arrival reference so every later packet arrives at
    /// the same time and is lost as well.
    #[test]
    fn lost_packets_keep_previous_reference() {
        let config = config(4.0, 1.0, 0.0, 1);
        let mut packets = packets(6);

        let stats = Station::new(StationId::FIRST, &config).process(&mut packets, &mut Fixed);

        assert_eq!(stats.admitted, 2);
        assert_eq!(stats.dropped, 4);
        assert_eq!(stats.peak_pending, 1);

        assert_eq!(packets[1].arrival_time(), 0.25);
        assert_eq!(packets[1].waiting_time(), 0.75);
        assert_eq!(packets[1].departure_time(), 2.0);

        for packet in &packets[2..] {
            assert!(!packet.is_alive());
            assert_eq!(packet.arrival_time(), 0.5);
            assert_eq!(packet.departure_time(), 2.0);
            assert_eq!(packet.system_time(), 0.0);
        }
    }

    #[test]
    fn lost_packets_are_frozen() {
        let config = config(4.0, 1.0, 0.0, 1);
        let mut packets = packets(6);
        Station::new(StationId::FIRST, &config).process(&mut packets, &mut Fixed);
        let lost = packets[2..].to_vec();

        let stats = Station::new(StationId::new(2), &config)
            .set_buffer_capacity(100)
            .process(&mut packets, &mut Exponential::seeded(1));

        assert_eq!(stats.skipped, 4);
        assert_eq!(stats.admitted, 2);
        assert_eq!(&packets[2..], lost.as_slice());
    }

    #[test]
    fn single_server_recurrence() {
        let n = 2_000;
        let config = config(1.0, 1.2, 0.1, n);
        let mut packets = packets(n);

        let stats =
            Station::new(StationId::FIRST, &config).process(&mut packets, &mut Exponential::seeded(5));

        assert_eq!(stats.dropped, 0);
        assert!(packets.iter().all(Packet::is_alive));
        for pair in packets.windows(2) {
            let (previous, packet) = (&pair[0], &pair[1]);
            let waiting = (previous.departure_time() - packet.arrival_time()).max(0.0);
            assert_eq!(packet.waiting_time(), waiting);
            assert_eq!(
                packet.departure_time(),
                packet.arrival_time() + packet.waiting_time() + packet.service_time()
            );
        }
    }

    #[test]
    fn timings_are_consistent_under_load() {
        // arrivals faster than the service: the buffer saturates
        let config = config(3.0, 2.0, 0.01, 5);
        let mut packets = packets(5_000);
        let mut source = Exponential::seeded(11);

        for id in 1..=4 {
            let truck = Station::new(StationId::new(id), &config);
            let before = packets.iter().map(Packet::system_time).collect::<Vec<_>>();
            let lost_before = packets.iter().map(|p| !p.is_alive()).collect::<Vec<_>>();

            let stats = truck.process(&mut packets, &mut source);
            assert!(stats.peak_pending <= truck.buffer_capacity());
            assert_eq!(stats.admitted + stats.dropped + stats.skipped, packets.len());
            if id == 1 {
                // downstream trucks may see too few survivors to saturate
                assert!(stats.dropped > 0);
            }

            for (i, packet) in packets.iter().enumerate() {
                assert!(packet.waiting_time() >= 0.0);
                assert!(packet.system_time() >= before[i]);
                if lost_before[i] {
                    assert!(!packet.is_alive(), "a lost packet stays lost");
                }
                // lost packets take the departure of a packet still ahead of them
                assert!(packet.departure_time() >= packet.arrival_time());
            }
        }
    }

    #[test]
    fn infinite_jitter_rate() {
        let config = config(f64::INFINITY, 8.0, 0.5, 10);
        let mut packets = packets(4);
        Station::new(StationId::FIRST, &config).process(&mut packets, &mut Exponential::seeded(0));

        for (i, packet) in packets.iter().enumerate() {
            assert_eq!(packet.inter_arrival_time(), 0.0);
            assert_eq!(packet.arrival_time(), 0.5 * (i + 1) as f64);
        }
    }
}
