use std::collections::VecDeque;

/// An entry of the [`PendingList`]: a packet waiting in a truck's buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pending {
    /// index of the packet in the trial's packet sequence
    pub packet: usize,
    /// time at which the packet leaves the buffer and enters service
    pub completes_at: f64,
}

/// The packets currently occupying a truck's buffer.
///
/// Only packets that had to wait are tracked: a packet served on arrival
/// never occupies the buffer. Entries are kept in admission order and
/// their completion times are non-decreasing (a waiting packet enters
/// service when the previous one departs), so the most recent entry is
/// always the last one to leave.
///
/// Eviction works from the most recent end: entries are removed while
/// they have completed by the given time, and the scan stops at the first
/// entry still waiting. Older entries behind it are kept even if they
/// have completed; they are only removed once every more recent entry has
/// cleared.
#[derive(Debug, Clone)]
pub struct PendingList {
    entries: VecDeque<Pending>,
    capacity: usize,
    peak: usize,
}

impl PendingList {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            peak: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// largest number of entries held at once
    pub fn peak(&self) -> usize {
        self.peak
    }

    /// no new packet can be admitted
    ///
    /// A `0` capacity is always full.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pending> {
        self.entries.iter()
    }

    /// remove the entries that completed at or before `time`
    ///
    /// returns the number of evicted entries
    pub fn evict_completed(&mut self, time: f64) -> usize {
        let mut evicted = 0;
        while let Some(last) = self.entries.back() {
            if last.completes_at > time {
                break;
            }
            self.entries.pop_back();
            evicted += 1;
        }
        evicted
    }

    /// track a packet that has to wait before being served
    pub fn push(&mut self, packet: usize, completes_at: f64) {
        debug_assert!(!self.is_full(), "pushing to a full pending list");
        debug_assert!(
            self.entries
                .back()
                .is_none_or(|last| last.completes_at <= completes_at),
            "completion times must be non decreasing"
        );

        self.entries.push_back(Pending {
            packet,
            completes_at,
        });
        self.peak = self.peak.max(self.entries.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_full() {
        let list = PendingList::new(0);
        assert!(list.is_full());
        assert!(list.is_empty());
    }

    #[test]
    fn fills_up() {
        let mut list = PendingList::new(2);
        list.push(1, 1.0);
        assert!(!list.is_full());
        list.push(2, 2.0);
        assert!(list.is_full());
        assert_eq!(list.peak(), 2);
    }

    #[test]
    fn evict_until_empty() {
        let mut list = PendingList::new(3);
        list.push(1, 1.0);
        list.push(2, 2.0);
        list.push(3, 3.0);

        assert_eq!(list.evict_completed(10.0), 3);
        assert!(list.is_empty());
        assert_eq!(list.evict_completed(10.0), 0);
        assert_eq!(list.peak(), 3);
    }

    #[test]
    fn evict_inclusive() {
        let mut list = PendingList::new(3);
        list.push(1, 1.0);
        list.push(2, 2.0);

        assert_eq!(list.evict_completed(2.0), 2);
        assert!(list.is_empty());
    }

    #[test]
    fn evict_stops_at_waiting_entry() {
        let mut list = PendingList::new(3);
        list.push(1, 1.0);
        list.push(2, 5.0);

        // the first entry has completed but the most recent one has not
        assert_eq!(list.evict_completed(3.0), 0);
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.iter().map(|p| p.packet).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }
}
