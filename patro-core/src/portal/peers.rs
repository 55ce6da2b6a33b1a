//! Recently seen portal clients
//!
//! The radio driver does not report associated stations, so the device
//! counts the distinct addresses that talked to the portal within an idle
//! window instead.

use heapless::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Peer {
    address: [u8; 4],
    last_seen_ms: u64,
}

/// Bounded table of peer addresses and when they were last seen
#[derive(Debug, Clone)]
pub struct PeerTable<const N: usize> {
    peers: Vec<Peer, N>,
    idle_ms: u64,
}

impl<const N: usize> PeerTable<N> {
    /// Create an empty table; peers expire `idle_ms` after their last request
    pub const fn new(idle_ms: u64) -> Self {
        Self {
            peers: Vec::new(),
            idle_ms,
        }
    }

    pub fn idle_ms(&self) -> u64 {
        self.idle_ms
    }

    /// Record a request from `address` at `now_ms`
    ///
    /// Expired entries are dropped first. When the table is still full the
    /// stalest peer is replaced.
    pub fn touch(&mut self, address: [u8; 4], now_ms: u64) {
        if let Some(peer) = self.peers.iter_mut().find(|p| p.address == address) {
            peer.last_seen_ms = peer.last_seen_ms.max(now_ms);
            return;
        }

        self.prune(now_ms);

        let peer = Peer {
            address,
            last_seen_ms: now_ms,
        };
        if let Err(peer) = self.peers.push(peer) {
            let stalest = self
                .peers
                .iter_mut()
                .min_by_key(|p| p.last_seen_ms);
            if let Some(slot) = stalest {
                *slot = peer;
            }
        }
    }

    /// Number of peers seen within the idle window
    pub fn active(&self, now_ms: u64) -> u32 {
        self.peers
            .iter()
            .filter(|p| self.is_active(p, now_ms))
            .count() as u32
    }

    /// Drop expired peers
    pub fn prune(&mut self, now_ms: u64) {
        let idle_ms = self.idle_ms;
        self.peers
            .retain(|p| now_ms.saturating_sub(p.last_seen_ms) < idle_ms);
    }

    /// Entries currently held, expired or not
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    fn is_active(&self, peer: &Peer, now_ms: u64) -> bool {
        now_ms.saturating_sub(peer.last_seen_ms) < self.idle_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: [u8; 4] = [192, 168, 4, 2];
    const B: [u8; 4] = [192, 168, 4, 3];
    const C: [u8; 4] = [192, 168, 4, 4];

    #[test]
    fn test_empty() {
        let table = PeerTable::<4>::new(1000);
        assert!(table.is_empty());
        assert_eq!(table.active(0), 0);
    }

    #[test]
    fn test_duplicate_refreshes() {
        let mut table = PeerTable::<4>::new(1000);
        table.touch(A, 0);
        table.touch(A, 900);

        assert_eq!(table.len(), 1);
        assert_eq!(table.active(1500), 1);
        assert_eq!(table.active(1900), 0);
    }

    #[test]
    fn test_expiry() {
        let mut table = PeerTable::<4>::new(1000);
        table.touch(A, 0);
        table.touch(B, 500);

        assert_eq!(table.active(999), 2);
        assert_eq!(table.active(1000), 1);
        assert_eq!(table.active(1500), 0);

        table.prune(1000);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_eviction_at_capacity() {
        let mut table = PeerTable::<2>::new(10_000);
        table.touch(A, 0);
        table.touch(B, 10);
        table.touch(C, 20);

        assert_eq!(table.len(), 2);
        assert_eq!(table.active(20), 2);

        // A was stalest and got replaced; touching it again evicts B
        table.touch(A, 30);
        assert_eq!(table.len(), 2);
        assert_eq!(table.active(30), 2);
    }

    #[test]
    fn test_expired_slots_reused() {
        let mut table = PeerTable::<2>::new(100);
        table.touch(A, 0);
        table.touch(B, 0);
        table.touch(C, 200);

        assert_eq!(table.len(), 1);
        assert_eq!(table.active(200), 1);
    }

    #[test]
    fn test_clock_before_last_seen() {
        let mut table = PeerTable::<2>::new(100);
        table.touch(A, 500);
        assert_eq!(table.active(400), 1);
    }
}
