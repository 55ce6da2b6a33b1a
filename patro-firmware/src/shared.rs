//! State shared between the render and portal tasks
//!
//! The arbiter is lock-free. The peer table sits behind a critical-section
//! mutex that is held only for a single touch or count.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Instant;
use patro_core::portal::PeerTable;
use patro_core::{ModeArbiter, StationCounter};

use crate::config::DEVICE_CONFIG;

/// Most clients tracked at once
pub const MAX_PEERS: usize = 8;

/// Automatic/manual color arbitration
pub static ARBITER: ModeArbiter = ModeArbiter::new();

/// Clients recently seen by the portal
pub static PEERS: Mutex<CriticalSectionRawMutex, RefCell<PeerTable<MAX_PEERS>>> =
    Mutex::new(RefCell::new(PeerTable::new(DEVICE_CONFIG.peer_idle_ms)));

/// Note a request from `address`
pub fn record_peer(address: [u8; 4]) {
    let now_ms = Instant::now().as_millis();
    PEERS.lock(|peers| peers.borrow_mut().touch(address, now_ms));
}

/// Station count backed by the peer table
pub struct PeerCounter;

impl StationCounter for PeerCounter {
    fn station_count(&self) -> u32 {
        let now_ms = Instant::now().as_millis();
        PEERS.lock(|peers| peers.borrow().active(now_ms))
    }
}
