//! Connected-client count

/// Source of the number of connected peer devices
///
/// Sampled read-only once per frame by the render task.
pub trait StationCounter {
    fn station_count(&self) -> u32;
}

impl<F: Fn() -> u32> StationCounter for F {
    fn station_count(&self) -> u32 {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn test_closure_counter() {
        let count = Cell::new(2u32);
        let counter = || count.get();
        assert_eq!(counter.station_count(), 2);
        count.set(5);
        assert_eq!(counter.station_count(), 5);
    }
}
