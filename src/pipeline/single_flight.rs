//! Single-Flight Coordinator
//!
//! Per-key gates that let one caller compute a missing entry while others
//! with the same key wait. The map lock is held only while a gate is looked
//! up or pruned, never across the computation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as Gate, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct SingleFlight {
    gates: Mutex<HashMap<String, Arc<Gate<()>>>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other caller holds the gate for `key`, then holds it
    /// until the returned guard is dropped.
    pub async fn acquire(&self, key: &str) -> FlightGuard<'_> {
        // Built first so a caller dropped while waiting still prunes its gate
        let mut guard = FlightGuard {
            owner: self,
            key: key.to_string(),
            held: None,
        };

        let gate = {
            let mut gates = self.gates.lock().unwrap_or_else(PoisonError::into_inner);
            gates.entry(key.to_string()).or_default().clone()
        };
        guard.held = Some(gate.lock_owned().await);
        guard
    }

    /// Number of keys with a live gate.
    pub fn in_flight(&self) -> usize {
        self.gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn prune(&self, key: &str) {
        let mut gates = self.gates.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the map's own handle left means nobody holds or awaits the gate
        if gates.get(key).is_some_and(|gate| Arc::strong_count(gate) == 1) {
            gates.remove(key);
        }
    }
}

/// Holds a key's gate; releases it and prunes the map on drop.
pub struct FlightGuard<'a> {
    owner: &'a SingleFlight,
    key: String,
    held: Option<OwnedMutexGuard<()>>,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.held.take();
        self.owner.prune(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_gate_is_pruned_after_release() {
        let flights = SingleFlight::new();
        {
            let _guard = flights.acquire("k").await;
            assert_eq!(flights.in_flight(), 1);
        }
        assert_eq!(flights.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_caller_waits_for_first() {
        let flights = Arc::new(SingleFlight::new());
        let first = flights.acquire("k").await;

        let waiter = {
            let flights = flights.clone();
            tokio::spawn(async move {
                let _guard = flights.acquire("k").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(first);
        waiter.await.unwrap();
        assert_eq!(flights.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_distinct_keys_do_not_block() {
        let flights = SingleFlight::new();
        let _a = flights.acquire("a").await;
        let _b = flights.acquire("b").await;
        assert_eq!(flights.in_flight(), 2);
    }
}
