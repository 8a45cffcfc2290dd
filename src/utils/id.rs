//! Snowflake-style 64-bit ID generator.
//!
//! Layout, most significant first: 1 unused sign bit, 41 bits of milliseconds
//! since [`EPOCH_MS`], 10 bits of node id, 12 bits of per-millisecond sequence.
//! IDs from one generator are strictly increasing, even if the wall clock
//! steps backwards.

use std::sync::Mutex;

/// 2024-01-01T00:00:00Z in Unix milliseconds.
pub const EPOCH_MS: i64 = 1_704_067_200_000;

const NODE_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
pub const MAX_NODE_ID: u16 = (1 << NODE_BITS) - 1;
const MAX_SEQUENCE: i64 = (1 << SEQUENCE_BITS) - 1;

#[derive(Debug)]
struct State {
    last_ms: i64,
    sequence: i64,
}

/// Process-wide generator shared by the services.
#[derive(Debug)]
pub struct IdGenerator {
    node_id: u16,
    state: Mutex<State>,
}

impl IdGenerator {
    /// Creates a generator for `node_id`; values above [`MAX_NODE_ID`] are masked.
    pub fn new(node_id: u16) -> Self {
        Self {
            node_id: node_id & MAX_NODE_ID,
            state: Mutex::new(State {
                last_ms: 0,
                sequence: 0,
            }),
        }
    }

    pub fn node_id(&self) -> u16 {
        self.node_id
    }

    /// Returns the next ID.
    pub fn next_id(&self) -> i64 {
        self.next_id_at(current_ms)
    }

    fn next_id_at(&self, clock: impl Fn() -> i64) -> i64 {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let mut now = clock().max(state.last_ms);
        if now == state.last_ms {
            state.sequence = (state.sequence + 1) & MAX_SEQUENCE;
            if state.sequence == 0 {
                // Sequence exhausted: borrow the next millisecond instead of
                // waiting for the clock. Later calls catch up via `max`.
                now = state.last_ms + 1;
            }
        } else {
            state.sequence = 0;
        }
        state.last_ms = now;

        ((now - EPOCH_MS) << (NODE_BITS + SEQUENCE_BITS))
            | (i64::from(self.node_id) << SEQUENCE_BITS)
            | state.sequence
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

fn current_ms() -> i64 {
    jiff::Timestamp::now().as_millisecond()
}

/// Splits an ID into `(unix_ms, node_id, sequence)`.
pub fn decompose(id: i64) -> (i64, u16, i64) {
    let ms = (id >> (NODE_BITS + SEQUENCE_BITS)) + EPOCH_MS;
    let node = ((id >> SEQUENCE_BITS) & i64::from(MAX_NODE_ID)) as u16;
    (ms, node, id & MAX_SEQUENCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_ids_are_positive_and_carry_node_id() {
        let generator = IdGenerator::new(7);
        let id = generator.next_id();
        assert!(id > 0);

        let (ms, node, _) = decompose(id);
        assert_eq!(node, 7);
        assert!((ms - current_ms()).abs() < 60_000);
    }

    #[test]
    fn test_node_id_is_masked() {
        assert_eq!(IdGenerator::new(1024 + 5).node_id(), 5);
        assert_eq!(IdGenerator::new(MAX_NODE_ID).node_id(), 1023);
    }

    #[test]
    fn test_sequence_overflow_moves_to_next_millisecond() {
        let generator = IdGenerator::new(1);
        let frozen = EPOCH_MS + 1_000;
        let clock = || frozen;

        let mut previous = generator.next_id_at(clock);
        for _ in 0..=MAX_SEQUENCE + 1 {
            let id = generator.next_id_at(clock);
            assert!(id > previous);
            previous = id;
        }

        let (ms, _, _) = decompose(previous);
        assert!(ms > frozen);
    }

    #[test]
    fn test_exhausted_sequence_borrows_one_millisecond_without_waiting() {
        let generator = IdGenerator::new(1);
        let frozen = EPOCH_MS + 5_000;
        let clock = || frozen;

        for _ in 0..=MAX_SEQUENCE {
            generator.next_id_at(clock);
        }
        let borrowed = generator.next_id_at(clock);
        assert_eq!(decompose(borrowed), (frozen + 1, 1, 0));

        // The clock is still behind, so the borrowed millisecond keeps counting.
        let next = generator.next_id_at(clock);
        assert_eq!(decompose(next), (frozen + 1, 1, 1));
    }

    #[test]
    fn test_concurrent_ids_are_unique() {
        let generator = Arc::new(IdGenerator::new(3));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = generator.clone();
                std::thread::spawn(move || (0..1000).map(|_| generator.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 4000);
    }

    proptest! {
        #[test]
        fn prop_ids_strictly_increase_under_any_clock(
            offsets in prop::collection::vec(0i64..10_000, 1..200)
        ) {
            let generator = IdGenerator::new(9);
            let mut previous = i64::MIN;
            for offset in offsets {
                let id = generator.next_id_at(|| EPOCH_MS + offset);
                prop_assert!(id > previous);
                previous = id;
            }
        }
    }
}
