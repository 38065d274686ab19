// File: src/utils/shuffle_bag.rs
//
// Without-replacement random selection: every id in the bag comes out
// exactly once, in shuffled order, before any id can repeat. Used for
// variety content where back-to-back repeats look broken.

use std::collections::VecDeque;

use parking_lot::Mutex;
use rand::seq::SliceRandom;
use tracing::debug;

/// One bag, one lock. The mutex is held across the whole
/// check-and-dequeue (`next`, `draw_or_refill`) and clear-and-refill
/// (`repopulate`) sequences so concurrent callers never observe a torn
/// state or both decide to refill. Independent bags must be independent
/// `ShuffleBag` values; they never share a lock.
pub struct ShuffleBag {
    queue: Mutex<VecDeque<i64>>,
}

impl ShuffleBag {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Draw the next id, or `None` once the bag is drained.
    pub fn next(&self) -> Option<i64> {
        self.queue.lock().pop_front()
    }

    /// Shuffle `ids` (Fisher-Yates) and load them as the new bag contents,
    /// replacing whatever was left.
    pub fn repopulate(&self, ids: &[i64]) {
        let mut shuffled = ids.to_vec();
        let mut queue = self.queue.lock();
        shuffled.shuffle(&mut rand::rng());
        queue.clear();
        queue.extend(shuffled);
        debug!("Shuffle bag repopulated with {} ids", queue.len());
    }

    /// Draw one id, refilling from `candidates` first if the bag is
    /// drained. The empty-check, refill, and dequeue happen under a single
    /// lock acquisition, so two concurrent callers cannot both trigger a
    /// refill.
    pub fn draw_or_refill(&self, candidates: &[i64]) -> Option<i64> {
        let mut queue = self.queue.lock();
        if queue.is_empty() {
            if candidates.is_empty() {
                return None;
            }
            let mut shuffled = candidates.to_vec();
            shuffled.shuffle(&mut rand::rng());
            queue.extend(shuffled);
            debug!("Shuffle bag refilled with {} ids", queue.len());
        }
        queue.pop_front()
    }
}

impl Default for ShuffleBag {
    fn default() -> Self {
        Self::new()
    }
}
