// File: src/services/celebration.rs
//
// Picks celebratory media for ban announcements. Two content categories,
// one per ban attribution (automated vs operator-issued), each backed by
// its own shuffle bag so the pools rotate independently and never repeat
// until exhausted.

use tracing::debug;

use crate::utils::shuffle_bag::ShuffleBag;

pub struct CelebrationService {
    auto_media: Vec<i64>,
    manual_media: Vec<i64>,
    auto_bag: ShuffleBag,
    manual_bag: ShuffleBag,
}

impl CelebrationService {
    /// `auto_media` / `manual_media` are the full candidate pools (platform
    /// file ids), typically loaded from config at startup. Empty pools are
    /// allowed; `pick` then returns `None` and the announcement is skipped.
    pub fn new(auto_media: Vec<i64>, manual_media: Vec<i64>) -> Self {
        debug!(
            "Initializing CelebrationService ({} auto, {} manual media ids)",
            auto_media.len(),
            manual_media.len()
        );
        Self {
            auto_media,
            manual_media,
            auto_bag: ShuffleBag::new(),
            manual_bag: ShuffleBag::new(),
        }
    }

    /// Draw the next media id for a ban announcement, lazily reshuffling
    /// the drained pool.
    pub fn pick(&self, auto: bool) -> Option<i64> {
        if auto {
            self.auto_bag.draw_or_refill(&self.auto_media)
        } else {
            self.manual_bag.draw_or_refill(&self.manual_media)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_pick_draws_from_the_matching_pool() {
        let service = CelebrationService::new(vec![1, 2, 3], vec![10, 20]);

        for _ in 0..6 {
            let id = service.pick(true).unwrap();
            assert!((1..=3).contains(&id));
        }
        for _ in 0..4 {
            let id = service.pick(false).unwrap();
            assert!(id == 10 || id == 20);
        }
    }

    #[test]
    fn test_pools_rotate_without_early_repeats() {
        let service = CelebrationService::new((1..=5).collect(), Vec::new());
        let mut seen = HashSet::new();
        for _ in 0..5 {
            assert!(seen.insert(service.pick(true).unwrap()));
        }
        // Second cycle covers the pool again.
        let mut second = HashSet::new();
        for _ in 0..5 {
            assert!(second.insert(service.pick(true).unwrap()));
        }
        assert_eq!(seen, second);
    }

    #[test]
    fn test_empty_pool_yields_none() {
        let service = CelebrationService::new(Vec::new(), vec![10]);
        assert_eq!(service.pick(true), None);
        assert_eq!(service.pick(false), Some(10));
    }
}
