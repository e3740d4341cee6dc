//! Bounded memoization for the two hot pure functions in the engine:
//! [`crate::distance::distance`] and [`crate::align::align`].
//!
//! Both are referentially transparent in their `Part` arguments (keyed by
//! value — `(line, start, text)` — never identity, since splitting produces
//! fresh `Part`s that only compare equal structurally). Caches are call-
//! scoped: a fresh `Caches` is built per [`crate::accuracy::flexible_character_accuracy`]
//! invocation (or per rayon worker during the coefficient sweep), so there is
//! no global mutable cache and no cross-call staleness to reason about.

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::distance::{distance, Match};
use crate::part::Part;

/// Recommended bound from the spec; eviction only affects speed, never
/// correctness, since cache values are pure functions of their keys.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

type PartPair = (Part, Part);

pub struct Caches {
    distance: LruCache<PartPair, Match>,
    align: LruCache<PartPair, Option<Match>>,
}

impl Caches {
    pub fn new(capacity: usize) -> Caches {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Caches { distance: LruCache::new(cap), align: LruCache::new(cap) }
    }

    /// Memoized [`distance`]. Takes the parts by value since a cache hit
    /// returns a clone of the stored `Match` either way.
    pub fn distance(&mut self, gt: Part, ocr: Part) -> Match {
        let key = (gt, ocr);
        if let Some(hit) = self.distance.get(&key) {
            return hit.clone();
        }
        let (gt, ocr) = key.clone();
        let computed = distance(gt, ocr);
        self.distance.put(key, computed.clone());
        computed
    }

    /// Looks up a memoized [`crate::align::align`] result, or computes it with
    /// `compute` and stores it. Kept generic over the computation so
    /// `align.rs` can own the alignment algorithm while this module only
    /// owns the bound and eviction policy.
    pub fn align_or_insert(
        &mut self,
        gt: Part,
        ocr: Part,
        compute: impl FnOnce(&mut Caches, &Part, &Part) -> Option<Match>,
    ) -> Option<Match> {
        let key = (gt, ocr);
        if let Some(hit) = self.align.get(&key) {
            return hit.clone();
        }
        let (gt, ocr) = key.clone();
        let computed = compute(self, &gt, &ocr);
        self.align.put(key, computed.clone());
        computed
    }
}

impl Default for Caches {
    fn default() -> Caches {
        Caches::new(DEFAULT_CACHE_CAPACITY)
    }
}
