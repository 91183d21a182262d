//! Memoizing stemmer wrapper backed by a bounded LRU cache.
//!
//! Stemming is a pure function of the input word, so cached entries never
//! need invalidation. Two threads racing on the same miss both compute the
//! stem and insert the same value.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::stem::Stemmer;

/// Default number of cached stems.
pub const DEFAULT_STEM_CACHE_CAPACITY: usize = 10_000;

/// Hit/miss counters of a [`CachedStemmer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

/// A stemmer that memoizes the results of another stemmer.
pub struct CachedStemmer {
    inner: Box<dyn Stemmer>,
    cache: Mutex<LruCache<String, String>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for CachedStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedStemmer")
            .field("inner", &self.inner.name())
            .field("stats", &self.stats())
            .finish()
    }
}

impl CachedStemmer {
    /// Wrap `inner` with a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(inner: Box<dyn Stemmer>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        CachedStemmer {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Wrap `inner` with the default capacity.
    pub fn with_default_capacity(inner: Box<dyn Stemmer>) -> Self {
        Self::new(inner, DEFAULT_STEM_CACHE_CAPACITY)
    }

    /// Snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        let cache = self.cache.lock();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: cache.len(),
            capacity: cache.cap().get(),
        }
    }

    /// Whether `word` currently has a cached stem.
    pub fn contains(&self, word: &str) -> bool {
        self.cache.lock().contains(word)
    }
}

impl Stemmer for CachedStemmer {
    fn stem(&self, word: &str) -> String {
        if let Some(stem) = self.cache.lock().get(word) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return stem.clone();
        }

        // The lock is released while the inner stemmer runs.
        self.misses.fetch_add(1, Ordering::Relaxed);
        let stem = self.inner.stem(word);
        self.cache.lock().put(word.to_string(), stem.clone());
        stem
    }

    fn name(&self) -> &'static str {
        "cached"
    }
}
