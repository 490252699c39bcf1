//! Load-once corpus cache

use std::sync::Arc;

use parking_lot::RwLock;

use super::{Corpus, CorpusSource};
use crate::error::Result;

/// Loads the corpus from its source on first use and hands out shared
/// clones afterwards.
#[derive(Clone)]
pub struct CorpusCache {
    source: Arc<dyn CorpusSource>,
    cached: Arc<RwLock<Option<Corpus>>>,
}

impl CorpusCache {
    pub fn new(source: Arc<dyn CorpusSource>) -> Self {
        Self {
            source,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Get the corpus, loading it on the first call.
    ///
    /// A failed load is returned as-is and leaves the cache empty.
    pub async fn get(&self) -> Result<Corpus> {
        // Clone out of the guard; the lock is never held across an await
        let cached = self.cached.read().clone();
        if let Some(corpus) = cached {
            tracing::debug!(source = %self.source.describe(), "Word list cache hit");
            return Ok(corpus);
        }

        let loaded = self.source.load().await?;

        let mut slot = self.cached.write();
        // Another caller may have filled the slot while we were loading
        let corpus = slot.get_or_insert(loaded).clone();
        Ok(corpus)
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.read().is_some()
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MailboxError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        loads: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl CorpusSource for CountingSource {
        async fn load(&self) -> Result<Corpus> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(MailboxError::corpus_load("counting", "unavailable"))
            } else {
                Ok(Corpus::parse("egg tree apple zebra"))
            }
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    #[tokio::test]
    async fn test_loads_once() {
        let source = Arc::new(CountingSource {
            loads: AtomicUsize::new(0),
            fail: false,
        });
        let cache = CorpusCache::new(source.clone());
        assert!(!cache.is_loaded());

        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();

        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
        assert!(cache.is_loaded());
        assert_eq!(first.words(), second.words());
        assert!(std::ptr::eq(first.words().as_ptr(), second.words().as_ptr()));
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let source = Arc::new(CountingSource {
            loads: AtomicUsize::new(0),
            fail: true,
        });
        let cache = CorpusCache::new(source.clone());

        assert!(tokio_test::block_on(cache.get()).is_err());
        assert!(tokio_test::block_on(cache.get()).is_err());
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
        assert!(!cache.is_loaded());
        assert_eq!(cache.source_description(), "counting");
    }
}
