// ── Time-boxed reload cache ──
//
// Serves the cached value while it is fresh. Past the TTL the loader runs
// again; if it fails, the previous value keeps being served and the
// attempt time is recorded so the loader is not hammered on every read.

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwapOption;
use tracing::{debug, warn};

use crate::error::CoreError;

type Loader<T> = Box<dyn Fn() -> Result<T, CoreError> + Send + Sync>;

struct Cached<T> {
    value: Arc<T>,
    loaded_at: Instant,
}

/// A value reloaded from an external source on a fixed cadence.
pub struct TtlCache<T> {
    ttl: Duration,
    loader: Loader<T>,
    slot: ArcSwapOption<Cached<T>>,
}

impl<T: Default + Send + Sync + 'static> TtlCache<T> {
    /// Lazy cache: nothing is loaded until the first [`get`](Self::get).
    pub fn new(
        ttl: Duration,
        loader: impl Fn() -> Result<T, CoreError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            ttl,
            loader: Box::new(loader),
            slot: ArcSwapOption::empty(),
        }
    }

    /// Cache seeded with `value`, considered fresh as of now.
    pub fn preloaded(
        value: T,
        ttl: Duration,
        loader: impl Fn() -> Result<T, CoreError> + Send + Sync + 'static,
    ) -> Self {
        let cache = Self::new(ttl, loader);
        cache.slot.store(Some(Arc::new(Cached {
            value: Arc::new(value),
            loaded_at: Instant::now(),
        })));
        cache
    }

    /// Current value, reloading first if the TTL has elapsed.
    ///
    /// Never fails: a failed first load yields `T::default()`.
    pub fn get(&self) -> Arc<T> {
        let current = self.slot.load_full();
        if let Some(cached) = current.as_ref() {
            if cached.loaded_at.elapsed() < self.ttl {
                return Arc::clone(&cached.value);
            }
        }
        self.reload_from(current)
    }

    /// Reload immediately regardless of freshness.
    pub fn refresh(&self) -> Arc<T> {
        self.reload_from(self.slot.load_full())
    }

    /// The cached value without triggering a reload.
    pub fn peek(&self) -> Option<Arc<T>> {
        self.slot.load_full().map(|cached| Arc::clone(&cached.value))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn reload_from(&self, previous: Option<Arc<Cached<T>>>) -> Arc<T> {
        let value = match (self.loader)() {
            Ok(fresh) => {
                debug!(ttl_secs = self.ttl.as_secs(), "cache reloaded");
                Arc::new(fresh)
            }
            Err(e) => {
                warn!(error = %e, stale = previous.is_some(), "cache reload failed, serving previous value");
                previous.map_or_else(|| Arc::new(T::default()), |c| Arc::clone(&c.value))
            }
        };
        self.slot.store(Some(Arc::new(Cached {
            value: Arc::clone(&value),
            loaded_at: Instant::now(),
        })));
        value
    }
}
