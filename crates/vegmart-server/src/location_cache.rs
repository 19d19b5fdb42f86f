//! Shared observed-location cache for request handlers.
//!
//! Refreshes query the database without holding the lock and then swap the
//! new set in under a short write lock, so readers never see a partial set.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, RwLock, RwLockReadGuard},
    time::Instant,
};
use vegmart_core::{fetch_observed_locations, LocationSource, RefreshOutcome, SuggestionIndex};

#[derive(Debug, Clone)]
pub struct LocationCache {
    index: Arc<RwLock<SuggestionIndex>>,
}

impl LocationCache {
    #[must_use]
    pub fn new(index: SuggestionIndex) -> Self {
        Self {
            index: Arc::new(RwLock::new(index)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, SuggestionIndex> {
        self.index.read().await
    }

    /// Re-query `source` and replace the observed set.
    ///
    /// On failure the previous set stays in place and the outcome says so.
    pub async fn refresh<S>(&self, source: &S) -> RefreshOutcome
    where
        S: LocationSource + Sync,
    {
        let fetched = fetch_observed_locations(source).await;
        self.index.write().await.apply_refresh(fetched)
    }
}

/// Minimum spacing between on-demand refreshes.
///
/// Only `POST /api/v1/locations/refresh` goes through the throttle; the
/// startup refresh and the cron job do not.
#[derive(Debug, Clone)]
pub struct RefreshThrottle {
    min_interval: Duration,
    last_admitted: Arc<Mutex<Option<Instant>>>,
}

impl RefreshThrottle {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_admitted: Arc::new(Mutex::new(None)),
        }
    }

    /// Admit a refresh, or return how long the caller must wait.
    pub async fn try_acquire(&self) -> Result<(), Duration> {
        if self.min_interval.is_zero() {
            return Ok(());
        }

        let mut last = self.last_admitted.lock().await;
        let now = Instant::now();
        if let Some(previous) = *last {
            let elapsed = now.saturating_duration_since(previous);
            if elapsed < self.min_interval {
                let retry_after = self.min_interval - elapsed;
                tracing::warn!(
                    retry_after_ms = u64::try_from(retry_after.as_millis()).unwrap_or(u64::MAX),
                    "location refresh throttled"
                );
                return Err(retry_after);
            }
        }
        *last = Some(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Offline;

    impl std::fmt::Display for Offline {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "database offline")
        }
    }

    impl std::error::Error for Offline {}

    struct FixedSource(Option<Vec<String>>);

    impl LocationSource for FixedSource {
        type Error = Offline;

        async fn farmer_locations(&self) -> Result<Vec<String>, Offline> {
            self.0.clone().ok_or(Offline)
        }

        async fn product_locations(&self) -> Result<Vec<String>, Offline> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn refresh_swaps_observed_set() {
        let cache = LocationCache::new(SuggestionIndex::with_builtin_reference());
        let source = FixedSource(Some(vec!["Ratnagiri, Maharashtra".to_string()]));

        let outcome = cache.refresh(&source).await;

        assert_eq!(outcome, RefreshOutcome::Refreshed { count: 1 });
        let index = cache.read().await;
        assert_eq!(index.observed(), &["Ratnagiri, Maharashtra".to_string()]);
        assert!(index.last_refreshed_at().is_some());
    }

    #[tokio::test]
    async fn failed_refresh_serves_previous_set() {
        let cache = LocationCache::new(SuggestionIndex::with_builtin_reference());
        cache
            .refresh(&FixedSource(Some(vec!["Surat, Gujarat".to_string()])))
            .await;

        let outcome = cache.refresh(&FixedSource(None)).await;

        assert!(matches!(outcome, RefreshOutcome::Failed { .. }));
        assert_eq!(
            cache.read().await.observed(),
            &["Surat, Gujarat".to_string()]
        );
    }

    #[tokio::test]
    async fn cache_and_index_report_the_same_outcome() {
        let seed = vec!["Surat, Gujarat".to_string()];
        let mut index = SuggestionIndex::with_builtin_reference();
        index.replace_observed(seed.clone());
        let cache = LocationCache::new(index.clone());

        for source in [FixedSource(None), FixedSource(Some(vec!["Kochi, Kerala".to_string()]))] {
            let from_index = index.refresh(&source).await;
            let from_cache = cache.refresh(&source).await;

            assert_eq!(from_index, from_cache);
            assert_eq!(index.observed(), cache.read().await.observed());
        }
    }

    #[tokio::test]
    async fn clones_share_one_index() {
        let cache = LocationCache::new(SuggestionIndex::with_builtin_reference());
        let other = cache.clone();
        other
            .refresh(&FixedSource(Some(vec!["Kochi, Kerala".to_string()])))
            .await;
        assert!(cache.read().await.is_observed("kochi, kerala"));
    }

    #[tokio::test]
    async fn throttle_rejects_second_refresh_within_interval() {
        let throttle = RefreshThrottle::new(Duration::from_secs(60));

        assert!(throttle.try_acquire().await.is_ok());
        let retry_after = throttle.try_acquire().await.unwrap_err();
        assert!(retry_after <= Duration::from_secs(60));
        assert!(retry_after > Duration::ZERO);
    }

    #[tokio::test]
    async fn throttle_clones_share_state() {
        let throttle = RefreshThrottle::new(Duration::from_secs(60));
        let other = throttle.clone();

        assert!(throttle.try_acquire().await.is_ok());
        assert!(other.try_acquire().await.is_err());
    }

    #[tokio::test]
    async fn zero_interval_disables_throttle() {
        let throttle = RefreshThrottle::new(Duration::ZERO);
        for _ in 0..3 {
            assert!(throttle.try_acquire().await.is_ok());
        }
    }
}
