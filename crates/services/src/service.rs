//! Behaviour shared by every calculator service

use async_trait::async_trait;
use fincalc_cache::{CacheFacade, FacadeStats};
use fincalc_core::CoreResult;

/// Cache-backed calculator for one domain
///
/// Implementors only expose their facade; cache maintenance is shared.
#[async_trait]
pub trait CalculatorService: Send + Sync {
    /// Namespace prefixed to every fingerprint this service builds
    const DOMAIN: &'static str;

    /// Facade the service computes through
    fn facade(&self) -> &CacheFacade;

    /// Drop one cached result by its full fingerprint
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CacheUnavailable` if the backend cannot be reached.
    async fn invalidate(&self, key: &str) -> CoreResult<bool> {
        Ok(self.facade().invalidate(key).await?)
    }

    /// Drop every cached result in the shared backend
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CacheUnavailable` if the backend cannot be reached.
    async fn clear_cache(&self) -> CoreResult<()> {
        tracing::info!("Clearing cache on behalf of the {} service", Self::DOMAIN);
        Ok(self.facade().clear_all().await?)
    }

    /// Statistics of the shared facade
    async fn cache_stats(&self) -> FacadeStats {
        self.facade().stats().await
    }
}
