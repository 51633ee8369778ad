use crate::core::errors::SplitchatError;
use crate::core::services::SpendingSummary;
use crate::infrastructure::cache::Cache;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct InMemoryCache {
    cache: Arc<RwLock<HashMap<String, (SpendingSummary, chrono::DateTime<chrono::Utc>)>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_spending_summary(&self, user_id: &str) -> Result<Option<SpendingSummary>, SplitchatError> {
        let cache = self.cache.read().await;
        let key = crate::infrastructure::cache::cache_keys::spending_summary_key(user_id);
        Ok(cache
            .get(&key)
            .filter(|(_, expiry)| *expiry > chrono::Utc::now())
            .map(|(summary, _)| summary.clone()))
    }

    async fn save_spending_summary(
        &self,
        user_id: &str,
        summary: &SpendingSummary,
        ttl: std::time::Duration,
    ) -> Result<(), SplitchatError> {
        let mut cache = self.cache.write().await;
        let key = crate::infrastructure::cache::cache_keys::spending_summary_key(user_id);
        cache.insert(
            key,
            (
                summary.clone(),
                chrono::Utc::now()
                    + chrono::Duration::from_std(ttl)
                        .map_err(|e| SplitchatError::CacheError(format!("Failed to convert TTL: {}", e)))?,
            ),
        );
        Ok(())
    }

    async fn invalidate_spending_summary(&self, user_id: &str) -> Result<(), SplitchatError> {
        let mut cache = self.cache.write().await;
        let key = crate::infrastructure::cache::cache_keys::spending_summary_key(user_id);
        cache.remove(&key);
        cache.retain(|_, (_, expiry)| *expiry > chrono::Utc::now());
        Ok(())
    }
}
