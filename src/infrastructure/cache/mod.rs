pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::SplitchatError;
use crate::core::services::SpendingSummary;
use async_trait::async_trait;

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_spending_summary(&self, user_id: &str) -> Result<Option<SpendingSummary>, SplitchatError>;
    async fn save_spending_summary(
        &self,
        user_id: &str,
        summary: &SpendingSummary,
        ttl: std::time::Duration,
    ) -> Result<(), SplitchatError>;
    async fn invalidate_spending_summary(&self, user_id: &str) -> Result<(), SplitchatError>;
}
