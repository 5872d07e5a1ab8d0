use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::ChatRequest;

#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Issue one completion call and return the raw assistant text.
    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError>;
}
