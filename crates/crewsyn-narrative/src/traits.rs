use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::NarrativePrompt;

/// External text-generation collaborator.
///
/// One non-blocking request per invocation; retry, backoff, and
/// cancellation live with the transport, not here. Callers must treat
/// any error as "collaborator unavailable" and fall back.
#[async_trait]
pub trait NarrativeProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: NarrativePrompt) -> Result<String, ProviderError>;
}
