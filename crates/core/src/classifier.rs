//! Capability implemented by the classification gateway.

use crate::error::ClassificationResult;
use crate::provider::Provider;
use crate::record::ClassificationRecord;
use heridas_types::DataUri;

/// Classifies one wound photograph with the selected provider.
///
/// Implementations must hand the same `instruction` and `image` to whichever provider is
/// selected, perform no caching, and never retry.
#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(
        &self,
        provider: Provider,
        image: &DataUri,
        instruction: &str,
    ) -> ClassificationResult<ClassificationRecord>;
}
