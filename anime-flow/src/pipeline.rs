use tracing::info;

use crate::completion::GeminiClient;
use crate::enrich::Enricher;
use crate::error::Result;
use crate::types::{Recommendation, SearchMode};

/// The full search flow: one completion call, then a staggered concurrent
/// fan-out of metadata lookups over the parsed records.
///
/// A completion-side failure aborts the search; enrichment failures never
/// do, they degrade the affected record to its fallback fields.
pub struct RecommendationPipeline {
    completion: GeminiClient,
    enricher: Enricher,
}

impl RecommendationPipeline {
    pub fn new(completion: GeminiClient, enricher: Enricher) -> Self {
        Self {
            completion,
            enricher,
        }
    }

    pub async fn run(&self, query: &str, mode: SearchMode) -> Result<Vec<Recommendation>> {
        let records = self.completion.recommend(query, mode).await?;
        info!(count = records.len(), "model returned recommendations, enriching");

        Ok(self.enricher.enrich(records).await)
    }
}
