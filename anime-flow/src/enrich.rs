use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::metadata::{AnimeMetadata, MetadataSource, fallback_source_url, format_score};
use crate::types::Recommendation;

/// Delay between successive lookup launches. Politeness toward the metadata
/// service's implicit rate limit, not a correctness requirement.
const STAGGER: Duration = Duration::from_millis(250);

/// Fills image, score and source fields from the metadata database.
///
/// All lookups run concurrently; launch is staggered per index. Output
/// length and order always match the input, and a failed branch degrades
/// that one record to its fallback values instead of failing the batch.
pub struct Enricher {
    source: Arc<dyn MetadataSource>,
}

impl Enricher {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self { source }
    }

    pub async fn enrich(&self, records: Vec<Recommendation>) -> Vec<Recommendation> {
        let branches: Vec<_> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let source = Arc::clone(&self.source);
                let task_record = record.clone();
                let handle = tokio::spawn(async move {
                    sleep(STAGGER * index as u32).await;

                    let metadata = match source.lookup(&task_record.title).await {
                        Ok(found) => found,
                        Err(error) => {
                            warn!(
                                title = %task_record.title,
                                error = %error,
                                "metadata lookup failed, keeping fallback fields"
                            );
                            None
                        }
                    };
                    apply_metadata(task_record, metadata)
                });
                (record, handle)
            })
            .collect();

        // Results are associated with their own input slot, not appended on
        // completion order.
        let mut enriched = Vec::with_capacity(branches.len());
        for (original, handle) in branches {
            match handle.await {
                Ok(record) => enriched.push(record),
                Err(error) => {
                    warn!(title = %original.title, error = %error, "enrichment branch aborted");
                    enriched.push(apply_metadata(original, None));
                }
            }
        }
        enriched
    }
}

/// Per-field merge: metadata wins when present, then the model's value, then
/// the empty/"N/A"/constructed-search-URL defaults.
fn apply_metadata(mut record: Recommendation, metadata: Option<AnimeMetadata>) -> Recommendation {
    match metadata {
        Some(found) => {
            if let Some(image_url) = found.image_url.filter(|url| !url.is_empty()) {
                record.image_url = image_url;
            }
            // A match with no score still renders as "N/A": the database is
            // authoritative once it recognized the title.
            record.score = match found.score {
                Some(value) => format_score(value),
                None => "N/A".to_string(),
            };
            if let Some(source_url) = found.source_url.filter(|url| !url.is_empty()) {
                record.source_url = source_url;
            } else if record.source_url.is_empty() {
                record.source_url = fallback_source_url(&record.title);
            }
        }
        None => {
            if record.score.is_empty() {
                record.score = "N/A".to_string();
            }
            if record.source_url.is_empty() {
                record.source_url = fallback_source_url(&record.title);
            }
        }
    }
    record
}
