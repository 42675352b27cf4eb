pub mod completion;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod metadata;
pub mod pipeline;
pub mod types;

// Re-export commonly used types
pub use completion::{DEFAULT_MODEL, GeminiClient};
pub use enrich::Enricher;
pub use error::{RecommendError, Result};
pub use extract::{extract_json_array, parse_recommendations};
pub use metadata::{AnimeMetadata, JikanClient, MetadataSource};
pub use pipeline::RecommendationPipeline;
pub use types::{Recommendation, SearchMode};
