use thiserror::Error;

/// Result type for the recommendation pipeline
pub type Result<T> = std::result::Result<T, RecommendError>;

/// Errors that abort a recommendation search.
///
/// Metadata lookup failures are not represented here: the enricher swallows
/// them per record and falls back to the model-supplied fields.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// The completion service answered with no text at all
    #[error("completion service returned an empty response")]
    EmptyResponse,

    /// No `[` .. `]` pair could be located in the response text
    #[error("no JSON array found in completion response")]
    NoJsonFound,

    /// The bracket-delimited substring was not valid JSON; the offending
    /// payload is kept for diagnostics
    #[error("failed to parse recommendation payload: {source}")]
    MalformedJson {
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    /// Transport-level failure talking to the completion service
    #[error("completion request failed: {0}")]
    CompletionRequest(#[from] reqwest::Error),
}
