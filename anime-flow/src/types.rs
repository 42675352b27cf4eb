use serde::{Deserialize, Serialize};

/// A single recommendation as the model emits it and the client renders it.
///
/// Field names follow the wire shape the model is instructed to produce
/// (camelCase). Every field defaults to empty so a partially filled object
/// from the model still deserializes; the enricher overwrites `image_url`,
/// `source_url` and `score` when authoritative data is found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Recommendation {
    pub title: String,
    pub romaji_title: String,
    /// Release year as the model wrote it, not validated as numeric
    pub year: String,
    pub studio: String,
    pub genres: Vec<String>,
    pub format: String,
    pub synopsis: String,
    pub reason: String,
    pub image_url: String,
    pub source_url: String,
    /// Formatted score such as "8.5/10", or "N/A"
    pub score: String,
}

/// Selection policy for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Low temperature, biased toward widely recognized verified titles
    #[default]
    Strict,
    /// High temperature, biased toward lesser-known titles
    Creative,
}

impl SearchMode {
    /// Sampling temperature sent to the completion service
    pub fn temperature(self) -> f64 {
        match self {
            SearchMode::Strict => 0.1,
            SearchMode::Creative => 0.85,
        }
    }

    /// Suffix appended to the user's taste description to steer selection
    pub(crate) fn prompt_suffix(self) -> &'static str {
        match self {
            SearchMode::Strict => {
                "(MODE: STRICT. Stick to highly rated, widely recognized and factually verified matches.)"
            }
            SearchMode::Creative => {
                "(MODE: CREATIVE. Favor hidden gems, underrated titles or unusual artistic choices matching the vibe. Avoid the most popular picks unless they fit perfectly.)"
            }
        }
    }
}
