use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::error::{RecommendError, Result};
use crate::extract::parse_recommendations;
use crate::types::{Recommendation, SearchMode};

/// Model used when GEMINI_MODEL is not set
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const GENERATE_CONTENT_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const SYSTEM_INSTRUCTION: &str = r#"You are an expert anime recommendation engine.
Your goal is to provide reliable, hallucination-free recommendations based on the user's taste description.

RULES:
1. You must output a valid JSON array.
2. Do NOT output any conversational text, markdown formatting (like ```json) or explanations outside the JSON array. Start with '[' and end with ']'.
3. Use the web search tool to verify the titles, studios and release years.
4. Leave the "imageUrl", "sourceUrl" and "score" fields as empty strings. They are filled from the official database in a later step; your job is to get the TITLE exactly right so the lookup can find it.
5. Provide 3 to 5 recommendations.

JSON STRUCTURE:
[
  {
    "title": "Official Main Title (Romaji or English)",
    "romajiTitle": "Hepburn Romaji Title",
    "year": "YYYY",
    "studio": "Studio Name",
    "genres": ["Genre1", "Genre2"],
    "format": "TV | Movie | OVA",
    "synopsis": "A concise, factual synopsis verified by database data.",
    "reason": "Why this specifically fits the user's request.",
    "imageUrl": "",
    "sourceUrl": "",
    "score": ""
  }
]"#;

/// Client for the Gemini generateContent API with search grounding enabled.
///
/// Grounding is incompatible with the service's strict JSON output mode, so
/// the response is free text and the array is sliced out of it downstream.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Run one completion call and return the parsed, unenriched records.
    ///
    /// No retry on any failure; the caller surfaces the error.
    pub async fn recommend(
        &self,
        query: &str,
        mode: SearchMode,
    ) -> Result<Vec<Recommendation>> {
        info!(model = %self.model, mode = ?mode, "requesting recommendations");

        let prompt = augment_query(query, mode);
        let text = self.generate(&prompt, mode.temperature()).await?;

        debug!(response_length = text.len(), "completion response received");
        parse_recommendations(&text)
    }

    async fn generate(&self, prompt: &str, temperature: f64) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GENERATE_CONTENT_URL, self.model, self.api_key
        );

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "systemInstruction": {
                "parts": [{ "text": SYSTEM_INSTRUCTION }]
            },
            "tools": [{ "google_search": {} }],
            "generationConfig": { "temperature": temperature }
        });

        let response: Value = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        let text = response_text(&response);
        if text.trim().is_empty() {
            return Err(RecommendError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Append the mode-specific steering suffix to the user's taste description.
fn augment_query(query: &str, mode: SearchMode) -> String {
    format!("{}\n\n{}", query, mode.prompt_suffix())
}

/// Concatenate the text parts of the first candidate. Grounded responses can
/// split the answer across several parts.
fn response_text(response: &Value) -> String {
    response["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}
