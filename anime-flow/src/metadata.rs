use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

const JIKAN_SEARCH_URL: &str = "https://api.jikan.moe/v4/anime";
const MAL_SEARCH_URL: &str = "https://myanimelist.net/anime.php";

/// Authoritative metadata found for a single title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimeMetadata {
    pub image_url: Option<String>,
    /// Canonical page URL on the database site
    pub source_url: Option<String>,
    /// Score on a 0-10 scale, absent when the database has none
    pub score: Option<f64>,
}

/// Seam between the enricher and the metadata database, mockable in tests.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Look up a title, requesting at most one match. `Ok(None)` means the
    /// database had no match; errors are transport or decoding failures.
    async fn lookup(&self, title: &str) -> anyhow::Result<Option<AnimeMetadata>>;
}

/// Jikan (MyAnimeList) v4 search client.
pub struct JikanClient {
    http: Client,
}

impl JikanClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

impl Default for JikanClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataSource for JikanClient {
    async fn lookup(&self, title: &str) -> anyhow::Result<Option<AnimeMetadata>> {
        let url = format!(
            "{}?q={}&limit=1",
            JIKAN_SEARCH_URL,
            urlencoding::encode(title)
        );
        debug!(%title, "querying metadata database");

        let body: Value = self.http.get(&url).send().await?.json().await?;
        Ok(parse_search_response(&body))
    }
}

/// Pull image, canonical URL and score out of a Jikan search response.
/// Prefers the large image variant, falling back to the standard one.
fn parse_search_response(body: &Value) -> Option<AnimeMetadata> {
    let anime = body["data"].as_array()?.first()?;
    let images = &anime["images"]["jpg"];

    Some(AnimeMetadata {
        image_url: images["large_image_url"]
            .as_str()
            .or_else(|| images["image_url"].as_str())
            .map(str::to_string),
        source_url: anime["url"].as_str().map(str::to_string),
        score: anime["score"].as_f64(),
    })
}

/// Render a database score as the display string, e.g. "8.5/10".
pub fn format_score(score: f64) -> String {
    format!("{}/10", score)
}

/// Search page on the database's own site, used when neither the lookup nor
/// the model produced a canonical link.
pub fn fallback_source_url(title: &str) -> String {
    format!("{}?q={}", MAL_SEARCH_URL, urlencoding::encode(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search_body(anime: Value) -> Value {
        json!({ "data": [anime] })
    }

    #[test]
    fn prefers_large_image_variant() {
        let body = search_body(json!({
            "url": "https://myanimelist.net/anime/19/Monster",
            "score": 8.88,
            "images": { "jpg": {
                "image_url": "https://cdn.myanimelist.net/images/anime/10/18793.jpg",
                "large_image_url": "https://cdn.myanimelist.net/images/anime/10/18793l.jpg"
            }}
        }));

        let meta = parse_search_response(&body).unwrap();
        assert_eq!(
            meta.image_url.as_deref(),
            Some("https://cdn.myanimelist.net/images/anime/10/18793l.jpg")
        );
        assert_eq!(
            meta.source_url.as_deref(),
            Some("https://myanimelist.net/anime/19/Monster")
        );
        assert_eq!(meta.score, Some(8.88));
    }

    #[test]
    fn falls_back_to_standard_image_variant() {
        let body = search_body(json!({
            "url": "https://myanimelist.net/anime/437/Perfect_Blue",
            "images": { "jpg": {
                "image_url": "https://cdn.myanimelist.net/images/anime/1/437.jpg"
            }}
        }));

        let meta = parse_search_response(&body).unwrap();
        assert_eq!(
            meta.image_url.as_deref(),
            Some("https://cdn.myanimelist.net/images/anime/1/437.jpg")
        );
    }

    #[test]
    fn absent_score_is_none() {
        let body = search_body(json!({
            "url": "https://myanimelist.net/anime/99999/Obscure",
            "images": { "jpg": {} }
        }));

        let meta = parse_search_response(&body).unwrap();
        assert_eq!(meta.score, None);
        assert_eq!(meta.image_url, None);
    }

    #[test]
    fn empty_data_array_is_no_match() {
        assert_eq!(parse_search_response(&json!({ "data": [] })), None);
        assert_eq!(parse_search_response(&json!({ "error": "rate limited" })), None);
    }

    #[test]
    fn score_formatting() {
        assert_eq!(format_score(8.5), "8.5/10");
        assert_eq!(format_score(8.0), "8/10");
        assert_eq!(format_score(7.77), "7.77/10");
    }

    #[test]
    fn fallback_url_encodes_the_title() {
        assert_eq!(
            fallback_source_url("Neon Genesis Evangelion"),
            "https://myanimelist.net/anime.php?q=Neon%20Genesis%20Evangelion"
        );
    }
}
