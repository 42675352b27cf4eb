use crate::error::{RecommendError, Result};
use crate::types::Recommendation;

/// Slice the first `[` through the last `]` (inclusive) out of free-form
/// model text.
///
/// Deliberately permissive: tolerates conversational wrapper text the model
/// may emit despite instructions. It is not a JSON grammar scan, so a
/// literal bracket inside wrapper prose (or inside a string value, relative
/// to the true delimiters) mis-truncates the payload. Known limitation;
/// callers go through this function so a grammar-aware extractor can replace
/// it in one place.
pub fn extract_json_array(text: &str) -> Result<&str> {
    let start = text.find('[').ok_or(RecommendError::NoJsonFound)?;
    let end = text.rfind(']').ok_or(RecommendError::NoJsonFound)?;
    if end < start {
        return Err(RecommendError::NoJsonFound);
    }
    Ok(&text[start..=end])
}

/// Extract and parse the recommendation array from raw response text.
pub fn parse_recommendations(text: &str) -> Result<Vec<Recommendation>> {
    let payload = extract_json_array(text)?;
    serde_json::from_str(payload).map_err(|source| RecommendError::MalformedJson {
        payload: payload.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_exact_array_from_wrapper_prose() {
        let text = r#"Sure, here are your picks!
[{"title": "Monster"}, {"title": "Paranoia Agent"}]
Enjoy!"#;

        assert_eq!(
            extract_json_array(text).unwrap(),
            r#"[{"title": "Monster"}, {"title": "Paranoia Agent"}]"#
        );
    }

    #[test]
    fn extracts_bare_array_unchanged() {
        let text = r#"[{"title": "Monster"}]"#;
        assert_eq!(extract_json_array(text).unwrap(), text);
    }

    #[test]
    fn missing_open_bracket_is_no_json_found() {
        let err = extract_json_array("no recommendations today]").unwrap_err();
        assert!(matches!(err, RecommendError::NoJsonFound));
    }

    #[test]
    fn missing_close_bracket_is_no_json_found() {
        let err = extract_json_array(r#"[{"title": "Monster"}"#).unwrap_err();
        assert!(matches!(err, RecommendError::NoJsonFound));
    }

    #[test]
    fn close_before_open_is_no_json_found() {
        let err = extract_json_array("] stray brackets [").unwrap_err();
        assert!(matches!(err, RecommendError::NoJsonFound));
    }

    #[test]
    fn invalid_payload_is_malformed_json_and_keeps_payload() {
        let err = parse_recommendations("[{not json}]").unwrap_err();
        match err {
            RecommendError::MalformedJson { payload, .. } => {
                assert_eq!(payload, "[{not json}]");
            }
            other => panic!("expected MalformedJson, got {other:?}"),
        }
    }

    #[test]
    fn parses_records_out_of_chatty_response() {
        let text = r#"Here you go:
[{"title": "Monster", "year": "2004"}, {"title": "Perfect Blue", "year": "1997"}]"#;

        let records = parse_recommendations(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Monster");
        assert_eq!(records[1].year, "1997");
    }

    // The documented fragility: a literal bracket in prose after the true
    // close moves the slice past the array, which then fails to parse.
    #[test]
    fn trailing_bracket_in_prose_mis_truncates_to_malformed_json() {
        let text = r#"[{"title": "Monster"}] (sources: [1])"#;
        let err = parse_recommendations(text).unwrap_err();
        assert!(matches!(err, RecommendError::MalformedJson { .. }));
    }
}
