//! Inbound message classification
//!
//! Producers have sent two payload shapes over time: JSON records carrying
//! a `blocks` or `players` field, and plain text prefixed with `PLAYER:`.
//! Both are accepted. Matchers run in order and the first hit wins; a
//! payload that fails to parse as JSON simply does not match the first rule.

use serde_json::Value;

/// Prefix identifying legacy producer payloads
pub const LEGACY_PREFIX: &str = "PLAYER:";

/// Fields that mark a JSON object as producer data
pub const DATA_FIELDS: [&str; 2] = ["blocks", "players"];

/// Control words asking producers to resend their data
pub const RESCAN_WORDS: [&str; 3] = ["fullscan", "scan", "newscan"];

/// Category of an inbound text frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassifiedMessage {
    /// Producer payload, kept verbatim
    ProducerData(String),
    /// Request for all producers to resend
    RescanRequest,
    /// Anything else
    Unrecognized(String),
}

impl ClassifiedMessage {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedMessage::ProducerData(_) => "producer_data",
            ClassifiedMessage::RescanRequest => "rescan_request",
            ClassifiedMessage::Unrecognized(_) => "unrecognized",
        }
    }
}

type Matcher = fn(&str) -> Option<ClassifiedMessage>;

const MATCHERS: [Matcher; 3] = [match_structured, match_legacy, match_rescan];

/// Classify a raw inbound frame
pub fn classify(raw: &str) -> ClassifiedMessage {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(raw))
        .unwrap_or_else(|| ClassifiedMessage::Unrecognized(raw.to_string()))
}

fn match_structured(raw: &str) -> Option<ClassifiedMessage> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let object = value.as_object()?;
    DATA_FIELDS
        .iter()
        .any(|field| object.contains_key(*field))
        .then(|| ClassifiedMessage::ProducerData(raw.to_string()))
}

fn match_legacy(raw: &str) -> Option<ClassifiedMessage> {
    raw.starts_with(LEGACY_PREFIX)
        .then(|| ClassifiedMessage::ProducerData(raw.to_string()))
}

fn match_rescan(raw: &str) -> Option<ClassifiedMessage> {
    RESCAN_WORDS
        .iter()
        .any(|word| raw.eq_ignore_ascii_case(word))
        .then_some(ClassifiedMessage::RescanRequest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_blocks_is_producer_data() {
        let raw = r#"{"blocks":[{"x":1,"y":2,"z":3,"id":"stone"}]}"#;
        assert_eq!(classify(raw), ClassifiedMessage::ProducerData(raw.to_string()));
    }

    #[test]
    fn test_structured_players_is_producer_data() {
        let raw = r#"{ "players": {} , "extra": true }"#;
        // Whitespace and extra fields are preserved verbatim
        assert_eq!(classify(raw), ClassifiedMessage::ProducerData(raw.to_string()));
    }

    #[test]
    fn test_json_without_data_field_is_unrecognized() {
        let raw = r#"{"type":"hello"}"#;
        assert_eq!(classify(raw), ClassifiedMessage::Unrecognized(raw.to_string()));
    }

    #[test]
    fn test_json_array_is_not_structured_data() {
        let raw = r#"["blocks"]"#;
        assert_eq!(classify(raw).kind(), "unrecognized");
    }

    #[test]
    fn test_legacy_prefix_is_producer_data() {
        let raw = "PLAYER:x=1,y=64,z=-3";
        assert_eq!(classify(raw), ClassifiedMessage::ProducerData(raw.to_string()));
    }

    #[test]
    fn test_legacy_prefix_is_case_sensitive() {
        assert_eq!(classify("player:x=1").kind(), "unrecognized");
    }

    #[test]
    fn test_malformed_json_falls_through() {
        // Looks like JSON with a data field but does not parse
        let raw = r#"{"blocks": [1, 2"#;
        assert_eq!(classify(raw), ClassifiedMessage::Unrecognized(raw.to_string()));
    }

    #[test]
    fn test_rescan_words_case_insensitive() {
        for word in ["fullscan", "SCAN", "NewScan", "FullScan"] {
            assert_eq!(classify(word), ClassifiedMessage::RescanRequest, "{word}");
        }
    }

    #[test]
    fn test_rescan_requires_exact_word() {
        assert_eq!(classify("scan please").kind(), "unrecognized");
        assert_eq!(classify(" scan").kind(), "unrecognized");
    }

    #[test]
    fn test_empty_input_is_unrecognized() {
        assert_eq!(classify(""), ClassifiedMessage::Unrecognized(String::new()));
    }
}
