use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RecordedId(pub u64);

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EncodedId(pub u64);

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RuleId(pub u64);

impl fmt::Display for RecordedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EncodedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EncodedVariant {
    pub encoded_id: EncodedId,
    pub name: String,
}

/// A recorded program as returned by the recording server.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordedItem {
    pub id: RecordedId,
    pub name: String,
    /// Whether the original TS stream is still on disk.
    #[serde(default)]
    pub original: bool,
    #[serde(default)]
    pub encoded: Vec<EncodedVariant>,
    #[serde(default)]
    pub rule_id: Option<RuleId>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RecordedPage {
    pub recorded: Vec<RecordedItem>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_json_with_optional_fields_missing() {
        let item: RecordedItem =
            serde_json::from_str(r#"{ "id": 7, "name": "News", "channelId": 1 }"#).unwrap();
        assert_eq!(item.id, RecordedId(7));
        assert!(!item.original);
        assert!(item.encoded.is_empty());
        assert_eq!(item.rule_id, None);
    }

    #[test]
    fn parses_encoded_variants_and_rule() {
        let item: RecordedItem = serde_json::from_str(
            r#"{
                "id": 12,
                "name": "Drama #3",
                "original": true,
                "ruleId": 4,
                "encoded": [
                    { "encodedId": 30, "name": "H.264", "filesize": 1024 },
                    { "encodedId": 31, "name": "H.265" }
                ]
            }"#,
        )
        .unwrap();
        assert!(item.original);
        assert_eq!(item.rule_id, Some(RuleId(4)));
        assert_eq!(item.encoded[1].encoded_id, EncodedId(31));
        assert_eq!(item.encoded[0].name, "H.264");
    }
}
