use crate::core::errors::Result;
use serde::{Deserialize, Serialize};

/*-------------------------------------------------------------------------------------------------
  Parse JSON
-------------------------------------------------------------------------------------------------*/

pub fn parse(json: &str) -> Result<JsonPrefixList<String>> {
    Ok(serde_json::from_str(json)?)
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  JSON Prefix List
--------------------------------------------------------------------------------------*/

/// JSON prefix list document: `{"prefixes": ["10.0.0.0/8", "2001:db8::/32"]}`. Entries are
/// read as strings so each can be validated (and reported) on its own.
#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JsonPrefixList<T> {
    pub prefixes: Vec<T>,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prefix::tests::prefix;
    use crate::core::prefix::Prefix;

    #[test]
    fn test_parse_json_prefix_list() {
        let json = r#"{
          "prefixes": [
            "10.0.0.0/8",
            "2001:db8::/32",
            "not-a-prefix"
          ]
        }"#;

        let json_prefix_list = parse(json).unwrap();
        assert_eq!(
            json_prefix_list.prefixes,
            vec!["10.0.0.0/8", "2001:db8::/32", "not-a-prefix"]
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse(r#"["10.0.0.0/8"]"#).is_err());
        assert!(parse(r#"{"prefixes": "10.0.0.0/8"}"#).is_err());
    }

    #[test]
    fn test_serialize_json_prefix_list() {
        let json_prefix_list = JsonPrefixList {
            prefixes: vec![prefix("10.0.0.0/8"), prefix("2001:db8::/32")],
        };
        let json = serde_json::to_string_pretty(&json_prefix_list).unwrap();
        let json_prefix_list: JsonPrefixList<Prefix> = serde_json::from_str(&json).unwrap();

        assert_eq!(
            json_prefix_list.prefixes,
            vec![prefix("10.0.0.0/8"), prefix("2001:db8::/32")]
        );
        assert!(json.contains(r#""10.0.0.0/8""#));
    }
}
