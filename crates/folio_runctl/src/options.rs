//! Per-unit option tokens.

use serde_json::Value;

/// JSON pointer to the option list inside unit metadata.
const METADATA_POINTER: &str = "/folio/options";

/// Run-control options attached to one unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Discard the artifact's cached results before lookup.
    pub clear: bool,
    /// Close the abort gate after this unit.
    pub abort: bool,
}

impl Options {
    /// Collects options from tokens. Unknown tokens are ignored.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        for token in tokens {
            match token.as_ref() {
                "clear" => options.clear = true,
                "abort" => options.abort = true,
                _ => {}
            }
        }
        options
    }

    /// Reads `metadata["folio"]["options"]`.
    ///
    /// A missing key, a non-array value, or an array holding anything other
    /// than strings yields the empty option set.
    pub fn from_metadata(metadata: &Value) -> Self {
        let Some(Value::Array(items)) = metadata.pointer(METADATA_POINTER) else {
            return Self::default();
        };
        let tokens: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
        tokens.map(Self::from_tokens).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tokens() {
        let o = Options::from_tokens(["abort", "hide", "clear"]);
        assert!(o.abort && o.clear);
        assert_eq!(Options::from_tokens(Vec::<String>::new()), Options::default());
    }

    #[test]
    fn metadata() {
        let o = Options::from_metadata(&json!({"folio": {"options": ["clear"]}}));
        assert_eq!(o, Options { clear: true, abort: false });
    }

    #[test]
    fn malformed_metadata_is_empty() {
        for meta in [
            json!(null),
            json!({}),
            json!({"folio": {}}),
            json!({"folio": {"options": "abort"}}),
            json!({"folio": {"options": ["abort", 3]}}),
            json!({"folio": []}),
        ] {
            assert_eq!(Options::from_metadata(&meta), Options::default(), "{meta}");
        }
    }
}
