//! Row metadata codec.
//!
//! Row descriptors travel inside a line's class list, so the encoded form has
//! to survive as a single class name: JSON, then base64 over the URL-safe
//! alphabet (`+` becomes `-`, `/` becomes `_`).
//!
//! Tokens are emitted without base64 padding. Historical encoders padded with
//! `=`, which the marker pattern cannot capture, so decoding is
//! padding-indifferent: a legacy token decodes identically whether its
//! trailing `=` survived extraction or not.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine, GeneralPurpose, GeneralPurposeConfig};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

const ENCODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_encode_padding(false),
);

// Decodes after the reverse character mapping, hence the standard alphabet.
const DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Result of decoding a marker token.
///
/// A token that decodes to bytes but fails JSON parsing still yields a value
/// here: malformed metadata is tolerated and reported through
/// [`well_formed`](DecodedMetadata::well_formed) rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMetadata {
    /// The decoded text, exactly as carried by the token.
    pub json: String,

    /// Parsed JSON value, or `None` when `json` failed to parse.
    pub metadata: Option<Value>,

    /// True only if `metadata` parsed and has a `tblId`, a `row`, and a
    /// numeric `cols`.
    pub well_formed: bool,
}

/// Encode row metadata into a URL-safe marker token.
///
/// Any JSON-serializable value is accepted; unknown fields round-trip through
/// [`decode`] untouched.
///
/// # Example
///
/// ```
/// use padtab::{codec, RowDescriptor};
///
/// let token = codec::encode(&RowDescriptor::new("t1", 0, 2)).unwrap();
/// let decoded = codec::decode(&token).unwrap();
/// assert!(decoded.well_formed);
/// ```
pub fn encode<T: Serialize>(metadata: &T) -> Result<String> {
    let json = serde_json::to_string(metadata)
        .map_err(|e| Error::Encode(format!("metadata serialization failed: {}", e)))?;
    Ok(ENCODER.encode(json.as_bytes()))
}

/// Decode a marker token back into row metadata.
///
/// Returns `None` when the token is not decodable at all (invalid base64 or
/// not UTF-8); callers treat that the same as "no token found". A token that
/// decodes but is not valid JSON returns `Some` with a `None` metadata value;
/// the two outcomes are deliberately distinct.
pub fn decode(token: &str) -> Option<DecodedMetadata> {
    let standard: String = token
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();

    let bytes = DECODER.decode(standard.as_bytes()).ok()?;
    let json = String::from_utf8(bytes).ok()?;

    let metadata = serde_json::from_str::<Value>(&json).ok();
    let well_formed = metadata.as_ref().map(is_row_shaped).unwrap_or(false);

    Some(DecodedMetadata {
        json,
        metadata,
        well_formed,
    })
}

/// Shape check: present `tblId`, present `row`, numeric `cols`.
fn is_row_shaped(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    obj.contains_key("tblId") && obj.contains_key("row") && obj.get("cols").is_some_and(Value::is_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RowDescriptor;
    use serde_json::json;

    #[test]
    fn test_round_trip_descriptor() {
        let descriptor = RowDescriptor::new("a", 0, 1);
        let token = encode(&descriptor).unwrap();
        let decoded = decode(&token).unwrap();

        assert!(decoded.well_formed);
        assert_eq!(
            decoded.metadata.unwrap(),
            json!({"tblId": "a", "row": 0, "cols": 1})
        );
    }

    #[test]
    fn test_tokens_are_class_safe() {
        // 3 cells of JSON produce every base64 phase; none may emit padding
        // or characters outside the marker pattern's class.
        for cols in 0..6 {
            let token = encode(&RowDescriptor::new("table", 1, cols)).unwrap();
            assert!(
                token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
                "token {:?} is not class-safe",
                token
            );
        }
    }

    #[test]
    fn test_round_trip_preserves_unknown_fields() {
        let value = json!({"tblId": "x", "row": 3, "cols": 2, "future": ["keep", "me"]});
        let token = encode(&value).unwrap();
        let decoded = decode(&token).unwrap();

        assert!(decoded.well_formed);
        assert_eq!(decoded.metadata.unwrap(), value);
    }

    #[test]
    fn test_round_trip_unicode() {
        let value = json!({"tblId": "표", "row": 0, "cols": 1});
        let token = encode(&value).unwrap();
        let decoded = decode(&token).unwrap();
        assert_eq!(decoded.metadata.unwrap(), value);
    }

    #[test]
    fn test_invalid_base64_is_no_metadata() {
        assert!(decode("!!!not-base64!!!").is_none());
    }

    #[test]
    fn test_invalid_utf8_is_no_metadata() {
        // 0xFF 0xFF is valid base64 payload but not UTF-8
        let token = ENCODER.encode([0xFF, 0xFF]);
        assert!(decode(&token).is_none());
    }

    #[test]
    fn test_bad_json_still_yields_metadata() {
        let token = ENCODER.encode("not json".as_bytes());
        let decoded = decode(&token).unwrap();

        assert_eq!(decoded.json, "not json");
        assert!(decoded.metadata.is_none());
        assert!(!decoded.well_formed);
    }

    #[test]
    fn test_well_formed_requires_row() {
        let token = encode(&json!({"tblId": "a", "cols": 1})).unwrap();
        assert!(!decode(&token).unwrap().well_formed);
    }

    #[test]
    fn test_well_formed_requires_numeric_cols() {
        let token = encode(&json!({"tblId": "a", "row": 0, "cols": "two"})).unwrap();
        assert!(!decode(&token).unwrap().well_formed);
    }

    #[test]
    fn test_well_formed_requires_object() {
        let token = encode(&json!([1, 2, 3])).unwrap();
        assert!(!decode(&token).unwrap().well_formed);
    }

    #[test]
    fn test_legacy_padded_token_decodes() {
        // Historical encoders emitted `=` padding over the same alphabet.
        let padded_engine = GeneralPurpose::new(&alphabet::URL_SAFE, GeneralPurposeConfig::new());
        let json = r#"{"tblId":"a","row":0,"cols":1}"#;
        let padded = padded_engine.encode(json.as_bytes());
        assert!(padded.ends_with('='));

        // With its padding intact, and with the padding lost in extraction,
        // the token decodes to the same value.
        let decoded = decode(&padded).unwrap();
        assert_eq!(decoded.json, json);

        let stripped = padded.trim_end_matches('=');
        let decoded = decode(stripped).unwrap();
        assert_eq!(decoded.json, json);
        assert!(decoded.well_formed);
    }
}
