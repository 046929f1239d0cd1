//! Inbound callback parsing.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use url::Url;

use pact_types::PublicKey;

use crate::error::LinkError;
use crate::payload::ApprovalPayload;

/// Outcome reported by the wallet in the `response` query parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseOutcome {
    Approved,
    Rejected,
    /// Anything other than `approved`/`rejected`, including an absent
    /// parameter (carried as an empty string).
    Unknown(String),
}

/// A callback URI addressed to this application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Callback {
    /// Endpoint the wallet replied to, e.g. `api/v1/connect`.
    pub path: String,
    pub outcome: ResponseOutcome,
    /// Raw `data` query parameter, still base64-encoded.
    pub data: Option<String>,
}

/// Match and split an inbound URI.
///
/// Returns `None` ("no match") when the URI does not parse or its scheme is
/// not ours — the platform routes plenty of unrelated callbacks, and those
/// must not raise.
pub fn parse_callback(uri: &str, app_scheme: &str) -> Option<Callback> {
    let url = match Url::parse(uri.trim()) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("ignoring unparseable callback URI: {e}");
            return None;
        }
    };
    if !url.scheme().eq_ignore_ascii_case(app_scheme) {
        tracing::debug!(scheme = url.scheme(), "ignoring callback for foreign scheme");
        return None;
    }

    let mut outcome = ResponseOutcome::Unknown(String::new());
    let mut data = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "response" => {
                outcome = match value.as_ref() {
                    "approved" => ResponseOutcome::Approved,
                    "rejected" => ResponseOutcome::Rejected,
                    other => ResponseOutcome::Unknown(other.to_string()),
                };
            }
            "data" => data = Some(value.into_owned()),
            _ => {}
        }
    }

    let path = format!(
        "{}{}",
        url.host_str().unwrap_or_default(),
        url.path()
    );
    Some(Callback { path, outcome, data })
}

/// Decode the base64 JSON body of an approved callback.
///
/// Malformed payloads surface a decode error rather than partial data.
pub fn decode_approval(raw: &str) -> Result<ApprovalPayload, LinkError> {
    // Query decoding turns an unescaped '+' into a space; undo it so a
    // sloppily-encoded wallet payload still decodes.
    let cleaned = raw.trim().replace(' ', "+");
    let bytes = BASE64
        .decode(cleaned.as_bytes())
        .map_err(|e| LinkError::Base64(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|_| LinkError::Utf8)?;
    serde_json::from_str(&text).map_err(|e| LinkError::Json(e.to_string()))
}

/// Parse the counterpart's hex-encoded public key field.
pub fn parse_public_key_hex(raw: &str) -> Result<PublicKey, LinkError> {
    PublicKey::from_hex(raw).map_err(|e| LinkError::InvalidPublicKey(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_SCHEME: &str = "myapp";

    fn encode(json: &str) -> String {
        BASE64.encode(json.as_bytes())
    }

    #[test]
    fn approved_callback_parses() {
        let data = encode(r#"{"counterpartPublicKey":"0xaa","address":"0x01"}"#);
        let uri = format!("myapp://api/v1/connect?response=approved&data={data}");
        let cb = parse_callback(&uri, APP_SCHEME).unwrap();
        assert_eq!(cb.outcome, ResponseOutcome::Approved);
        assert_eq!(cb.path, "api/v1/connect");
        assert_eq!(cb.data.as_deref(), Some(data.as_str()));
    }

    #[test]
    fn rejected_callback_parses() {
        let cb = parse_callback("myapp://api/v1/connect?response=rejected", APP_SCHEME).unwrap();
        assert_eq!(cb.outcome, ResponseOutcome::Rejected);
        assert!(cb.data.is_none());
    }

    #[test]
    fn foreign_scheme_is_no_match() {
        assert!(parse_callback("otherapp://api/v1/connect?response=approved", APP_SCHEME).is_none());
    }

    #[test]
    fn garbage_uri_is_no_match() {
        assert!(parse_callback("not a uri at all", APP_SCHEME).is_none());
    }

    #[test]
    fn scheme_match_is_case_insensitive() {
        assert!(parse_callback("MyApp://api/v1/connect?response=approved", APP_SCHEME).is_some());
    }

    #[test]
    fn unknown_outcome_is_preserved() {
        let cb = parse_callback("myapp://api/v1/connect?response=maybe", APP_SCHEME).unwrap();
        assert_eq!(cb.outcome, ResponseOutcome::Unknown("maybe".into()));
    }

    #[test]
    fn missing_response_param_is_unknown() {
        let cb = parse_callback("myapp://api/v1/connect", APP_SCHEME).unwrap();
        assert_eq!(cb.outcome, ResponseOutcome::Unknown(String::new()));
    }

    #[test]
    fn decode_approval_roundtrip() {
        let payload = decode_approval(&encode(
            r#"{"counterpartPublicKey":"0xaa","address":"0x01"}"#,
        ))
        .unwrap();
        assert_eq!(payload.counterpart_public_key.as_deref(), Some("0xaa"));
        assert_eq!(payload.address.as_deref(), Some("0x01"));
    }

    #[test]
    fn decode_approval_rejects_bad_base64() {
        assert!(matches!(
            decode_approval("!!!not-base64!!!"),
            Err(LinkError::Base64(_))
        ));
    }

    #[test]
    fn decode_approval_rejects_bad_utf8() {
        let raw = BASE64.encode([0xFF, 0xFE, 0x80]);
        assert!(matches!(decode_approval(&raw), Err(LinkError::Utf8)));
    }

    #[test]
    fn decode_approval_rejects_bad_json() {
        let raw = encode("{not json");
        assert!(matches!(decode_approval(&raw), Err(LinkError::Json(_))));
    }

    #[test]
    fn parse_public_key_hex_validates_length() {
        let good = format!("0x{}", "ab".repeat(32));
        assert!(parse_public_key_hex(&good).is_ok());
        assert!(parse_public_key_hex("0xabcd").is_err());
    }
}
