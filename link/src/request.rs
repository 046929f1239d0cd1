//! Outbound deep-link request construction.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use url::Url;

use crate::error::LinkError;
use crate::payload::{ConnectPayload, DisconnectPayload};

/// Path of the wallet's connect endpoint.
const CONNECT_PATH: &str = "api/v1/connect";

/// Path of the wallet's disconnect endpoint.
const DISCONNECT_PATH: &str = "api/v1/disconnect";

fn build_request_uri<T: serde::Serialize>(
    wallet_scheme: &str,
    path: &str,
    payload: &T,
) -> Result<Url, LinkError> {
    let json = serde_json::to_string(payload).map_err(|e| LinkError::Json(e.to_string()))?;
    let encoded = BASE64.encode(json.as_bytes());

    let mut uri = Url::parse(&format!("{wallet_scheme}://{path}"))
        .map_err(|e| LinkError::MalformedUri(e.to_string()))?;
    uri.query_pairs_mut().append_pair("data", &encoded);
    Ok(uri)
}

/// Build `<wallet-scheme>://api/v1/connect?data=<base64 JSON>`.
pub fn build_connect_uri(wallet_scheme: &str, payload: &ConnectPayload) -> Result<Url, LinkError> {
    build_request_uri(wallet_scheme, CONNECT_PATH, payload)
}

/// Build the analogous disconnect request for teardown.
pub fn build_disconnect_uri(
    wallet_scheme: &str,
    payload: &DisconnectPayload,
) -> Result<Url, LinkError> {
    build_request_uri(wallet_scheme, DISCONNECT_PATH, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::AppInfo;

    fn app_info() -> AppInfo {
        AppInfo {
            domain: "example.com".into(),
            name: "Example".into(),
        }
    }

    #[test]
    fn connect_uri_shape() {
        let payload = ConnectPayload {
            app_info: app_info(),
            redirect_link: "myapp://api/v1/connect".into(),
            dapp_encryption_public_key: "0xabcd".into(),
        };
        let uri = build_connect_uri("wallet", &payload).unwrap();
        assert_eq!(uri.scheme(), "wallet");
        assert_eq!(uri.host_str(), Some("api"));
        assert_eq!(uri.path(), "/v1/connect");
        assert!(uri.query().unwrap().starts_with("data="));
    }

    #[test]
    fn connect_uri_data_decodes_back_to_payload() {
        let payload = ConnectPayload {
            app_info: app_info(),
            redirect_link: "myapp://api/v1/connect".into(),
            dapp_encryption_public_key: "0xabcd".into(),
        };
        let uri = build_connect_uri("wallet", &payload).unwrap();
        let (_, data) = uri.query_pairs().find(|(k, _)| k == "data").unwrap();
        let json = base64::engine::general_purpose::STANDARD
            .decode(data.as_bytes())
            .unwrap();
        let decoded: ConnectPayload = serde_json::from_slice(&json).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn disconnect_uri_targets_disconnect_path() {
        let payload = DisconnectPayload {
            app_info: app_info(),
            redirect_link: "myapp://api/v1/disconnect".into(),
        };
        let uri = build_disconnect_uri("wallet", &payload).unwrap();
        assert_eq!(uri.path(), "/v1/disconnect");
    }

    #[test]
    fn bad_scheme_is_rejected() {
        let payload = DisconnectPayload {
            app_info: app_info(),
            redirect_link: String::new(),
        };
        assert!(build_disconnect_uri("not a scheme", &payload).is_err());
    }
}
