use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;
use uuid::Uuid;

use crate::error::{AbiquoError, Result};

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay as-is, everything else is encoded.
const OAUTH_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const VERSION: &str = "1.0";

fn encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE).to_string()
}

/// Query-escape a secret the way the API expects it before signing:
/// unreserved characters are kept and spaces become `+`
fn query_escape(s: &str) -> String {
    s.split(' ')
        .map(|part| utf8_percent_encode(part, OAUTH_ENCODE).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// OAuth1 consumer and access token credentials.
#[derive(Clone)]
pub struct OAuth1Credentials {
    pub consumer_key: String,
    consumer_secret: String,
    pub token: String,
    token_secret: String,
}

impl OAuth1Credentials {
    /// Create credentials from the application key/secret and the access token/secret.
    ///
    /// Both secrets are query-escaped here, before they are used as part of
    /// the signing key.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: &str,
        token: impl Into<String>,
        token_secret: &str,
    ) -> Self {
        OAuth1Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: query_escape(consumer_secret),
            token: token.into(),
            token_secret: query_escape(token_secret),
        }
    }

    /// Build the `Authorization` header value for a request.
    ///
    /// A fresh nonce and timestamp are generated on every call.
    pub fn authorization_header(&self, method: &str, url: &Url) -> Result<String> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AbiquoError::InvalidHeader(format!("system clock: {}", e)))?
            .as_secs();
        let nonce = Uuid::new_v4().simple().to_string();

        self.header_with(method, url, &[], &nonce, timestamp)
    }

    fn oauth_params(&self, nonce: &str, timestamp: u64) -> Vec<(String, String)> {
        vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_token".to_string(), self.token.clone()),
            ("oauth_version".to_string(), VERSION.to_string()),
        ]
    }

    fn header_with(
        &self,
        method: &str,
        url: &Url,
        body_params: &[(String, String)],
        nonce: &str,
        timestamp: u64,
    ) -> Result<String> {
        let mut oauth = self.oauth_params(nonce, timestamp);
        let signature = self.sign(method, url, &oauth, body_params)?;
        oauth.push(("oauth_signature".to_string(), signature));
        oauth.sort();

        let fields: Vec<String> = oauth
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, encode(v)))
            .collect();
        Ok(format!("OAuth {}", fields.join(", ")))
    }

    fn sign(
        &self,
        method: &str,
        url: &Url,
        oauth: &[(String, String)],
        body_params: &[(String, String)],
    ) -> Result<String> {
        let base = signature_base_string(method, url, oauth, body_params);
        let key = format!("{}&{}", encode(&self.consumer_secret), encode(&self.token_secret));

        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| AbiquoError::InvalidHeader(format!("OAuth1 signing key: {}", e)))?;
        mac.update(base.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// `METHOD&base-uri&normalized-params`, each part percent-encoded
fn signature_base_string(
    method: &str,
    url: &Url,
    oauth: &[(String, String)],
    body_params: &[(String, String)],
) -> String {
    let mut base_uri = format!(
        "{}://{}",
        url.scheme().to_ascii_lowercase(),
        url.host_str().unwrap_or_default().to_ascii_lowercase()
    );
    if let Some(port) = url.port() {
        base_uri.push_str(&format!(":{}", port));
    }
    base_uri.push_str(url.path());

    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .chain(oauth.iter().map(|(k, v)| (encode(k), encode(v))))
        .chain(body_params.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    params.sort();

    let normalized = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(&base_uri),
        encode(&normalized)
    )
}

// Implement Debug manually to avoid exposing the secrets
impl std::fmt::Debug for OAuth1Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth1Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &self.token)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}
