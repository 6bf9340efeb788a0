use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::blocking::Request;
use reqwest::header::{HeaderValue, AUTHORIZATION};

use crate::error::{AbiquoError, Result};
use crate::oauth1::OAuth1Credentials;

/// Credentials used for every regular API request.
#[derive(Clone)]
pub enum Auth {
    /// HTTP Basic authentication. The header is built once.
    Basic {
        username: String,
        header: HeaderValue,
    },
    /// OAuth1 request signing. Each request gets a fresh signature.
    OAuth1(OAuth1Credentials),
}

impl Auth {
    pub fn basic(username: &str, password: &str) -> Result<Self> {
        let encoded = STANDARD.encode(format!("{}:{}", username, password));
        let mut header = HeaderValue::from_str(&format!("Basic {}", encoded))
            .map_err(|e| AbiquoError::InvalidHeader(e.to_string()))?;
        header.set_sensitive(true);
        Ok(Auth::Basic {
            username: username.to_string(),
            header,
        })
    }

    pub fn oauth1(credentials: OAuth1Credentials) -> Self {
        Auth::OAuth1(credentials)
    }

    /// Set the `Authorization` header of a built request
    pub(crate) fn authorize(&self, request: &mut Request) -> Result<()> {
        let value = match self {
            Auth::Basic { header, .. } => header.clone(),
            Auth::OAuth1(credentials) => {
                let signed =
                    credentials.authorization_header(request.method().as_str(), request.url())?;
                let mut value = HeaderValue::from_str(&signed)
                    .map_err(|e| AbiquoError::InvalidHeader(e.to_string()))?;
                value.set_sensitive(true);
                value
            }
        };
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("header", &"<redacted>")
                .finish(),
            Auth::OAuth1(credentials) => f.debug_tuple("OAuth1").field(credentials).finish(),
        }
    }
}
