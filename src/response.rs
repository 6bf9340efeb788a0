use crate::error::{AbiquoError, Result};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// A single error as encoded by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
}

/// The structured error body returned on failed requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorCollection {
    pub collection: Vec<ErrorEnvelope>,
}

/// Turn an HTTP status and body into the uniform error value.
///
/// Statuses below 400 never produce an error. On failures the body is first
/// read as an [`ErrorCollection`]; only its first entry is reported. Bodies
/// that are not an error collection (or an empty one) are reported verbatim
/// together with the status.
pub fn normalize(status: StatusCode, body: &[u8]) -> Option<AbiquoError> {
    if status.as_u16() < 400 {
        return None;
    }

    match serde_json::from_slice::<ErrorCollection>(body) {
        Ok(errors) => match errors.collection.into_iter().next() {
            Some(first) => Some(AbiquoError::Api {
                code: first.code,
                message: first.message,
                status: status.as_u16(),
            }),
            None => Some(AbiquoError::http(status.as_u16(), body)),
        },
        Err(_) => Some(AbiquoError::http(status.as_u16(), body)),
    }
}

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Read the body of a blocking response
    pub fn read(response: reqwest::blocking::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes()?.to_vec();
        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }

    /// Error for this response, if any. Safe to call repeatedly.
    pub fn error(&self) -> Option<AbiquoError> {
        normalize(self.status, &self.body)
    }

    /// Consume the response, failing if the server reported an error
    pub fn check(self) -> Result<Self> {
        match self.error() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    /// Decode the body into the provided type
    pub fn json<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Get a response header as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
