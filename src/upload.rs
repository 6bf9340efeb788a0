use crate::error::{AbiquoError, Result};
use crate::response::normalize;
use crate::resources::user::USER_MEDIA_TYPE;
use crate::rest::{AbiquoClient, Channel};
use reqwest::blocking::multipart::Form;
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Response header carrying the session token issued by `/login`
pub const TOKEN_HEADER: &str = "X-Abiquo-Token";

impl AbiquoClient {
    /// Log in and return the session token issued by the server.
    ///
    /// A fresh token is requested on every call. A login response without the
    /// token header fails with [`AbiquoError::MissingToken`].
    pub fn login_token(&self) -> Result<String> {
        let response = self.get("login", USER_MEDIA_TYPE)?;
        response
            .header(TOKEN_HEADER)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or(AbiquoError::MissingToken {
                header: TOKEN_HEADER,
            })
    }

    /// Upload a file as a `multipart/form-data` POST.
    ///
    /// The request is authorized with a session token from [`login_token`]
    /// (`Authorization: Token <value>`) instead of the client credentials,
    /// and is sent on the upload client. The file is streamed from disk.
    ///
    /// # Arguments
    /// * `uri` - Upload endpoint, absolute or relative to the base URL
    /// * `params` - Plain form fields sent before the file
    /// * `file_field` - Form field name of the file part
    /// * `path` - File to upload
    ///
    /// # Returns
    /// The raw HTTP response on success. Responses with status 400 and above
    /// are decoded into an [`AbiquoError`].
    ///
    /// [`login_token`]: AbiquoClient::login_token
    pub fn upload<P: AsRef<Path>>(
        &self,
        uri: &str,
        params: &HashMap<String, String>,
        file_field: &str,
        path: P,
    ) -> Result<reqwest::blocking::Response> {
        let token = self.login_token()?;

        let mut form = Form::new();
        for (name, value) in params {
            form = form.text(name.clone(), value.clone());
        }
        let form = form.file(file_field.to_string(), path.as_ref())?;

        let request = self
            .upload_request(Method::POST, uri)?
            .header(AUTHORIZATION, format!("Token {}", token))
            .multipart(form)
            .build()?;

        let response = self.transport(Channel::Upload, request)?;
        let status = response.status();
        if status.as_u16() < 400 {
            return Ok(response);
        }

        let body = response.bytes()?;
        debug!(status = status.as_u16(), body = %String::from_utf8_lossy(&body), "Upload rejected");
        Err(normalize(status, &body).unwrap_or_else(|| AbiquoError::http(status.as_u16(), &body)))
    }
}
