use crate::auth::Auth;
use crate::cancel::CancelToken;
use crate::client::{create_rest_client, create_upload_client, Config, USER_AGENT};
use crate::collection::{Collection, Page};
use crate::error::{AbiquoError, PaginationError, Result};
use crate::link::{Dto, Link};
use crate::oauth1::OAuth1Credentials;
use crate::response::ApiResponse;
use reqwest::blocking::{Client, Request, RequestBuilder};
use reqwest::header::{self, HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

/// Which HTTP client a request goes out on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Channel {
    /// API client, requests carry the client credentials
    Api,
    /// Upload client, requests carry their own authorization
    Upload,
}

/// Client for a hypermedia Abiquo API endpoint.
///
/// Cloning is cheap; clones share the underlying connection pools.
#[derive(Debug, Clone)]
pub struct AbiquoClient {
    /// HTTP client for API requests
    client: Client,
    /// HTTP client for uploads, without API credentials
    upload_client: Client,
    config: Config,
    base_url: Url,
    auth: Auth,
    deadline: Option<Instant>,
    cancel: Option<CancelToken>,
}

impl AbiquoClient {
    /// Create a client with the given configuration and credentials.
    ///
    /// No network I/O happens here.
    pub fn new(config: Config, auth: Auth) -> Result<Self> {
        Ok(AbiquoClient {
            client: create_rest_client(&config)?,
            upload_client: create_upload_client(&config)?,
            base_url: config.base_url()?,
            config,
            auth,
            deadline: None,
            cancel: None,
        })
    }

    /// Create a client using HTTP Basic authentication
    pub fn basic(config: Config, username: &str, password: &str) -> Result<Self> {
        Self::new(config, Auth::basic(username, password)?)
    }

    /// Create a client signing every request with OAuth1
    pub fn oauth(config: Config, credentials: OAuth1Credentials) -> Result<Self> {
        Self::new(config, Auth::oauth1(credentials))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// A clone of this client that refuses to send requests after `deadline`.
    ///
    /// Each request's timeout is capped at the time left.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let mut client = self.clone();
        client.deadline = Some(deadline);
        client
    }

    /// A clone of this client with a total time budget starting now
    pub fn with_timeout_budget(&self, budget: Duration) -> Self {
        self.with_deadline(Instant::now() + budget)
    }

    /// A clone of this client that stops once `token` is cancelled
    pub fn with_cancel(&self, token: CancelToken) -> Self {
        let mut client = self.clone();
        client.cancel = Some(token);
        client
    }

    /// Resolve a path against the base URL. Absolute URLs are used as-is.
    pub fn url(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{}/{}", base, path.trim_start_matches('/')))?;
        Ok(url)
    }

    /// Start building a request on the API client
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self.client.request(method, self.url(path)?))
    }

    /// Start building a request on the upload client
    pub(crate) fn upload_request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self.upload_client.request(method, self.url(path)?))
    }

    /// Send a request on one of the client's transports.
    ///
    /// Checks cancellation and the deadline, signs API requests with the
    /// client credentials, and logs the exchange when debug is enabled.
    /// The `User-Agent` and `Accept` defaults are set on the request itself
    /// so the logged headers are the ones sent.
    /// Transport errors are returned unchanged.
    pub(crate) fn transport(
        &self,
        channel: Channel,
        mut request: Request,
    ) -> Result<reqwest::blocking::Response> {
        let (client, default_timeout) = match channel {
            Channel::Api => (&self.client, self.config.timeout),
            Channel::Upload => (&self.upload_client, self.config.upload_timeout),
        };

        if let Some(ref cancel) = self.cancel {
            if cancel.is_cancelled() {
                return Err(AbiquoError::Cancelled);
            }
        }
        if let Some(deadline) = self.deadline {
            let remaining = deadline
                .checked_duration_since(Instant::now())
                .filter(|d| !d.is_zero())
                .ok_or(AbiquoError::DeadlineExceeded)?;
            let timeout = request.timeout_mut();
            *timeout = Some(timeout.unwrap_or(default_timeout).min(remaining));
        }

        let headers = request.headers_mut();
        headers
            .entry(header::USER_AGENT)
            .or_insert(HeaderValue::from_static(USER_AGENT));
        headers
            .entry(ACCEPT)
            .or_insert(HeaderValue::from_static("*/*"));

        if channel == Channel::Api {
            self.auth.authorize(&mut request)?;
        }

        if !self.config.debug {
            return Ok(client.execute(request)?);
        }

        let method = request.method().clone();
        let url = request.url().clone();
        info!(target: "abiquo_api::http", method = %method, url = %url, "Request");
        log_headers(request.headers());

        let start = Instant::now();
        let result = client.execute(request);
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                info!(
                    target: "abiquo_api::http",
                    method = %method,
                    status = response.status().as_u16(),
                    duration_ms,
                    url = %url,
                    "Response"
                );
                log_headers(response.headers());
                Ok(response)
            }
            Err(e) => {
                info!(target: "abiquo_api::http", method = %method, url = %url, error = %e, "Request failed");
                Err(e.into())
            }
        }
    }

    /// Send a request and read the full response without checking its status
    pub fn send_unchecked(&self, builder: RequestBuilder) -> Result<ApiResponse> {
        let response = self.transport(Channel::Api, builder.build()?)?;
        ApiResponse::read(response)
    }

    /// Send a request built from this client and read the full response.
    ///
    /// Every response goes through the error normalizer: statuses of 400 and
    /// above become an [`AbiquoError`].
    pub fn send(&self, builder: RequestBuilder) -> Result<ApiResponse> {
        self.send_unchecked(builder)?.check()
    }

    /// GET a resource, sending `accept` as the Accept header when non-empty
    pub fn get(&self, path: &str, accept: &str) -> Result<ApiResponse> {
        self.send(with_accept(self.request(Method::GET, path)?, accept))
    }

    /// GET a resource and decode it
    pub fn get_json<T>(&self, path: &str, accept: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.get(path, accept)?.json()
    }

    /// POST a body, using `media_type` as both Content-Type and Accept
    pub fn post(&self, path: &str, media_type: &str, body: Vec<u8>) -> Result<ApiResponse> {
        self.send_body(Method::POST, path, media_type, body)
    }

    /// PUT a body, using `media_type` as both Content-Type and Accept
    pub fn put(&self, path: &str, media_type: &str, body: Vec<u8>) -> Result<ApiResponse> {
        self.send_body(Method::PUT, path, media_type, body)
    }

    pub fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(self.request(Method::DELETE, path)?)
    }

    fn send_body(
        &self,
        method: Method,
        path: &str,
        media_type: &str,
        body: Vec<u8>,
    ) -> Result<ApiResponse> {
        let mut builder = with_accept(self.request(method, path)?, media_type);
        if !media_type.is_empty() {
            builder = builder.header(CONTENT_TYPE, media_type);
        }
        self.send(builder.body(body))
    }

    /// Fetch every item of a paginated collection.
    ///
    /// The first page is requested with `accept` as its media type. Following
    /// pages are requested through the `next` link, using the link's own
    /// media type, until a page without `next` arrives. Items keep the server
    /// order, page after page.
    ///
    /// A failed request or an undecodable page stops the loop; the items
    /// gathered so far are returned inside the [`PaginationError`].
    pub fn fetch_all<T>(
        &self,
        path: &str,
        accept: &str,
    ) -> std::result::Result<Vec<T>, PaginationError<T>>
    where
        T: DeserializeOwned,
    {
        self.fetch_all_with(path, accept, &[])
    }

    /// Same as [`fetch_all`](Self::fetch_all), with query parameters on the first page
    pub fn fetch_all_with<T>(
        &self,
        path: &str,
        accept: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<Vec<T>, PaginationError<T>>
    where
        T: DeserializeOwned,
    {
        let first = self
            .request(Method::GET, path)
            .map(|builder| {
                let builder = if query.is_empty() {
                    builder
                } else {
                    builder.query(query)
                };
                with_accept(builder, accept)
            })
            .and_then(|builder| self.send(builder))
            .and_then(|response| response.json::<Collection<T>>());

        match first {
            Ok(page) => self.drain(page),
            Err(e) => Err(PaginationError::new(Vec::new(), e)),
        }
    }

    /// Drain a collection whose first page has already been fetched
    pub fn drain<P>(&self, first: P) -> std::result::Result<Vec<P::Item>, PaginationError<P::Item>>
    where
        P: Page + DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut page = first;
        let mut pages = 1usize;

        loop {
            let next = page.next_link().cloned();
            items.extend(page.into_items());
            debug!(page = pages, total = items.len(), "Fetched collection page");

            let Some(next) = next else {
                return Ok(items);
            };

            page = match self.get(&next.href, &next.media_type).and_then(|r| r.json::<P>()) {
                Ok(page) => page,
                Err(e) => return Err(PaginationError::new(items, e)),
            };
            pages += 1;
        }
    }

    /// GET the resource behind one of `entity`'s links.
    ///
    /// The link's media type is sent as Accept. A relation the entity does not
    /// expose fails with [`AbiquoError::LinkNotPresent`] before any request.
    pub fn follow_link<D>(&self, entity: &D, rel: &str) -> Result<ApiResponse>
    where
        D: Dto + ?Sized,
    {
        let link = require_link(entity, rel)?;
        self.get(&link.href, &link.media_type)
    }

    /// Follow a link and decode the response
    pub fn follow_link_as<T, D>(&self, entity: &D, rel: &str) -> Result<T>
    where
        T: DeserializeOwned,
        D: Dto + ?Sized,
    {
        self.follow_link(entity, rel)?.json()
    }

    /// Follow a link to a collection and fetch all of its pages
    pub fn fetch_all_from_link<T, D>(
        &self,
        entity: &D,
        rel: &str,
    ) -> std::result::Result<Vec<T>, PaginationError<T>>
    where
        T: DeserializeOwned,
        D: Dto + ?Sized,
    {
        match self.follow_link_as::<Collection<T>, D>(entity, rel) {
            Ok(page) => self.drain(page),
            Err(e) => Err(PaginationError::new(Vec::new(), e)),
        }
    }
}

/// Look up a relation, failing with [`AbiquoError::LinkNotPresent`]
pub fn require_link<'a, D>(entity: &'a D, rel: &str) -> Result<&'a Link>
where
    D: Dto + ?Sized,
{
    entity.get_link(rel).ok_or_else(|| AbiquoError::LinkNotPresent {
        rel: rel.to_string(),
    })
}

fn with_accept(builder: RequestBuilder, accept: &str) -> RequestBuilder {
    if accept.is_empty() {
        builder
    } else {
        builder.header(ACCEPT, accept)
    }
}

fn log_headers(headers: &HeaderMap) {
    for (name, value) in headers {
        if *name == AUTHORIZATION {
            info!(target: "abiquo_api::http", "Header '{}': '<redacted>'", name);
        } else {
            info!(target: "abiquo_api::http", "Header '{}': '{:?}'", name, value);
        }
    }
}
