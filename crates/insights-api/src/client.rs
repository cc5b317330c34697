// Insights API HTTP client
//
// Wraps a blocking `reqwest::Client` with base-URL path joining, header
// policy (Accept / Content-Type / Api-Token), status classification, and
// `{ "data": ... }` envelope unwrapping. Endpoint groups are implemented as
// inherent methods in sibling modules.

use reqwest::Method;
use reqwest::blocking::{Request, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::TokenStore;
use crate::error::Error;
use crate::models::{Envelope, ListEnvelope, Page};
use crate::transport::TransportConfig;

/// Custom auth header; the service does not read `Authorization`.
pub const API_TOKEN_HEADER: &str = "Api-Token";

const JSON: &str = "application/json";

/// Blocking client for the Insights API.
///
/// Every method issues its request(s) on the calling thread and waits for
/// the full response. The API token sits in a [`TokenStore`], so the client
/// is `Sync` and an auth refresh swaps the token atomically between
/// requests instead of racing them.
#[derive(Debug)]
pub struct InsightsClient {
    http: reqwest::blocking::Client,
    base_url: Url,
    token: TokenStore,
}

impl InsightsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` (e.g. `https://insights.example.com/api`).
    ///
    /// `token` may be `None` when the caller intends to call
    /// [`authenticate`](Self::authenticate) first.
    pub fn new(
        base_url: &str,
        token: Option<SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, token)
    }

    /// Wrap an existing blocking `reqwest::Client`.
    pub fn with_client(
        http: reqwest::blocking::Client,
        base_url: &str,
        token: Option<SecretString>,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            http,
            base_url,
            token: TokenStore::new(token),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The token holder shared by every request this client builds.
    pub fn token(&self) -> &TokenStore {
        &self.token
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append an absolute endpoint path (e.g. `"/schools"`) to the base URL.
    ///
    /// Plain concatenation, so a base URL with a path prefix keeps it.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    // ── Request construction ─────────────────────────────────────────

    /// Assemble a request for `path` without sending it.
    ///
    /// Always sets `Accept: application/json`. Non-GET requests also get
    /// `Content-Type: application/json`. `Api-Token` is attached only while
    /// a token is configured.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Request, Error> {
        let url = self.url(path)?;
        self.build_request_for(method, url, body)
    }

    fn build_request_for(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Request, Error> {
        let is_get = method == Method::GET;
        let mut builder = self.http.request(method, url).header(ACCEPT, JSON);

        if !is_get {
            builder = builder.header(CONTENT_TYPE, JSON);
        }

        if let Some(token) = self.token.get() {
            let mut value = HeaderValue::from_str(token.expose_secret()).map_err(|_| {
                Error::InvalidHeader {
                    name: API_TOKEN_HEADER,
                }
            })?;
            value.set_sensitive(true);
            builder = builder.header(API_TOKEN_HEADER, value);
        }

        if let Some(body) = body {
            builder = builder.body(body);
        }

        builder.build().map_err(Error::Request)
    }

    // ── Execution ────────────────────────────────────────────────────

    /// Perform the round trip and classify the status.
    ///
    /// Any status >= 400 becomes [`Error::Status`] carrying the status text
    /// and the response body, including codes past 599. If the error body
    /// cannot be read, `body` is empty and `message` says why. Network
    /// failures are [`Error::Transport`].
    pub fn execute(&self, request: Request) -> Result<Response, Error> {
        debug!("{} {}", request.method(), request.url());

        let resp = self.http.execute(request).map_err(Error::Transport)?;
        let status = resp.status();

        if status.as_u16() >= 400 {
            let mut message = status.to_string();
            let body = resp.text().unwrap_or_else(|e| {
                message.push_str(&format!(" (failed to read response body: {e})"));
                String::new()
            });
            debug!(status = status.as_u16(), "request rejected");
            return Err(Error::Status {
                status: status.as_u16(),
                message,
                body,
            });
        }

        Ok(resp)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, Error> {
        let payload = serde_json::to_vec(body)?;
        let request = self.build_request(method, path, Some(payload))?;
        self.execute(request)
    }

    /// GET a single-resource endpoint and unwrap `data`.
    pub(crate) fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let request = self.build_request(Method::GET, path, None)?;
        let envelope: Envelope<T> = decode(self.execute(request)?)?;
        Ok(envelope.data)
    }

    /// GET a list endpoint, keeping the `next_url` cursor.
    pub(crate) fn get_page<T: DeserializeOwned>(&self, url: Url) -> Result<Page<T>, Error> {
        let request = self.build_request_for(Method::GET, url, None)?;
        let envelope: ListEnvelope<T> = decode(self.execute(request)?)?;
        Ok(envelope.into())
    }

    /// POST a JSON body and unwrap `data` from the response.
    pub(crate) fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let envelope: Envelope<T> = decode(self.send_json(Method::POST, path, body)?)?;
        Ok(envelope.data)
    }

    /// POST a JSON body; the response body is not read.
    pub(crate) fn post_no_response<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        self.send_json(Method::POST, path, body).map(drop)
    }

    /// PUT a JSON body; the response body is not read.
    pub(crate) fn put_no_response<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        self.send_json(Method::PUT, path, body).map(drop)
    }
}

// ── Response decoding ────────────────────────────────────────────────

fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let body = resp.text().map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}
