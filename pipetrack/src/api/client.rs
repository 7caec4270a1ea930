//! The request pipeline: URL building, auth headers, dispatch, normalization.

use pipetrack_proto::query::QueryParam;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::{ApiError, ResponseBody};
use crate::session::SessionStore;

/// Placeholder body for calls that send none.
pub const NO_BODY: Option<&'static ()> = None;

/// Per-call options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Query parameters in order. `None` values are omitted from the URL.
    pub params: Vec<QueryParam>,
    /// Attach the session's bearer token (if any) and treat a 401 as
    /// session invalidation. Defaults to `true`.
    pub require_auth: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            params: Vec::new(),
            require_auth: true,
        }
    }
}

impl RequestOptions {
    /// Authenticated call without query parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for endpoints that must not carry credentials.
    #[must_use]
    pub fn public() -> Self {
        Self {
            require_auth: false,
            ..Self::default()
        }
    }

    /// Appends one query parameter; `None` is kept and later omitted.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        self.params
            .push((name.into(), value.map(|v| v.to_string())));
        self
    }

    /// Appends several query parameters.
    #[must_use]
    pub fn params(mut self, params: impl IntoIterator<Item = QueryParam>) -> Self {
        self.params.extend(params);
        self
    }
}

/// Cloneable HTTP client bound to one backend and one session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    /// Creates a client for `base_url` that reads credentials from `session`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, session: SessionStore) -> Result<Self, ApiError> {
        Self::with_http_client(reqwest::Client::new(), base_url, session)
    }

    /// Like [`new`](Self::new) but with a caller-configured `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `base_url` does not parse.
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: &str,
        session: SessionStore,
    ) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// The session this client reads and invalidates.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` against the base URL and appends present parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the path cannot be joined.
    pub fn build_url(&self, path: &str, params: &[QueryParam]) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))?;
        let mut present = params
            .iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (name.as_str(), v)))
            .peekable();
        if present.peek().is_some() {
            url.query_pairs_mut().extend_pairs(present);
        }
        Ok(url)
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send); also [`ApiError::Decode`] if the body is
    /// not a `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.send(Method::GET, path, NO_BODY, options)
            .await?
            .into_typed()
    }

    /// `POST path` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send); also [`ApiError::Decode`] if the body is
    /// not a `T`.
    pub async fn post<B, T>(
        &self,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, body, options)
            .await?
            .into_typed()
    }

    /// `PUT path` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send); also [`ApiError::Decode`] if the body is
    /// not a `T`.
    pub async fn put<B, T>(
        &self,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, body, options)
            .await?
            .into_typed()
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send); also [`ApiError::Decode`] if the body is
    /// not a `T`.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, NO_BODY, options)
            .await?
            .into_typed()
    }

    /// Dispatches one request and normalizes the response.
    ///
    /// Every request carries `Content-Type: application/json`. When
    /// `options.require_auth` is set and a token is stored, it is sent as a
    /// bearer credential. A 401 on such a call clears the session before the
    /// error is returned; public calls never touch the session.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidUrl`] if the URL cannot be built.
    /// - [`ApiError::Transport`] if no response arrived.
    /// - [`ApiError::Http`] for any non-success status.
    pub async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<ResponseBody, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.build_url(path, &options.params)?;
        let token = if options.require_auth {
            self.session.token()
        } else {
            None
        };

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, %url, authenticated = token.is_some(), "sending request");

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let raw = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = ResponseBody::parse(content_type.as_deref(), raw);

        if status.is_success() {
            tracing::debug!(%method, %url, status = status.as_u16(), "request succeeded");
            return Ok(body);
        }

        let message = body.error_message(status.as_u16());
        if status == StatusCode::UNAUTHORIZED && options.require_auth {
            tracing::warn!(%url, "backend rejected credentials; clearing session");
            if let Err(e) = self.session.clear_session() {
                tracing::error!(error = %e, "failed to clear session");
            }
        } else {
            tracing::debug!(%method, %url, status = status.as_u16(), %message, "request failed");
        }
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }
}
