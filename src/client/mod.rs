//! Client layer: issues requests, maps HTTP status codes to errors, and orchestrates
//! the composite list/campaign helpers.

mod campaigns;
mod contacts;
mod exophones;
#[cfg(test)]
mod fake;
mod lists;
mod messaging;

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::domain::{AccountSid, ApiKey, ApiToken, ValidationError};

const DEFAULT_BASE_URL: &str = "https://api.exotel.com";

/// Environment variable holding the account SID, read by [`ExotelClient::from_env`].
pub const ENV_SID: &str = "EXOTEL_SID";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "EXOTEL_API_KEY";
/// Environment variable holding the API token.
pub const ENV_API_TOKEN: &str = "EXOTEL_API_TOKEN";
/// Optional environment variable overriding the base URL (e.g. a regional subdomain).
pub const ENV_BASE_URL: &str = "EXOTEL_BASE_URL";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum RequestBody {
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
}

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: Url,
    body: RequestBody,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
        credentials: &'a Credentials,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
        credentials: &'a Credentials,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };
            let builder = self.client.request(method, request.url).basic_auth(
                credentials.api_key().as_str(),
                Some(credentials.api_token().as_str()),
            );
            let builder = match request.body {
                RequestBody::Empty => builder,
                RequestBody::Json(value) => builder.json(&value),
                RequestBody::Form(params) => builder.form(&params),
            };

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

/// Versioned account root an endpoint lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApiVersion {
    /// `v1/Accounts/{sid}/`, form-encoded writes.
    V1,
    /// `v2/accounts/{sid}/`, JSON.
    V2,
    /// `v2_beta/Accounts/{sid}/`, JSON.
    V2Beta,
}

impl ApiVersion {
    fn prefix(self) -> [&'static str; 2] {
        match self {
            Self::V1 => ["v1", "Accounts"],
            Self::V2 => ["v2", "accounts"],
            Self::V2Beta => ["v2_beta", "Accounts"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Account SID plus API key/token pair used for HTTP Basic authentication.
///
/// The token is redacted from `Debug` output.
pub struct Credentials {
    sid: AccountSid,
    api_key: ApiKey,
    api_token: ApiToken,
}

impl Credentials {
    /// Validate all three parts (each must be non-empty).
    pub fn new(
        sid: impl Into<String>,
        api_key: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            sid: AccountSid::new(sid)?,
            api_key: ApiKey::new(api_key)?,
            api_token: ApiToken::new(api_token)?,
        })
    }

    pub fn sid(&self) -> &AccountSid {
        &self.sid
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn api_token(&self) -> &ApiToken {
        &self.api_token
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`ExotelClient`].
///
/// HTTP statuses with a documented meaning get their own variant and carry the
/// description Exotel put in the error body, when there is one.
pub enum ExotelError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// HTTP 400.
    #[error("validation failed: {}", describe(.description, "request rejected by Exotel"))]
    Validation { description: Option<String> },

    /// HTTP 401.
    #[error("authentication failed: {}", describe(.description, "invalid API key or token"))]
    AuthenticationFailed { description: Option<String> },

    /// HTTP 402.
    #[error(
        "payment required: {}",
        describe(
            .description,
            "the action is not available on your plan, or usage limits are exceeded"
        )
    )]
    PaymentRequired { description: Option<String> },

    /// HTTP 403.
    #[error(
        "permission denied: {}",
        describe(
            .description,
            "credentials are valid but have no access to the requested resource"
        )
    )]
    PermissionDenied { description: Option<String> },

    /// HTTP 404.
    #[error("not found: {}", describe(.description, "resource does not exist"))]
    NotFound { description: Option<String> },

    /// HTTP 429.
    #[error("throttled: {}", describe(.description, "request was throttled"))]
    Throttled { description: Option<String> },

    /// A list with the same name already exists (item code 409 in a list creation response).
    #[error("unique violation: {description}")]
    UniqueViolation { description: String },

    /// Any other non-successful HTTP status code.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// A domain constructor rejected an input before any request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Client configuration is incomplete or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

fn describe<'a>(description: &'a Option<String>, fallback: &'a str) -> &'a str {
    description.as_deref().unwrap_or(fallback)
}

impl ExotelError {
    /// HTTP status behind this error, if it came from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation { .. } => Some(400),
            Self::AuthenticationFailed { .. } => Some(401),
            Self::PaymentRequired { .. } => Some(402),
            Self::PermissionDenied { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Throttled { .. } => Some(429),
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Vendor-provided error description, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Validation { description }
            | Self::AuthenticationFailed { description }
            | Self::PaymentRequired { description }
            | Self::PermissionDenied { description }
            | Self::NotFound { description }
            | Self::Throttled { description } => description.as_deref(),
            Self::UniqueViolation { description } => Some(description),
            _ => None,
        }
    }
}

/// Map a non-2xx status to its error. Returns `None` for success statuses.
fn error_for_status(status: u16, body: &str) -> Option<ExotelError> {
    if (200..=299).contains(&status) {
        return None;
    }

    let description = crate::transport::decode_error_description(body);
    Some(match status {
        400 => ExotelError::Validation { description },
        401 => ExotelError::AuthenticationFailed { description },
        402 => ExotelError::PaymentRequired { description },
        403 => ExotelError::PermissionDenied { description },
        404 => ExotelError::NotFound { description },
        429 => ExotelError::Throttled { description },
        _ => ExotelError::HttpStatus {
            status,
            body: if body.trim().is_empty() {
                None
            } else {
                Some(body.to_owned())
            },
        },
    })
}

fn parse_error(err: impl StdError + Send + Sync + 'static) -> ExotelError {
    ExotelError::Parse(Box::new(err))
}

#[derive(Debug, Clone)]
/// Builder for [`ExotelClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct ExotelClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ExotelClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API base URL (default `https://api.exotel.com`).
    ///
    /// Account subdomains such as `https://api.in.exotel.com` go here. A path prefix is kept.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`ExotelClient`]. Fails on a malformed base URL.
    pub fn build(self) -> Result<ExotelClient, ExotelError> {
        let base_url = self.base_url.trim().to_owned();
        let parsed = Url::parse(&base_url)
            .map_err(|err| ExotelError::Config(format!("invalid base url {base_url}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(ExotelError::Config(format!(
                "base url must be an http(s) url: {base_url}"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| ExotelError::Transport(Box::new(err)))?;

        Ok(ExotelClient {
            credentials: self.credentials,
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Exotel client.
///
/// Holds the credentials for its whole lifetime and issues exactly one HTTP request per
/// operation (composite helpers issue several, sequentially). No retries happen here.
pub struct ExotelClient {
    credentials: Credentials,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for ExotelClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExotelClient")
            .field("sid", &self.credentials.sid().as_str())
            .field("base_url", &self.base_url)
            .field("api_key", &self.credentials.api_key().as_str())
            .field("api_token", &"<redacted>")
            .finish()
    }
}

impl ExotelClient {
    /// Create a client against `https://api.exotel.com`.
    ///
    /// For more customization, use [`ExotelClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> ExotelClientBuilder {
        ExotelClientBuilder::new(credentials)
    }

    /// Create a client from `EXOTEL_SID`, `EXOTEL_API_KEY`, `EXOTEL_API_TOKEN` and the
    /// optional `EXOTEL_BASE_URL`.
    pub fn from_env() -> Result<Self, ExotelError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ExotelError> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ExotelError::Config(format!("missing {name} environment variable")))
        };

        let credentials = Credentials::new(
            required(ENV_SID)?,
            required(ENV_API_KEY)?,
            required(ENV_API_TOKEN)?,
        )?;
        let mut builder = Self::builder(credentials);
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|value| !value.trim().is_empty()) {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn endpoint_url(&self, version: ApiVersion, segments: &[&str]) -> Result<Url, ExotelError> {
        let mut url = Url::parse(&self.base_url).map_err(|err| {
            ExotelError::Config(format!("invalid base url {}: {err}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                ExotelError::Config(format!("base url cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(version.prefix())
            .push(self.credentials.sid().as_str())
            .extend(segments);
        Ok(url)
    }

    /// Send one request and return the raw body of a successful response.
    async fn call(
        &self,
        method: HttpMethod,
        version: ApiVersion,
        segments: &[&str],
        query: &[(String, String)],
        body: RequestBody,
    ) -> Result<String, ExotelError> {
        let mut url = self.endpoint_url(version, segments)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        debug!(%method, %url, "sending Exotel API request");
        let response = self
            .http
            .send(HttpRequest { method, url, body }, &self.credentials)
            .await
            .map_err(ExotelError::Transport)?;
        debug!(status = response.status, "received Exotel API response");

        if let Some(err) = error_for_status(response.status, &response.body) {
            return Err(err);
        }
        Ok(response.body)
    }

    /// Like [`Self::call`], returning the body as JSON (`Null` for an empty body).
    async fn call_json(
        &self,
        method: HttpMethod,
        version: ApiVersion,
        segments: &[&str],
        query: &[(String, String)],
        body: RequestBody,
    ) -> Result<Value, ExotelError> {
        let body = self.call(method, version, segments, query, body).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(parse_error)
    }

    async fn get(
        &self,
        version: ApiVersion,
        segments: &[&str],
        query: &[(String, String)],
    ) -> Result<Value, ExotelError> {
        self.call_json(
            HttpMethod::Get,
            version,
            segments,
            query,
            RequestBody::Empty,
        )
        .await
    }

    async fn delete(&self, segments: &[&str]) -> Result<Value, ExotelError> {
        self.call_json(
            HttpMethod::Delete,
            ApiVersion::V2,
            segments,
            &[],
            RequestBody::Empty,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{FakeTransport, client_with};
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("acme1", "key", "token").unwrap()
    }

    #[test]
    fn credentials_validate_each_part() {
        assert!(Credentials::new("", "key", "token").is_err());
        assert!(Credentials::new("sid", " ", "token").is_err());
        assert!(Credentials::new("sid", "key", "").is_err());
        assert_eq!(credentials().sid().as_str(), "acme1");
    }

    #[test]
    fn debug_redacts_api_token() {
        let client = ExotelClient::new(Credentials::new("acme1", "key", "secret-token").unwrap());
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-token"));
        assert!(!format!("{:?}", client.credentials()).contains("secret-token"));
    }

    #[test]
    fn endpoint_urls_follow_api_versions() {
        let client = ExotelClient::new(credentials());
        assert_eq!(
            client
                .endpoint_url(ApiVersion::V2, &["campaigns", "c-1"])
                .unwrap()
                .as_str(),
            "https://api.exotel.com/v2/accounts/acme1/campaigns/c-1"
        );
        assert_eq!(
            client
                .endpoint_url(ApiVersion::V1, &["Sms", "send.json"])
                .unwrap()
                .as_str(),
            "https://api.exotel.com/v1/Accounts/acme1/Sms/send.json"
        );
        assert_eq!(
            client
                .endpoint_url(ApiVersion::V2Beta, &["IncomingPhoneNumbers"])
                .unwrap()
                .as_str(),
            "https://api.exotel.com/v2_beta/Accounts/acme1/IncomingPhoneNumbers"
        );
    }

    #[test]
    fn endpoint_url_keeps_base_path_and_escapes_ids() {
        let client = ExotelClient::builder(credentials())
            .base_url("http://127.0.0.1:9000/proxy/")
            .build()
            .unwrap();
        assert_eq!(
            client
                .endpoint_url(ApiVersion::V2, &["lists", "a/b"])
                .unwrap()
                .as_str(),
            "http://127.0.0.1:9000/proxy/v2/accounts/acme1/lists/a%2Fb"
        );
    }

    #[test]
    fn builder_rejects_malformed_base_url() {
        for base in ["not a url", "mailto:ops@example.com", "ftp://example.com"] {
            let err = ExotelClient::builder(credentials())
                .base_url(base)
                .build()
                .unwrap_err();
            assert!(matches!(err, ExotelError::Config(_)), "{base}");
        }
    }

    #[test]
    fn from_lookup_reads_credentials_and_base_url() {
        let client = ExotelClient::from_lookup(|name| match name {
            ENV_SID => Some("acme1".to_owned()),
            ENV_API_KEY => Some("key".to_owned()),
            ENV_API_TOKEN => Some("token".to_owned()),
            ENV_BASE_URL => Some("https://api.in.exotel.com".to_owned()),
            _ => None,
        })
        .unwrap();
        assert_eq!(client.base_url, "https://api.in.exotel.com");
        assert_eq!(client.credentials().api_key().as_str(), "key");
    }

    #[test]
    fn from_lookup_reports_missing_variables() {
        let err = ExotelClient::from_lookup(|name| match name {
            ENV_SID => Some("acme1".to_owned()),
            ENV_API_KEY => Some("   ".to_owned()),
            _ => None,
        })
        .unwrap_err();
        match err {
            ExotelError::Config(message) => assert!(message.contains(ENV_API_KEY)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn documented_statuses_map_to_their_variant_only() {
        let body = r#"{"response":{"code":0,"error_data":{"description":"why"}}}"#;
        let cases: [(u16, fn(&ExotelError) -> bool); 6] = [
            (400, |e| matches!(e, ExotelError::Validation { .. })),
            (401, |e| matches!(e, ExotelError::AuthenticationFailed { .. })),
            (402, |e| matches!(e, ExotelError::PaymentRequired { .. })),
            (403, |e| matches!(e, ExotelError::PermissionDenied { .. })),
            (404, |e| matches!(e, ExotelError::NotFound { .. })),
            (429, |e| matches!(e, ExotelError::Throttled { .. })),
        ];

        for (status, expected) in cases {
            let err = error_for_status(status, body).unwrap();
            assert!(expected(&err), "{status} mapped to {err:?}");
            assert_eq!(err.status(), Some(status));
            assert_eq!(err.description(), Some("why"));
            let others = cases
                .iter()
                .filter(|(other, check)| *other != status && check(&err))
                .count();
            assert_eq!(others, 0);
        }
    }

    #[test]
    fn success_and_other_statuses() {
        assert!(error_for_status(200, "").is_none());
        assert!(error_for_status(207, "{}").is_none());
        assert!(matches!(
            error_for_status(500, "oops"),
            Some(ExotelError::HttpStatus {
                status: 500,
                body: Some(_)
            })
        ));
        assert!(matches!(
            error_for_status(503, "  "),
            Some(ExotelError::HttpStatus {
                status: 503,
                body: None
            })
        ));
    }

    #[test]
    fn error_display_falls_back_without_description() {
        let err = error_for_status(429, "").unwrap();
        assert_eq!(err.to_string(), "throttled: request was throttled");
        let err = error_for_status(401, r#"{"RestException":{"Message":"bad token"}}"#).unwrap();
        assert_eq!(err.to_string(), "authentication failed: bad token");
    }

    #[tokio::test]
    async fn call_sends_basic_auth_credentials_and_query() {
        let transport = FakeTransport::new();
        transport.respond(200, r#"{"ok":true}"#);
        let client = client_with(transport.clone());

        let value = client
            .get(
                ApiVersion::V2,
                &["campaigns"],
                &[("limit".to_owned(), "5".to_owned())],
            )
            .await
            .unwrap();
        assert_eq!(value["ok"], true);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(
            requests[0].url,
            "https://api.example.invalid/v2/accounts/acme1/campaigns?limit=5"
        );
        assert_eq!(requests[0].api_key, "key");
        assert_eq!(requests[0].api_token, "token");
        assert_eq!(requests[0].body, RequestBody::Empty);
    }

    #[tokio::test]
    async fn empty_success_body_is_null() {
        let transport = FakeTransport::new();
        transport.respond(204, "");
        let client = client_with(transport);
        let value = client.delete(&["lists", "l-1"]).await.unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn invalid_success_body_is_parse_error() {
        let transport = FakeTransport::new();
        transport.respond(200, "{ not json }");
        let client = client_with(transport);
        let err = client
            .get(ApiVersion::V2, &["campaigns"], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ExotelError::Parse(_)));
    }

    #[tokio::test]
    async fn transport_failure_is_transport_error() {
        let transport = FakeTransport::new();
        transport.fail("connection reset");
        let client = client_with(transport);
        let err = client
            .get(ApiVersion::V2, &["campaigns"], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ExotelError::Transport(_)));
    }
}
