use std::fmt;

use reqwest::{header, Method};

use crate::{
    decode::{build_request, decode_asset, decode_document},
    retry::{AttemptFailure, RequestExecutor},
    wire, AssetInfo, ClientOptions, DocMillError, DocumentBuilder, DocumentInfo, Result,
    RetryConfig,
};

/// Formats a workspace name into the canonical API base URL.
///
/// Example: `"acme"` → `"https://acme.api.docmill.dev"`
pub fn workspace_to_api_url(workspace: &str) -> String {
    format!("https://{}.api.docmill.dev", workspace.trim())
}

#[derive(Clone)]
/// HTTP client for the DocMill document assembly API.
pub struct DocMillClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
    options: ClientOptions,
}

impl fmt::Debug for DocMillClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocMillClient")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl DocMillClient {
    /// Creates a client with a raw authorization header value.
    ///
    /// Example: `"Bearer <token>"` or any custom scheme.
    pub fn new(api_url: impl Into<String>, authorization: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: trim_base_url(api_url.into()),
            token: authorization.into(),
            options: ClientOptions::default(),
        }
    }

    /// Creates a client from a bearer token.
    ///
    /// If the token is missing the `Bearer ` prefix, it is added automatically.
    pub fn new_bearer(api_url: impl Into<String>, token: impl AsRef<str>) -> Self {
        let authorization = normalize_bearer_authorization(token.as_ref());
        Self::new(api_url, authorization)
    }

    /// Creates a client from a **workspace name** and a bearer token.
    ///
    /// The API base URL is derived automatically:
    /// `https://<workspace>.api.docmill.dev`
    ///
    /// This is the most ergonomic constructor when you know the workspace.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docmill_http::DocMillClient;
    ///
    /// let docmill = DocMillClient::from_workspace("acme", "my-token");
    /// ```
    pub fn from_workspace(workspace: impl AsRef<str>, token: impl AsRef<str>) -> Self {
        let url = workspace_to_api_url(workspace.as_ref());
        Self::new_bearer(url, token)
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `DOCMILL_API_URL` — full API base URL
    ///   (e.g. `https://<workspace>.api.docmill.dev`)
    /// - `DOCMILL_TOKEN` — access token (Bearer prefix optional)
    ///
    /// Returns a [`DocMillError::Validation`] if either variable is missing
    /// or empty.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docmill_http::DocMillClient;
    ///
    /// let docmill = DocMillClient::from_env().expect("missing DOCMILL_* env vars");
    /// ```
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("DOCMILL_API_URL").map_err(|_| {
            DocMillError::Validation("missing DOCMILL_API_URL environment variable".to_owned())
        })?;
        let token = std::env::var("DOCMILL_TOKEN").map_err(|_| {
            DocMillError::Validation("missing DOCMILL_TOKEN environment variable".to_owned())
        })?;
        if url.trim().is_empty() {
            return Err(DocMillError::Validation(
                "DOCMILL_API_URL is set but empty".to_owned(),
            ));
        }
        if token.trim().is_empty() {
            return Err(DocMillError::Validation(
                "DOCMILL_TOKEN is set but empty".to_owned(),
            ));
        }
        Ok(Self::new_bearer(url, token))
    }

    /// Creates a client from a **workspace name** read from the environment,
    /// combined with an access token also read from the environment.
    ///
    /// Reads:
    /// - `DOCMILL_WORKSPACE` — the workspace name (e.g. `acme`)
    /// - `DOCMILL_TOKEN` — access token
    ///
    /// The API base URL is derived from the workspace automatically.
    pub fn from_env_workspace() -> Result<Self> {
        let workspace = std::env::var("DOCMILL_WORKSPACE").map_err(|_| {
            DocMillError::Validation("missing DOCMILL_WORKSPACE environment variable".to_owned())
        })?;
        let token = std::env::var("DOCMILL_TOKEN").map_err(|_| {
            DocMillError::Validation("missing DOCMILL_TOKEN environment variable".to_owned())
        })?;
        if workspace.trim().is_empty() {
            return Err(DocMillError::Validation(
                "DOCMILL_WORKSPACE is set but empty".to_owned(),
            ));
        }
        if token.trim().is_empty() {
            return Err(DocMillError::Validation(
                "DOCMILL_TOKEN is set but empty".to_owned(),
            ));
        }
        Ok(Self::from_workspace(workspace, token))
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Overrides only the retry configuration.
    ///
    /// The client is cheap to clone, so a per-call override is one clone
    /// away:
    ///
    /// ```no_run
    /// use docmill_http::{DocMillClient, RetryConfig};
    ///
    /// # let docmill = DocMillClient::from_workspace("acme", "token");
    /// let eager = docmill.clone().with_retry(RetryConfig::no_retries());
    /// ```
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.options.retry = retry;
        self
    }

    /// Uploads a binary asset for later placement in documents.
    pub async fn upload_asset(&self, name: &str, bytes: impl Into<Vec<u8>>) -> Result<AssetInfo> {
        let bytes = bytes.into();
        if name.trim().is_empty() {
            return Err(DocMillError::Validation(
                "asset name cannot be empty".to_owned(),
            ));
        }
        if bytes.is_empty() {
            return Err(DocMillError::Validation(
                "asset payload cannot be empty".to_owned(),
            ));
        }

        let spec = RequestSpec {
            method: Method::POST,
            url: format!("{}/v1/assets", self.api_url),
            query: vec![("name", name.to_owned())],
            payload: Payload::Octets(bytes),
        };
        let body = self.execute(&spec).await?;
        decode_asset(parse_json::<wire::AssetEnvelope>(&body)?)
    }

    /// Submits a document description and returns the stored document's
    /// metadata once the service has rendered it.
    pub async fn build(&self, document: DocumentBuilder) -> Result<DocumentInfo> {
        let request = build_request(document)?;
        let payload = serde_json::to_value(&request).map_err(|err| {
            DocMillError::Validation(format!("failed to encode build request: {err}"))
        })?;

        let spec = RequestSpec {
            method: Method::POST,
            url: format!("{}/v1/documents", self.api_url),
            query: Vec::new(),
            payload: Payload::Json(payload),
        };
        let body = self.execute(&spec).await?;
        decode_document(parse_json::<wire::DocumentEnvelope>(&body)?)
    }

    /// Fetches metadata for a stored document.
    pub async fn document(&self, id: &str) -> Result<DocumentInfo> {
        let id = valid_document_id(id)?;
        let spec = RequestSpec {
            method: Method::GET,
            url: format!("{}/v1/documents/{id}", self.api_url),
            query: Vec::new(),
            payload: Payload::Empty,
        };
        let body = self.execute(&spec).await?;
        decode_document(parse_json::<wire::DocumentEnvelope>(&body)?)
    }

    /// Downloads the rendered document bytes.
    pub async fn download(&self, id: &str) -> Result<Vec<u8>> {
        let id = valid_document_id(id)?;
        let spec = RequestSpec {
            method: Method::GET,
            url: format!("{}/v1/documents/{id}/content", self.api_url),
            query: Vec::new(),
            payload: Payload::Empty,
        };
        self.execute(&spec).await
    }

    /// Deletes a stored document and its rendered content.
    pub async fn delete_document(&self, id: &str) -> Result<()> {
        let id = valid_document_id(id)?;
        let spec = RequestSpec {
            method: Method::DELETE,
            url: format!("{}/v1/documents/{id}", self.api_url),
            query: Vec::new(),
            payload: Payload::Empty,
        };
        self.execute(&spec).await?;
        Ok(())
    }

    /// Runs one request through the retry executor.
    ///
    /// The retry configuration is snapshotted here, so option changes never
    /// affect an operation already in flight.
    async fn execute(&self, spec: &RequestSpec) -> Result<Vec<u8>> {
        let executor = RequestExecutor::new(self.options.retry.clone());
        executor.run(|| self.attempt(spec)).await
    }

    /// Performs a single attempt. This is the only place that touches the
    /// network; everything above it is classification and waiting.
    async fn attempt(&self, spec: &RequestSpec) -> std::result::Result<Vec<u8>, AttemptFailure> {
        let mut request = self
            .http
            .request(spec.method.clone(), &spec.url)
            .header(header::AUTHORIZATION, &self.token)
            .timeout(self.options.timeout);
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        request = match &spec.payload {
            Payload::Empty => request,
            Payload::Json(value) => request.json(value),
            Payload::Octets(bytes) => request
                .header(header::CONTENT_TYPE, "application/octet-stream")
                .body(bytes.clone()),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return Err(AttemptFailure::Network(err)),
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(err) => return Err(AttemptFailure::Network(err)),
        };

        if status.is_success() {
            Ok(body)
        } else {
            Err(AttemptFailure::Http {
                status,
                headers,
                body,
            })
        }
    }
}

/// One request described independently of the attempt that sends it, so
/// the executor can replay it without rebuilding operation state.
struct RequestSpec {
    method: Method,
    url: String,
    query: Vec<(&'static str, String)>,
    payload: Payload,
}

enum Payload {
    Empty,
    Json(serde_json::Value),
    Octets(Vec<u8>),
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|err| {
        DocMillError::Decode(format!(
            "invalid response JSON: {err}; body: {}",
            String::from_utf8_lossy(body)
        ))
    })
}

fn valid_document_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DocMillError::Validation(
            "document id cannot be empty".to_owned(),
        ));
    }
    Ok(id)
}

fn trim_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

fn normalize_bearer_authorization(token: &str) -> String {
    let trimmed = token.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed.to_owned()
    } else {
        format!("Bearer {trimmed}")
    }
}
