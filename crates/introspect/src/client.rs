//! HTTP transport for GraphQL operations.
//!
//! [`GraphQLClient`] POSTs a JSON request body to a single endpoint and returns
//! the decoded response envelope. Transport failures (connection, HTTP status,
//! malformed JSON) are reported as [`IntrospectionError`]; GraphQL-level errors
//! are left in [`GraphQLResponse::errors`] for the caller to display.

use crate::{
    IntrospectionData, IntrospectionError, IntrospectionSchema, Result, INTROSPECTION_QUERY,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Default timeout for a single request (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// A GraphQL request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphQLRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }

    #[must_use]
    pub fn with_variables(mut self, variables: serde_json::Map<String, serde_json::Value>) -> Self {
        self.variables = Some(variables);
        self
    }

    #[must_use]
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

/// A decoded GraphQL response envelope.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

impl GraphQLResponse {
    /// GraphQL errors reported by the server, empty when there were none.
    #[must_use]
    pub fn errors(&self) -> &[GraphQLError] {
        self.errors.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }
}

/// One entry of a response's `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

/// A configurable client bound to one GraphQL endpoint.
///
/// ```no_run
/// use gqlsh_introspect::{GraphQLClient, GraphQLRequest};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GraphQLClient::new("https://api.example.com/graphql")
///     .with_header("Authorization", "Bearer my-token")
///     .with_timeout(Duration::from_secs(60));
///
/// let response = client.execute(&GraphQLRequest::new("{ viewer { id } }")).await?;
/// println!("{:?}", response.data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GraphQLClient {
    endpoint: String,
    headers: HashMap<String, String>,
    timeout: Duration,
}

impl GraphQLClient {
    /// Creates a client with a 30 second request timeout and no custom headers.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            headers: HashMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Adds an HTTP header sent with every request. Values are passed through untouched.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds multiple HTTP headers from an iterator.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Sets the ceiling for a whole request (connection + transfer).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one operation and decodes the response envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or times out, if the
    /// server answers with a non-success HTTP status, or if the body is not a
    /// GraphQL response.
    #[tracing::instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    pub async fn execute(&self, request: &GraphQLRequest) -> Result<GraphQLResponse> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                IntrospectionError::Network(format!("Failed to create HTTP client: {e}"))
            })?;

        let mut http_request = client
            .post(&self.endpoint)
            .header("Content-Type", "application/json");

        for (name, value) in &self.headers {
            http_request = http_request.header(name, value);
        }

        tracing::debug!(query_length = request.query.len(), "Sending request");
        let response = http_request
            .json(request)
            .send()
            .await
            .map_err(|e| IntrospectionError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %error_body, "HTTP error response");
            return Err(IntrospectionError::Http(status.as_u16(), error_body));
        }

        let decoded: GraphQLResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse response body");
            IntrospectionError::Parse(e.to_string())
        })?;

        if decoded.has_errors() {
            tracing::info!(errors = decoded.errors().len(), "Response carried GraphQL errors");
        }

        Ok(decoded)
    }

    /// Runs the introspection query and decodes the schema it describes.
    ///
    /// # Errors
    ///
    /// Besides transport failures, fails when the server reports GraphQL errors
    /// (the first message is surfaced), returns no data, or returns data that
    /// does not match the introspection shape.
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn introspect(&self) -> Result<IntrospectionSchema> {
        tracing::info!("Sending introspection query");
        let response = self
            .execute(
                &GraphQLRequest::new(INTROSPECTION_QUERY).with_operation_name("IntrospectionQuery"),
            )
            .await?;

        if let Some(first) = response.errors().first() {
            return Err(IntrospectionError::GraphQL(first.message.clone()));
        }

        let data = response
            .data
            .ok_or_else(|| IntrospectionError::Invalid("response contained no data".to_string()))?;

        let introspection: IntrospectionData = serde_json::from_value(data).map_err(|e| {
            tracing::error!(error = %e, "Failed to decode introspection data");
            IntrospectionError::Parse(e.to_string())
        })?;

        tracing::info!(
            types = introspection.schema.types.len(),
            directives = introspection.schema.directives.len(),
            "Introspection successful"
        );

        Ok(introspection.schema)
    }
}
