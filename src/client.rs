use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{LinearError, Result};

pub const DEFAULT_API_URL: &str = "https://api.linear.app/graphql";

#[derive(Clone)]
pub struct LinearClient {
    http: Client,
    api_key: String,
    api_url: String,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<Value>,
}

#[derive(Deserialize, Debug, Default)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

#[derive(Deserialize, Debug)]
pub struct GraphQLError {
    #[serde(default)]
    pub message: String,
}

impl LinearClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Send one GraphQL request and return the raw `{data, errors}` envelope.
    ///
    /// Server-reported errors come back as [`LinearError::GraphQL`] carrying
    /// the partial data.
    pub async fn execute(
        &self,
        operation: &'static str,
        query: &str,
        variables: Option<Value>,
    ) -> Result<GraphQLResponse> {
        debug!(operation, url = %self.api_url, "Sending GraphQL request");

        let request = GraphQLRequest { query, variables };

        let response = self
            .http
            .post(&self.api_url)
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        let gql_response: GraphQLResponse = match serde_json::from_slice(&body) {
            Ok(decoded) => decoded,
            Err(_) if !status.is_success() => {
                return Err(LinearError::HttpStatus {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("").to_string(),
                });
            }
            Err(e) => return Err(LinearError::Decode(e)),
        };

        if !gql_response.errors.is_empty() {
            let messages: Vec<String> = gql_response
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect();
            warn!(operation, errors = ?messages, "GraphQL request returned errors");
            return Err(LinearError::GraphQL {
                messages,
                data: gql_response.data,
            });
        }

        Ok(gql_response)
    }

    /// Execute and decode `data` into the operation's response shape.
    pub async fn query<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: Option<Value>,
    ) -> Result<T> {
        let response = self.execute(operation, query, variables).await?;

        let data = response.data.ok_or(LinearError::MalformedResponse {
            operation,
            key: "data",
        })?;

        Ok(serde_json::from_value(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubServer;
    use serde_json::json;

    #[test]
    fn test_new_client_defaults() {
        let client = LinearClient::new("test_api_key".to_string());
        assert_eq!(client.api_key(), "test_api_key");
        assert_eq!(client.api_url(), DEFAULT_API_URL);

        let client = client
            .with_url("https://custom.linear.app/graphql")
            .with_http_client(Client::new());
        assert_eq!(client.api_url(), "https://custom.linear.app/graphql");
        assert_eq!(client.api_key(), "test_api_key");
    }

    #[tokio::test]
    async fn test_execute_sends_headers_and_body() {
        let server = StubServer::start(vec![StubServer::json(
            200,
            json!({ "data": { "ok": true } }),
        )])
        .await;
        let client = server.client();

        let response = client
            .execute("Ping", "query Ping { ok }", Some(json!({ "first": 5 })))
            .await
            .unwrap();
        assert_eq!(response.data.unwrap()["ok"], true);

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header("authorization"), Some("test_api_key"));
        assert_eq!(requests[0].header("content-type"), Some("application/json"));
        assert_eq!(requests[0].body["query"], "query Ping { ok }");
        assert_eq!(requests[0].body["variables"], json!({ "first": 5 }));
    }

    #[tokio::test]
    async fn test_execute_omits_missing_variables() {
        let server = StubServer::start(vec![StubServer::json(200, json!({ "data": {} }))]).await;
        server
            .client()
            .execute("Ping", "query { ok }", None)
            .await
            .unwrap();
        assert!(server.requests()[0].body.get("variables").is_none());
    }

    #[tokio::test]
    async fn test_graphql_errors_keep_partial_data() {
        let server = StubServer::start(vec![StubServer::json(
            200,
            json!({
                "data": { "partial": 1 },
                "errors": [{ "message": "first" }, { "message": "second" }]
            }),
        )])
        .await;

        let err = server
            .client()
            .execute("Ping", "query { ok }", None)
            .await
            .unwrap_err();

        match err {
            LinearError::GraphQL { messages, data } => {
                assert_eq!(messages, vec!["first", "second"]);
                assert_eq!(data.unwrap()["partial"], 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_with_bad_status() {
        let server = StubServer::start(vec![StubServer::raw(502, "<html>bad gateway</html>")]).await;
        let err = server
            .client()
            .execute("Ping", "query { ok }", None)
            .await
            .unwrap_err();
        assert!(matches!(err, LinearError::HttpStatus { status: 502, .. }));
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn test_undecodable_body_with_ok_status() {
        let server = StubServer::start(vec![StubServer::raw(200, "not json")]).await;
        let err = server
            .client()
            .execute("Ping", "query { ok }", None)
            .await
            .unwrap_err();
        assert!(matches!(err, LinearError::Decode(_)));
    }

    #[tokio::test]
    async fn test_decodable_body_with_bad_status_is_returned() {
        let server = StubServer::start(vec![StubServer::json(
            400,
            json!({ "errors": [{ "message": "Authentication required" }] }),
        )])
        .await;
        let err = server
            .client()
            .execute("Ping", "query { ok }", None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Authentication required"));
    }

    #[tokio::test]
    async fn test_query_without_data_is_malformed() {
        let server = StubServer::start(vec![StubServer::json(200, json!({}))]).await;
        let err = server
            .client()
            .query::<serde_json::Value>("Ping", "query { ok }", None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LinearError::MalformedResponse { key: "data", .. }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = LinearClient::new("key".to_string()).with_url("http://127.0.0.1:1/graphql");
        let err = client.execute("Ping", "query { ok }", None).await.unwrap_err();
        assert!(matches!(err, LinearError::Http(_)));
    }
}
