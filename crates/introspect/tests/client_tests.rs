use gqlsh_introspect::{
    introspect_sdl, GraphQLClient, GraphQLRequest, IntrospectionError, IntrospectionType,
};
use gqlsh_test_utils::assertions::{assert_contains_all, assert_in_order};
use gqlsh_test_utils::fixtures::blog_introspection_response;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> GraphQLClient {
    GraphQLClient::new(format!("{}/graphql", server.uri()))
}

#[tokio::test]
async fn test_execute_returns_data_and_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(serde_json::json!({ "query": "{ users { id } }" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "users": [{ "id": "1" }] },
            "errors": [{ "message": "partial failure" }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .execute(&GraphQLRequest::new("{ users { id } }"))
        .await
        .unwrap();

    assert_eq!(
        response.data,
        Some(serde_json::json!({ "users": [{ "id": "1" }] }))
    );
    assert_eq!(response.errors()[0].message, "partial failure");
}

#[tokio::test]
async fn test_headers_are_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Authorization", "Bearer secret"))
        .and(header("Content-Type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": { "ok": true } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)
        .await
        .with_header("Authorization", "Bearer secret");
    let response = client.execute(&GraphQLRequest::new("{ ok }")).await.unwrap();
    assert!(!response.has_errors());
}

#[tokio::test]
async fn test_http_error_status_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .execute(&GraphQLRequest::new("{ ok }"))
        .await
        .unwrap_err();

    match err {
        IntrospectionError::Http(status, body) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .execute(&GraphQLRequest::new("{ ok }"))
        .await
        .unwrap_err();
    assert!(matches!(err, IntrospectionError::Parse(_)));
}

#[tokio::test]
async fn test_slow_server_hits_the_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "data": {} }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .with_timeout(Duration::from_millis(200))
        .execute(&GraphQLRequest::new("{ ok }"))
        .await
        .unwrap_err();
    assert!(matches!(err, IntrospectionError::Network(_)));
}

#[tokio::test]
async fn test_introspect_decodes_fixture() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(
            serde_json::json!({ "operationName": "IntrospectionQuery" }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(blog_introspection_response()))
        .mount(&server)
        .await;

    let schema = client_for(&server).await.introspect().await.unwrap();

    assert_eq!(schema.query_type.unwrap().name, "Query");
    assert_eq!(schema.mutation_type.unwrap().name, "Mutation");
    assert!(schema.subscription_type.is_none());
    assert!(schema
        .types
        .iter()
        .any(|t| matches!(t, IntrospectionType::Union(u) if u.name == "SearchResult")));
}

#[tokio::test]
async fn test_introspection_graphql_error_fails_the_load() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": null,
            "errors": [{ "message": "introspection is disabled" }, { "message": "second" }]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).await.introspect().await.unwrap_err();
    match err {
        IntrospectionError::GraphQL(message) => assert_eq!(message, "introspection is disabled"),
        other => panic!("expected GraphQL error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_introspection_without_data_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let err = client_for(&server).await.introspect().await.unwrap_err();
    assert!(matches!(err, IntrospectionError::Invalid(_)));
}

#[tokio::test]
async fn test_introspect_sdl_renders_the_fixture() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(blog_introspection_response()))
        .mount(&server)
        .await;

    let sdl = introspect_sdl(&client_for(&server).await).await.unwrap();

    assert_in_order(
        &sdl,
        &[
            "schema {\n  query: Query\n  mutation: Mutation\n}",
            "type Query {",
            "type Mutation {",
            "interface Node {",
            "type User implements Node {",
            "union SearchResult = User | Post",
            "enum Role {",
            "input CreateUserInput {",
            "scalar DateTime",
            "directive @cacheControl(maxAge: Int) on FIELD_DEFINITION | OBJECT",
        ],
    );
    assert_contains_all(
        &sdl,
        &[
            "  users(first: Int = 10, role: Role): [User!]!\n",
            "  GUEST @deprecated(reason: \"Use MEMBER\")\n",
            "  username: String @deprecated(reason: \"Use `name`.\")\n",
            "  role: Role = MEMBER\n",
            "\"A registered account\"\ntype User",
        ],
    );
    assert!(!sdl.contains("__Schema"));
    assert!(!sdl.contains("scalar String"));
    assert!(!sdl.contains("directive @skip"));
    assert!(!sdl.contains("directive @deprecated"));
    assert!(sdl.ends_with("OBJECT\n"));
}
