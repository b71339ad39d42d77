use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use graphql_web::prelude::*;
use http::HeaderValue;
use serde_json::json;

#[path = "support/mock_engine.rs"]
mod support;

use support::{PendingEngine, RecordingEngine};

fn hello_engine() -> Arc<RecordingEngine> {
    RecordingEngine::returning_json(json!({ "data": { "hello": "world" } }))
}

#[tokio::test]
async fn hello_query_returns_engine_data() {
    let engine = hello_engine();
    let handler = GraphQlHandler::new(engine.clone());

    let resp = handler
        .handle(br#"{"query":"{ hello }"}"#, &HeaderMap::new())
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.content_type(), "application/json");
    assert_eq!(resp.body().as_ref(), br#"{"data":{"hello":"world"}}"#);
    assert_eq!(engine.call_count(), 1);
}

#[tokio::test]
async fn blank_or_missing_query_never_reaches_engine() {
    let engine = hello_engine();
    let handler = GraphQlHandler::new(engine.clone());

    for body in [
        r#"{"query":""}"#,
        r#"{"query":"   "}"#,
        r#"{"query":null}"#,
        r#"{"operationName":"Q","variables":{}}"#,
    ] {
        let resp = handler.handle(body.as_bytes(), &HeaderMap::new()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        let json = resp.json().unwrap();
        assert!(json.get("data").is_none());
        assert!(json["errors"][0]["message"].as_str().unwrap().contains("query"));
    }
    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn malformed_body_is_client_error() {
    let engine = hello_engine();
    let handler = GraphQlHandler::new(engine.clone());

    for body in ["", "{", "[]", r#"{"query":{"nested":true}}"#] {
        let resp = handler.handle(body.as_bytes(), &HeaderMap::new()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
    }
    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn engine_errors_are_a_successful_response() {
    let engine = RecordingEngine::returning_json(json!({
        "data": null,
        "errors": [{ "message": "boom" }]
    }));
    let handler = GraphQlHandler::new(engine.clone());

    let resp = handler
        .handle(br#"{"query":"{ explode }"}"#, &HeaderMap::new())
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.body().as_ref(),
        br#"{"data":null,"errors":[{"message":"boom"}]}"#
    );
    assert_eq!(engine.call_count(), 1);
}

#[tokio::test]
async fn structured_engine_errors_pass_through_verbatim() {
    let errors = json!([{
        "message": "Cannot query field 'nope' on type 'Query'",
        "locations": [{ "line": 1, "column": 3 }],
        "path": ["viewer", 0, "nope"],
        "extensions": { "classification": "ValidationError" }
    }]);
    let engine = RecordingEngine::returning_json(json!({ "data": { "viewer": [null] }, "errors": errors }));
    let handler = GraphQlHandler::new(engine);

    let resp = handler
        .handle(br#"{"query":"{ viewer { nope } }"}"#, &HeaderMap::new())
        .await;

    let body = resp.json().unwrap();
    assert_eq!(body["errors"], errors);
    assert_eq!(body["data"], json!({ "viewer": [null] }));
}

#[tokio::test]
async fn engine_failure_is_server_error_without_data() {
    let engine = RecordingEngine::failing("connection pool timed out");
    let handler = GraphQlHandler::new(engine.clone());

    let resp = handler
        .handle(br#"{"query":"{ hello }"}"#, &HeaderMap::new())
        .await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = resp.json().unwrap();
    assert!(body.get("data").is_none());
    assert_eq!(body["errors"][0]["message"], json!("internal error"));
    assert_eq!(engine.call_count(), 1);
}

#[tokio::test]
async fn development_config_reveals_engine_failure() {
    let handler = GraphQlHandler::builder(RecordingEngine::failing("connection pool timed out"))
        .config(HandlerConfig::development())
        .build();

    let resp = handler
        .handle(br#"{"query":"{ hello }"}"#, &HeaderMap::new())
        .await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        resp.json().unwrap()["errors"][0]["message"],
        json!("GraphQL execution failed: connection pool timed out")
    );
}

#[tokio::test]
async fn identical_requests_produce_identical_bodies() {
    let handler = GraphQlHandler::new(RecordingEngine::returning_json(json!({
        "data": { "items": [1, 2, 3], "meta": { "b": true, "a": "x" } },
        "errors": [{ "message": "partial" }]
    })));
    let body = br#"{"query":"{ items meta }","variables":{"x":1}}"#;

    let first = handler.handle(body, &HeaderMap::new()).await;
    let second = handler.handle(body, &HeaderMap::new()).await;

    assert_eq!(first.status(), second.status());
    assert_eq!(first.body(), second.body());
}

#[tokio::test]
async fn default_hooks_are_identity() {
    let result: ExecutionResult = serde_json::from_value(json!({
        "data": { "user": { "id": "42" } },
        "extensions": { "cost": 3 }
    }))
    .unwrap();
    let engine = RecordingEngine::returning(result.clone());
    let handler = GraphQlHandler::new(engine.clone());
    let request = RequestInput::new("query U($id: ID!) { user(id: $id) { id } }")
        .with_operation_name("U")
        .with_variables(json!({ "id": "42" }).as_object().unwrap().clone());
    let body = serde_json::to_vec(&request).unwrap();

    let resp = handler.handle(&body, &HeaderMap::new()).await;

    let received = engine.calls().pop().unwrap();
    assert_eq!(received, ExecutionInput::try_from(request).unwrap());
    assert_eq!(
        resp.into_body(),
        graphql_web::codec::encode_result(&result, Default::default()).unwrap()
    );
}

#[tokio::test]
async fn request_fields_are_forwarded() {
    let engine = hello_engine();
    let handler = GraphQlHandler::new(engine.clone());

    handler
        .handle(
            br#"{"query":"query A { a } query B { b }","operationName":"B","variables":{"n":1},"extensions":{"persistedQuery":{"version":1}}}"#,
            &HeaderMap::new(),
        )
        .await;

    let input = engine.calls().pop().unwrap();
    assert_eq!(input.query(), "query A { a } query B { b }");
    assert_eq!(input.operation_name(), Some("B"));
    assert_eq!(input.variables().get("n"), Some(&json!(1)));
    assert_eq!(
        input.extensions().get("persistedQuery"),
        Some(&json!({ "version": 1 }))
    );
}

struct RequireTenant;

#[async_trait]
impl GraphQlInterceptor for RequireTenant {
    async fn pre_handle(
        &self,
        input: ExecutionInput,
        headers: &HeaderMap,
    ) -> Result<ExecutionInput, GraphQlWebError> {
        if headers.contains_key("x-tenant-id") {
            Ok(input)
        } else {
            Err(GraphQlWebError::interceptor("tenant", "missing tenant"))
        }
    }
}

struct StampExtensions;

#[async_trait]
impl GraphQlInterceptor for StampExtensions {
    async fn post_handle(
        &self,
        input: &ExecutionInput,
        result: ExecutionResult,
    ) -> Result<ExecutionResult, GraphQlWebError> {
        let tenant = input.context()["headers"]["x-tenant-id"].clone();
        Ok(result.with_extension("tenant", tenant))
    }
}

fn tenant_handler(engine: Arc<RecordingEngine>) -> GraphQlHandler {
    GraphQlHandler::builder(engine)
        .interceptor("tenant", Arc::new(RequireTenant))
        .interceptor("headers", Arc::new(HeaderContextInterceptor::new(["x-tenant-id"])))
        .interceptor("stamp", Arc::new(StampExtensions))
        .interceptor("logging", Arc::new(LoggingInterceptor))
        .build()
}

#[tokio::test]
async fn interceptors_customize_input_and_result() {
    let engine = hello_engine();
    let handler = tenant_handler(engine.clone());
    let mut headers = HeaderMap::new();
    headers.insert("x-tenant-id", HeaderValue::from_static("acme"));

    let resp = handler.handle(br#"{"query":"{ hello }"}"#, &headers).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.json().unwrap(),
        json!({ "data": { "hello": "world" }, "extensions": { "tenant": "acme" } })
    );
    let input = engine.calls().pop().unwrap();
    assert_eq!(input.context()["headers"], json!({ "x-tenant-id": "acme" }));
}

#[tokio::test]
async fn rejecting_interceptor_stops_before_engine() {
    let engine = hello_engine();
    let handler = tenant_handler(engine.clone());

    let outcome = handler
        .process(br#"{"query":"{ hello }"}"#, &HeaderMap::new())
        .await;
    assert!(matches!(outcome, Err(GraphQlWebError::Interceptor { .. })));

    let resp = handler
        .handle(br#"{"query":"{ hello }"}"#, &HeaderMap::new())
        .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn cancel_handle_drops_in_flight_execution() {
    let engine = PendingEngine::new();
    let handler = Arc::new(GraphQlHandler::new(engine.clone()));
    let cancel = CancelHandle::new();

    let task = {
        let handler = handler.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            handler
                .handle_with_cancel(br#"{"query":"{ slow }"}"#, &HeaderMap::new(), &cancel)
                .await
        })
    };

    engine.started().await;
    assert!(!engine.was_dropped());
    cancel.cancel();

    let outcome = task.await.unwrap();
    assert!(matches!(outcome, Err(GraphQlWebError::Cancelled)));
    assert!(engine.was_dropped());
}

#[tokio::test]
async fn dropping_the_request_future_cancels_the_engine() {
    let engine = PendingEngine::new();
    let handler = GraphQlHandler::new(engine.clone());

    let outcome = tokio::time::timeout(
        Duration::from_millis(50),
        handler.handle(br#"{"query":"{ slow }"}"#, &HeaderMap::new()),
    )
    .await;

    assert!(outcome.is_err());
    assert!(engine.was_dropped());
}

#[tokio::test]
async fn completed_request_ignores_late_cancel() {
    let handler = GraphQlHandler::new(hello_engine());
    let cancel = CancelHandle::new();

    let resp = handler
        .handle_with_cancel(br#"{"query":"{ hello }"}"#, &HeaderMap::new(), &cancel)
        .await
        .unwrap();
    cancel.cancel();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_share_one_engine() {
    let engine = hello_engine();
    let handler = Arc::new(GraphQlHandler::new(engine.clone()));

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let handler = handler.clone();
            tokio::spawn(async move {
                let body = format!(r#"{{"query":"{{ hello }}","variables":{{"i":{i}}}}}"#);
                handler.handle(body.as_bytes(), &HeaderMap::new()).await
            })
        })
        .collect();

    for task in tasks {
        let resp = task.await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let calls = engine.calls();
    assert_eq!(calls.len(), 32);
    let mut seen: Vec<i64> = calls
        .iter()
        .map(|c| c.variables()["i"].as_i64().unwrap())
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..32).collect::<Vec<i64>>());
    let mut ids: Vec<_> = calls.iter().map(ExecutionInput::execution_id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 32);
}

#[tokio::test]
async fn execute_request_skips_decoding() {
    let handler = GraphQlHandler::new(hello_engine());
    let result = handler
        .execute_request(RequestInput::new("{ hello }"), &HeaderMap::new())
        .await
        .unwrap();
    assert_eq!(result.data(), Some(&json!({ "hello": "world" })));

    let err = handler
        .execute_request(RequestInput::default(), &HeaderMap::new())
        .await
        .unwrap_err();
    assert!(err.is_client_error());
}

#[tokio::test]
async fn response_keeps_engine_field_order() {
    let result: ExecutionResult =
        serde_json::from_str(r#"{"data":{"zeta":1,"alpha":2,"mid":{"y":0,"b":1}}}"#).unwrap();
    let handler = GraphQlHandler::new(RecordingEngine::returning(result));

    let resp = handler
        .handle(br#"{"query":"{ zeta alpha mid { y b } }"}"#, &HeaderMap::new())
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.body().as_ref(),
        br#"{"data":{"zeta":1,"alpha":2,"mid":{"y":0,"b":1}}}"#
    );
}

struct FailAfterExecution;

#[async_trait]
impl GraphQlInterceptor for FailAfterExecution {
    async fn post_handle(
        &self,
        _input: &ExecutionInput,
        _result: ExecutionResult,
    ) -> Result<ExecutionResult, GraphQlWebError> {
        Err(GraphQlWebError::Serialization("audit sink unavailable".into()))
    }
}

#[tokio::test]
async fn failing_post_interceptor_discards_engine_result() {
    let engine = hello_engine();
    let handler = GraphQlHandler::builder(engine.clone())
        .interceptor("audit", Arc::new(FailAfterExecution))
        .interceptor("logging", Arc::new(LoggingInterceptor))
        .build();

    let outcome = handler
        .process(br#"{"query":"{ hello }"}"#, &HeaderMap::new())
        .await;
    match outcome {
        Err(GraphQlWebError::Interceptor { name, .. }) => assert_eq!(name, "audit"),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let resp = handler
        .handle(br#"{"query":"{ hello }"}"#, &HeaderMap::new())
        .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        resp.body().as_ref(),
        br#"{"errors":[{"message":"internal error"}]}"#
    );
    assert_eq!(engine.call_count(), 2);
}
