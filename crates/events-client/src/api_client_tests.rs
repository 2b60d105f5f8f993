//! Tests for response interpretation and the HTTP transport.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use actix_web::{App, HttpResponse, HttpServer, dev::ServerHandle, web};
use events_dto::{EventDto, event_assertion, events_array_assertion};
use rstest::rstest;
use serde_json::json;

use super::*;

fn event_json(id: i64) -> Value {
    json!({
        "id": id,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "date": "2024-05-01T10:00:00.000Z"
    })
}

#[rstest]
fn valid_success_envelope_is_accepted() {
    let body = json!({"success": true, "statusCode": 200, "data": event_json(1)});
    let response = interpret::<EventDto>(true, body, event_assertion());
    assert_eq!(response.status_code(), Some(200));
    assert_eq!(
        response.data().map(|event| event.email.as_str()),
        Some("ada@example.com")
    );
}

#[rstest]
fn invalid_data_becomes_local_assertion_failure() {
    let mut data = event_json(1);
    data["email"] = json!("not-an-email");
    let body = json!({"success": true, "statusCode": 200, "data": data});

    let ApiResponse::Error(failure) = interpret::<EventDto>(true, body, event_assertion()) else {
        panic!("expected failure");
    };
    assert_eq!(failure.status_code(), None);
    assert_eq!(failure.error().name, "DtoAssertionError");
    assert!(failure.error().message.starts_with("EventDto:"));
}

#[rstest]
fn error_envelope_is_returned_as_received() {
    let body = json!({
        "success": false,
        "statusCode": 400,
        "error": {"name": "BadRequest", "message": "Event with id '9' doesn't exist."}
    });
    let ApiResponse::Error(failure) = interpret::<EventDto>(false, body, event_assertion()) else {
        panic!("expected failure");
    };
    assert_eq!(failure.status_code(), Some(400));
    assert_eq!(failure.error().name, "BadRequest");
    assert_eq!(failure.error().message, "Event with id '9' doesn't exist.");
}

#[rstest]
fn error_envelope_on_success_transport_is_still_an_error() {
    let body = json!({
        "success": false,
        "statusCode": 404,
        "error": {"name": "NotFoundException", "message": "gone"}
    });
    let response = interpret::<EventDto>(true, body, event_assertion());
    assert!(!response.is_success());
    assert_eq!(response.status_code(), Some(404));
}

#[rstest]
#[case::text(Value::String("<html>bad gateway</html>".to_owned()))]
#[case::empty_object(json!({}))]
#[case::half_envelope(json!({"success": false, "statusCode": 502}))]
fn unrecognised_bodies_have_no_status(#[case] body: Value) {
    let ApiResponse::Error(failure) = interpret::<EventDto>(false, body, event_assertion()) else {
        panic!("expected failure");
    };
    assert_eq!(failure.status_code(), None);
    assert_eq!(failure.error().name, "DtoAssertionError");
    assert!(failure.to_string().starts_with("(NaN status) DtoAssertionError : "));
}

#[rstest]
#[case("http://localhost:3001", "http://localhost:3001/")]
#[case("http://localhost:3001/api", "http://localhost:3001/api/")]
#[case("http://localhost:3001/api/", "http://localhost:3001/api/")]
fn base_urls_gain_a_trailing_slash(#[case] raw: &str, #[case] expected: &str) {
    let url = parse_base_url(raw).expect("valid base url");
    assert_eq!(url.as_str(), expected);
}

#[rstest]
#[case("not a url")]
#[case("mailto:someone@example.com")]
fn unusable_base_urls_are_rejected(#[case] raw: &str) {
    let err = ApiClient::new(&ClientConfig::new(raw)).expect_err("base url must be rejected");
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

async fn canned_event() -> HttpResponse {
    HttpResponse::Ok().json(json!({"success": true, "statusCode": 200, "data": event_json(7)}))
}

async fn canned_list() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "statusCode": 200,
        "data": [event_json(1), event_json(2)]
    }))
}

async fn canned_error() -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "success": false,
        "statusCode": 400,
        "error": {"name": "BadRequest", "message": "nope"}
    }))
}

async fn canned_gateway() -> HttpResponse {
    HttpResponse::BadGateway()
        .content_type("text/html")
        .body("<html>bad gateway</html>")
}

async fn echo(body: web::Json<Value>) -> HttpResponse {
    let mut data = event_json(3);
    data["email"] = body.get("email").cloned().unwrap_or(Value::Null);
    HttpResponse::Created().json(json!({"success": true, "statusCode": 201, "data": data}))
}

fn start_canned_server() -> (SocketAddr, ServerHandle) {
    let server = HttpServer::new(|| {
        App::new()
            .route("/events", web::get().to(canned_list))
            .route("/events", web::post().to(echo))
            .route("/events/7", web::get().to(canned_event))
            .route("/events/8", web::get().to(canned_error))
            .route("/events/9", web::get().to(canned_gateway))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind canned server");
    let addr = server
        .addrs()
        .first()
        .copied()
        .expect("bound address");
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (addr, handle)
}

fn client_for(addr: SocketAddr, timeout: Duration) -> ApiClient {
    ApiClient::new(&ClientConfig::new(format!("http://{addr}")).with_timeout(timeout))
        .expect("client builds")
}

#[actix_web::test]
async fn sends_requests_and_validates_responses() {
    let (addr, handle) = start_canned_server();
    let client = client_for(addr, Duration::from_secs(5));

    let list: ApiResponse<Vec<EventDto>> = client.get("/events", events_array_assertion()).await;
    assert_eq!(list.data().map(Vec::len), Some(2));

    let single: ApiResponse<EventDto> = client.get("events/7", event_assertion()).await;
    assert_eq!(single.data().map(|event| event.id.get()), Some(7));

    let created: ApiResponse<EventDto> = client
        .post("events", &json!({"email": "echo@example.com"}), event_assertion())
        .await;
    assert_eq!(created.status_code(), Some(201));
    assert_eq!(
        created.data().map(|event| event.email.as_str()),
        Some("echo@example.com")
    );

    let rejected: ApiResponse<EventDto> = client.get("events/8", event_assertion()).await;
    assert_eq!(rejected.status_code(), Some(400));

    let gateway: ApiResponse<EventDto> = client.get("events/9", event_assertion()).await;
    let ApiResponse::Error(failure) = gateway else {
        panic!("expected failure");
    };
    assert_eq!(failure.status_code(), None);

    handle.stop(true).await;
}

#[actix_web::test]
async fn silent_servers_time_out() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind silent listener");
    let addr = listener.local_addr().expect("listener address");
    let client = client_for(addr, Duration::from_millis(200));

    let response: ApiResponse<EventDto> = client.get("events", event_assertion()).await;

    let ApiResponse::Error(failure) = response else {
        panic!("expected failure");
    };
    assert_eq!(failure.status_code(), None);
    assert_eq!(failure.error().name, "TimeoutError");
    drop(listener);
}

#[actix_web::test]
async fn refused_connections_are_network_errors() {
    let addr = TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("reserve a port");
    let client = client_for(addr, Duration::from_secs(2));

    let response: ApiResponse<EventDto> = client.get("events", event_assertion()).await;

    let ApiResponse::Error(failure) = response else {
        panic!("expected failure");
    };
    assert_eq!(failure.status_code(), None);
    assert_eq!(failure.error().name, "NetworkError");
}
