use std::time::Duration;

use gleaner_web::{HttpTransport, RetryConfig, Transport, WebConfig, WebError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

fn transport(max_retries: u32) -> HttpTransport {
    let config = WebConfig {
        retry: RetryConfig {
            max_retries,
            backoff_ms: 10,
        },
        ..Default::default()
    };
    HttpTransport::new(&config).expect("client")
}

#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .expect(1)
        .mount(&server)
        .await;

    let page = transport(3)
        .get(&format!("{}/flaky", server.uri()), TIMEOUT)
        .await
        .expect("page");

    assert_eq!(page.status, 200);
    assert_eq!(page.body, "recovered");
}

#[tokio::test]
async fn exhausted_retries_return_last_status() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let status = transport(2)
        .head(&format!("{}/down", server.uri()), TIMEOUT)
        .await
        .expect("status");

    assert_eq!(status, 502);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let page = transport(3)
        .get(&format!("{}/missing", server.uri()), TIMEOUT)
        .await
        .expect("page");

    assert_eq!(page.status, 404);
}

#[tokio::test]
async fn slow_response_maps_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = transport(0)
        .get(
            &format!("{}/slow", server.uri()),
            Duration::from_millis(100),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, WebError::Timeout(_)), "got {err:?}");
}
