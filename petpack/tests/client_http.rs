mod support;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use petpack::types::content::Content;
use petpack::{Client, Error};

use support::image_response;

#[tokio::test]
async fn api_key_header_is_inserted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/m:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .build()
        .unwrap();
    client
        .models()
        .generate_content("m", vec![Content::text("hi")])
        .await
        .unwrap();
}

#[tokio::test]
async fn api_key_header_respects_custom_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/models/m:generateContent"))
        .and(header("x-goog-api-key", "custom-key"))
        .and(header("x-trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .api_key("test-key")
        .header("x-goog-api-key", "custom-key")
        .header("x-trace", "abc")
        .api_version("v1")
        .base_url(server.uri())
        .build()
        .unwrap();
    client
        .models()
        .generate_content("m", vec![Content::text("hi")])
        .await
        .unwrap();
}

#[tokio::test]
async fn slow_responses_map_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(image_response())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = Client::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .timeout(1)
        .build()
        .unwrap();
    let err = client
        .models()
        .generate_content("m", vec![Content::text("hi")])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout { .. }));
}
