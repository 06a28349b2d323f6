//! Integration tests for the Figma HTTP client against a loopback stub.

mod common;

use serde_json::json;

use figma_tokens_mcp::figma::{FigmaError, ImageExportRequest, ImageFormat};

use common::{client, header, request_line, stub_figma, TEST_TOKEN};

#[tokio::test]
async fn get_file_sends_token_and_returns_body() {
    let body = json!({"name": "Design System", "document": {"type": "DOCUMENT", "children": []}});
    let (base_url, requests) = stub_figma(1, "200 OK", body.to_string()).await;

    let file = client(&base_url).get_file("FILE123").await.unwrap();
    assert_eq!(file, body);

    let requests = requests.await.unwrap();
    assert_eq!(request_line(&requests[0]), "GET /v1/files/FILE123 HTTP/1.1");
    assert_eq!(header(&requests[0], "x-figma-token"), Some(TEST_TOKEN));
}

#[tokio::test]
async fn non_success_status_reports_reason_phrase() {
    let (base_url, requests) =
        stub_figma(1, "403 Forbidden", r#"{"status":403,"err":"Invalid token"}"#.to_string())
            .await;

    let err = client(&base_url).get_file("FILE123").await.unwrap_err();
    assert!(matches!(err, FigmaError::Api { .. }));
    assert_eq!(err.to_string(), "Figma API error: Forbidden");

    requests.await.unwrap();
}

#[tokio::test]
async fn get_file_document_decodes_tree() {
    let body = json!({
        "name": "Tokens",
        "version": "123",
        "document": {
            "type": "DOCUMENT",
            "children": [{"type": "CANVAS", "children": [{"type": "TEXT"}]}]
        }
    });
    let (base_url, requests) = stub_figma(1, "200 OK", body.to_string()).await;

    let file = client(&base_url).get_file_document("KEY").await.unwrap();
    assert_eq!(file.name.as_deref(), Some("Tokens"));
    assert_eq!(file.document.children().len(), 1);
    assert!(file.document.children()[0].children()[0].is_text());

    requests.await.unwrap();
}

#[tokio::test]
async fn missing_document_is_a_decode_error() {
    let (base_url, requests) = stub_figma(1, "200 OK", r#"{"name": "Empty"}"#.to_string()).await;

    let err = client(&base_url)
        .get_file_document("KEY")
        .await
        .unwrap_err();
    assert!(matches!(err, FigmaError::Decode { .. }));

    requests.await.unwrap();
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let (base_url, requests) = stub_figma(1, "200 OK", "<html>oops</html>".to_string()).await;

    let err = client(&base_url).get_file("KEY").await.unwrap_err();
    assert!(matches!(err, FigmaError::Decode { .. }));

    requests.await.unwrap();
}

#[tokio::test]
async fn export_images_builds_query_and_returns_images() {
    let body = json!({
        "err": null,
        "images": {
            "1:2": "https://figma-alpha-api.s3.us-west-2.amazonaws.com/images/a",
            "3:4": "https://figma-alpha-api.s3.us-west-2.amazonaws.com/images/b"
        }
    });
    let (base_url, requests) = stub_figma(1, "200 OK", body.to_string()).await;

    let request = ImageExportRequest::new(
        vec!["1:2".to_string(), "3:4".to_string()],
        ImageFormat::Svg,
        None,
    )
    .unwrap();
    let images = client(&base_url)
        .export_images("KEY", &request)
        .await
        .unwrap();
    assert_eq!(images, body["images"]);

    let requests = requests.await.unwrap();
    let line = request_line(&requests[0]);
    assert!(line.starts_with("GET /v1/images/KEY?"));
    assert!(line.contains("ids=1%3A2%2C3%3A4"));
    assert!(line.contains("format=svg"));
    assert!(line.contains("scale=2"));
}

#[tokio::test]
async fn export_without_images_field_is_null() {
    let (base_url, requests) = stub_figma(1, "200 OK", r#"{"err": null}"#.to_string()).await;

    let request =
        ImageExportRequest::new(vec!["1:2".to_string()], ImageFormat::Png, Some(1.5)).unwrap();
    let images = client(&base_url)
        .export_images("KEY", &request)
        .await
        .unwrap();
    assert!(images.is_null());

    let requests = requests.await.unwrap();
    assert!(request_line(&requests[0]).contains("scale=1.5"));
}

#[tokio::test]
async fn unreachable_host_is_a_request_error() {
    // Bind then drop a listener so the port is known to be closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&base_url).get_file("KEY").await.unwrap_err();
    assert!(matches!(err, FigmaError::Request { .. }));
    assert!(err.to_string().starts_with("Figma request failed"));
}
