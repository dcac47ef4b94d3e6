//! Integration tests for the files API.

mod common;

use common::{client_for, envelope, managed_credentials};
use kai_studio::{Error, FileSignature, FileUploadResponse, UploadFile};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_files() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/list-files"))
        .and(header("organization-id", "org-1"))
        .and(header("instance-id", "inst-1"))
        .and(header("api-key", "key-1"))
        .respond_with(envelope(json!([
            {"name": "a.pdf", "metadata": "", "lastModified": "2024-01-01", "size": 10},
            {"name": "b.txt", "metadata": "{\"lang\":\"en\"}", "lastModified": "2024-01-02", "size": 20}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, managed_credentials());
    let files = client.files().list_files().await.unwrap();

    assert_eq!(files.len(), 2);
    assert_eq!(
        files[1],
        FileSignature {
            name: "b.txt".to_string(),
            metadata: "{\"lang\":\"en\"}".to_string(),
            last_modified: "2024-01-02".to_string(),
            size: 20,
        }
    );

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_download_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/download-file"))
        .and(header("organization-id", "org-1"))
        .and(header("instance-id", "inst-1"))
        .and(header("api-key", "key-1"))
        .and(body_json(json!({"fileName": "a.pdf"})))
        .respond_with(envelope(json!([
            {"name": "a.pdf", "metadata": "", "lastModified": "2024-01-01", "size": 10}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, managed_credentials());
    let files = client.files().download_file("a.pdf").await.unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "a.pdf");
}

#[tokio::test]
async fn test_remove_file_sends_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/delete-file"))
        .and(header("organization-id", "org-1"))
        .and(header("instance-id", "inst-1"))
        .and(header("api-key", "key-1"))
        .and(body_json(json!({"file": "old.csv"})))
        .respond_with(envelope(json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, managed_credentials());
    assert!(client.files().remove_file("old.csv").await.unwrap());
}

#[tokio::test]
async fn test_upload_files_single_multipart_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-file"))
        .and(header("organization-id", "org-1"))
        .and(header("instance-id", "inst-1"))
        .and(header("api-key", "key-1"))
        .respond_with(envelope(json!([
            {"result": true, "reason": ""},
            {"result": false, "reason": "unsupported type"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, managed_credentials());
    let results = client
        .files()
        .upload_files(vec![
            UploadFile::new("one.txt", b"first".to_vec()),
            UploadFile::new("two.bin", b"second".to_vec())
                .with_mime_type("application/octet-stream"),
        ])
        .await
        .unwrap();

    assert_eq!(
        results,
        vec![
            FileUploadResponse {
                result: true,
                reason: String::new(),
            },
            FileUploadResponse {
                result: false,
                reason: "unsupported type".to_string(),
            },
        ]
    );

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data; charset=utf-8; boundary="));
    assert_eq!(requests[0].headers.get_all("content-type").iter().count(), 1);

    let body = String::from_utf8_lossy(&requests[0].body);
    assert_eq!(body.matches("name=\"files\"").count(), 2);
    assert!(body.contains("filename=\"one.txt\""));
    assert!(body.contains("filename=\"two.bin\""));
    assert!(body.contains("first"));
    assert!(body.contains("second"));
}

#[tokio::test]
async fn test_upload_files_empty_skips_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(envelope(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, managed_credentials());
    let results = client.files().upload_files(Vec::new()).await.unwrap();

    assert!(results.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_mime_type_fails_before_sending() {
    let server = MockServer::start().await;
    let client = client_for(&server, managed_credentials());

    let result = client
        .files()
        .upload_files(vec![
            UploadFile::new("x.txt", b"x".to_vec()).with_mime_type("not a mime"),
        ])
        .await;

    assert!(matches!(result, Err(Error::Http(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_server_error_body_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/list-files"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string("{\"error\":\"invalid api key\"}"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, managed_credentials());
    let err = client.files().list_files().await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "{\"error\":\"invalid api key\"}");
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_response_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/list-files"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server, managed_credentials());
    let err = client.files().list_files().await.unwrap_err();

    assert!(matches!(err, Error::Http(_)));
}
