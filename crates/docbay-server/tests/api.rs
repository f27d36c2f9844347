//! End-to-end API tests over the axum router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use docbay_core::config::ServerConfig;
use docbay_core::models::NewConversion;
use docbay_server::{create_server, AppState};

const BOUNDARY: &str = "docbay-test-boundary";

fn test_state(dir: &std::path::Path) -> AppState {
    let config = ServerConfig {
        db_path: ":memory:".to_string(),
        static_files_dir: dir.join("images").display().to_string(),
        pdf_upload_dir: dir.join("uploads").display().to_string(),
        pdf_output_dir: dir.join("outputs").display().to_string(),
        ..Default::default()
    };
    AppState::from_config(config).unwrap()
}

/// Build a minimal valid PDF with one Helvetica text page per entry.
fn pdf_bytes(page_texts: &[&str]) -> Vec<u8> {
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut page_ids = Vec::new();
    for text in page_texts {
        let content = format!("BT\n/F1 11 Tf\n50 742 Td\n({}) Tj\nET\n", text);
        let content_id = doc.add_object(Object::Stream(Stream::new(
            dictionary! {},
            content.into_bytes(),
        )));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| (*id).into()).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
        self
    }

    fn build(mut self, uri: &str) -> Request<Body> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.bytes))
            .unwrap()
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_server(test_state(dir.path()));

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["refiner_configured"], false);
}

#[tokio::test]
async fn test_convert_roundtrip_without_refiner() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_server(test_state(dir.path()));

    let request = MultipartBody::new()
        .file("file", "report.pdf", "application/pdf", &pdf_bytes(&["one", "two", "three"]))
        .build("/api/pdfs/convert");
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["page_count"], 3);
    assert_eq!(json["processed_text"], "");
    assert!(json["markdown_url"].is_null());
    let download_url = json["download_url"].as_str().unwrap();
    assert!(download_url.ends_with(".docx"), "got: {download_url}");

    // Download the produced document through the API
    let filename = json["output_filename"].as_str().unwrap().to_string();
    let response = app
        .clone()
        .oneshot(get(&format!("/api/pdfs/download/{filename}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(!bytes.is_empty());

    // Raw text carries the page labels
    let id = json["id"].as_i64().unwrap();
    let response = app
        .clone()
        .oneshot(get(&format!("/api/pdfs/{id}/text")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_string(response).await;
    assert!(text.contains("--- Page 1 ---"));
    assert!(text.contains("--- Page 3 ---"));

    // No refiner ran: processed text is the placeholder sentence
    let response = app
        .clone()
        .oneshot(get(&format!("/api/pdfs/{id}/processed_text")))
        .await
        .unwrap();
    let text = body_string(response).await;
    assert_eq!(text, "This PDF has no AI-processed text");
}

#[tokio::test]
async fn test_convert_rejects_wrong_extension() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_server(test_state(dir.path()));

    let request = MultipartBody::new()
        .file("file", "notes.txt", "text/plain", b"hello")
        .build("/api/pdfs/convert");
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["message"], "Only PDF files are accepted");
}

#[tokio::test]
async fn test_convert_rejects_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_server(test_state(dir.path()));

    let request = MultipartBody::new()
        .file("file", "empty.pdf", "application/pdf", b"")
        .build("/api/pdfs/convert");
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["message"], "Uploaded PDF file is empty");
}

#[tokio::test]
async fn test_broken_pdf_degrades_to_error_document() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_server(test_state(dir.path()));

    let request = MultipartBody::new()
        .file("file", "broken.pdf", "application/pdf", b"not really a pdf")
        .build("/api/pdfs/convert");
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["page_count"], 0);
    assert_eq!(json["text_content"], "");

    // The error document is downloadable
    let filename = json["output_filename"].as_str().unwrap();
    let response = app
        .oneshot(get(&format!("/api/pdfs/download/{filename}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_conversion_id() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_server(test_state(dir.path()));

    for uri in [
        "/api/pdfs/999",
        "/api/pdfs/999/text",
        "/api/pdfs/999/processed_text",
        "/api/pdfs/999/text_json",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri: {uri}");
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "Conversion record not found");
    }
}

#[tokio::test]
async fn test_download_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_server(test_state(dir.path()));

    let response = app
        .oneshot(get("/api/pdfs/download/missing.docx"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_conversion_removes_row_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path());
    let app = create_server(state.clone());

    let request = MultipartBody::new()
        .file("file", "doc.pdf", "application/pdf", &pdf_bytes(&["page"]))
        .build("/api/pdfs/convert");
    let response = app.clone().oneshot(request).await.unwrap();
    let json = body_json(response).await;
    let id = json["id"].as_i64().unwrap();
    let filename = json["output_filename"].as_str().unwrap().to_string();

    let docx_path = dir.path().join("outputs").join(&filename);
    assert!(docx_path.exists());

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/pdfs/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!docx_path.exists());

    let response = app.oneshot(get(&format!("/api/pdfs/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_conversion_removes_markdown_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path());
    let app = create_server(state.clone());

    // A record as a refiner-enabled conversion would leave it: DOCX plus
    // markdown artifact, both recorded
    let output_dir = dir.path().join("outputs");
    let docx_path = output_dir.join("refined_abc.docx");
    let md_path = output_dir.join("refined_abc.md");
    std::fs::write(&docx_path, b"docx bytes").unwrap();
    std::fs::write(&md_path, b"# refined").unwrap();

    let record = state
        .inner
        .conversions
        .insert(NewConversion {
            original_filename: "refined.pdf".to_string(),
            output_filename: "refined_abc.docx".to_string(),
            file_path: "refined_abc.docx".to_string(),
            page_count: 1,
            text_content: "--- Page 1 ---\nhello".to_string(),
            processed_text: "# refined".to_string(),
            markdown_path: Some("refined_abc.md".to_string()),
        })
        .unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/pdfs/{}", record.id)))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert!(json["markdown_url"].as_str().unwrap().ends_with(".md"));

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/pdfs/{}", record.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!docx_path.exists());
    assert!(!md_path.exists());

    let response = app
        .oneshot(get(&format!("/api/pdfs/{}", record.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_rejects_path_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_server(test_state(dir.path()));

    // A file one level above the output directory must stay unreachable
    std::fs::write(dir.path().join("escape.txt"), b"secret").unwrap();

    for uri in [
        "/api/pdfs/download/..%2Fescape.txt",
        "/api/pdfs/download/..%5Cescape.txt",
        "/api/pdfs/download-markdown/..%2Fescape.txt",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "Invalid filename");
    }
}

#[tokio::test]
async fn test_list_conversions_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_server(test_state(dir.path()));

    for name in ["a.pdf", "b.pdf"] {
        let request = MultipartBody::new()
            .file("file", name, "application/pdf", &pdf_bytes(&["x"]))
            .build("/api/pdfs/convert");
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get("/api/pdfs")).await.unwrap();
    let json = body_json(response).await;
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["original_filename"], "b.pdf");
    assert_eq!(records[1]["original_filename"], "a.pdf");
}

#[tokio::test]
async fn test_image_upload_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_server(test_state(dir.path()));

    let request = MultipartBody::new()
        .file("file", "cat.png", "image/png", &[1, 2, 3, 4])
        .text("description", "a cat")
        .build("/api/images/upload");
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["size"], 4);
    assert_eq!(json["content_type"], "image/png");
    assert_eq!(json["description"], "a cat");
    let id = json["id"].as_i64().unwrap();
    let file_path = json["file_path"].as_str().unwrap().to_string();

    let stored = dir.path().join("images").join(&file_path);
    assert!(stored.exists());

    let response = app
        .clone()
        .oneshot(get(&format!("/api/images/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/images/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!stored.exists());

    let response = app.oneshot(get(&format!("/api/images/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_image_upload_rejects_non_image() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_server(test_state(dir.path()));

    let request = MultipartBody::new()
        .file("file", "notes.txt", "text/plain", b"hello")
        .build("/api/images/upload");
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["message"], "Only image files may be uploaded");
}
