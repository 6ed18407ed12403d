//! Loading files from disk and submitting them.

use deepguard_app::{load_image, ErrorKind, SessionError};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::controller_for;

#[tokio::test]
async fn test_loaded_file_is_uploaded_with_its_name() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("portrait.png");
    std::fs::write(&image_path, b"png-bytes").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .and(body_string_contains("filename=\"portrait.png\""))
        .and(body_string_contains("image/png"))
        .and(body_string_contains("png-bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "prediction": "Real",
            "confidence": 0.5,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    controller
        .select_image(load_image(&image_path).await.unwrap())
        .unwrap();
    controller.analyze().await.unwrap();

    assert_eq!(controller.view().result.unwrap().confidence_percent, 50);
}

#[tokio::test]
async fn test_loaded_text_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let text_path = dir.path().join("notes.txt");
    std::fs::write(&text_path, b"not an image").unwrap();

    let server = MockServer::start().await;
    let controller = controller_for(&server);
    let err = controller
        .select_image(load_image(&text_path).await.unwrap())
        .unwrap_err();

    assert_eq!(
        err,
        SessionError::InvalidMediaType {
            media_type: "text/plain".to_string()
        }
    );
    assert_eq!(controller.view().error.unwrap().kind, ErrorKind::Validation);
}
