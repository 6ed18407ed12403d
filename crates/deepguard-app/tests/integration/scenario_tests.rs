//! User-visible scenarios for the upload-and-classify workflow.

use deepguard_app::render::render_text;
use deepguard_app::{AnalysisOutcome, ErrorKind, SessionError, StageName};
use deepguard_models::{ImageFile, Tone};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{controller_at, controller_for};

fn image(name: &str, media_type: &str) -> ImageFile {
    ImageFile::new(name, media_type, b"image-bytes".to_vec())
}

async fn mount_verdict(server: &MockServer, prediction: &str, confidence: f64) {
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "prediction": prediction,
            "confidence": confidence,
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_authentic_image() {
    let server = MockServer::start().await;
    mount_verdict(&server, "Real", 0.93).await;

    let controller = controller_for(&server);
    controller.select_image(image("cat.jpg", "image/jpeg")).unwrap();
    let outcome = controller.analyze().await.unwrap();
    assert!(matches!(outcome, AnalysisOutcome::Completed(_)));

    let view = controller.view();
    let verdict = view.result.clone().unwrap();
    assert_eq!(verdict.prediction.label(), "Real");
    assert_eq!(verdict.confidence_percent, 93);
    assert_eq!(verdict.tone, Tone::Authentic);
    assert!(render_text(&view).contains("Confidence: 93%"));
}

#[tokio::test]
async fn test_manipulated_image() {
    let server = MockServer::start().await;
    mount_verdict(&server, "Fake", 0.81).await;

    let controller = controller_for(&server);
    controller.select_image(image("fake.png", "image/png")).unwrap();
    controller.analyze().await.unwrap();

    let verdict = controller.view().result.unwrap();
    assert_eq!(verdict.prediction.label(), "Fake");
    assert_eq!(verdict.confidence_percent, 81);
    assert_eq!(verdict.tone, Tone::Manipulated);
}

#[tokio::test]
async fn test_text_file_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    let err = controller
        .select_image(image("notes.txt", "text/plain"))
        .unwrap_err();
    assert!(matches!(err, SessionError::InvalidMediaType { .. }));
    assert!(!controller.can_submit());

    // Submitting now reports the missing image and sends nothing.
    assert_eq!(
        controller.analyze().await.unwrap_err(),
        SessionError::NoImageSelected
    );
    assert_eq!(controller.view().error.unwrap().kind, ErrorKind::MissingInput);
}

#[tokio::test]
async fn test_unreachable_service() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let controller = controller_at(&format!("http://127.0.0.1:{}", port));
    controller.select_image(image("cat.jpg", "image/jpeg")).unwrap();
    let outcome = controller.analyze().await.unwrap();

    let view = controller.view();
    let error = view.error.unwrap();
    assert_eq!(error.kind, ErrorKind::Network);
    assert!(error.message.starts_with("Network error"));
    assert!(view.result.is_none());
    assert_eq!(outcome, AnalysisOutcome::Failed(error));
    assert!(view.can_submit);
}

#[tokio::test]
async fn test_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Traceback ..."))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    controller.select_image(image("cat.jpg", "image/jpeg")).unwrap();
    controller.analyze().await.unwrap();

    let view = controller.view();
    let error = view.error.unwrap();
    assert_eq!(error.kind, ErrorKind::Server);
    assert!(error.message.contains("500"));
    assert!(view.result.is_none());
    assert_eq!(view.stage, StageName::Selected);
}

#[tokio::test]
async fn test_reanalysis_after_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_verdict(&server, "Real", 0.7).await;

    let controller = controller_for(&server);
    controller.select_image(image("cat.jpg", "image/jpeg")).unwrap();

    controller.analyze().await.unwrap();
    assert_eq!(controller.view().error.unwrap().kind, ErrorKind::Server);

    controller.analyze().await.unwrap();
    let view = controller.view();
    assert!(view.error.is_none());
    assert_eq!(view.result.unwrap().confidence_percent, 70);
}

#[tokio::test]
async fn test_reset_after_result() {
    let server = MockServer::start().await;
    mount_verdict(&server, "Real", 0.93).await;

    let controller = controller_for(&server);
    controller.select_image(image("cat.jpg", "image/jpeg")).unwrap();
    controller.analyze().await.unwrap();
    controller.reset();

    let view = controller.view();
    assert_eq!(view.stage, StageName::Idle);
    assert!(view.file_name.is_none());
    assert!(view.preview.is_none());
    assert!(view.result.is_none());
    assert!(view.error.is_none());
}
