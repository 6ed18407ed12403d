//! End-to-end tests through the controller and the HTTP client.

pub mod file_tests;
pub mod scenario_tests;

use std::sync::Arc;

use deepguard_app::ClassifyController;
use deepguard_client::{DetectClient, DetectClientConfig};
use wiremock::MockServer;

/// Controller wired to a real client pointed at `server`.
pub fn controller_for(server: &MockServer) -> ClassifyController {
    controller_at(&server.uri())
}

pub fn controller_at(base_url: &str) -> ClassifyController {
    let client = DetectClient::new(DetectClientConfig::default().with_base_url(base_url))
        .expect("client should build");
    ClassifyController::new(Arc::new(client))
}
