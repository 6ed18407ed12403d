//! Async driver for a classify session.

use std::sync::Arc;

use deepguard_client::Detector;
use deepguard_models::{ClassificationResult, ImageFile, PreviewHandle};
use parking_lot::Mutex;
use tracing::{error, info};

use crate::error::{ErrorState, SessionResult};
use crate::session::{ClassifySession, SessionView};

/// How an `analyze` call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The verdict was stored in the session.
    Completed(ClassificationResult),
    /// The failure was stored in the session.
    Failed(ErrorState),
    /// The session moved on while the request was in flight.
    Discarded,
}

/// Runs the select / analyze / reset workflow against a detector.
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct ClassifyController {
    session: Arc<Mutex<ClassifySession>>,
    detector: Arc<dyn Detector>,
}

impl ClassifyController {
    pub fn new(detector: Arc<dyn Detector>) -> Self {
        Self {
            session: Arc::new(Mutex::new(ClassifySession::new())),
            detector,
        }
    }

    pub fn select_image(&self, file: ImageFile) -> SessionResult<PreviewHandle> {
        self.session.lock().select_image(file)
    }

    pub fn reset(&self) {
        self.session.lock().reset();
    }

    pub fn view(&self) -> SessionView {
        self.session.lock().view()
    }

    pub fn can_submit(&self) -> bool {
        self.session.lock().can_submit()
    }

    pub fn is_analyzing(&self) -> bool {
        self.session.lock().is_analyzing()
    }

    /// Submit the selected image and record the outcome.
    ///
    /// Issues exactly one detection request. The session leaves
    /// `Analyzing` however the call ends, including when this future is
    /// dropped before the request resolves.
    pub async fn analyze(&self) -> SessionResult<AnalysisOutcome> {
        let ticket = {
            let mut session = self.session.lock();
            session.begin_analysis()?
        };
        let guard = AnalyzingGuard {
            session: &self.session,
            generation: ticket.generation(),
            armed: true,
        };

        info!(file_name = %ticket.file().file_name(), "Analyzing image");
        let outcome = self.detector.detect(ticket.file()).await.map_err(|err| {
            error!("Error analyzing image: {}", err);
            ErrorState::from(err)
        });

        Ok(guard.finish(outcome))
    }
}

/// Leaves `Analyzing` when dropped unless an outcome was recorded.
struct AnalyzingGuard<'a> {
    session: &'a Mutex<ClassifySession>,
    generation: u64,
    armed: bool,
}

impl AnalyzingGuard<'_> {
    fn finish(mut self, outcome: Result<ClassificationResult, ErrorState>) -> AnalysisOutcome {
        self.armed = false;
        let applied = self
            .session
            .lock()
            .finish_analysis(self.generation, outcome.clone());

        match outcome {
            _ if !applied => AnalysisOutcome::Discarded,
            Ok(result) => AnalysisOutcome::Completed(result),
            Err(err) => AnalysisOutcome::Failed(err),
        }
    }
}

impl Drop for AnalyzingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.session.lock().abandon_analysis(self.generation);
        }
    }
}
