//! Upload-and-classify session state.
//!
//! The session moves between three stages:
//!
//! - `Idle`: nothing selected
//! - `Selected`: an image is held and can be submitted
//! - `Analyzing`: a request for the held image is in flight
//!
//! Alongside the stage it keeps a single [`Outcome`], so a result and an
//! error can never be shown at the same time. Every selection, reset and
//! submission bumps a generation counter; an analysis outcome is applied
//! only if its generation is still current.

use std::mem;

use deepguard_models::{ClassificationResult, ImageFile, PreviewHandle, Prediction, SelectedImage, Tone};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ErrorState, SessionError, SessionResult};

/// Where the workflow currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    Selected(SelectedImage),
    Analyzing(SelectedImage),
}

impl Stage {
    pub fn name(&self) -> StageName {
        match self {
            Stage::Idle => StageName::Idle,
            Stage::Selected(_) => StageName::Selected,
            Stage::Analyzing(_) => StageName::Analyzing,
        }
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        match self {
            Stage::Idle => None,
            Stage::Selected(image) | Stage::Analyzing(image) => Some(image),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    Idle,
    Selected,
    Analyzing,
}

/// The most recent outcome; at most one of result or error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Outcome {
    #[default]
    Empty,
    Result(ClassificationResult),
    Error(ErrorState),
}

/// Claim on an in-flight analysis.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    generation: u64,
    file: ImageFile,
}

impl AnalysisTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn file(&self) -> &ImageFile {
        &self.file
    }
}

/// State of one upload-and-classify workflow.
#[derive(Debug, Default)]
pub struct ClassifySession {
    stage: Stage,
    outcome: Outcome,
    generation: u64,
}

impl ClassifySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a file for classification.
    ///
    /// Non-image files are rejected and the current selection is kept.
    /// An accepted file replaces the selection, gets a new preview handle
    /// and clears the previous outcome.
    pub fn select_image(&mut self, file: ImageFile) -> SessionResult<PreviewHandle> {
        if !file.is_image() {
            let err = SessionError::InvalidMediaType {
                media_type: file.media_type().to_string(),
            };
            info!(
                file_name = %file.file_name(),
                media_type = %file.media_type(),
                "Rejected non-image file"
            );
            self.record_rejection(&err);
            return Err(err);
        }

        let image = SelectedImage::new(file);
        let preview = image.preview();
        debug!(
            file_name = %image.file().file_name(),
            preview = %preview,
            "Image selected"
        );

        self.generation += 1;
        self.stage = Stage::Selected(image);
        self.outcome = Outcome::Empty;
        Ok(preview)
    }

    /// Drop the selection, its preview and any outcome.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.stage = Stage::Idle;
        self.outcome = Outcome::Empty;
    }

    /// Enter `Analyzing` for the current selection.
    pub fn begin_analysis(&mut self) -> SessionResult<AnalysisTicket> {
        let image = match &self.stage {
            Stage::Idle => {
                let err = SessionError::NoImageSelected;
                self.record_rejection(&err);
                return Err(err);
            }
            Stage::Analyzing(_) => return Err(SessionError::AnalysisInProgress),
            Stage::Selected(image) => image.clone(),
        };

        self.generation += 1;
        self.outcome = Outcome::Empty;
        let ticket = AnalysisTicket {
            generation: self.generation,
            file: image.file().clone(),
        };
        self.stage = Stage::Analyzing(image);

        debug!(generation = ticket.generation, "Analysis started");
        Ok(ticket)
    }

    /// Apply the outcome of the analysis started with `generation`.
    ///
    /// Returns false if the session moved on (reset or new selection)
    /// while the request was in flight; the outcome is then discarded.
    pub fn finish_analysis(
        &mut self,
        generation: u64,
        outcome: Result<ClassificationResult, ErrorState>,
    ) -> bool {
        if !self.is_current(generation) {
            warn!(
                generation,
                current = self.generation,
                "Discarding outcome of a superseded analysis"
            );
            return false;
        }

        self.leave_analyzing();
        self.outcome = match outcome {
            Ok(result) => Outcome::Result(result),
            Err(err) => Outcome::Error(err),
        };
        true
    }

    /// Leave `Analyzing` without an outcome.
    ///
    /// Used when the request is dropped before it resolves.
    pub fn abandon_analysis(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        debug!(generation, "Analysis abandoned");
        self.leave_analyzing();
        true
    }

    fn is_current(&self, generation: u64) -> bool {
        generation == self.generation && self.is_analyzing()
    }

    fn leave_analyzing(&mut self) {
        self.stage = match mem::take(&mut self.stage) {
            Stage::Analyzing(image) => Stage::Selected(image),
            other => other,
        };
    }

    fn record_rejection(&mut self, err: &SessionError) {
        if let Some(state) = err.error_state() {
            self.outcome = Outcome::Error(state);
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.stage.image()
    }

    pub fn preview(&self) -> Option<PreviewHandle> {
        self.stage.image().map(SelectedImage::preview)
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match &self.outcome {
            Outcome::Result(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorState> {
        match &self.outcome {
            Outcome::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.stage, Stage::Analyzing(_))
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        matches!(self.stage, Stage::Selected(_))
    }

    /// Serializable snapshot for presentation.
    pub fn view(&self) -> SessionView {
        let file = self.selected().map(SelectedImage::file);
        SessionView {
            stage: self.stage.name(),
            file_name: file.map(|f| f.file_name().to_string()),
            media_type: file.map(|f| f.media_type().to_string()),
            preview: self.preview(),
            can_submit: self.can_submit(),
            result: self.result().map(VerdictView::from),
            error: self.error().cloned(),
        }
    }
}

/// Read-only snapshot of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub stage: StageName,
    pub file_name: Option<String>,
    pub media_type: Option<String>,
    pub preview: Option<PreviewHandle>,
    pub can_submit: bool,
    pub result: Option<VerdictView>,
    pub error: Option<ErrorState>,
}

/// A classification result with its display values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictView {
    pub prediction: Prediction,
    pub confidence: f64,
    pub confidence_percent: u8,
    pub tone: Tone,
    pub summary: &'static str,
    pub explanation: &'static str,
}

impl From<&ClassificationResult> for VerdictView {
    fn from(result: &ClassificationResult) -> Self {
        let tone = result.tone();
        Self {
            prediction: result.prediction.clone(),
            confidence: result.confidence,
            confidence_percent: result.confidence_percent(),
            tone,
            summary: tone.summary(),
            explanation: tone.explanation(),
        }
    }
}
