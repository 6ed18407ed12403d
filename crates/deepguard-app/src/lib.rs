//! Upload-and-classify client for the DeepGuard detection service.
//!
//! A [`ClassifySession`] tracks one user workflow: pick an image, submit
//! it, show the verdict. [`ClassifyController`] drives the session against
//! a [`Detector`](deepguard_client::Detector) and guarantees that at most
//! one analysis is in flight and that stale answers never overwrite a
//! newer selection.

pub mod config;
pub mod controller;
pub mod error;
pub mod loader;
pub mod logging;
pub mod render;
pub mod session;

pub use config::AppConfig;
pub use controller::{AnalysisOutcome, ClassifyController};
pub use error::{ErrorKind, ErrorState, SessionError, SessionResult};
pub use loader::{load_image, media_type_for_path};
pub use logging::{init_tracing, LogFormat};
pub use session::{AnalysisTicket, ClassifySession, Outcome, SessionView, Stage, StageName, VerdictView};
