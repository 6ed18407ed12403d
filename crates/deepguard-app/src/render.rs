//! Text and JSON presentation of a session.

use std::fmt::Write;

use deepguard_models::Tone;

use crate::session::{SessionView, StageName, VerdictView};

const BAR_WIDTH: usize = 20;

/// Render a session view as a plain-text card.
pub fn render_text(view: &SessionView) -> String {
    let mut out = String::new();

    if let Some(file_name) = &view.file_name {
        let media_type = view.media_type.as_deref().unwrap_or("unknown");
        let _ = writeln!(out, "{} ({})", file_name, media_type);
    }

    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error");
        let _ = writeln!(out, "{}", error.message);
    }

    match (&view.result, view.stage) {
        (Some(verdict), _) => render_verdict(&mut out, verdict),
        (None, StageName::Analyzing) => {
            let _ = writeln!(out, "Analyzing...");
        }
        (None, StageName::Selected) if view.error.is_none() => {
            let _ = writeln!(out, "Ready to analyze");
        }
        (None, StageName::Idle) if view.error.is_none() => {
            let _ = writeln!(out, "No image selected");
        }
        _ => {}
    }

    out
}

fn render_verdict(out: &mut String, verdict: &VerdictView) {
    let marker = match verdict.tone {
        Tone::Authentic => "[ok]",
        Tone::Manipulated => "[!]",
    };
    let _ = writeln!(out, "{} {}", marker, verdict.prediction);
    let _ = writeln!(out, "{}", verdict.summary);
    let _ = writeln!(out, "Confidence: {}%", verdict.confidence_percent);
    let _ = writeln!(out, "{}", confidence_bar(verdict.confidence, BAR_WIDTH));
    let _ = writeln!(out, "{}", verdict.explanation);
}

/// Progress bar filled in proportion to the confidence.
pub fn confidence_bar(confidence: f64, width: usize) -> String {
    let filled = ((confidence.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Render a session view as a single JSON document.
pub fn render_json(view: &SessionView) -> serde_json::Result<String> {
    serde_json::to_string(view)
}
