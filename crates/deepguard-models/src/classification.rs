//! Classification verdicts reported by the detection service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Wire label for an authentic image.
pub const REAL_LABEL: &str = "Real";

/// Binary verdict of the classifier.
///
/// `"Real"` is the only authentic label. Any other label reported by the
/// service is kept verbatim as a manipulated verdict.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Prediction {
    Real,
    Manipulated(String),
}

impl Prediction {
    /// Returns the label as reported by the service.
    pub fn label(&self) -> &str {
        match self {
            Prediction::Real => REAL_LABEL,
            Prediction::Manipulated(label) => label,
        }
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Prediction::Real)
    }

    /// Styling tone for this verdict.
    pub fn tone(&self) -> Tone {
        if self.is_real() {
            Tone::Authentic
        } else {
            Tone::Manipulated
        }
    }
}

impl From<String> for Prediction {
    fn from(label: String) -> Self {
        if label == REAL_LABEL {
            Prediction::Real
        } else {
            Prediction::Manipulated(label)
        }
    }
}

impl From<&str> for Prediction {
    fn from(label: &str) -> Self {
        Prediction::from(label.to_string())
    }
}

impl From<Prediction> for String {
    fn from(prediction: Prediction) -> Self {
        match prediction {
            Prediction::Real => REAL_LABEL.to_string(),
            Prediction::Manipulated(label) => label,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a verdict should be styled when displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Authentic,
    Manipulated,
}

impl Tone {
    /// One-line summary shown under the verdict.
    pub fn summary(&self) -> &'static str {
        match self {
            Tone::Authentic => "This image is authentic",
            Tone::Manipulated => "This image is likely manipulated",
        }
    }

    /// Closing explanation shown under the confidence bar.
    pub fn explanation(&self) -> &'static str {
        match self {
            Tone::Authentic => "Our AI is confident this image has not been manipulated.",
            Tone::Manipulated => "Our AI has detected signs of manipulation in this image.",
        }
    }
}

/// Classification returned by a successful detection request.
///
/// Only `prediction` and `confidence` are read from the response body;
/// other fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Classifier verdict
    pub prediction: Prediction,
    /// Model certainty in [0, 1]
    pub confidence: f64,
}

impl ClassificationResult {
    pub fn new(prediction: impl Into<Prediction>, confidence: f64) -> Self {
        Self {
            prediction: prediction.into(),
            confidence,
        }
    }

    /// Check the result is displayable.
    pub fn validate(&self) -> ModelResult<()> {
        if self.prediction.label().is_empty() {
            return Err(ModelError::EmptyPrediction);
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ModelError::ConfidenceOutOfRange(self.confidence));
        }
        Ok(())
    }

    /// Confidence as a rounded percentage.
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    pub fn tone(&self) -> Tone {
        self.prediction.tone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_from_label() {
        assert_eq!(Prediction::from("Real"), Prediction::Real);
        assert_eq!(
            Prediction::from("Fake"),
            Prediction::Manipulated("Fake".to_string())
        );
        // Labels are case-sensitive.
        assert_eq!(
            Prediction::from("real"),
            Prediction::Manipulated("real".to_string())
        );
    }

    #[test]
    fn test_prediction_serde() {
        let real: Prediction = serde_json::from_str("\"Real\"").unwrap();
        assert_eq!(real, Prediction::Real);
        assert_eq!(serde_json::to_string(&real).unwrap(), "\"Real\"");

        let fake: Prediction = serde_json::from_str("\"Deepfake\"").unwrap();
        assert_eq!(fake.label(), "Deepfake");
        assert_eq!(serde_json::to_string(&fake).unwrap(), "\"Deepfake\"");
    }

    #[test]
    fn test_result_ignores_extra_fields() {
        let json = r#"{"prediction":"Real","confidence":0.93,"model":"v2","latency_ms":12}"#;
        let result: ClassificationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.prediction, Prediction::Real);
        assert_eq!(result.confidence, 0.93);
    }

    #[test]
    fn test_result_requires_both_fields() {
        assert!(serde_json::from_str::<ClassificationResult>(r#"{"prediction":"Real"}"#).is_err());
        assert!(serde_json::from_str::<ClassificationResult>(r#"{"confidence":0.5}"#).is_err());
    }

    #[test]
    fn test_confidence_percent_rounds() {
        assert_eq!(ClassificationResult::new("Real", 0.93).confidence_percent(), 93);
        assert_eq!(ClassificationResult::new("Fake", 0.81).confidence_percent(), 81);
        assert_eq!(ClassificationResult::new("Fake", 0.005).confidence_percent(), 1);
        assert_eq!(ClassificationResult::new("Fake", 0.994).confidence_percent(), 99);
        assert_eq!(ClassificationResult::new("Real", 1.0).confidence_percent(), 100);
        assert_eq!(ClassificationResult::new("Real", 0.0).confidence_percent(), 0);
    }

    #[test]
    fn test_validate() {
        assert!(ClassificationResult::new("Real", 0.5).validate().is_ok());
        assert_eq!(
            ClassificationResult::new("Real", 1.3).validate(),
            Err(ModelError::ConfidenceOutOfRange(1.3))
        );
        assert_eq!(
            ClassificationResult::new("Real", -0.1).validate(),
            Err(ModelError::ConfidenceOutOfRange(-0.1))
        );
        assert_eq!(
            ClassificationResult::new("", 0.5).validate(),
            Err(ModelError::EmptyPrediction)
        );
    }

    #[test]
    fn test_tone_text() {
        let real = ClassificationResult::new("Real", 0.93);
        assert_eq!(real.tone(), Tone::Authentic);
        assert_eq!(real.tone().summary(), "This image is authentic");

        let fake = ClassificationResult::new("Fake", 0.81);
        assert_eq!(fake.tone(), Tone::Manipulated);
        assert_eq!(fake.tone().summary(), "This image is likely manipulated");
        assert!(fake.tone().explanation().contains("signs of manipulation"));
    }
}
