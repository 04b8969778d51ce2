use serde::{Deserialize, Serialize};

use super::policy::ClassificationResult;

/// Shared per-session recognition state, mutated only by the processing
/// lane and the user commands, read by the frontend through snapshots and
/// `recognition-state-changed` events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionState {
    pub captured_text: String,
    pub confidence: f32,
    pub error_message: Option<String>,
    pub capture_history: Vec<String>,
    pub is_front_camera: bool,
}

impl Default for RecognitionState {
    fn default() -> Self {
        Self {
            captured_text: String::new(),
            confidence: 0.0,
            error_message: None,
            capture_history: Vec::new(),
            is_front_camera: true,
        }
    }
}

impl RecognitionState {
    pub fn with_facing(is_front_camera: bool) -> Self {
        Self {
            is_front_camera,
            ..Self::default()
        }
    }

    /// Apply an accepted classification: the letter becomes the current
    /// text, joins the history, and clears any transient error.
    pub fn accept(&mut self, result: ClassificationResult) {
        self.capture_history.push(result.label.clone());
        self.captured_text = result.label;
        self.confidence = result.confidence;
        self.error_message = None;
    }

    /// Record a transient error without touching the captured text,
    /// confidence, or history.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Clear the current letter (not the history).
    pub fn clear_captured_text(&mut self) {
        self.captured_text.clear();
        self.confidence = 0.0;
        self.error_message = None;
    }

    pub fn clear_history(&mut self) {
        self.capture_history.clear();
    }

    /// Flip the camera facing and return the new value.
    pub fn toggle_camera(&mut self) -> bool {
        self.is_front_camera = !self.is_front_camera;
        self.is_front_camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(label: &str, confidence: f32) -> ClassificationResult {
        ClassificationResult {
            label: label.to_string(),
            confidence,
        }
    }

    #[test]
    fn accept_appends_history_and_clears_error() {
        let mut state = RecognitionState::default();
        state.report_error("falha transitória");

        state.accept(result("A", 0.8));
        assert_eq!(state.captured_text, "A");
        assert_eq!(state.confidence, 0.8);
        assert_eq!(state.capture_history, vec!["A"]);
        assert!(state.error_message.is_none());

        state.accept(result("B", 0.6));
        assert_eq!(state.capture_history, vec!["A", "B"]);
        // Last history element tracks the captured text.
        assert_eq!(state.capture_history.last().unwrap(), &state.captured_text);
    }

    #[test]
    fn report_error_preserves_capture_fields() {
        let mut state = RecognitionState::default();
        state.accept(result("C", 0.7));

        state.report_error("erro ao processar imagem");
        assert_eq!(state.captured_text, "C");
        assert_eq!(state.confidence, 0.7);
        assert_eq!(state.capture_history, vec!["C"]);
        assert_eq!(
            state.error_message.as_deref(),
            Some("erro ao processar imagem")
        );
    }

    #[test]
    fn clear_history_is_idempotent_and_leaves_text() {
        let mut state = RecognitionState::default();
        state.accept(result("D", 0.9));

        state.clear_history();
        assert!(state.capture_history.is_empty());
        assert_eq!(state.captured_text, "D");

        // Clearing an already empty history is a no-op.
        state.clear_history();
        assert!(state.capture_history.is_empty());
    }

    #[test]
    fn clear_captured_text_leaves_history() {
        let mut state = RecognitionState::default();
        state.accept(result("E", 0.5));

        state.clear_captured_text();
        assert!(state.captured_text.is_empty());
        assert_eq!(state.confidence, 0.0);
        assert_eq!(state.capture_history, vec!["E"]);
    }

    #[test]
    fn toggling_camera_twice_restores_facing() {
        let mut state = RecognitionState::default();
        assert!(state.is_front_camera);
        assert!(!state.toggle_camera());
        assert!(state.toggle_camera());
    }
}
