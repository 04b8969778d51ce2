use serde::Serialize;

/// Minimum score for a classification to count as a letter rather than noise.
pub const CONFIDENCE_FLOOR: f32 = 0.30;

/// Minimum gap between two accepted results. Any acceptance resets the
/// window, not just a repeat of the same letter.
pub const DEBOUNCE_WINDOW_MS: u64 = 1500;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub label: String,
    pub confidence: f32,
}

/// Turn a score vector into an accepted letter, or nothing.
///
/// Picks the arg-max entry (first occurrence wins ties), rejects it when the
/// score is at or below [`CONFIDENCE_FLOOR`], and rejects it when less than
/// [`DEBOUNCE_WINDOW_MS`] has elapsed since the last acceptance. A `None`
/// `last_accepted_ms` means nothing has been accepted yet, so only the
/// confidence floor applies. The caller owns `last_accepted_ms` and updates
/// it to `now_ms` on every `Some` return.
pub fn decide(
    scores: &[f32],
    labels: &[&str],
    now_ms: u64,
    last_accepted_ms: Option<u64>,
) -> Option<ClassificationResult> {
    let mut best_index = 0;
    let mut best_score = f32::MIN;
    for (index, &score) in scores.iter().enumerate().take(labels.len()) {
        if score > best_score {
            best_index = index;
            best_score = score;
        }
    }

    if scores.is_empty() || best_score <= CONFIDENCE_FLOOR {
        return None;
    }

    if let Some(last) = last_accepted_ms {
        if now_ms.saturating_sub(last) < DEBOUNCE_WINDOW_MS {
            return None;
        }
    }

    Some(ClassificationResult {
        label: labels[best_index].to_string(),
        confidence: best_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::classifier::LABELS;

    fn scores_with_peak(index: usize, value: f32) -> Vec<f32> {
        let mut scores = vec![0.01; LABELS.len()];
        scores[index] = value;
        scores
    }

    #[test]
    fn accepted_label_matches_argmax_index() {
        let scores = scores_with_peak(9, 0.35);
        let result = decide(&scores, &LABELS, 1000, None).unwrap();
        assert_eq!(result.label, LABELS[9]);
        assert_eq!(result.confidence, 0.35);
    }

    #[test]
    fn scores_at_or_below_floor_are_noise() {
        let at_floor = scores_with_peak(3, 0.30);
        assert!(decide(&at_floor, &LABELS, 100_000, None).is_none());

        let just_above = scores_with_peak(3, 0.31);
        assert!(decide(&just_above, &LABELS, 100_000, None).is_some());
    }

    #[test]
    fn low_confidence_rejected_regardless_of_timing() {
        let scores = scores_with_peak(0, 0.25);
        assert!(decide(&scores, &LABELS, 0, None).is_none());
        assert!(decide(&scores, &LABELS, 1_000_000, Some(0)).is_none());
    }

    #[test]
    fn debounce_window_gates_second_acceptance() {
        let scores = scores_with_peak(5, 0.9);

        // Δ = 1499 rejected, Δ = 1500 accepted.
        assert!(decide(&scores, &LABELS, 2999, Some(1500)).is_none());
        assert!(decide(&scores, &LABELS, 3000, Some(1500)).is_some());
    }

    #[test]
    fn debounce_scenario_from_continuous_stream() {
        let mut last_accepted: Option<u64> = None;

        // First result at t=1000 with nothing accepted yet.
        let first = decide(&scores_with_peak(9, 0.35), &LABELS, 1000, last_accepted);
        let first = first.expect("first acceptance");
        assert_eq!(first.label, LABELS[9]);
        assert_eq!(first.confidence, 0.35);
        last_accepted = Some(1000);

        // High confidence at t=1800 still rejected: Δ = 800 < 1500.
        let strong = scores_with_peak(2, 0.9);
        assert!(decide(&strong, &LABELS, 1800, last_accepted).is_none());

        // Same vector at t=2600 accepted: Δ = 1600.
        assert!(decide(&strong, &LABELS, 2600, last_accepted).is_some());
    }

    #[test]
    fn ties_break_to_the_lowest_index() {
        let mut scores = vec![0.0; LABELS.len()];
        scores[2] = 0.5;
        scores[5] = 0.5;
        let result = decide(&scores, &LABELS, 0, None).unwrap();
        assert_eq!(result.label, LABELS[2]);
    }

    #[test]
    fn empty_vector_yields_nothing() {
        assert!(decide(&[], &LABELS, 0, None).is_none());
    }
}
