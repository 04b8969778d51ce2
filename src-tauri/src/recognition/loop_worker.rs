use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, info, warn};
use tauri::AppHandle;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::classifier::{
    InferenceError, LibrasClassifier, LABELS, MODEL_INPUT_HEIGHT, MODEL_INPUT_WIDTH,
};
use super::controller::emit_recognition_state;
use super::frame::{Frame, FrameCell};
use super::policy::{decide, ClassificationResult};
use super::preprocess::{preprocess, PreprocessError};
use super::state::RecognitionState;

#[derive(Debug, Error)]
enum FrameError {
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// The single processing lane: pulls the latest frame, runs
/// preprocess + inference off the async runtime, applies the decision
/// policy, and publishes accepted results to the shared state.
///
/// The lane has sole ownership of the classifier; when it exits (on
/// cancellation) the model resources are released with it, so no inference
/// can ever run against a released session.
pub async fn recognition_loop(
    session_id: String,
    classifier: LibrasClassifier,
    frames: FrameCell,
    state: Arc<Mutex<RecognitionState>>,
    app_handle: AppHandle,
    cancel_token: CancellationToken,
) {
    let classifier = Arc::new(std::sync::Mutex::new(classifier));
    let started = Instant::now();
    let mut last_accepted_ms: Option<u64> = None;

    loop {
        tokio::select! {
            _ = frames.wait() => {
                while let Some(frame) = frames.take() {
                    if cancel_token.is_cancelled() {
                        break;
                    }
                    process_frame(
                        &session_id,
                        frame,
                        &classifier,
                        &state,
                        &app_handle,
                        &started,
                        &mut last_accepted_ms,
                    )
                    .await;
                }
            }
            _ = cancel_token.cancelled() => {
                info!("recognition loop shutting down for session {session_id}");
                break;
            }
        }
    }
}

async fn process_frame(
    session_id: &str,
    frame: Frame,
    classifier: &Arc<std::sync::Mutex<LibrasClassifier>>,
    state: &Arc<Mutex<RecognitionState>>,
    app_handle: &AppHandle,
    started: &Instant,
    last_accepted_ms: &mut Option<u64>,
) {
    let worker = tokio::task::spawn_blocking({
        let classifier = Arc::clone(classifier);
        move || -> Result<Vec<f32>, FrameError> {
            let tensor = preprocess(&frame, MODEL_INPUT_WIDTH, MODEL_INPUT_HEIGHT)?;
            let mut guard = classifier.lock().unwrap();
            Ok(guard.classify(&tensor)?)
        }
    });

    let scores = match worker.await {
        Err(err) => {
            error!("classification worker join failed for session {session_id}: {err}");
            return;
        }
        // Malformed frames are dropped without surfacing to the user.
        Ok(Err(FrameError::Preprocess(err))) => {
            debug!("dropping frame for session {session_id}: {err}");
            return;
        }
        Ok(Err(FrameError::Inference(err))) => {
            warn!("inference failed for session {session_id}: {err}");
            let mut guard = state.lock().await;
            guard.report_error("Erro ao classificar imagem");
            emit_recognition_state(app_handle, guard.clone());
            return;
        }
        Ok(Ok(scores)) => scores,
    };

    let now_ms = started.elapsed().as_millis() as u64;
    if let Some(result) = decide(&scores, &LABELS, now_ms, *last_accepted_ms) {
        *last_accepted_ms = Some(now_ms);
        accept_result(state, app_handle, result).await;
    }
}

async fn accept_result(
    state: &Arc<Mutex<RecognitionState>>,
    app_handle: &AppHandle,
    result: ClassificationResult,
) {
    info!(
        "recognized letter {} ({:.0}%)",
        result.label,
        result.confidence * 100.0
    );
    let mut guard = state.lock().await;
    guard.accept(result);
    emit_recognition_state(app_handle, guard.clone());
}
