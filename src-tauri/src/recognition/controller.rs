use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use log::{error, info};
use tauri::{AppHandle, Emitter};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::classifier::LibrasClassifier;
use super::frame::{Frame, FrameCell};
use super::loop_worker::recognition_loop;
use super::state::RecognitionState;

struct CaptureWorker {
    session_id: String,
    started_at: DateTime<Utc>,
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

/// Owns the recognition session lifecycle: classifier acquisition, the
/// processing lane, the shared state, and the frame cell the producer
/// deposits into.
#[derive(Clone)]
pub struct RecognitionController {
    app_handle: AppHandle,
    model_path: PathBuf,
    state: Arc<Mutex<RecognitionState>>,
    frames: FrameCell,
    worker: Arc<Mutex<Option<CaptureWorker>>>,
}

impl RecognitionController {
    pub fn new(app_handle: AppHandle, model_path: PathBuf, prefer_front_camera: bool) -> Self {
        Self {
            app_handle,
            model_path,
            state: Arc::new(Mutex::new(RecognitionState::with_facing(prefer_front_camera))),
            frames: FrameCell::new(),
            worker: Arc::new(Mutex::new(None)),
        }
    }

    /// Load the model and spawn the processing lane. A load failure leaves
    /// recognition permanently unavailable for this session and is surfaced
    /// to the user.
    pub async fn start_capture(&self) -> Result<RecognitionState> {
        let mut worker_guard = self.worker.lock().await;
        if worker_guard.is_some() {
            bail!("capture already active");
        }

        self.frames.clear();

        let model_path = self.model_path.clone();
        let classifier = tokio::task::spawn_blocking(move || LibrasClassifier::load(&model_path))
            .await
            .context("classifier load worker join failed")?;

        let classifier = match classifier {
            Ok(classifier) => classifier,
            Err(err) => {
                error!("model load failed: {err}");
                let mut state = self.state.lock().await;
                state.report_error("Reconhecimento indisponível: falha ao carregar o modelo");
                emit_recognition_state(&self.app_handle, state.clone());
                return Err(err.into());
            }
        };

        let session_id = Uuid::new_v4().to_string();
        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(recognition_loop(
            session_id.clone(),
            classifier,
            self.frames.clone(),
            self.state.clone(),
            self.app_handle.clone(),
            cancel_token.clone(),
        ));

        info!("capture session {session_id} started");
        *worker_guard = Some(CaptureWorker {
            session_id,
            started_at: Utc::now(),
            handle,
            cancel_token,
        });

        Ok(self.state.lock().await.clone())
    }

    /// Stop frame processing and release the model. Joining the lane
    /// guarantees no inference call outlives the classifier.
    pub async fn stop_capture(&self) -> Result<()> {
        let Some(worker) = self.worker.lock().await.take() else {
            return Ok(());
        };

        worker.cancel_token.cancel();
        worker
            .handle
            .await
            .context("recognition loop task failed to join")?;
        self.frames.clear();

        let elapsed = Utc::now().signed_duration_since(worker.started_at);
        info!(
            "capture session {} stopped after {}s",
            worker.session_id,
            elapsed.num_seconds()
        );
        Ok(())
    }

    /// Deposit a frame from the producer. Never blocks; a frame the lane
    /// has not picked up yet is simply superseded.
    pub fn push_frame(&self, frame: Frame) {
        self.frames.put(frame);
    }

    pub async fn snapshot(&self) -> RecognitionState {
        self.state.lock().await.clone()
    }

    pub async fn clear_history(&self) -> RecognitionState {
        let mut state = self.state.lock().await;
        state.clear_history();
        emit_recognition_state(&self.app_handle, state.clone());
        state.clone()
    }

    pub async fn clear_captured_text(&self) -> RecognitionState {
        let mut state = self.state.lock().await;
        state.clear_captured_text();
        emit_recognition_state(&self.app_handle, state.clone());
        state.clone()
    }

    /// Flip the camera facing. The emitted state change tells the frontend
    /// producer to restart its capture with the new facing; frames carry
    /// their own facing flag, so in-flight ones are still mirrored
    /// correctly.
    pub async fn toggle_camera(&self) -> bool {
        let mut state = self.state.lock().await;
        let is_front = state.toggle_camera();
        emit_recognition_state(&self.app_handle, state.clone());
        info!(
            "camera switched to {}",
            if is_front { "front" } else { "back" }
        );
        is_front
    }

    /// Camera subsystem failures reported by the producer.
    pub async fn report_camera_error(&self, message: String) {
        let mut state = self.state.lock().await;
        state.report_error(message);
        emit_recognition_state(&self.app_handle, state.clone());
    }
}

pub(crate) fn emit_recognition_state(app_handle: &AppHandle, state: RecognitionState) {
    let _ = app_handle.emit("recognition-state-changed", state);
}
