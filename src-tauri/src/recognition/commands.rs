use tauri::State;

use crate::AppState;

use super::frame::Frame;
use super::state::RecognitionState;

#[tauri::command]
pub async fn start_capture(state: State<'_, AppState>) -> Result<RecognitionState, String> {
    state
        .recognition
        .start_capture()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn stop_capture(state: State<'_, AppState>) -> Result<(), String> {
    state
        .recognition
        .stop_capture()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn push_frame(state: State<'_, AppState>, frame: Frame) {
    state.recognition.push_frame(frame);
}

#[tauri::command]
pub async fn get_recognition_state(
    state: State<'_, AppState>,
) -> Result<RecognitionState, String> {
    Ok(state.recognition.snapshot().await)
}

#[tauri::command]
pub async fn clear_capture_history(
    state: State<'_, AppState>,
) -> Result<RecognitionState, String> {
    Ok(state.recognition.clear_history().await)
}

#[tauri::command]
pub async fn clear_captured_text(state: State<'_, AppState>) -> Result<RecognitionState, String> {
    Ok(state.recognition.clear_captured_text().await)
}

#[tauri::command]
pub async fn toggle_camera(state: State<'_, AppState>) -> Result<bool, String> {
    let is_front = state.recognition.toggle_camera().await;

    // Remember the facing for the next app launch.
    let mut camera_settings = state.settings.camera();
    camera_settings.prefer_front = is_front;
    state
        .settings
        .update_camera(camera_settings)
        .map_err(|e| e.to_string())?;

    Ok(is_front)
}

#[tauri::command]
pub async fn report_camera_error(
    state: State<'_, AppState>,
    message: String,
) -> Result<(), String> {
    state.recognition.report_camera_error(message).await;
    Ok(())
}
