use serde::Serialize;
use tauri::{AppHandle, Emitter, State};

use crate::AppState;

use super::{TranslationStatus, WidgetEvent};

#[derive(Serialize, Clone)]
struct WidgetTranslateEvent {
    text: String,
}

#[tauri::command]
pub async fn translate_to_gloss(
    state: State<'_, AppState>,
    text: String,
) -> Result<String, String> {
    state
        .translation
        .client
        .translate_to_gloss(&text)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn request_video(state: State<'_, AppState>, gloss: String) -> Result<String, String> {
    state
        .translation
        .client
        .request_video(&gloss)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_video_status(
    state: State<'_, AppState>,
    video_id: String,
) -> Result<String, String> {
    state
        .translation
        .client
        .video_status(&video_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_translation_status(state: State<'_, AppState>) -> TranslationStatus {
    state.translation.status()
}

/// Forward typed text to the signing-avatar widget in the webview.
#[tauri::command]
pub fn request_widget_translation(
    state: State<'_, AppState>,
    app_handle: AppHandle,
    text: String,
) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("texto vazio".to_string());
    }

    state.translation.set_status(TranslationStatus::Translating);
    emit_translation_status(&app_handle, state.translation.status());

    app_handle
        .emit("widget-translate", WidgetTranslateEvent { text })
        .map_err(|e| e.to_string())
}

/// Lifecycle callback from the widget's JavaScript bridge.
#[tauri::command]
pub fn widget_event(
    state: State<'_, AppState>,
    app_handle: AppHandle,
    event: WidgetEvent,
) -> Result<(), String> {
    if let WidgetEvent::Error { message } = &event {
        log::warn!("widget translation failed: {message}");
    }

    state.translation.set_status(event.into());
    emit_translation_status(&app_handle, state.translation.status());
    Ok(())
}

fn emit_translation_status(app_handle: &AppHandle, status: TranslationStatus) {
    let _ = app_handle.emit("translation-status-changed", status);
}
