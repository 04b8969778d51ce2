mod recognition;
mod settings;
mod translate;

use recognition::commands::{
    clear_capture_history, clear_captured_text, get_recognition_state, push_frame,
    report_camera_error, start_capture, stop_capture, toggle_camera,
};
use recognition::RecognitionController;
use settings::SettingsStore;
use tauri::Manager;
use translate::commands::{
    get_translation_status, get_video_status, request_video, request_widget_translation,
    translate_to_gloss, widget_event,
};
use translate::TranslationHandle;

pub(crate) struct AppState {
    pub(crate) recognition: RecognitionController,
    pub(crate) translation: TranslationHandle,
    pub(crate) settings: SettingsStore,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Librasil starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let settings_store = SettingsStore::new(app_data_dir.join("settings.json"))?;

                let model_path = app
                    .path()
                    .resolve(
                        "models/libras_model.onnx",
                        tauri::path::BaseDirectory::Resource,
                    )
                    .map_err(|err| anyhow::anyhow!(err))?;

                let recognition = RecognitionController::new(
                    app.handle().clone(),
                    model_path,
                    settings_store.camera().prefer_front,
                );

                let translation = TranslationHandle::new(settings_store.translation().base_url)?;

                app.manage(AppState {
                    recognition,
                    translation,
                    settings: settings_store,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            start_capture,
            stop_capture,
            push_frame,
            get_recognition_state,
            clear_capture_history,
            clear_captured_text,
            toggle_camera,
            report_camera_error,
            translate_to_gloss,
            request_video,
            get_video_status,
            get_translation_status,
            request_widget_translation,
            widget_event,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
