//! Text -> Libras direction: the VLibras HTTP client and the boundary to
//! the signing-avatar widget hosted in the webview.

pub mod client;
pub mod commands;

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use client::{RemoteServiceError, VLibrasClient};

/// Lifecycle of one widget translation, mirrored to the frontend status
/// card.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TranslationStatus {
    #[default]
    Idle,
    Translating,
    Completed,
    Error {
        message: String,
    },
}

/// Events the signing-avatar widget reports back across the webview
/// boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WidgetEvent {
    Started,
    Completed,
    Error { message: String },
}

impl From<WidgetEvent> for TranslationStatus {
    fn from(event: WidgetEvent) -> Self {
        match event {
            WidgetEvent::Started => TranslationStatus::Translating,
            WidgetEvent::Completed => TranslationStatus::Completed,
            WidgetEvent::Error { message } => TranslationStatus::Error { message },
        }
    }
}

/// The translation collaborator as held in app state: the remote client
/// plus the current widget status.
pub struct TranslationHandle {
    pub(crate) client: VLibrasClient,
    status: RwLock<TranslationStatus>,
}

impl TranslationHandle {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteServiceError> {
        Ok(Self {
            client: VLibrasClient::new(base_url)?,
            status: RwLock::new(TranslationStatus::Idle),
        })
    }

    pub fn status(&self) -> TranslationStatus {
        self.status.read().unwrap().clone()
    }

    pub fn set_status(&self, status: TranslationStatus) {
        *self.status.write().unwrap() = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_events_map_onto_statuses() {
        assert_eq!(
            TranslationStatus::from(WidgetEvent::Started),
            TranslationStatus::Translating
        );
        assert_eq!(
            TranslationStatus::from(WidgetEvent::Completed),
            TranslationStatus::Completed
        );
        assert_eq!(
            TranslationStatus::from(WidgetEvent::Error {
                message: "plugin não carregou".into()
            }),
            TranslationStatus::Error {
                message: "plugin não carregou".into()
            }
        );
    }

    #[test]
    fn widget_event_payloads_deserialize() {
        let event: WidgetEvent = serde_json::from_str(r#"{"kind": "started"}"#).unwrap();
        assert!(matches!(event, WidgetEvent::Started));

        let event: WidgetEvent =
            serde_json::from_str(r#"{"kind": "error", "message": "timeout"}"#).unwrap();
        assert!(matches!(event, WidgetEvent::Error { message } if message == "timeout"));
    }
}
