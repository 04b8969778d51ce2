use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tokio::sync::Notify;

/// One camera frame as delivered by the webview producer: packed RGBA8
/// pixels plus the orientation metadata the preprocessor needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Sensor-to-display rotation, a multiple of 90 degrees.
    pub rotation_degrees: i32,
    /// Frames from the front sensor get mirrored during preprocessing.
    pub from_front_camera: bool,
    /// Packed RGBA8 pixel data, row-major, `width * height * 4` bytes.
    pub data: Vec<u8>,
}

/// Single-slot cell between the frame producer and the processing lane.
///
/// A new frame replaces any frame still sitting in the slot, so the
/// producer never blocks and the lane never works through a backlog
/// (keep-only-latest backpressure).
#[derive(Clone, Default)]
pub struct FrameCell {
    slot: Arc<Mutex<Option<Frame>>>,
    notify: Arc<Notify>,
}

impl FrameCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposit a frame, superseding any unprocessed one. Never blocks on
    /// the consumer.
    pub fn put(&self, frame: Frame) {
        {
            let mut slot = self.slot.lock().unwrap();
            *slot = Some(frame);
        }
        self.notify.notify_one();
    }

    /// Take the pending frame, if any, leaving the slot empty.
    pub fn take(&self) -> Option<Frame> {
        self.slot.lock().unwrap().take()
    }

    /// Drop any pending frame without processing it.
    pub fn clear(&self) {
        self.slot.lock().unwrap().take();
    }

    /// Wait until a frame has been deposited since the last wakeup.
    pub async fn wait(&self) {
        self.notify.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(tag: u8) -> Frame {
        Frame {
            width: 1,
            height: 1,
            rotation_degrees: 0,
            from_front_camera: true,
            data: vec![tag, 0, 0, 255],
        }
    }

    #[test]
    fn take_on_empty_cell_is_none() {
        let cell = FrameCell::new();
        assert!(cell.take().is_none());
    }

    #[test]
    fn newer_frame_supersedes_pending_one() {
        let cell = FrameCell::new();
        cell.put(frame(1));
        cell.put(frame(2));

        let taken = cell.take().unwrap();
        assert_eq!(taken.data[0], 2);
        // The superseded frame is gone, not queued behind.
        assert!(cell.take().is_none());
    }

    #[test]
    fn clear_discards_pending_frame() {
        let cell = FrameCell::new();
        cell.put(frame(7));
        cell.clear();
        assert!(cell.take().is_none());
    }

    #[tokio::test]
    async fn wait_wakes_after_put() {
        let cell = FrameCell::new();
        cell.put(frame(3));
        // notify_one stores a permit, so this must not hang.
        cell.wait().await;
        assert!(cell.take().is_some());
    }
}
