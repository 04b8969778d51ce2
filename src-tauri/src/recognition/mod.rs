//! Portuguese-sign-language (Libras) letter recognition pipeline.
//!
//! The webview producer pushes camera frames into a single-slot cell; one
//! background lane preprocesses each frame into the model's input tensor,
//! runs the bundled ONNX classifier, and applies a confidence-floor plus
//! debounce policy before publishing accepted letters to the shared
//! session state.

pub mod classifier;
pub mod commands;
pub mod controller;
pub mod frame;
pub mod loop_worker;
pub mod policy;
pub mod preprocess;
pub mod state;

pub use controller::RecognitionController;
