use std::path::Path;

use log::info;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use thiserror::Error;

/// Model input geometry: 224x224 RGB, batch of one.
pub const MODEL_INPUT_WIDTH: u32 = 224;
pub const MODEL_INPUT_HEIGHT: u32 = 224;

/// The 16 letters the bundled model recognizes, in output-vector order.
pub const LABELS: [&str; 16] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "L", "M", "N", "O", "P", "U", "V",
];

const INTRA_THREADS: usize = 4;

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model artifact not found at {0}")]
    ArtifactMissing(String),

    #[error("failed to load model: {0}")]
    Onnx(#[from] ort::Error),

    #[error("model has no {0} tensor")]
    MissingIo(&'static str),
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("input tensor shape mismatch: expected {expected} values, got {actual}")]
    InputShape { expected: usize, actual: usize },

    #[error("model returned {actual} scores, expected {expected}")]
    OutputShape { expected: usize, actual: usize },

    #[error("inference failed: {0}")]
    Onnx(#[from] ort::Error),
}

/// ONNX Runtime session around the bundled Libras letter model.
///
/// Loaded once per capture session; dropping the value releases the model
/// resources. Each `classify` call is independent and touches no state
/// beyond its own output vector.
pub struct LibrasClassifier {
    session: Session,
    input_name: String,
    output_name: String,
}

impl LibrasClassifier {
    pub fn load(model_path: &Path) -> Result<Self, ModelLoadError> {
        if !model_path.exists() {
            return Err(ModelLoadError::ArtifactMissing(
                model_path.display().to_string(),
            ));
        }

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(INTRA_THREADS)?
            .commit_from_file(model_path)?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or(ModelLoadError::MissingIo("input"))?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or(ModelLoadError::MissingIo("output"))?;

        info!(
            "libras model loaded from {} (input: {}, output: {}, {} labels)",
            model_path.display(),
            input_name,
            output_name,
            LABELS.len()
        );

        Ok(Self {
            session,
            input_name,
            output_name,
        })
    }

    /// Run one inference over a preprocessed frame tensor and return the
    /// per-label score vector, positionally aligned with [`LABELS`].
    pub fn classify(&mut self, tensor: &[f32]) -> Result<Vec<f32>, InferenceError> {
        let expected = (MODEL_INPUT_WIDTH * MODEL_INPUT_HEIGHT * 3) as usize;
        if tensor.len() != expected {
            return Err(InferenceError::InputShape {
                expected,
                actual: tensor.len(),
            });
        }

        let shape = vec![
            1_usize,
            MODEL_INPUT_HEIGHT as usize,
            MODEL_INPUT_WIDTH as usize,
            3,
        ];
        let input = ort::value::Value::from_array((shape, tensor.to_vec()))?;

        let outputs = self.session.run(ort::inputs![
            self.input_name.as_str() => &input,
        ])?;

        let (_, scores) = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?;

        if scores.len() < LABELS.len() {
            return Err(InferenceError::OutputShape {
                expected: LABELS.len(),
                actual: scores.len(),
            });
        }

        Ok(scores[..LABELS.len()].to_vec())
    }
}
