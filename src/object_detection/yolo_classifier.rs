use crate::error::Result;
use crate::object_detection::models::ClassificationModel;
use ndarray::{ArrayBase, Dim, ViewRepr};
use ort::inputs;
use ort::session::{Session, SessionOutputs};
use std::cmp::Ordering;
use std::path::Path;
use tracing::info;

/// YOLO-family aircraft type classifier backed by an ONNX session.
///
/// The classification head emits one probability per class in `output0`.
pub struct YoloClassifier {
    session: Session,
    class_names: Vec<String>,
    input_size: u32,
    model_name: String,
}

impl YoloClassifier {
    pub fn new(
        model_path: &Path,
        class_names: Vec<String>,
        input_size: u32,
        model_name: String,
    ) -> Result<Self> {
        let session = Session::builder()?.commit_from_file(model_path)?;
        info!(model = %model_name, path = %model_path.display(), "loaded classification model");
        Ok(YoloClassifier {
            session,
            class_names,
            input_size,
            model_name,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl ClassificationModel for YoloClassifier {
    fn run_inference(
        &self,
        input_array: ArrayBase<ViewRepr<&f32>, Dim<[usize; 4]>>,
    ) -> Result<Vec<(String, f32)>> {
        let outputs: SessionOutputs = self.session.run(inputs!["images" => input_array]?)?;
        let probs = outputs["output0"].try_extract_tensor::<f32>()?;

        let mut ranked: Vec<(String, f32)> = probs
            .iter()
            .copied()
            .enumerate()
            .map(|(class_id, prob)| {
                let label = self
                    .class_names
                    .get(class_id)
                    .cloned()
                    .unwrap_or_else(|| class_id.to_string());
                (label, prob)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        Ok(ranked)
    }

    fn input_size(&self) -> u32 {
        self.input_size
    }
}
