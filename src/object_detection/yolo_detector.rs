use crate::annotations::BoundingBox;
use crate::error::Result;
use crate::object_detection::models::{Candidate, ObjectDetectionModel};
use ndarray::{ArrayBase, Axis, Dim, ViewRepr};
use ort::inputs;
use ort::session::{Session, SessionOutputs};
use std::path::Path;
use tracing::info;

/// YOLO-family aircraft detector backed by an ONNX inference session.
///
/// The session wraps the exported detection head: output `output0` has
/// shape `(1, 4 + classes, boxes)` with center-format coordinates in input
/// pixels, which for this pipeline are tile-local pixels.
pub struct YoloDetector {
    session: Session,
    class_names: Vec<String>,
    input_width: u32,
    input_height: u32,
    model_name: String,
}

impl YoloDetector {
    pub fn new(
        model_path: &Path,
        class_names: Vec<String>,
        input_width: u32,
        input_height: u32,
        model_name: String,
    ) -> Result<Self> {
        let session = Session::builder()?.commit_from_file(model_path)?;
        info!(model = %model_name, path = %model_path.display(), "loaded detection model");
        Ok(YoloDetector {
            session,
            class_names,
            input_width,
            input_height,
            model_name,
        })
    }

    pub fn input_width(&self) -> u32 {
        self.input_width
    }

    pub fn input_height(&self) -> u32 {
        self.input_height
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl ObjectDetectionModel for YoloDetector {
    fn run_inference(
        &self,
        input_array: ArrayBase<ViewRepr<&f32>, Dim<[usize; 4]>>,
        confidence: f32,
    ) -> Result<Vec<Candidate>> {
        let outputs: SessionOutputs = self.session.run(inputs!["images" => input_array]?)?;
        let output = outputs["output0"].try_extract_tensor::<f32>()?;
        let output = output.t();

        let mut candidates: Vec<Candidate> = Vec::new();
        for row in output.axis_iter(Axis(0)) {
            let row: Vec<f32> = row.iter().copied().collect();
            let Some((class_id, prob)) = row
                .iter()
                .skip(4) // skips bounding box coords.
                .enumerate()
                .map(|(index, value)| (index, *value))
                .reduce(|accum, row| if row.1 > accum.1 { row } else { accum })
            else {
                continue;
            };
            if prob < confidence {
                continue;
            }
            let label = self
                .class_names
                .get(class_id)
                .cloned()
                .unwrap_or_else(|| class_id.to_string());
            let x = row[0];
            let y = row[1];
            let w = row[2];
            let h = row[3];
            let bbox = BoundingBox::new(
                x - (w / 2.0),
                y - (h / 2.0),
                x + (w / 2.0),
                y + (h / 2.0),
            )?
            .clamped(self.input_width as f32, self.input_height as f32);
            candidates.push(Candidate {
                bbox,
                label,
                confidence: prob,
            });
        }
        Ok(candidates)
    }
}
