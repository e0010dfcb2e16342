use crate::annotations::BoundingBox;
use crate::error::Result;
use ndarray::{ArrayBase, Dim, ViewRepr};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// A detection before merging: tile-local box, label, confidence. No
/// sequence index or status yet; those are assigned after NMS.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub bbox: BoundingBox,
    pub label: String,
    pub confidence: f32,
}

impl Candidate {
    /// Reprojects the candidate's box by a tile origin.
    pub fn translated(&self, dx: f32, dy: f32) -> Candidate {
        Candidate {
            bbox: self.bbox.translated(dx, dy),
            label: self.label.clone(),
            confidence: self.confidence,
        }
    }
}

/// The seam between the tiled pipeline and whatever produces boxes.
///
/// `run_inference` does not take an owned array but a view into one: the
/// pipeline crops tiles by slicing ndarray objects, so detection over a
/// large image makes no tensor copies beyond the initial conversion. The
/// tiled detector takes this as an injected `Option<Box<dyn ...>>`; tests
/// substitute stubs, and an absent model degrades to an empty result.
pub trait ObjectDetectionModel {
    /// Runs detection on one tile. Returned boxes are tile-local.
    fn run_inference(
        &self,
        input_array: ArrayBase<ViewRepr<&f32>, Dim<[usize; 4]>>,
        confidence: f32,
    ) -> Result<Vec<Candidate>>;
}

/// The seam for single-crop classification.
pub trait ClassificationModel {
    /// Classifies one crop, returning `(label, probability)` pairs in
    /// descending probability order.
    fn run_inference(
        &self,
        input_array: ArrayBase<ViewRepr<&f32>, Dim<[usize; 4]>>,
    ) -> Result<Vec<(String, f32)>>;

    /// Input edge length the crop must be resized to before inference.
    fn input_size(&self) -> u32;
}

/// Reads a file with the class names into a vector so that the number ids
/// which come directly from the ORT inference session can be given meaning.
pub fn read_classes_txt_file(filepath: &Path) -> io::Result<Vec<String>> {
    BufReader::new(File::open(filepath)?).lines().collect()
}
