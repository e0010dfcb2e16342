use apron_watch::object_detection::{
    ClassificationModel, ObjectDetectionModel, read_classes_txt_file,
};
use apron_watch::{
    ClassificationEnricher, DetectorConfig, ImageResolver, Pipeline, TiledDetector,
    YoloClassifier, YoloDetector,
};
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Compare two captures of a site and print the annotated detection sets
/// as JSON.
#[derive(Parser)]
#[command(name = "apron-watch", version)]
struct Cli {
    /// Image reference for the past capture (path or URL).
    past: String,

    /// Image reference for the current capture (path or URL).
    current: String,

    /// Path to the detection ONNX model. Without it, detection degrades
    /// to empty sets.
    #[arg(long)]
    detector: Option<PathBuf>,

    /// Class names for the detection model, one per line.
    #[arg(long)]
    detector_classes: Option<PathBuf>,

    /// Path to the classification ONNX model.
    #[arg(long)]
    classifier: Option<PathBuf>,

    /// Class names for the classification model, one per line.
    #[arg(long)]
    classifier_classes: Option<PathBuf>,

    /// Classifier input edge length in pixels.
    #[arg(long, default_value_t = 224)]
    classifier_input: u32,

    /// Root directory for relative image references.
    #[arg(long, default_value = "assets/images")]
    asset_root: PathBuf,

    /// After comparing, classify this sequence index of the current set.
    #[arg(long)]
    classify: Option<usize>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let resolver = Arc::new(ImageResolver::with_defaults(&cli.asset_root)?);
    let config = DetectorConfig::default();

    let detector_model: Option<Box<dyn ObjectDetectionModel + Send + Sync>> =
        match (&cli.detector, &cli.detector_classes) {
            (Some(model_path), Some(classes_path)) => {
                let class_names = read_classes_txt_file(classes_path)?;
                Some(Box::new(YoloDetector::new(
                    model_path,
                    class_names,
                    config.tile_size,
                    config.tile_size,
                    "aircraft detector".to_string(),
                )?))
            }
            _ => None,
        };
    let classifier_model: Option<Box<dyn ClassificationModel + Send + Sync>> =
        match (&cli.classifier, &cli.classifier_classes) {
            (Some(model_path), Some(classes_path)) => {
                let class_names = read_classes_txt_file(classes_path)?;
                Some(Box::new(YoloClassifier::new(
                    model_path,
                    class_names,
                    cli.classifier_input,
                    "aircraft classifier".to_string(),
                )?))
            }
            _ => None,
        };

    let detector = TiledDetector::new(detector_model, Arc::clone(&resolver), config);
    let enricher = ClassificationEnricher::new(classifier_model);
    let pipeline = Pipeline::new(resolver, detector, enricher);

    let (past_set, current_set) = pipeline.compare_captures(&cli.past, &cli.current);
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "past": past_set,
            "current": current_set,
        }))?
    );

    if let Some(sequence_index) = cli.classify {
        let result = pipeline.classify_selection(&cli.current, &current_set, sequence_index);
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
