use image::{DynamicImage, RgbImage, SubImage};
use labelocr::{
    east::{GeometryMap, ScoreMap},
    util::plan_resize,
    LabelPipeline, PipelineOptions, RecognitionError,
};
use ndarray::{Array2, Array3};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

fn main() {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let plan = plan_resize(800, 600, 1024);
    log::debug!("detector input plan: {plan:?}");

    // Synthetic detector output: one confident cell on a blank label scan.
    let mut grid = Array2::zeros((100, 100));
    grid[[10, 10]] = 0.9;
    let mut channels = Array3::zeros((5, 100, 100));
    channels[[0, 10, 10]] = 10.0; // d_top
    channels[[1, 10, 10]] = 20.0; // d_right
    channels[[2, 10, 10]] = 10.0; // d_bottom
    channels[[3, 10, 10]] = 20.0; // d_left
    let scores = ScoreMap::new(grid);
    let geometry = GeometryMap::new(channels).expect("five geometry channels");

    let image = DynamicImage::ImageRgb8(RgbImage::new(400, 400));
    let recognizer = |_: &SubImage<&DynamicImage>| -> Result<String, RecognitionError> {
        Ok("Aqua, Glycerin, Parfum".to_string())
    };

    let output = LabelPipeline::with_options(PipelineOptions::default())
        .run(&image, &scores, &geometry, &recognizer)
        .expect("pipeline run");
    for report in &output.regions {
        log::debug!("{:?} -> {:?}", report.bounds.rect, report.outcome);
    }
    println!("{}", output.joined_text());
}
