use stack_projector::config::project as config;
use stack_projector::diagnostics::ProjectionReport;
use stack_projector::image::io::{load_stack_from_dir, save_grayscale_f32, write_json_file};
use stack_projector::image::{ImageF32, ImageViewMut};
use stack_projector::ZProjector;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "zproject_demo".to_string());
    let cfg = config::parse_cli(&program)?;

    let stack = load_stack_from_dir(&cfg.input_dir)?;
    println!(
        "Loaded stack {}x{} with {} planes from {}",
        stack.w,
        stack.h,
        stack.depth,
        cfg.input_dir.display()
    );

    let projector = ZProjector::new(cfg.project_params.clone());
    let report = projector
        .process_with_diagnostics(&stack.as_view())
        .map_err(|e| e.to_string())?;
    print_summary(&report);

    if let Some(path) = &cfg.output.image_out {
        let image = normalized(&report.image);
        save_grayscale_f32(&image, path)?;
        println!("Projection written to {}", path.display());
    }
    if let Some(path) = &cfg.output.json_out {
        write_json_file(path, &report.detailed())?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}

fn print_summary(report: &ProjectionReport) {
    let result = &report.result;
    println!(
        "mode={:?} projection={:?} focus_plane={} range=[{}, {}] latency_ms={:.3}",
        result.mode, result.projection, result.focus_plane, result.z_min, result.z_max,
        result.latency_ms
    );
    if let Some(warning) = &result.warning {
        println!("warning: {warning}");
    }
}

/// Rescale to [0, 1] so sum projections survive the 8-bit save.
fn normalized(image: &ImageF32) -> ImageF32 {
    let max = image.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let mut out = image.clone();
    if max > 0.0 {
        for y in 0..out.h {
            for v in out.row_mut(y) {
                *v /= max;
            }
        }
    }
    out
}
