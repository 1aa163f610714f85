use fractal_engine::{CliRenderController, IterationRule, NeverCancel, ViewParameters};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut controller = CliRenderController::new(IterationRule::Mandelbrot, ViewParameters::default());

    controller.render_full_frame()?;
    controller.render_tiled(&NeverCancel)?;

    if let Some(summary) = controller.summary() {
        info!(
            "{}x{}: {} interior pixels, {}/{} tiles, tiled matches full frame: {}",
            summary.width,
            summary.height,
            summary.interior_pixels,
            summary.tiles_composed,
            summary.tiles_total,
            summary.tiled_matches_full_frame
        );
    }

    Ok(())
}
