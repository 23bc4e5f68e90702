use log::info;
use particle_finder::batch::BatchSearch;
use particle_finder::calibration::PixelScale;
use particle_finder::config::search_tool::{load_config, SearchCommand, SearchPlan};
use particle_finder::export::{collect_records, draw_particles};
use particle_finder::image::io::{load_rgb_image, save_rgb, write_json_file, RgbImageU8};
use particle_finder::particle::ParticleRegistry;
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    match config.into_command() {
        SearchCommand::Skip { reason } => {
            info!("Search skipped: {reason}");
            Ok(())
        }
        SearchCommand::Run(plan) => run_plan(plan),
    }
}

fn run_plan(plan: SearchPlan) -> Result<(), String> {
    let images = plan
        .images
        .iter()
        .map(|path| load_rgb_image(path))
        .collect::<Result<Vec<RgbImageU8>, String>>()?;
    for (path, img) in plan.images.iter().zip(&images) {
        info!("Loaded {} ({}x{})", path.display(), img.width(), img.height());
    }

    let batch = BatchSearch::new(plan.searches).map_err(|e| e.to_string())?;
    let views: Vec<_> = images.iter().map(RgbImageU8::as_view).collect();
    let registries = batch.run(&views).map_err(|e| e.to_string())?;

    let scale = match &plan.calibration {
        Some(cal) => PixelScale::from_reference(
            cal.images
                .iter()
                .filter_map(|&i| registries.get(i))
                .flat_map(ParticleRegistry::iter),
            cal.particle_radius,
        ),
        None => PixelScale::IDENTITY,
    };
    info!("Pixel to unit ratio: {:.6}", scale.units_per_pixel());

    print_summary(&registries, scale);

    let records = collect_records(&registries, scale);
    write_json_file(&plan.output.records_json, &records)?;
    println!(
        "Saved {} particle records to {}",
        records.len(),
        plan.output.records_json.display()
    );

    if let Some(dir) = &plan.output.overlay_dir {
        for (i, (image, registry)) in images.iter().zip(&registries).enumerate() {
            let overlay = draw_particles(image, registry.particles())?;
            save_rgb(&overlay, &dir.join(format!("image_{i}.png")))?;
        }
        println!("Saved {} overlays to {}", images.len(), dir.display());
    }

    Ok(())
}

fn print_summary(registries: &[ParticleRegistry], scale: PixelScale) {
    for (i, registry) in registries.iter().enumerate() {
        println!("In image {}: {} particles", i + 1, registry.len());
        for particle in registry {
            let physical = scale.to_units(particle);
            let c = particle.center();
            println!(
                "  r = {:.3}, c = {:.4}, sd = {:.3}, position: x = {:.0}, y = {:.0}",
                physical.radius(),
                physical.circularity(),
                physical.radial_sd(),
                c.x,
                c.y
            );
        }
    }
}

fn usage() -> String {
    "Usage: particle_search <config.json>".to_string()
}
