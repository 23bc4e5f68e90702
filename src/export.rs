//! Flat records and overlay images for the particles of a batch.
use crate::calibration::PixelScale;
use crate::image::io::RgbImageU8;
use crate::particle::{Particle, ParticleRegistry};
use crate::types::{Contour, Point};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_line_segment_mut};
use serde::{Deserialize, Serialize};

pub const CONTOUR_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const CENTER_COLOR: Rgb<u8> = Rgb([0, 255, 255]);

/// One particle, as written to the JSON results file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleRecord {
    pub image_index: usize,
    /// Boundary centroid in pixels.
    pub center: Point,
    pub radius_px: f64,
    pub radius: f64,
    pub area: f64,
    pub perimeter: f64,
    pub circularity: f64,
    pub radial_mean: f64,
    pub radial_sd: f64,
    pub radial_difference_sd: f64,
    pub point_count: usize,
    /// Contour in pixels.
    pub contour: Contour,
}

impl ParticleRecord {
    /// Describe `particle`; lengths and areas other than `radius_px` are in
    /// the units of `scale`.
    pub fn new(image_index: usize, particle: &Particle, scale: PixelScale) -> Self {
        let physical = scale.to_units(particle);
        Self {
            image_index,
            center: particle.center(),
            radius_px: particle.radius(),
            radius: physical.radius(),
            area: physical.area(),
            perimeter: physical.perimeter(),
            circularity: physical.circularity(),
            radial_mean: physical.radial_mean(),
            radial_sd: physical.radial_sd(),
            radial_difference_sd: physical.radial_difference_sd(),
            point_count: particle.len(),
            contour: particle.contour().clone(),
        }
    }
}

/// Records for every particle of every image, in image order.
pub fn collect_records(registries: &[ParticleRegistry], scale: PixelScale) -> Vec<ParticleRecord> {
    registries
        .iter()
        .enumerate()
        .flat_map(|(i, registry)| registry.iter().map(move |p| ParticleRecord::new(i, p, scale)))
        .collect()
}

/// Draw every particle's closed contour and a cross at its centre.
pub fn draw_particles(image: &RgbImageU8, particles: &[Particle]) -> Result<RgbImage, String> {
    let mut canvas = image.to_rgb_image()?;
    for particle in particles {
        for (a, b) in particle.contour().edges() {
            draw_line_segment_mut(
                &mut canvas,
                (a.x as f32, a.y as f32),
                (b.x as f32, b.y as f32),
                CONTOUR_COLOR,
            );
        }
        let c = particle.center().rounded();
        draw_cross_mut(&mut canvas, CENTER_COLOR, c.x as i32, c.y as i32);
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::AdmissionRule;

    fn ring_particle(x0: f64, y0: f64, r: f64) -> Particle {
        let pts: Vec<Point> = (0..12)
            .map(|i| {
                let t = 2.0 * std::f64::consts::PI * i as f64 / 12.0;
                Point::new(x0 + r * t.cos(), y0 + r * t.sin())
            })
            .collect();
        Particle::new(Contour::new(pts))
    }

    #[test]
    fn records_carry_image_index_and_units() {
        let rule = AdmissionRule {
            min_circularity: 0.5,
            min_point_ratio: 0.5,
            target_points: 12,
            overlap_tolerance: 0.8,
        };
        let mut first = ParticleRegistry::new();
        first.try_admit(ring_particle(20.0, 20.0, 8.0), &rule);
        let mut second = ParticleRegistry::new();
        second.try_admit(ring_particle(20.0, 20.0, 8.0), &rule);
        second.try_admit(ring_particle(60.0, 20.0, 8.0), &rule);

        let records = collect_records(&[first, second], PixelScale::new(2.0));
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].image_index, 0);
        assert_eq!(records[2].image_index, 1);
        assert!((records[0].radius - 2.0 * records[0].radius_px).abs() < 1e-9);
        assert_eq!(records[0].point_count, 12);

        let json = serde_json::to_string(&records[0]).unwrap();
        assert!(json.contains("\"radiusPx\""));
        let back: ParticleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, records[0]);
    }

    #[test]
    fn overlay_marks_contour_pixels() {
        let img = RgbImageU8::new(40, 40, vec![0; 40 * 40 * 3]);
        let p = ring_particle(20.0, 20.0, 10.0);
        let out = draw_particles(&img, &[p]).unwrap();
        assert_eq!(*out.get_pixel(30, 20), CONTOUR_COLOR);
        assert_eq!(*out.get_pixel(20, 20), CENTER_COLOR);
        assert_eq!(*out.get_pixel(2, 2), Rgb([0, 0, 0]));
    }
}
