// Top-down elevation overview of the build area.
//
// One pixel per column: world x maps to image x and world z to image y, so
// north is up. Each district corner gets a small marker in the color of its
// dev pole.

use crate::district::District;
use crate::error::GenerationError;
use crate::layout::DEV_POLE_COLORS;
use crate::world_editor::HeightMap;
use image::{Rgb, RgbImage};
use std::path::Path;

const MARKER_SIZE: u32 = 5;

/// Terrain ramp stops from lowest to highest ground.
const TERRAIN_RAMP: [(f64, [u8; 3]); 5] = [
    (0.0, [51, 102, 204]),
    (0.15, [0, 153, 102]),
    (0.5, [230, 220, 140]),
    (0.8, [128, 92, 84]),
    (1.0, [255, 255, 255]),
];

/// Renders `heightmap` and writes it to `path`, creating parent directories.
pub fn render(heightmap: &HeightMap, path: &Path) -> Result<(), GenerationError> {
    let img = draw(heightmap)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    img.save(path)?;
    log::info!("Overview written to {}", path.display());
    Ok(())
}

fn draw(heightmap: &HeightMap) -> Result<RgbImage, GenerationError> {
    let (Some(low), Some(high)) = (heightmap.min(), heightmap.max()) else {
        return Err(GenerationError::Interface("heightmap is empty".to_string()));
    };
    let width = heightmap.size_x() as u32;
    let height = heightmap.size_z() as u32;
    let span = f64::from((high - low).max(1));

    let mut img = RgbImage::new(width, height);
    for (px, pz, pixel) in img.enumerate_pixels_mut() {
        let x = heightmap.min_x() + px as i32;
        let z = heightmap.min_z() + pz as i32;
        let ground = heightmap.get(x, z).unwrap_or(low);
        *pixel = terrain_color(f64::from(ground - low) / span);
    }

    for (district, color) in District::ALL.into_iter().zip(DEV_POLE_COLORS) {
        mark_corner(&mut img, district, marker_color(color));
    }
    Ok(img)
}

/// Linear interpolation along the terrain ramp, `t` in `[0, 1]`.
fn terrain_color(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    for pair in TERRAIN_RAMP.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = (t - t0) / (t1 - t0);
            let mix = |a: u8, b: u8| (f64::from(a) + f * (f64::from(b) - f64::from(a))).round() as u8;
            return Rgb([mix(c0[0], c1[0]), mix(c0[1], c1[1]), mix(c0[2], c1[2])]);
        }
    }
    Rgb(TERRAIN_RAMP[TERRAIN_RAMP.len() - 1].1)
}

fn marker_color(name: &str) -> Rgb<u8> {
    match name {
        "blue" => Rgb([44, 46, 143]),
        "yellow" => Rgb([240, 175, 21]),
        "green" => Rgb([73, 91, 36]),
        "red" => Rgb([142, 32, 32]),
        _ => Rgb([0, 0, 0]),
    }
}

fn mark_corner(img: &mut RgbImage, district: District, color: Rgb<u8>) {
    let size = MARKER_SIZE.min(img.width()).min(img.height());
    let x0 = if district.x_sign() < 0 { 0 } else { img.width() - size };
    let y0 = if district.z_sign() < 0 { 0 } else { img.height() - size };
    for x in x0..x0 + size {
        for y in y0..y0 + size {
            img.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_editor::BuildArea;
    use crate::coordinate::Coord;

    fn sloped_heightmap() -> HeightMap {
        // rises towards the east
        let heights = (0..40).map(|x| vec![60 + x; 30]).collect();
        HeightMap::new(-20, -15, heights)
    }

    #[test]
    fn test_terrain_ramp_ends() {
        assert_eq!(terrain_color(0.0), Rgb(TERRAIN_RAMP[0].1));
        assert_eq!(terrain_color(1.0), Rgb([255, 255, 255]));
        assert_eq!(terrain_color(7.0), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_corner_markers() {
        let img = draw(&sloped_heightmap()).unwrap();
        assert_eq!((img.width(), img.height()), (40, 30));
        // north-west top left, south-east bottom right
        assert_eq!(*img.get_pixel(0, 0), marker_color("blue"));
        assert_eq!(*img.get_pixel(0, 29), marker_color("yellow"));
        assert_eq!(*img.get_pixel(39, 29), marker_color("green"));
        assert_eq!(*img.get_pixel(39, 0), marker_color("red"));
        // low ground is darker than high ground away from the markers
        let west = img.get_pixel(6, 15);
        let east = img.get_pixel(33, 15);
        assert_ne!(west, east);
    }

    #[test]
    fn test_render_creates_directories() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("nested").join("overview.png");
        let area = BuildArea::new(Coord::new(0, 0, 0), Coord::new(15, 100, 15));
        render(&HeightMap::flat(&area, 64), &path).unwrap();

        let written = image::open(&path).unwrap().to_rgb8();
        assert_eq!((written.width(), written.height()), (16, 16));
    }

    #[test]
    fn test_empty_heightmap() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("overview.png");
        let result = render(&HeightMap::new(0, 0, Vec::new()), &path);
        assert!(matches!(result, Err(GenerationError::Interface(_))));
        assert!(!path.exists());
    }
}
