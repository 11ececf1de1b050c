//! Procedural toolbar icon: a white bell on a blue disc with a clapper,
//! a notification badge and a check mark.
//!
//! The artwork is drawn once at the largest size and downscaled, so every
//! resolution shares the same geometry.

use crate::{
    manifest::IconManifest,
    output::{ensure_dir, save_png},
    palette::{self, parse_color, with_alpha},
    raster::{
        alpha_composite, fill_shape, gaussian_blur, paint_shape, put_alpha,
        resize_premultiplied, shape_mask, tint, vertical_gradient, Bounds, Shape,
    },
};
use anyhow::{bail, Result};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output sizes, largest first. The first entry is the render size.
pub const ICON_SIZES: [u32; 6] = [512, 256, 128, 48, 32, 16];

pub const DEFAULT_OUTPUT_DIR: &str = "src/assets/icons";
pub const DEFAULT_MANIFEST_PREFIX: &str = "assets/icons";

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const HIGHLIGHT_ALPHA: u8 = 68;
const SHADOW_ALPHA: u8 = 60;
const CLAPPER_SHINE_ALPHA: u8 = 120;

/// Check mark vertices as fractions of the icon size.
const CHECK_POINTS: [(f32, f32); 3] = [(0.38, 0.50), (0.47, 0.60), (0.64, 0.42)];

#[derive(Debug, Clone)]
pub struct IconOptions {
    /// Directory the `icon-{size}.png` files are written to.
    pub output: PathBuf,
    /// Where to write the manifest `icons` fragment, if anywhere.
    pub manifest: Option<PathBuf>,
    /// Directory prefix used for icon paths inside the manifest fragment.
    pub manifest_prefix: String,
}

impl Default for IconOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            manifest: None,
            manifest_prefix: DEFAULT_MANIFEST_PREFIX.to_string(),
        }
    }
}

pub fn icon_file_name(size: u32) -> String {
    format!("icon-{size}.png")
}

/// Render the icon and write every size in [`ICON_SIZES`].
///
/// Returns the paths written, in order.
pub fn generate_toolbar_icons(options: &IconOptions) -> Result<Vec<PathBuf>> {
    ensure_dir(&options.output)?;

    println!("Generating toolbar icons...");
    let base_size = ICON_SIZES[0];
    let base_icon = render_icon(base_size)?;

    let mut manifest = IconManifest::new();
    let mut written = Vec::new();

    for size in ICON_SIZES {
        let icon = if size == base_size {
            base_icon.clone()
        } else {
            resize_premultiplied(&base_icon, size, size)
        };

        let path = options.output.join(icon_file_name(size));
        save_png(&icon, &path)?;
        println!("  ✓ Generated {} ({size}x{size})", path.display());

        manifest.add_icon(size, manifest_entry(&options.manifest_prefix, size));
        written.push(path);
    }

    if let Some(manifest_path) = &options.manifest {
        write_manifest(&manifest, manifest_path)?;
        written.push(manifest_path.clone());
    }

    Ok(written)
}

fn manifest_entry(prefix: &str, size: u32) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        icon_file_name(size)
    } else {
        format!("{prefix}/{}", icon_file_name(size))
    }
}

fn write_manifest(manifest: &IconManifest, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    manifest.write(path)?;
    println!("  ✓ Generated {}", path.display());
    Ok(())
}

/// Draw the full icon at `size` x `size`.
pub fn render_icon(size: u32) -> Result<RgbaImage> {
    if size == 0 {
        bail!("Icon size must be positive");
    }

    let background = gradient_background(size)?;
    let bell = bell_layer(size)?;
    let mut canvas = alpha_composite(&background, &bell)?;
    draw_accents(&mut canvas, size)?;

    Ok(canvas)
}

/// Stroke width of the check mark. Small icons get a heavier line so the
/// mark survives downscaling.
pub fn check_stroke_width(size: u32) -> u32 {
    let width = ((size as f32 * 0.045) as u32).max(2);
    match size {
        0..=16 => width.max(4),
        17..=32 => width.max(3),
        _ => width,
    }
}

/// `fraction` of `size`, truncated to a whole pixel.
fn at(size: u32, fraction: f32) -> f32 {
    (size as f32 * fraction).trunc()
}

fn bounds_at(size: u32, x0: f32, y0: f32, x1: f32, y1: f32) -> Bounds {
    Bounds::new(at(size, x0), at(size, y0), at(size, x1), at(size, y1))
}

fn gradient_background(size: u32) -> Result<RgbaImage> {
    let top = parse_color(palette::GRADIENT_TOP)?;
    let bottom = parse_color(palette::GRADIENT_BOTTOM)?;
    let mut background = vertical_gradient(size, size, top, bottom);

    let padding = at(size, 0.06);
    let edge = size as f32 - padding;
    let disc = shape_mask(
        size,
        size,
        &[Shape::Ellipse(Bounds::new(padding, padding, edge, edge))],
    );
    put_alpha(&mut background, &disc)?;

    // Soft highlight toward the top-left.
    let glow = shape_mask(
        size,
        size,
        &[Shape::Ellipse(bounds_at(size, 0.02, 0.08, 0.75, 0.85))],
    );
    let highlight = gaussian_blur(
        &tint(with_alpha(WHITE, HIGHLIGHT_ALPHA), &glow),
        size as f32 * 0.06,
    );
    debug!(size, padding, "background disc and highlight drawn");

    alpha_composite(&background, &highlight)
}

fn bell_layer(size: u32) -> Result<RgbaImage> {
    let body = shape_mask(
        size,
        size,
        &[
            Shape::Ellipse(bounds_at(size, 0.32, 0.12, 0.68, 0.50)),
            Shape::Rect(bounds_at(size, 0.27, 0.32, 0.73, 0.70)),
            Shape::Ellipse(bounds_at(size, 0.24, 0.52, 0.76, 0.94)),
        ],
    );
    let bell = tint(WHITE, &body);

    let shadow_mask = shape_mask(
        size,
        size,
        &[Shape::Ellipse(bounds_at(size, 0.28, 0.74, 0.72, 0.90))],
    );
    let shadow = gaussian_blur(
        &tint(with_alpha(BLACK, SHADOW_ALPHA), &shadow_mask),
        size as f32 * 0.05,
    );
    debug!(size, "bell body and shadow drawn");

    alpha_composite(&bell, &shadow)
}

fn draw_accents(canvas: &mut RgbaImage, size: u32) -> Result<()> {
    // Clapper with a small shine. The shine replaces the clapper pixels,
    // alpha included.
    let clapper_radius = at(size, 0.065);
    let (cx, cy) = ((size / 2) as f32, at(size, 0.79));
    fill_shape(
        canvas,
        &Shape::Ellipse(Bounds::around(cx, cy, clapper_radius)),
        parse_color(palette::CLAPPER)?,
    );
    paint_shape(
        canvas,
        &Shape::Ellipse(Bounds::around(cx, cy, (clapper_radius * 0.45).trunc())),
        with_alpha(WHITE, CLAPPER_SHINE_ALPHA),
    );

    // Notification badge.
    let (bx, by) = (at(size, 0.68), at(size, 0.26));
    fill_shape(
        canvas,
        &Shape::Ellipse(Bounds::around(bx, by, at(size, 0.11))),
        parse_color(palette::BADGE_OUTER)?,
    );
    fill_shape(
        canvas,
        &Shape::Ellipse(Bounds::around(bx, by, at(size, 0.07))),
        parse_color(palette::BADGE_INNER)?,
    );

    let width = check_stroke_width(size);
    let check = Shape::Stroke {
        points: CHECK_POINTS
            .iter()
            .map(|&(x, y)| (at(size, x), at(size, y)))
            .collect(),
        width: width as f32,
    };
    fill_shape(canvas, &check, parse_color(palette::CHECK_MARK)?);
    debug!(size, clapper_radius, badge_x = bx, badge_y = by, check_width = width, "accents drawn");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn check_width_has_floor_for_small_icons() {
        assert_eq!(check_stroke_width(16), 4);
        assert_eq!(check_stroke_width(32), 3);
        assert_eq!(check_stroke_width(48), 2);
        assert_eq!(check_stroke_width(128), 5);
        assert_eq!(check_stroke_width(512), 23);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(render_icon(0).is_err());
    }

    #[test]
    fn rendered_icon_has_expected_regions() {
        let icon = render_icon(128).unwrap();
        assert_eq!(icon.dimensions(), (128, 128));

        // Outside the disc.
        assert!(icon.get_pixel(0, 0)[3] < 8);

        // Bell body, away from the accents and the shadow.
        assert_eq!(*icon.get_pixel(40, 45), Rgba([255, 255, 255, 255]));

        // Badge center and check mark are drawn opaque on top.
        assert_eq!(*icon.get_pixel(87, 33), Rgba([0xFE, 0xD7, 0xAA, 255]));
        assert_eq!(*icon.get_pixel(54, 70), Rgba([0x25, 0x63, 0xEB, 255]));

        // Clapper ring keeps its color, the shine overwrites the center.
        assert_eq!(*icon.get_pixel(70, 101), Rgba([0xF5, 0x9E, 0x0B, 255]));
        assert_eq!(
            *icon.get_pixel(64, 101),
            Rgba([255, 255, 255, CLAPPER_SHINE_ALPHA])
        );
    }

    #[test]
    fn small_icon_edges_keep_disc_color() {
        let icon = resize_premultiplied(&render_icon(ICON_SIZES[0]).unwrap(), 16, 16);

        // Right rim of the disc, clear of the badge and the highlight.
        let mut edges = 0;
        for y in 6..=10 {
            for x in 14..16 {
                let pixel = icon.get_pixel(x, y);
                if !(16..=240).contains(&pixel[3]) {
                    continue;
                }
                edges += 1;
                assert!(
                    pixel[2] > 150 && pixel[2] as i32 > pixel[0] as i32 + 80,
                    "edge pixel ({x}, {y}) {:?}",
                    pixel
                );
            }
        }
        assert!(edges > 0);
    }

    #[test]
    fn disc_shows_gradient_between_bell_and_edge() {
        let icon = render_icon(128).unwrap();
        // Left side of the disc, clear of the bell: gradient blue, opaque.
        let pixel = icon.get_pixel(20, 90);
        assert_eq!(pixel[3], 255);
        assert!(pixel[2] > pixel[0] && pixel[2] > pixel[1], "pixel {:?}", pixel);
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render_icon(64).unwrap(), render_icon(64).unwrap());
    }

    #[test]
    fn manifest_entries_join_prefix() {
        assert_eq!(manifest_entry("assets/icons/", 16), "assets/icons/icon-16.png");
        assert_eq!(manifest_entry("", 48), "icon-48.png");
    }

    #[test]
    fn generates_every_size_and_manifest() {
        let dir = TempDir::new().unwrap();
        let options = IconOptions {
            output: dir.path().join("icons"),
            manifest: Some(dir.path().join("meta").join("icons.json")),
            manifest_prefix: "icons".to_string(),
        };

        let written = generate_toolbar_icons(&options).unwrap();
        assert_eq!(written.len(), ICON_SIZES.len() + 1);

        for size in ICON_SIZES {
            let path = options.output.join(icon_file_name(size));
            assert_eq!(image::image_dimensions(&path).unwrap(), (size, size));
        }

        let json = std::fs::read_to_string(dir.path().join("meta").join("icons.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["icons"]["512"], "icons/icon-512.png");
        assert_eq!(parsed["icons"].as_object().unwrap().len(), ICON_SIZES.len());
    }
}
