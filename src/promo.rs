//! Store-listing promo tiles: the toolbar icon pasted onto the marquee
//! artwork, then the marquee scaled to the other tile sizes.

use crate::{
    output::{ensure_dir, load_rgba, require_inputs, save_png},
    raster::resize_premultiplied,
};
use anyhow::Result;
use image::{imageops, RgbaImage};
use std::path::PathBuf;
use tracing::{debug, warn};

pub const DEFAULT_ICON: &str = "src/assets/icons/icon-256.png";
pub const DEFAULT_BACKGROUND: &str = "assets/store/promo-marquee-1400x560.png";
pub const DEFAULT_OUT_DIR: &str = "assets/store";

pub const MARQUEE_FILE: &str = "promo-marquee-with-icon-1400x560.png";
/// Size the marquee artwork is expected to have.
pub const MARQUEE_SIZE: (u32, u32) = (1400, 560);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromoVariant {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub file_name: &'static str,
}

/// Tiles derived from the marquee by resizing.
pub const PROMO_VARIANTS: [PromoVariant; 2] = [
    PromoVariant {
        name: "large",
        width: 1280,
        height: 800,
        file_name: "promo-large-with-icon-1280x800.png",
    },
    PromoVariant {
        name: "small",
        width: 440,
        height: 280,
        file_name: "promo-small-with-icon-440x280.png",
    },
];

/// Where the icon goes on a background: 45% of the height, 15% in from the
/// left, vertically centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromoLayout {
    pub icon_size: u32,
    pub x: u32,
    pub y: u32,
}

impl PromoLayout {
    pub fn for_background(width: u32, height: u32) -> Self {
        let icon_size = (height as u64 * 45 / 100) as u32;
        let x = (width as u64 * 15 / 100) as u32;
        let y = (height - icon_size) / 2;
        Self { icon_size, x, y }
    }
}

#[derive(Debug, Clone)]
pub struct PromoOptions {
    pub icon: PathBuf,
    pub background: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for PromoOptions {
    fn default() -> Self {
        Self {
            icon: PathBuf::from(DEFAULT_ICON),
            background: PathBuf::from(DEFAULT_BACKGROUND),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

/// Paste `icon` onto a copy of `background` at the promo layout position.
pub fn compose_marquee(background: &RgbaImage, icon: &RgbaImage) -> RgbaImage {
    let (width, height) = background.dimensions();
    let layout = PromoLayout::for_background(width, height);
    let mut result = background.clone();

    if layout.icon_size == 0 {
        return result;
    }

    let resized = resize_premultiplied(icon, layout.icon_size, layout.icon_size);
    imageops::overlay(&mut result, &resized, layout.x.into(), layout.y.into());
    result
}

pub fn resize_variant(marquee: &RgbaImage, variant: &PromoVariant) -> RgbaImage {
    resize_premultiplied(marquee, variant.width, variant.height)
}

/// Write the marquee and every [`PROMO_VARIANTS`] tile.
///
/// Both inputs are checked before anything is created on disk.
pub fn generate_promo_images(options: &PromoOptions) -> Result<Vec<PathBuf>> {
    require_inputs(&[
        ("icon", options.icon.as_path()),
        ("background", options.background.as_path()),
    ])?;
    ensure_dir(&options.out_dir)?;

    println!("Creating promo images...");
    let background = load_rgba(&options.background)?;
    let icon = load_rgba(&options.icon)?;

    let (width, height) = background.dimensions();
    if (width, height) != MARQUEE_SIZE {
        warn!(
            width,
            height,
            expected_width = MARQUEE_SIZE.0,
            expected_height = MARQUEE_SIZE.1,
            "marquee background has an unexpected size; using it as is"
        );
    }
    let layout = PromoLayout::for_background(width, height);
    debug!(icon_size = layout.icon_size, x = layout.x, y = layout.y, "icon placement");

    let mut written = Vec::new();

    let marquee = compose_marquee(&background, &icon);
    let marquee_path = options.out_dir.join(MARQUEE_FILE);
    save_png(&marquee, &marquee_path)?;
    println!("  ✓ Generated {} ({width}x{height})", marquee_path.display());
    written.push(marquee_path);

    for variant in &PROMO_VARIANTS {
        let tile = resize_variant(&marquee, variant);
        let path = options.out_dir.join(variant.file_name);
        save_png(&tile, &path)?;
        println!(
            "  ✓ Generated {} ({}x{}, {})",
            path.display(),
            variant.width,
            variant.height,
            variant.name
        );
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    const SKY: Rgba<u8> = Rgba([20, 40, 90, 255]);
    const RED: Rgba<u8> = Rgba([220, 30, 30, 255]);

    fn assert_close(actual: Rgba<u8>, expected: Rgba<u8>) {
        let near = actual
            .0
            .iter()
            .zip(expected.0.iter())
            .all(|(a, e)| (*a as i16 - *e as i16).abs() <= 1);
        assert!(near, "expected {:?}, got {:?}", expected, actual);
    }

    #[test]
    fn layout_for_marquee_background() {
        let layout = PromoLayout::for_background(1400, 560);
        assert_eq!(
            layout,
            PromoLayout {
                icon_size: 252,
                x: 210,
                y: 154
            }
        );
    }

    #[test]
    fn layout_for_odd_sizes() {
        let layout = PromoLayout::for_background(440, 281);
        assert_eq!(layout.icon_size, 126);
        assert_eq!(layout.x, 66);
        assert_eq!(layout.y, 77);
    }

    #[test]
    fn marquee_keeps_background_size_and_places_icon() {
        let background = RgbaImage::from_pixel(1400, 560, SKY);
        let icon = RgbaImage::from_pixel(256, 256, RED);
        let marquee = compose_marquee(&background, &icon);

        assert_eq!(marquee.dimensions(), (1400, 560));
        assert_close(*marquee.get_pixel(210 + 126, 154 + 126), RED);
        assert_eq!(*marquee.get_pixel(100, 280), SKY);
        assert_eq!(*marquee.get_pixel(210 + 126, 100), SKY);
        assert_eq!(*marquee.get_pixel(210 + 260, 280), SKY);
    }

    #[test]
    fn transparent_icon_leaves_background_untouched() {
        let background = RgbaImage::from_pixel(700, 280, SKY);
        let icon = RgbaImage::new(64, 64);
        assert_eq!(compose_marquee(&background, &icon), background);
    }

    #[test]
    fn variants_have_exact_sizes() {
        let marquee = RgbaImage::from_pixel(1400, 560, SKY);
        for variant in &PROMO_VARIANTS {
            let tile = resize_variant(&marquee, variant);
            assert_eq!(tile.dimensions(), (variant.width, variant.height));
        }
    }

    #[test]
    fn missing_background_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let icon = dir.path().join("icon-256.png");
        RgbaImage::from_pixel(8, 8, RED).save(&icon).unwrap();

        let options = PromoOptions {
            icon,
            background: dir.path().join("missing.png"),
            out_dir: dir.path().join("store"),
        };
        let err = generate_promo_images(&options).unwrap_err();
        assert!(err.to_string().contains("background"));
        assert!(!options.out_dir.exists());
    }

    #[test]
    fn writes_all_tiles() {
        let dir = TempDir::new().unwrap();
        let icon = dir.path().join("icon-256.png");
        let background = dir.path().join("marquee.png");
        RgbaImage::from_pixel(256, 256, RED).save(&icon).unwrap();
        RgbaImage::from_pixel(1400, 560, SKY).save(&background).unwrap();

        let options = PromoOptions {
            icon,
            background,
            out_dir: dir.path().join("store"),
        };
        let written = generate_promo_images(&options).unwrap();

        let sizes: Vec<_> = written
            .iter()
            .map(|p| image::image_dimensions(p).unwrap())
            .collect();
        assert_eq!(sizes, vec![(1400, 560), (1280, 800), (440, 280)]);
        assert!(written[0].ends_with(MARQUEE_FILE));
    }
}
