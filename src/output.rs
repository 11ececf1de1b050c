use anyhow::{bail, Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::Path,
};

/// Fail on the first input that does not exist, before any output is touched.
pub fn require_inputs(inputs: &[(&str, &Path)]) -> Result<()> {
    for (what, path) in inputs {
        if !path.exists() {
            bail!("Can't find {what} file: {}", path.display());
        }
    }
    Ok(())
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    create_dir_all(dir)
        .with_context(|| format!("Can't create output directory {}", dir.display()))
}

pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to load image {}", path.display()))?;
    Ok(image.to_rgba8())
}

/// Write `image` as a PNG file, replacing whatever is at `path`.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_png(image, &mut out).with_context(|| format!("Failed to write {}", path.display()))?;
    out.flush()?;
    Ok(())
}

// Encode image data as PNG with compression
pub fn write_png<W: Write>(image: &RgbaImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn missing_input_is_named_in_the_error() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("icon-256.png");
        std::fs::write(&present, b"x").unwrap();
        let absent = dir.path().join("background.png");

        assert!(require_inputs(&[("icon", present.as_path())]).is_ok());

        let err = require_inputs(&[
            ("icon", present.as_path()),
            ("background", absent.as_path()),
        ])
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("background"), "{message}");
        assert!(message.contains("background.png"), "{message}");
    }

    #[test]
    fn saved_png_reloads_with_same_pixels() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();

        let image = RgbaImage::from_fn(5, 3, |x, y| Rgba([x as u8 * 40, y as u8 * 80, 7, 200]));
        let path = nested.join("out.png");
        save_png(&image, &path).unwrap();

        assert_eq!(load_rgba(&path).unwrap(), image);
    }

    #[test]
    fn encoding_is_deterministic() {
        let image = RgbaImage::from_pixel(16, 16, Rgba([1, 2, 3, 4]));
        let mut first = Vec::new();
        let mut second = Vec::new();
        write_png(&image, &mut first).unwrap();
        write_png(&image, &mut second).unwrap();
        assert_eq!(first, second);
        assert_eq!(&first[1..4], b"PNG");
    }
}
