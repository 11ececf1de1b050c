use anyhow::{anyhow, Result};
use image::Rgba;
use std::str::FromStr;

pub const GRADIENT_TOP: &str = "#3B82F6";
pub const GRADIENT_BOTTOM: &str = "#1E40AF";
pub const CLAPPER: &str = "#F59E0B";
pub const BADGE_OUTER: &str = "#FB923C";
pub const BADGE_INNER: &str = "#FED7AA";
pub const CHECK_MARK: &str = "#2563EB";

pub const STORE_TILE_START: &str = "#667eea";
pub const STORE_TILE_END: &str = "#764ba2";
pub const STORE_PANEL: &str = "white";

/// Parse a CSS color string into an opaque RGBA pixel.
pub fn parse_color(value: &str) -> Result<Rgba<u8>> {
    let color = css_color::Srgb::from_str(value)
        .map_err(|_| anyhow!("Invalid color: {value}"))?;

    Ok(Rgba([
        channel(color.red),
        channel(color.green),
        channel(color.blue),
        255,
    ]))
}

pub fn with_alpha(color: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let Rgba([r, g, b, _]) = color;
    Rgba([r, g, b, alpha])
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
