//! 128x128 store-listing icon: gradient tile, white rounded panel, toolbar
//! icon on top.

use crate::{
    output::{ensure_dir, load_rgba, require_inputs, save_png},
    palette::{self, parse_color},
    raster::{diagonal_gradient, fill_shape, resize_premultiplied, Bounds, Shape},
};
use anyhow::Result;
use image::{imageops, RgbaImage};
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_ICON: &str = "src/assets/icons/icon-128.png";
pub const DEFAULT_OUTPUT: &str = "assets/store/icon-with-background-128.png";

pub const STORE_ICON_SIZE: u32 = 128;
const PANEL_PADDING: u32 = 12;
const PANEL_RADIUS: f32 = 12.0;
const ICON_PADDING: u32 = 20;

#[derive(Debug, Clone)]
pub struct StoreIconOptions {
    pub icon: PathBuf,
    pub output: PathBuf,
}

impl Default for StoreIconOptions {
    fn default() -> Self {
        Self {
            icon: PathBuf::from(DEFAULT_ICON),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

pub fn compose_store_icon(icon: &RgbaImage) -> Result<RgbaImage> {
    let size = STORE_ICON_SIZE;
    let mut canvas = diagonal_gradient(
        size,
        size,
        parse_color(palette::STORE_TILE_START)?,
        parse_color(palette::STORE_TILE_END)?,
    );

    let inset = PANEL_PADDING as f32;
    let far = (size - PANEL_PADDING) as f32;
    fill_shape(
        &mut canvas,
        &Shape::RoundedRect {
            bounds: Bounds::new(inset, inset, far, far),
            radius: PANEL_RADIUS,
        },
        parse_color(palette::STORE_PANEL)?,
    );

    let icon_size = size - ICON_PADDING * 2;
    let resized = resize_premultiplied(icon, icon_size, icon_size);
    imageops::overlay(
        &mut canvas,
        &resized,
        ICON_PADDING.into(),
        ICON_PADDING.into(),
    );
    debug!(icon_size, "store icon composed");

    Ok(canvas)
}

pub fn generate_store_icon(options: &StoreIconOptions) -> Result<PathBuf> {
    require_inputs(&[("icon", options.icon.as_path())])?;
    if let Some(parent) = options.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    println!("Creating store icon...");
    let icon = load_rgba(&options.icon)?;
    let tile = compose_store_icon(&icon)?;
    save_png(&tile, &options.output)?;
    println!(
        "  ✓ Generated {} ({STORE_ICON_SIZE}x{STORE_ICON_SIZE})",
        options.output.display()
    );

    Ok(options.output.clone())
}
