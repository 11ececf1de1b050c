//! Anti-aliased shape rasterization and layer operations on RGBA buffers.
//!
//! Layers are straight (non-premultiplied) alpha, matching what the PNG
//! encoder expects. Shapes are sampled on a 4x4 grid per pixel.

use anyhow::{bail, Result};
use image::{imageops, imageops::FilterType, GrayImage, ImageBuffer, Luma, Rgba, RgbaImage};
use std::ops::Range;

const SUBSAMPLES: u32 = 4;

/// Axis-aligned box in continuous pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Bounds {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Bounding box of a circle.
    pub fn around(cx: f32, cy: f32, radius: f32) -> Self {
        Self::new(cx - radius, cy - radius, cx + radius, cy + radius)
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Ellipse inscribed in the bounds.
    Ellipse(Bounds),
    Rect(Bounds),
    RoundedRect { bounds: Bounds, radius: f32 },
    /// Polyline with round joins and caps.
    Stroke { points: Vec<(f32, f32)>, width: f32 },
}

impl Shape {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match self {
            Shape::Ellipse(bounds) => {
                let rx = bounds.width() / 2.0;
                let ry = bounds.height() / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let dx = (x - (bounds.x0 + rx)) / rx;
                let dy = (y - (bounds.y0 + ry)) / ry;
                dx * dx + dy * dy <= 1.0
            }
            Shape::Rect(bounds) => bounds.contains(x, y),
            Shape::RoundedRect { bounds, radius } => {
                if !bounds.contains(x, y) {
                    return false;
                }
                let r = radius
                    .min(bounds.width() / 2.0)
                    .min(bounds.height() / 2.0)
                    .max(0.0);
                // Distance to the inner rectangle the corner arcs are centered on.
                let nx = x.clamp(bounds.x0 + r, bounds.x1 - r);
                let ny = y.clamp(bounds.y0 + r, bounds.y1 - r);
                (x - nx).powi(2) + (y - ny).powi(2) <= r * r
            }
            Shape::Stroke { points, width } => {
                let half = width / 2.0;
                match points.as_slice() {
                    [] => false,
                    [p] => distance((x, y), *p) <= half,
                    _ => points
                        .windows(2)
                        .any(|seg| distance_to_segment((x, y), seg[0], seg[1]) <= half),
                }
            }
        }
    }

    /// Smallest box the shape fits in.
    pub fn extent(&self) -> Bounds {
        match self {
            Shape::Ellipse(bounds) | Shape::Rect(bounds) => *bounds,
            Shape::RoundedRect { bounds, .. } => *bounds,
            Shape::Stroke { points, width } => {
                let half = width / 2.0;
                let mut extent = Bounds::new(f32::MAX, f32::MAX, f32::MIN, f32::MIN);
                for &(x, y) in points {
                    extent = extent.union(&Bounds::new(x - half, y - half, x + half, y + half));
                }
                extent
            }
        }
    }

    /// Fraction of the pixel at (`px`, `py`) covered by the shape.
    pub fn coverage(&self, px: u32, py: u32) -> f32 {
        covered_samples(px, py, |x, y| self.contains(x, y)) as f32
            / (SUBSAMPLES * SUBSAMPLES) as f32
    }
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn distance_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return distance(p, a);
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0);
    distance(p, (a.0 + t * dx, a.1 + t * dy))
}

fn covered_samples(px: u32, py: u32, inside: impl Fn(f32, f32) -> bool) -> u32 {
    let step = 1.0 / SUBSAMPLES as f32;
    let mut count = 0;
    for sy in 0..SUBSAMPLES {
        for sx in 0..SUBSAMPLES {
            let x = px as f32 + (sx as f32 + 0.5) * step;
            let y = py as f32 + (sy as f32 + 0.5) * step;
            if inside(x, y) {
                count += 1;
            }
        }
    }
    count
}

/// Pixel rows and columns an extent touches, clipped to the image.
fn pixel_span(extent: &Bounds, width: u32, height: u32) -> (Range<u32>, Range<u32>) {
    let clip = |lo: f32, hi: f32, limit: u32| {
        let start = lo.floor().max(0.0) as u32;
        let end = (hi.ceil().max(0.0) as u32).min(limit);
        start.min(end)..end
    };
    (
        clip(extent.x0, extent.x1, width),
        clip(extent.y0, extent.y1, height),
    )
}

/// Rasterize the union of `shapes` into a coverage mask.
pub fn shape_mask(width: u32, height: u32, shapes: &[Shape]) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    let Some(extent) = shapes
        .iter()
        .map(Shape::extent)
        .reduce(|acc, b| acc.union(&b))
    else {
        return mask;
    };

    let (xs, ys) = pixel_span(&extent, width, height);
    let total = SUBSAMPLES * SUBSAMPLES;
    for y in ys {
        for x in xs.clone() {
            let hits = covered_samples(x, y, |sx, sy| shapes.iter().any(|s| s.contains(sx, sy)));
            if hits > 0 {
                let value = (hits * 255 + total / 2) / total;
                mask.put_pixel(x, y, Luma([value as u8]));
            }
        }
    }
    mask
}

/// Source-over blend of `src` onto `dst`.
pub fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mix = |s: u8, d: u8| {
        let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

/// Blend `color` into `canvas` wherever `shape` covers it.
pub fn fill_shape(canvas: &mut RgbaImage, shape: &Shape, color: Rgba<u8>) {
    let (xs, ys) = pixel_span(&shape.extent(), canvas.width(), canvas.height());
    for y in ys {
        for x in xs.clone() {
            let coverage = shape.coverage(x, y);
            if coverage <= 0.0 {
                continue;
            }
            let mut src = color;
            src[3] = (color[3] as f32 * coverage).round() as u8;
            let pixel = canvas.get_pixel_mut(x, y);
            *pixel = blend_over(*pixel, src);
        }
    }
}

/// Overwrite `canvas` with `color` wherever `shape` covers it, alpha
/// included. Partially covered pixels move toward `color` by their coverage.
pub fn paint_shape(canvas: &mut RgbaImage, shape: &Shape, color: Rgba<u8>) {
    let (xs, ys) = pixel_span(&shape.extent(), canvas.width(), canvas.height());
    for y in ys {
        for x in xs.clone() {
            let coverage = shape.coverage(x, y);
            if coverage <= 0.0 {
                continue;
            }
            let pixel = canvas.get_pixel_mut(x, y);
            for c in 0..4 {
                let mixed = pixel[c] as f32 + (color[c] as f32 - pixel[c] as f32) * coverage;
                pixel[c] = mixed.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Opaque top-to-bottom gradient; channels are truncated after interpolation.
pub fn vertical_gradient(width: u32, height: u32, top: Rgba<u8>, bottom: Rgba<u8>) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    for y in 0..height {
        let t = if height > 1 {
            y as f32 / (height - 1) as f32
        } else {
            0.0
        };
        let row = Rgba([
            lerp(top[0], bottom[0], t) as u8,
            lerp(top[1], bottom[1], t) as u8,
            lerp(top[2], bottom[2], t) as u8,
            255,
        ]);
        for x in 0..width {
            image.put_pixel(x, y, row);
        }
    }
    image
}

/// Opaque gradient along the diagonal from the top-left to the bottom-right
/// corner.
pub fn diagonal_gradient(width: u32, height: u32, start: Rgba<u8>, end: Rgba<u8>) -> RgbaImage {
    let (w, h) = (width as f32, height as f32);
    let len_sq = (w * w + h * h).max(f32::EPSILON);
    RgbaImage::from_fn(width, height, |x, y| {
        let t = (((x as f32 + 0.5) * w + (y as f32 + 0.5) * h) / len_sq).clamp(0.0, 1.0);
        Rgba([
            lerp(start[0], end[0], t).round() as u8,
            lerp(start[1], end[1], t).round() as u8,
            lerp(start[2], end[2], t).round() as u8,
            255,
        ])
    })
}

fn lerp(a: u8, b: u8, t: f32) -> f32 {
    a as f32 + (b as f32 - a as f32) * t
}

/// Replace the alpha channel of `image` with `mask`.
pub fn put_alpha(image: &mut RgbaImage, mask: &GrayImage) -> Result<()> {
    if image.dimensions() != mask.dimensions() {
        bail!(
            "Mask is {:?} but image is {:?}",
            mask.dimensions(),
            image.dimensions()
        );
    }
    for (pixel, coverage) in image.pixels_mut().zip(mask.pixels()) {
        pixel[3] = coverage[0];
    }
    Ok(())
}

/// A single-color layer whose alpha is `color`'s alpha scaled by `mask`.
pub fn tint(color: Rgba<u8>, mask: &GrayImage) -> RgbaImage {
    RgbaImage::from_fn(mask.width(), mask.height(), |x, y| {
        let coverage = mask.get_pixel(x, y)[0] as u32;
        let alpha = (color[3] as u32 * coverage + 127) / 255;
        Rgba([color[0], color[1], color[2], alpha as u8])
    })
}

/// Porter-Duff source-over of two layers of the same size.
pub fn alpha_composite(dst: &RgbaImage, src: &RgbaImage) -> Result<RgbaImage> {
    if dst.dimensions() != src.dimensions() {
        bail!(
            "Can't composite a {:?} layer onto a {:?} layer",
            src.dimensions(),
            dst.dimensions()
        );
    }
    let mut out = dst.clone();
    for (pixel, top) in out.pixels_mut().zip(src.pixels()) {
        *pixel = blend_over(*pixel, *top);
    }
    Ok(out)
}

/// Lanczos3 resize on premultiplied alpha, so transparent pixels don't
/// bleed their (black) color into soft edges.
pub fn resize_premultiplied(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let premultiplied: ImageBuffer<Rgba<f32>, Vec<f32>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let p = image.get_pixel(x, y);
            let a = p[3] as f32 / 255.0;
            Rgba([
                p[0] as f32 / 255.0 * a,
                p[1] as f32 / 255.0 * a,
                p[2] as f32 / 255.0 * a,
                a,
            ])
        });
    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);

    RgbaImage::from_fn(width, height, |x, y| {
        let p = resized.get_pixel(x, y);
        let a = p[3].clamp(0.0, 1.0);
        if a <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let straight = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([
            straight(p[0]),
            straight(p[1]),
            straight(p[2]),
            (a * 255.0).round() as u8,
        ])
    })
}

/// Gaussian blur with standard deviation `radius`.
pub fn gaussian_blur(image: &RgbaImage, radius: f32) -> RgbaImage {
    if radius <= 0.0 {
        return image.clone();
    }
    imageops::blur(image, radius)
}
