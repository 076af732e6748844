use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader};
use kmeans_colors::get_kmeans_hamerly;
use palette::{Lab, Srgb};

use crate::color::Color;

/// A palette color together with the number of pixels assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: Color,
    pub count: u32,
}

/// Tuning for the palette extractor.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Width the image is resampled to before quantization.
    pub width: u32,
    /// Maximum number of palette colors.
    pub colors: usize,
    /// Color returned when the image has nothing to quantize.
    pub fallback: Color,
}

pub const DEFAULT_WIDTH: u32 = 120;
pub const DEFAULT_COLORS: usize = 8;

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            colors: DEFAULT_COLORS,
            fallback: crate::color::DEFAULT_ACCENT,
        }
    }
}

const MAX_ITER: usize = 20;
const CONVERGE: f32 = 5.0;
const SEED: u64 = 42;

/// Upper bound on the resampled height; very tall sources are squashed to it.
pub const MAX_HEIGHT: u32 = 1200;

/// Below this resampled alpha a pixel would round to 0 in 8 bits.
const MIN_ALPHA: f32 = 0.5 / 255.0;

/// Load an image, resample it to `width` pixels wide (height scaled to keep
/// the aspect ratio, capped at `MAX_HEIGHT`), and return its visible pixels.
///
/// The format is sniffed from the file content, not the extension.
/// Resampling runs on premultiplied alpha so the color hidden in fully
/// transparent pixels never bleeds into visible ones. Fully transparent
/// pixels carry no color and are dropped.
pub fn load_and_prepare(path: &Path, width: u32) -> Result<Vec<Srgb<u8>>> {
    let img = decode(path).with_context(|| {
        if !path.exists() {
            format!("file not found: {}", path.display())
        } else {
            format!(
                "unsupported or corrupt image: {}. Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF",
                path.display()
            )
        }
    })?;

    let width = width.max(1);
    let height = scaled_height(img.width(), img.height(), width);
    if height == MAX_HEIGHT {
        log::warn!(
            "{}x{} is very tall, sampling at {}x{}",
            img.width(),
            img.height(),
            width,
            height
        );
    }
    log::debug!(
        "resampling {}x{} -> {}x{}",
        img.width(),
        img.height(),
        width,
        height
    );

    let mut rgba = img.to_rgba32f();
    for p in rgba.pixels_mut() {
        let a = p[3];
        p[0] *= a;
        p[1] *= a;
        p[2] *= a;
    }
    let resized = imageops::resize(&rgba, width, height, FilterType::Lanczos3);

    let pixels: Vec<Srgb<u8>> = resized
        .pixels()
        .filter(|p| p[3] >= MIN_ALPHA)
        .map(|p| {
            let a = p[3];
            let channel = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
            Srgb::new(channel(p[0]), channel(p[1]), channel(p[2]))
        })
        .collect();

    log::debug!(
        "{} of {} pixels kept for quantization",
        pixels.len(),
        width as u64 * height as u64
    );
    Ok(pixels)
}

fn decode(path: &Path) -> Result<DynamicImage> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img)
}

/// `floor(width * h / w)`, clamped to `1..=MAX_HEIGHT`.
fn scaled_height(src_width: u32, src_height: u32, width: u32) -> u32 {
    if src_width == 0 {
        return 1;
    }
    let h = (width as u64 * src_height as u64) / src_width as u64;
    h.clamp(1, MAX_HEIGHT as u64) as u32
}

/// Reduce `pixels` to an adaptive palette of at most `k` colors.
///
/// Clusters in CIELAB with Hamerly's K-means and a fixed seed. Each entry's
/// color is the mean sRGB value of its member pixels. Empty clusters are
/// dropped; entries are sorted by count descending, ties broken by cluster
/// order.
pub fn quantize(pixels: &[Srgb<u8>], k: usize) -> Vec<PaletteEntry> {
    let k = k.min(pixels.len()).min(u8::MAX as usize);
    if k == 0 {
        return Vec::new();
    }

    let indices = if k == 1 {
        vec![0u8; pixels.len()]
    } else {
        let lab: Vec<Lab> = pixels
            .iter()
            .map(|&p| Color::from_srgb_u8(p).to_lab())
            .collect();
        get_kmeans_hamerly(k, MAX_ITER, CONVERGE, false, &lab, SEED).indices
    };

    let mut sums = vec![[0u64; 3]; k];
    let mut counts = vec![0u32; k];
    for (pixel, &idx) in pixels.iter().zip(&indices) {
        let idx = idx as usize;
        sums[idx][0] += pixel.red as u64;
        sums[idx][1] += pixel.green as u64;
        sums[idx][2] += pixel.blue as u64;
        counts[idx] += 1;
    }

    let mut entries: Vec<PaletteEntry> = sums
        .iter()
        .zip(&counts)
        .filter(|(_, count)| **count > 0)
        .map(|(sum, &count)| {
            let mean = |s: u64| ((s as f64 / count as f64).round()).clamp(0.0, 255.0) as u8;
            PaletteEntry {
                color: Color::new(mean(sum[0]), mean(sum[1]), mean(sum[2])),
                count,
            }
        })
        .collect();

    // Stable sort keeps cluster order among equal counts.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// The most frequent palette color, if any.
pub fn dominant(entries: &[PaletteEntry]) -> Option<Color> {
    entries
        .iter()
        .fold(None::<&PaletteEntry>, |best, e| match best {
            Some(b) if b.count >= e.count => Some(b),
            _ => Some(e),
        })
        .map(|e| e.color)
}

/// Run the whole extractor: load, quantize, pick the dominant color, or fall
/// back to `options.fallback` when the palette comes out empty.
pub fn extract_dominant(path: &Path, options: &ExtractOptions) -> Result<Color> {
    let pixels = load_and_prepare(path, options.width)?;
    let entries = quantize(&pixels, options.colors);
    for entry in &entries {
        log::debug!("palette {} x{}", entry.color, entry.count);
    }

    match dominant(&entries) {
        Some(color) => {
            log::info!("dominant color {color}");
            Ok(color)
        }
        None => {
            log::warn!(
                "no palette colors in {}, using fallback {}",
                path.display(),
                options.fallback
            );
            Ok(options.fallback)
        }
    }
}
