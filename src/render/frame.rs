//! Quellbild (Webcam-Frame) und bilineares Sampling in UV-Koordinaten.

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Read-only Quellbild für einen Render-Frame.
#[derive(Debug, Clone)]
pub struct SourceFrame {
    image: RgbaImage,
}

impl SourceFrame {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Lädt ein Bild von der Festplatte (beliebiges unterstütztes Format).
    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Fehler beim Laden des Quellbilds: {}", path.display()))?;
        let image = image.into_rgba8();
        log::info!(
            "Quellbild geladen: {}x{} Pixel ({})",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(Self::new(image))
    }

    /// Prozedurales Testbild: Schachbrett mit Farbverlauf und Mittelkreuz.
    ///
    /// Ersetzt den Kamera-Stream, wenn kein Quellbild angegeben ist.
    pub fn test_pattern(width: u32, height: u32) -> Self {
        let (w, h) = (width.max(1), height.max(1));
        let cell = (w.min(h) / 8).max(1);
        let image = RgbaImage::from_fn(w, h, |x, y| {
            let u = x as f32 / w as f32;
            let v = y as f32 / h as f32;
            let checker = ((x / cell) + (y / cell)) % 2 == 0;
            let shade = if checker { 1.0 } else { 0.6 };
            let on_cross = x == w / 2 || y == h / 2;
            if on_cross {
                Rgba([255, 40, 40, 255])
            } else {
                Rgba([
                    (u * shade * 255.0) as u8,
                    ((1.0 - v) * shade * 255.0) as u8,
                    (0.5 * shade * 255.0) as u8,
                    255,
                ])
            }
        });
        Self::new(image)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Bilineares Sampling bei `uv ∈ [0,1]²` (Ursprung oben links).
    ///
    /// Außerhalb wird auf den Rand geklemmt; ein leeres Bild liefert Schwarz.
    pub fn sample(&self, u: f64, v: f64) -> [f32; 4] {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return [0.0, 0.0, 0.0, 1.0];
        }

        // Pixelzentren liegen bei (i + 0.5) / size
        let px = (u.clamp(0.0, 1.0) * width as f64 - 0.5).clamp(0.0, (width - 1) as f64);
        let py = (v.clamp(0.0, 1.0) * height as f64 - 0.5).clamp(0.0, (height - 1) as f64);

        let x0 = px.floor() as u32;
        let y0 = py.floor() as u32;
        let x1 = (x0 + 1).min(width - 1);
        let y1 = (y0 + 1).min(height - 1);
        let fx = (px - x0 as f64) as f32;
        let fy = (py - y0 as f64) as f32;

        let texel = |x: u32, y: u32| -> [f32; 4] {
            let p = self.image.get_pixel(x, y).0;
            [
                p[0] as f32 / 255.0,
                p[1] as f32 / 255.0,
                p[2] as f32 / 255.0,
                p[3] as f32 / 255.0,
            ]
        };

        let (c00, c10) = (texel(x0, y0), texel(x1, y0));
        let (c01, c11) = (texel(x0, y1), texel(x1, y1));
        let mut out = [0.0; 4];
        for i in 0..4 {
            let top = c00[i] + (c10[i] - c00[i]) * fx;
            let bottom = c01[i] + (c11[i] - c01[i]) * fx;
            out[i] = top + (bottom - top) * fy;
        }
        out
    }
}
