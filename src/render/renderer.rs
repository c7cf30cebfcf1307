//! CPU-Renderer: Kamerastrahlen, Treffer, Shading, Ausgabebild.
//!
//! Jedes Pixel ist zustandslos; mit Feature `parallel` werden die Zeilen
//! über rayon verteilt.

use super::frame::SourceFrame;
use super::intersect::{intersect, surface_normal};
use super::shading::shade_hit;
use super::types::{ProfileUniforms, SceneUniforms};
use crate::core::Ray;
use crate::shared::RenderScene;
use glam::DVec3;
use image::RgbaImage;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Primärstrahl durch das Zentrum von Pixel `(px, py)`.
///
/// Lochkamera im Ursprung mit Blick nach +Z; `fov` ist der vertikale
/// Öffnungswinkel, Pixelzeile 0 liegt oben.
pub fn camera_ray(px: u32, py: u32, width: u32, height: u32, fov: f64) -> Ray {
    let (w, h) = (width.max(1) as f64, height.max(1) as f64);
    let half_height = (0.5 * fov).tan();
    let aspect = w / h;
    let x = (2.0 * (px as f64 + 0.5) / w - 1.0) * aspect * half_height;
    let y = (1.0 - 2.0 * (py as f64 + 0.5) / h) * half_height;
    Ray::new(DVec3::ZERO, DVec3::new(x, y, 1.0))
}

/// Farbe für einen einzelnen Strahl.
pub fn render_ray(ray: &Ray, scene: &RenderScene, frame: &SourceFrame) -> [f32; 4] {
    match intersect(ray, scene) {
        Some(hit) => {
            let normal = surface_normal(&hit, scene);
            shade_hit(ray, &hit, normal, scene, frame)
        }
        None => scene.options.background_color,
    }
}

fn to_rgba8(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn render_row(
    row: &mut [u8],
    py: u32,
    width: u32,
    height: u32,
    scene: &RenderScene,
    frame: &SourceFrame,
) {
    let fov = scene.options.field_of_view;
    for (px, pixel) in row.chunks_exact_mut(4).enumerate() {
        let ray = camera_ray(px as u32, py, width, height, fov);
        pixel.copy_from_slice(&to_rgba8(render_ray(&ray, scene, frame)));
    }
}

/// Rendert einen vollständigen Frame der Größe `width × height`.
///
/// Die Szene ist ein unveränderlicher Snapshot; parallele Änderungen am
/// Designer wirken erst im nächsten Frame.
pub fn render_frame(
    scene: &RenderScene,
    frame: &SourceFrame,
    width: u32,
    height: u32,
) -> RgbaImage {
    let row_len = width as usize * 4;
    if row_len == 0 {
        return RgbaImage::new(width, height);
    }
    let mut buffer = vec![0u8; row_len * height as usize];

    #[cfg(feature = "parallel")]
    buffer
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(py, row)| render_row(row, py as u32, width, height, scene, frame));

    #[cfg(not(feature = "parallel"))]
    buffer
        .chunks_mut(row_len)
        .enumerate()
        .for_each(|(py, row)| render_row(row, py as u32, width, height, scene, frame));

    if log::log_enabled!(log::Level::Trace) {
        // Gleicher Snapshot, wie ihn ein GPU-Backend hochladen würde
        let profile = ProfileUniforms::from_profile(&scene.profile);
        let uniforms = SceneUniforms::from_options(&scene.options);
        log::trace!(
            "Frame gerendert: {}x{}, {} Segmente, Uniforms {} + {} Byte",
            width,
            height,
            profile.count,
            profile.as_bytes().len(),
            uniforms.as_bytes().len()
        );
    }

    RgbaImage::from_raw(width, height, buffer).unwrap_or_else(|| RgbaImage::new(width, height))
}
