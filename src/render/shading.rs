//! Shading: Reflexion, Projektion auf die Bildebene, Rand-Fade und Fresnel.

use super::frame::SourceFrame;
use crate::core::{Hit, Ray};
use crate::shared::{DebugView, ProfileFamily, RenderScene};
use glam::{DVec2, DVec3};

/// Palette der Segment-Debug-Ansicht.
const SEGMENT_PALETTE: [[f32; 4]; 6] = [
    [0.9, 0.3, 0.3, 1.0],
    [0.3, 0.8, 0.3, 1.0],
    [0.3, 0.4, 0.9, 1.0],
    [0.9, 0.8, 0.2, 1.0],
    [0.8, 0.3, 0.8, 1.0],
    [0.2, 0.8, 0.8, 1.0],
];

/// Spiegelt `d` an der Normale `n` (beide normiert).
pub fn reflect(d: DVec3, n: DVec3) -> DVec3 {
    d - 2.0 * d.dot(n) * n
}

/// Schnittpunkt des reflektierten Strahls mit der Ebene `z = -plane_distance`.
///
/// `None`, wenn der Strahl nicht zur Kamera-Seite zurückläuft (`R.z ≥ 0`).
pub fn project_to_image_plane(
    origin: DVec3,
    reflected: DVec3,
    plane_distance: f64,
) -> Option<DVec3> {
    if reflected.z >= 0.0 {
        return None;
    }
    let s = (-plane_distance - origin.z) / reflected.z;
    Some(origin + s * reflected)
}

/// UV auf dem Quellbild, horizontal gespiegelt und vertikal gekippt.
pub fn image_uv(point: DVec3, image_size: [f64; 2]) -> DVec2 {
    DVec2::new(0.5 - point.x / image_size[0], 0.5 - point.y / image_size[1])
}

fn uv_inside(uv: DVec2) -> bool {
    (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y)
}

/// Hermite-Glättung wie in GLSL.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Sichtbarkeit am Spiegelrand: 1 im Inneren, 0 am Rand.
///
/// `edge` ist die normierte Randkoordinate (1 = Rand), `width` die Breite
/// des Übergangs.
pub fn edge_fade(edge: f64, width: f64) -> f64 {
    1.0 - smoothstep(1.0 - width, 1.0, edge)
}

/// Helligkeitsfaktor ≥ 1 für flache Blickwinkel.
pub fn fresnel_gain(d: DVec3, n: DVec3, strength: f64, power: f64) -> f64 {
    let grazing = (1.0 - d.dot(n).abs()).clamp(0.0, 1.0);
    1.0 + strength * grazing.powf(power)
}

fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (i, value) in out.iter_mut().enumerate() {
        *value = a[i] + (b[i] - a[i]) * t;
    }
    out
}

/// Sekundärebene: vertikaler Verlauf nach Reflexionsrichtung.
fn gradient_color(reflected: DVec3, scene: &RenderScene) -> [f32; 4] {
    let s = (0.5 + 0.5 * reflected.y).clamp(0.0, 1.0) as f32;
    lerp_color(
        scene.options.gradient_bottom_color,
        scene.options.gradient_top_color,
        s,
    )
}

/// Normierte Randkoordinate des Treffers (1 = Spiegelrand).
fn edge_coordinate(hit: &Hit, scene: &RenderScene) -> f64 {
    let options = &scene.options;
    let p = hit.position;
    match options.profile_family {
        ProfileFamily::Extruded => {
            (p.x.abs() / options.mirror_half_width).max(p.y.abs() / options.mirror_half_height)
        }
        ProfileFamily::Revolution => (p.x * p.x + p.y * p.y).sqrt() / options.mirror_radius,
    }
}

/// Farbe eines Spiegeltreffers.
pub fn shade_hit(
    ray: &Ray,
    hit: &Hit,
    normal: DVec3,
    scene: &RenderScene,
    frame: &SourceFrame,
) -> [f32; 4] {
    let options = &scene.options;
    let reflected = reflect(ray.direction, normal);

    match options.debug_view {
        DebugView::Normals => {
            return [
                (0.5 + 0.5 * normal.x) as f32,
                (0.5 + 0.5 * normal.y) as f32,
                (0.5 + 0.5 * normal.z) as f32,
                1.0,
            ];
        }
        DebugView::SegmentIndex => {
            return SEGMENT_PALETTE[hit.segment_index % SEGMENT_PALETTE.len()];
        }
        DebugView::Off | DebugView::Uv => {}
    }

    let Some(on_plane) =
        project_to_image_plane(hit.position, reflected, options.image_plane_distance)
    else {
        return options.behind_mirror_color;
    };
    let uv = image_uv(on_plane, options.image_size);

    if options.debug_view == DebugView::Uv {
        return [
            uv.x.clamp(0.0, 1.0) as f32,
            uv.y.clamp(0.0, 1.0) as f32,
            0.0,
            1.0,
        ];
    }

    let mut color = if uv_inside(uv) {
        frame.sample(uv.x, uv.y)
    } else {
        gradient_color(reflected, scene)
    };

    let gain = fresnel_gain(
        ray.direction,
        normal,
        options.fresnel_strength,
        options.fresnel_power,
    ) as f32;
    for channel in &mut color[..3] {
        *channel = (*channel * gain).clamp(0.0, 1.0);
    }

    let fade = edge_fade(edge_coordinate(hit, scene), options.edge_fade_width) as f32;
    lerp_color(options.background_color, color, fade)
}
