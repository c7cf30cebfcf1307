//! GPU-kompatible Uniform-Layouts für Profil und Szene.
//!
//! Ein zusammenhängender, statisch indizierter Puffer statt einzeln benannter
//! Uniforms pro Segment. Alle Typen sind `Pod` und lassen sich direkt als Bytes
//! hochladen.

use crate::core::{ProfileSet, MAX_PROFILE_SEGMENTS};
use crate::shared::{DebugView, MirrorOptions, ProfileFamily};
use bytemuck::{Pod, Zeroable};

/// Ein Profil-Segment in f32 (32 Byte, std140-kompatibel)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SegmentUniform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub y_min: f32,
    pub y_max: f32,
    _padding: [f32; 3],
}

/// Feste Segment-Arena plus Anzahl gültiger Einträge.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ProfileUniforms {
    pub segments: [SegmentUniform; MAX_PROFILE_SEGMENTS],
    pub count: u32,
    _padding: [u32; 3],
}

impl ProfileUniforms {
    /// Packt ein Profil; unbenutzte Einträge bleiben genullt.
    pub fn from_profile(profile: &ProfileSet) -> Self {
        let mut uniforms = Self::zeroed();
        for (slot, seg) in uniforms.segments.iter_mut().zip(profile.segments()) {
            *slot = SegmentUniform {
                a: seg.a as f32,
                b: seg.b as f32,
                c: seg.c as f32,
                y_min: seg.y_min as f32,
                y_max: seg.y_max as f32,
                _padding: [0.0; 3],
            };
        }
        uniforms.count = profile.len().min(MAX_PROFILE_SEGMENTS) as u32;
        uniforms
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Skalare Szenen- und Shading-Parameter.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub mirror_distance: f32,
    pub mirror_half_width: f32,
    pub mirror_half_height: f32,
    pub mirror_radius: f32,
    pub image_plane_distance: f32,
    pub field_of_view: f32,
    pub image_size: [f32; 2],
    /// Rotationsprofil [a₂, a₁, a₀]
    pub revolution: [f32; 3],
    /// 0 = extrudiert, 1 = Rotation
    pub profile_family: u32,
    pub edge_fade_width: f32,
    pub fresnel_strength: f32,
    pub fresnel_power: f32,
    /// 0 = aus, 1 = Normalen, 2 = Segmente, 3 = UV
    pub debug_view: u32,
}

impl SceneUniforms {
    pub fn from_options(options: &MirrorOptions) -> Self {
        Self {
            mirror_distance: options.mirror_distance as f32,
            mirror_half_width: options.mirror_half_width as f32,
            mirror_half_height: options.mirror_half_height as f32,
            mirror_radius: options.mirror_radius as f32,
            image_plane_distance: options.image_plane_distance as f32,
            field_of_view: options.field_of_view as f32,
            image_size: [options.image_size[0] as f32, options.image_size[1] as f32],
            revolution: [
                options.revolution.a2 as f32,
                options.revolution.a1 as f32,
                options.revolution.a0 as f32,
            ],
            profile_family: match options.profile_family {
                ProfileFamily::Extruded => 0,
                ProfileFamily::Revolution => 1,
            },
            edge_fade_width: options.edge_fade_width as f32,
            fresnel_strength: options.fresnel_strength as f32,
            fresnel_power: options.fresnel_power as f32,
            debug_view: match options.debug_view {
                DebugView::Off => 0,
                DebugView::Normals => 1,
                DebugView::SegmentIndex => 2,
                DebugView::Uv => 3,
            },
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
