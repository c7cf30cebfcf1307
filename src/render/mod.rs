//! Analytischer Spiegel-Renderer (CPU, zeilenparallel).
//!
//! Pro Pixel: Kamerastrahl → geschlossener Schnitt mit dem Profil →
//! Normale, Reflexion, Projektion auf die Bildebene → Farbe.

pub mod frame;
pub mod intersect;
mod renderer;
pub mod shading;
pub mod solver;
mod types;

pub use crate::shared::RenderScene;
pub use frame::SourceFrame;
pub use intersect::{intersect, surface_normal, HIT_EPSILON};
pub use renderer::{camera_ray, render_frame, render_ray};
pub use solver::Roots;
pub use types::{ProfileUniforms, SceneUniforms, SegmentUniform};
