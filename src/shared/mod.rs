//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `design` und `render` geteilt werden,
//! um direkte Abhängigkeiten zu vermeiden.

pub mod options;
mod profile_channel;
mod render_scene;
pub mod spline_geometry;

pub use options::{DebugView, FitStrategy, MirrorOptions, ProfileFamily};
pub use profile_channel::ProfileChannel;
pub use render_scene::RenderScene;
