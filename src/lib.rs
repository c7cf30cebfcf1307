//! Curved-Mirror: Webcam-Bild über einen frei gestalteten gekrümmten Spiegel.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod core;
pub mod design;
pub mod render;
pub mod shared;

pub use core::{
    AnchorPoint, CubicBezier, Hit, ProfileSegment, ProfileSet, QuadraticBezier, Ray,
    RevolutionProfile, MAX_PROFILE_SEGMENTS,
};
pub use design::{build_profile, fit_curve, DesignError, FittedCurve, MirrorDesigner};
pub use render::{render_frame, SourceFrame};
pub use shared::{DebugView, FitStrategy, MirrorOptions, ProfileChannel, ProfileFamily, RenderScene};
