//! Core-Domänentypen: Anker, Bézier-Kurven, Spiegelprofile, Strahlen.

pub mod anchor;
pub mod bezier;
pub mod profile;
pub mod ray;
pub mod revolution;

pub use anchor::{AnchorPoint, AnchorSet};
pub use bezier::{CubicBezier, QuadraticBezier};
pub use profile::{ProfileSegment, ProfileSet, SeamReport, MAX_PROFILE_SEGMENTS};
pub use ray::{Hit, Ray};
pub use revolution::RevolutionProfile;
