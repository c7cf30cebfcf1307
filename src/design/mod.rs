//! Kurven-Pipeline: Anker → glatte Kurve → Quadratiken → Profil-Segmente.

pub mod approximator;
pub mod designer;
pub mod fitter;

pub use approximator::{approximation_error, cubic_to_quadratics, profile_error};
pub use designer::{build_profile, DesignError, MirrorDesigner, ProfileBuild};
pub use fitter::{fit_curve, CurvePiece, FittedCurve};
