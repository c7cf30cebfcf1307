//! Rotationssymmetrisches Spiegelprofil `z(r) = a₂·r⁴ + a₁·r² + a₀`.

use serde::{Deserialize, Serialize};

/// Koeffizienten des Rotationsprofils (Tiefe relativ zur Spiegelebene).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevolutionProfile {
    /// Koeffizient von r⁴
    pub a2: f64,
    /// Koeffizient von r² (Paraboloid-Anteil)
    pub a1: f64,
    /// Konstante Tiefe
    pub a0: f64,
}

impl RevolutionProfile {
    /// Unterhalb dieses Betrags wird `a2` als 0 behandelt (Paraboloid-Pfad).
    pub const QUARTIC_EPSILON: f64 = 1e-9;

    pub fn new(a2: f64, a1: f64, a0: f64) -> Self {
        Self { a2, a1, a0 }
    }

    /// Ebener Spiegel.
    pub fn flat() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Reines Paraboloid (`a2` vernachlässigbar).
    pub fn is_paraboloid(&self) -> bool {
        self.a2.abs() < Self::QUARTIC_EPSILON
    }

    /// Tiefe bei quadriertem Radius `r2 = x² + y²`.
    pub fn eval_r2(&self, r2: f64) -> f64 {
        (self.a2 * r2 + self.a1) * r2 + self.a0
    }

    /// dz/d(r²); der Gradient in x ist `2·x·dz_dr2`.
    pub fn dz_dr2(&self, r2: f64) -> f64 {
        2.0 * self.a2 * r2 + self.a1
    }
}

impl Default for RevolutionProfile {
    fn default() -> Self {
        // Leichter Hohlspiegel: Rand 0.2 Welteinheiten näher zur Kamera bei r = 1
        Self::new(0.0, -0.2, 0.0)
    }
}
