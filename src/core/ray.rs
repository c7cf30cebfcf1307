//! Strahl und Trefferpunkt im Kameraraum.
//!
//! Kamera im Ursprung, Blickrichtung +Z.

use glam::DVec3;

/// Strahl r(t) = origin + t · direction (Richtung normiert).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Erstellt einen Strahl; die Richtung wird normiert.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Punkt auf dem Strahl bei Parameter `t`.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + t * self.direction
    }
}

/// Nächster gültiger Schnittpunkt mit dem Spiegel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Strahlparameter (Abstand entlang der Richtung)
    pub t: f64,
    /// Trefferpunkt im Kameraraum
    pub position: DVec3,
    /// Index des getroffenen Profil-Segments (Rotationsprofil: immer 0)
    pub segment_index: usize,
}
