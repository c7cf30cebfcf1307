//! Bézier-Primitive des Kurven-Designers (quadratisch und kubisch).
//!
//! Koordinaten in der Designer-Ebene: `x` = Tiefe (Kamera-Z relativ zur
//! Spiegelebene), `y` = Höhe.

use glam::DVec2;

/// Quadratische Bézier-Kurve: kleinste exportierte Kurveneinheit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    pub start: DVec2,
    pub cp: DVec2,
    pub end: DVec2,
}

impl QuadraticBezier {
    /// Erstellt eine neue quadratische Bézier-Kurve.
    pub fn new(start: DVec2, cp: DVec2, end: DVec2) -> Self {
        Self { start, cp, end }
    }

    /// Gerade Strecke als (entartete) quadratische Kurve.
    pub fn line(start: DVec2, end: DVec2) -> Self {
        Self::new(start, start.lerp(end, 0.5), end)
    }

    /// Quadratische Kurve, die bei t = 0.5 durch `apex` verläuft.
    ///
    /// Aus B(0.5) = (P0 + 2·CP + P2) / 4 gelöst nach CP:
    /// `CP = 2·apex − 0.5·(P0 + P2)`
    pub fn through_apex(start: DVec2, apex: DVec2, end: DVec2) -> Self {
        Self::new(start, 2.0 * apex - 0.5 * (start + end), end)
    }

    /// B(t) = (1-t)²·P0 + 2(1-t)t·CP + t²·P2
    pub fn eval(&self, t: f64) -> DVec2 {
        let inv = 1.0 - t;
        inv * inv * self.start + 2.0 * inv * t * self.cp + t * t * self.end
    }
}

/// Kubische Bézier-Kurve (unveränderlich nach Konstruktion).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub start: DVec2,
    pub cp1: DVec2,
    pub cp2: DVec2,
    pub end: DVec2,
}

impl CubicBezier {
    /// Erstellt eine neue kubische Bézier-Kurve.
    pub fn new(start: DVec2, cp1: DVec2, cp2: DVec2, end: DVec2) -> Self {
        Self {
            start,
            cp1,
            cp2,
            end,
        }
    }

    /// Kubik von `start` nach `end` mit vorgegebenen Steigungen dx/dy an den
    /// Enden (Hermite-Form über der Höhe).
    ///
    /// Die Kontrollpunkte liegen auf Drittelhöhe, dadurch ist `y(t)` linear:
    /// die Kurve ist in `y` monoton und bleibt im Höhenbereich ihrer Endpunkte.
    pub fn from_height_slopes(start: DVec2, end: DVec2, slope_start: f64, slope_end: f64) -> Self {
        let third = (end.y - start.y) / 3.0;
        Self::new(
            start,
            DVec2::new(start.x + slope_start * third, start.y + third),
            DVec2::new(end.x - slope_end * third, end.y - third),
            end,
        )
    }

    /// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
    pub fn eval(&self, t: f64) -> DVec2 {
        let inv = 1.0 - t;
        let inv2 = inv * inv;
        let t2 = t * t;
        inv2 * inv * self.start
            + 3.0 * inv2 * t * self.cp1
            + 3.0 * inv * t2 * self.cp2
            + t2 * t * self.end
    }

    /// Bester quadratischer Approximant mit gleichen Endpunkten.
    ///
    /// `CP = (3·CP1 + 3·CP2 − P0 − P3) / 4`
    pub fn best_fit_quadratic(&self) -> QuadraticBezier {
        let cp = (3.0 * self.cp1 + 3.0 * self.cp2 - self.start - self.end) / 4.0;
        QuadraticBezier::new(self.start, cp, self.end)
    }

    /// Teilt die Kurve bei t = 0.5 (De Casteljau).
    ///
    /// Der Teilungspunkt wird nur einmal berechnet, damit Ende der linken und
    /// Anfang der rechten Hälfte bitgleich sind.
    pub fn split_half(&self) -> (CubicBezier, CubicBezier) {
        let p01 = self.start.lerp(self.cp1, 0.5);
        let p12 = self.cp1.lerp(self.cp2, 0.5);
        let p23 = self.cp2.lerp(self.end, 0.5);
        let p012 = p01.lerp(p12, 0.5);
        let p123 = p12.lerp(p23, 0.5);
        let mid = p012.lerp(p123, 0.5);
        (
            CubicBezier::new(self.start, p01, p012, mid),
            CubicBezier::new(mid, p123, p23, self.end),
        )
    }
}
