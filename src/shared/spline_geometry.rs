//! Reine Geometrie-Funktionen für Catmull-Rom-Splines.
//!
//! Layer-neutral: wird vom Kurven-Designer (`design`) und von Tests als
//! Referenz-Kernel genutzt, ohne Zirkel-Abhängigkeiten zu erzeugen.

use glam::DVec2;

/// Berechnet einen Punkt auf einem Catmull-Rom-Segment (t ∈ [0, 1]).
///
/// p0, p1, p2, p3: vier aufeinanderfolgende Kontrollpunkte.
/// Die Kurve verläuft von p1 nach p2.
pub fn catmull_rom_point(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, t: f64) -> DVec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Liefert die Kontrollpunkt-Quadrupel aller Segmente einer Catmull-Rom-Kette.
///
/// Für Rand-Segmente werden Phantom-Punkte gespiegelt, damit die Kurve
/// natürlich durch den ersten und letzten Punkt läuft.
pub fn catmull_rom_windows(points: &[DVec2]) -> Vec<[DVec2; 4]> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    (0..n - 1)
        .map(|seg| {
            let p1 = points[seg];
            let p2 = points[seg + 1];
            let p0 = if seg == 0 {
                2.0 * p1 - p2
            } else {
                points[seg - 1]
            };
            let p3 = if seg + 2 < n {
                points[seg + 2]
            } else {
                2.0 * p2 - p1
            };
            [p0, p1, p2, p3]
        })
        .collect()
}

/// Sehnensteigung dx/dy von `from` nach `to`; 0 bei verschwindender Höhe.
pub fn chord_slope(from: DVec2, to: DVec2) -> f64 {
    let dy = to.y - from.y;
    if dy.abs() < f64::EPSILON {
        0.0
    } else {
        (to.x - from.x) / dy
    }
}

/// Steigung dx/dy an jedem Knoten (Catmull-Rom-Differenzenquotient).
///
/// Innere Knoten: Sehne zwischen den Nachbarn. Randknoten: einseitige Sehne
/// (entspricht der Phantom-Spiegelung). Knoten mit verschwindender
/// Höhen-Spanne erhalten Steigung 0.
pub fn knot_slopes(points: &[DVec2]) -> Vec<f64> {
    let n = points.len();
    (0..n)
        .map(|i| chord_slope(points[i.saturating_sub(1)], points[(i + 1).min(n - 1)]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catmull_rom_hits_control_points() {
        let p0 = DVec2::new(0.0, 0.0);
        let p1 = DVec2::new(1.0, 1.0);
        let p2 = DVec2::new(2.0, 0.5);
        let p3 = DVec2::new(3.0, 2.0);
        assert!((catmull_rom_point(p0, p1, p2, p3, 0.0) - p1).length() < 1e-12);
        assert!((catmull_rom_point(p0, p1, p2, p3, 1.0) - p2).length() < 1e-12);
    }

    #[test]
    fn test_windows_reflect_phantoms_at_ends() {
        let pts = [
            DVec2::new(0.0, -1.0),
            DVec2::new(0.5, 0.0),
            DVec2::new(0.0, 1.0),
        ];
        let windows = catmull_rom_windows(&pts);
        assert_eq!(windows.len(), 2);
        // Phantom am Start: 2·P0 − P1
        assert_eq!(windows[0][0], DVec2::new(-0.5, -2.0));
        // Phantom am Ende: 2·Pn − Pn-1
        assert_eq!(windows[1][3], DVec2::new(-0.5, 2.0));
    }

    #[test]
    fn test_windows_empty_for_single_point() {
        assert!(catmull_rom_windows(&[DVec2::ZERO]).is_empty());
    }

    #[test]
    fn test_chord_slope_of_phantom_window_is_one_sided() {
        let p1 = DVec2::new(0.2, -1.0);
        let p2 = DVec2::new(-0.1, 0.5);
        let phantom = 2.0 * p1 - p2;
        assert!((chord_slope(phantom, p2) - chord_slope(p1, p2)).abs() < 1e-12);
        assert_eq!(chord_slope(p1, DVec2::new(3.0, p1.y)), 0.0);
    }

    #[test]
    fn test_knot_slopes_of_straight_line_are_constant() {
        let pts = [
            DVec2::new(0.0, 0.0),
            DVec2::new(0.5, 1.0),
            DVec2::new(1.0, 2.0),
        ];
        for s in knot_slopes(&pts) {
            assert!((s - 0.5).abs() < 1e-12);
        }
    }
}
