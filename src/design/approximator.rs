//! Approximation kubischer Bézier-Kurven durch quadratische (adaptive Halbierung).

use crate::core::{CubicBezier, ProfileSegment, QuadraticBezier};

/// Anzahl Parameter-Intervalle für die Fehlerschätzung.
pub const ERROR_SAMPLES: usize = 20;

/// Maximale Rekursionstiefe der Halbierung.
///
/// Der Fehler schrumpft pro Halbierung etwa um Faktor 8; die Grenze greift
/// nur bei pathologischen Eingaben (riesige Koordinaten).
pub const MAX_SUBDIVISION_DEPTH: u32 = 10;

/// Maximaler euklidischer Abstand zwischen Kubik und Quadratik,
/// gesampelt bei `t = i / ERROR_SAMPLES`.
pub fn approximation_error(cubic: &CubicBezier, quad: &QuadraticBezier) -> f64 {
    (0..=ERROR_SAMPLES)
        .map(|i| {
            let t = i as f64 / ERROR_SAMPLES as f64;
            cubic.eval(t).distance(quad.eval(t))
        })
        .fold(0.0, f64::max)
}

/// Maximale Tiefen-Abweichung zwischen Kubik und dem Profil-Polynom, das der
/// Konverter aus `quad` erzeugt: `|x(t) − z(y(t))|` an den Kurvenpunkten.
///
/// Quadratiken ohne Höhenausdehnung liefern 0 (sie werden flach exportiert).
pub fn profile_error(cubic: &CubicBezier, quad: &QuadraticBezier) -> f64 {
    let segment = ProfileSegment::from_quadratic(quad);
    if segment.is_degenerate() {
        return 0.0;
    }
    (0..=ERROR_SAMPLES)
        .map(|i| {
            let p = cubic.eval(i as f64 / ERROR_SAMPLES as f64);
            (p.x - segment.eval(p.y)).abs()
        })
        .fold(0.0, f64::max)
}

/// Ersetzt eine Kubik durch Quadratiken mit maximaler Abweichung `tolerance`.
///
/// Gemessen wird sowohl im Kurvenparameter als auch gegen das abgeleitete
/// Profil-Polynom; beide müssen innerhalb der Toleranz liegen. Die Ausgabe
/// folgt der Parameter-Reihenfolge der Kubik und ist lückenlos
/// (`end[i] == start[i + 1]`).
pub fn cubic_to_quadratics(cubic: &CubicBezier, tolerance: f64) -> Vec<QuadraticBezier> {
    approximate_pieces(cubic, tolerance)
        .into_iter()
        .map(|(_, quad)| quad)
        .collect()
}

/// Wie [`cubic_to_quadratics`], liefert zu jeder Quadratik das Teilstück der
/// Kubik, das sie ersetzt.
pub(crate) fn approximate_pieces(
    cubic: &CubicBezier,
    tolerance: f64,
) -> Vec<(CubicBezier, QuadraticBezier)> {
    let mut out = Vec::new();
    subdivide(cubic, tolerance, 0, &mut out);
    out
}

fn subdivide(
    cubic: &CubicBezier,
    tolerance: f64,
    depth: u32,
    out: &mut Vec<(CubicBezier, QuadraticBezier)>,
) {
    let quad = cubic.best_fit_quadratic();
    let error = approximation_error(cubic, &quad).max(profile_error(cubic, &quad));

    if error <= tolerance || depth >= MAX_SUBDIVISION_DEPTH {
        if error > tolerance {
            log::debug!(
                "Tiefengrenze {} erreicht, Restfehler {:.3e} > {:.3e}",
                MAX_SUBDIVISION_DEPTH,
                error,
                tolerance
            );
        }
        out.push((*cubic, quad));
        return;
    }

    // Linke Hälfte zuerst: Ausgabe bleibt in Parameter-Reihenfolge
    let (left, right) = cubic.split_half();
    subdivide(&left, tolerance, depth + 1, out);
    subdivide(&right, tolerance, depth + 1, out);
}
