//! Kurven-Fitter: glatte Kurve durch Randpunkte und Benutzer-Anker.
//!
//! Reine Funktion der Eingabe: gleiche Anker liefern bitgleiche Kurven.

use super::approximator::cubic_to_quadratics;
use crate::core::{CubicBezier, QuadraticBezier};
use crate::shared::spline_geometry::{catmull_rom_windows, chord_slope, knot_slopes};
use crate::shared::FitStrategy;
use glam::DVec2;

/// Ein Stück der gefitteten Kurve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurvePiece {
    Quadratic(QuadraticBezier),
    Cubic(CubicBezier),
}

impl CurvePiece {
    /// Kurvenpunkt bei Parameter `t`.
    pub fn eval(&self, t: f64) -> DVec2 {
        match self {
            CurvePiece::Quadratic(q) => q.eval(t),
            CurvePiece::Cubic(c) => c.eval(t),
        }
    }
}

/// Ergebnis des Fitters: zusammenhängende Folge von Kurvenstücken.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedCurve {
    pieces: Vec<CurvePiece>,
}

impl FittedCurve {
    pub fn pieces(&self) -> &[CurvePiece] {
        &self.pieces
    }

    /// Wandelt alle Stücke in Quadratiken um (Kubiken über den Approximator).
    pub fn to_quadratics(&self, tolerance: f64) -> Vec<QuadraticBezier> {
        let mut out = Vec::with_capacity(self.pieces.len());
        for piece in &self.pieces {
            match piece {
                CurvePiece::Quadratic(q) => out.push(*q),
                CurvePiece::Cubic(c) => out.extend(cubic_to_quadratics(c, tolerance)),
            }
        }
        out
    }

    /// Dichte Polyline für die Vorschau im Designer.
    ///
    /// `samples_per_piece`: Zwischenpunkte pro Stück (ohne Endpunkt).
    pub fn sample_polyline(&self, samples_per_piece: usize) -> Vec<DVec2> {
        let samples = samples_per_piece.max(1);
        let mut result = Vec::with_capacity(self.pieces.len() * samples + 1);
        for piece in &self.pieces {
            for i in 0..samples {
                result.push(piece.eval(i as f64 / samples as f64));
            }
        }
        if let Some(last) = self.pieces.last() {
            result.push(last.eval(1.0));
        }
        result
    }
}

/// Fittet eine Kurve von `start` über alle `anchors` nach `end`.
///
/// `anchors` müssen nach Höhe sortiert sein (Designer-Invariante).
/// `tension` wird nur von den Spline-Strategien verwendet.
pub fn fit_curve(
    start: DVec2,
    end: DVec2,
    anchors: &[DVec2],
    strategy: FitStrategy,
    tension: f64,
) -> FittedCurve {
    let pieces = match (strategy, anchors.len()) {
        (_, 0) => vec![CurvePiece::Quadratic(QuadraticBezier::line(start, end))],
        (FitStrategy::PointPassthrough | FitStrategy::Hybrid, 1) => vec![CurvePiece::Quadratic(
            QuadraticBezier::through_apex(start, anchors[0], end),
        )],
        (FitStrategy::PointPassthrough, _) => s_curve(&knots(start, anchors, end)),
        (FitStrategy::SpringSpline | FitStrategy::Hybrid, _) => {
            spring_spline(&knots(start, anchors, end), tension)
        }
    };
    FittedCurve { pieces }
}

fn knots(start: DVec2, anchors: &[DVec2], end: DVec2) -> Vec<DVec2> {
    let mut pts = Vec::with_capacity(anchors.len() + 2);
    pts.push(start);
    pts.extend_from_slice(anchors);
    pts.push(end);
    pts
}

/// Kardinal-Spline durch alle Knoten, je Spanne eine Kubik.
///
/// Über der Höhe parametrisiert: die Knotentangente ist die Sehnensteigung
/// dx/dy der Nachbarn im Catmull-Rom-Fenster, skaliert mit `(1 − tension)`.
/// Bei gleichmäßigen Höhenabständen entspricht das dem uniformen Kernel; bei
/// ungleichmäßigen schießt die Kurve nie über einen Knoten hinaus.
fn spring_spline(knots: &[DVec2], tension: f64) -> Vec<CurvePiece> {
    let scale = 1.0 - tension;
    catmull_rom_windows(knots)
        .into_iter()
        .map(|[p0, p1, p2, p3]| {
            CurvePiece::Cubic(CubicBezier::from_height_slopes(
                p1,
                p2,
                scale * chord_slope(p0, p2),
                scale * chord_slope(p1, p3),
            ))
        })
        .collect()
}

/// S-Kurve aus Quadratiken mit expliziter C1-Stetigkeit.
///
/// Jede Spanne `K_k → K_k+1` wird in zwei Bögen mit Naht auf halber Höhe
/// zerlegt. Die Kontrollpunkte liegen auf der Knotentangente im Abstand einer
/// halben Halbspanne; an einem Anker spiegeln sich `cp_before` und `cp_after`
/// (bei gleichen Nachbarspannen exakt `2·anchor − cp_before`). Die Naht liegt
/// in der Mitte ihrer beiden Kontrollpunkte.
fn s_curve(knots: &[DVec2]) -> Vec<CurvePiece> {
    let slopes = knot_slopes(knots);
    let mut pieces = Vec::with_capacity(2 * knots.len().saturating_sub(1));

    for k in 0..knots.len().saturating_sub(1) {
        let (from, to) = (knots[k], knots[k + 1]);
        let quarter = 0.25 * (to.y - from.y);
        let cp_after = DVec2::new(from.x + slopes[k] * quarter, from.y + quarter);
        let cp_before = DVec2::new(to.x - slopes[k + 1] * quarter, to.y - quarter);
        let junction = cp_after.lerp(cp_before, 0.5);

        pieces.push(CurvePiece::Quadratic(QuadraticBezier::new(
            from, cp_after, junction,
        )));
        pieces.push(CurvePiece::Quadratic(QuadraticBezier::new(
            junction, cp_before, to,
        )));
    }
    pieces
}
