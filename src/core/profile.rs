//! Physikalisches Spiegelprofil: stückweise quadratische Polynome `z(y)`.
//!
//! Ein `ProfileSet` wird bei jeder Designer-Änderung komplett neu abgeleitet
//! und danach nur noch gelesen (Arc-Ersetzung, keine In-Place-Mutation).

use super::bezier::QuadraticBezier;

/// Maximale Anzahl Segmente pro Profil (feste Arena-Größe im Uniform-Buffer).
pub const MAX_PROFILE_SEGMENTS: usize = 16;

/// Unterhalb dieser Domänenbreite gilt ein Segment als entartet (flach).
const DEGENERATE_SPAN: f64 = 1e-12;

/// Ein Polynom-Stück `z(y) = a·y² + b·y + c`, gültig auf `[y_min, y_max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSegment {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ProfileSegment {
    /// Flaches Segment mit konstanter Tiefe.
    pub fn flat(depth: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            a: 0.0,
            b: 0.0,
            c: depth,
            y_min,
            y_max,
        }
    }

    /// Wandelt eine quadratische Bézier-Kurve in ein Polynom über `y` um.
    ///
    /// Domäne: `y_min = start.y`, `y_max = end.y`, `t = (y − y_min) / h`.
    /// Mit `A = z0 − 2·z1 + z2`, `B = 2·(z1 − z0)` folgt aus
    /// `z(t) = A·t² + B·t + z0` ausmultipliziert:
    ///
    /// ```text
    /// a = A / h²
    /// b = B / h − 2·A·y_min / h²
    /// c = A·y_min² / h² − B·y_min / h + z0
    /// ```
    pub fn from_quadratic(q: &QuadraticBezier) -> Self {
        let (z0, z1, z2) = (q.start.x, q.cp.x, q.end.x);
        let y_min = q.start.y;
        let y_max = q.end.y;
        let h = y_max - y_min;
        if h.abs() < DEGENERATE_SPAN {
            return Self::flat(z0, y_min, y_max);
        }

        let big_a = z0 - 2.0 * z1 + z2;
        let big_b = 2.0 * (z1 - z0);
        let h2 = h * h;
        Self {
            a: big_a / h2,
            b: big_b / h - 2.0 * big_a * y_min / h2,
            c: big_a * y_min * y_min / h2 - big_b * y_min / h + z0,
            y_min,
            y_max,
        }
    }

    /// Tiefe an Höhe `y`.
    pub fn eval(&self, y: f64) -> f64 {
        (self.a * y + self.b) * y + self.c
    }

    /// Ableitung dz/dy an Höhe `y`.
    pub fn slope(&self, y: f64) -> f64 {
        2.0 * self.a * y + self.b
    }

    /// Domäne ohne Höhenausdehnung (wird flach exportiert).
    pub fn is_degenerate(&self) -> bool {
        (self.y_max - self.y_min).abs() < DEGENERATE_SPAN
    }

    /// Prüft, ob `y` in der (geschlossenen) Domäne liegt.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.y_min && y <= self.y_max
    }
}

/// Stetigkeits-Kennzahlen an den Segment-Nähten.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeamReport {
    /// Größter Tiefensprung an einer Naht (C0)
    pub max_depth_gap: f64,
    /// Größter Steigungssprung an einer Naht (C1)
    pub max_slope_jump: f64,
}

/// Geordnete, lückenlose Folge von Profil-Segmenten.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSet {
    segments: Vec<ProfileSegment>,
}

impl ProfileSet {
    /// Flacher Spiegel über die gesamte Höhe (Best-Effort-Default).
    pub fn flat(depth: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            segments: vec![ProfileSegment::flat(depth, y_min, y_max)],
        }
    }

    /// Baut ein Profil aus zusammenhängenden Quadratiken.
    ///
    /// Mehr als [`MAX_PROFILE_SEGMENTS`] Quadratiken werden abgeschnitten; das
    /// letzte behaltene Segment wird bis `y_max` gestreckt.
    pub fn from_quadratics(quads: &[QuadraticBezier], y_min: f64, y_max: f64) -> Self {
        let segments: Vec<ProfileSegment> =
            quads.iter().map(ProfileSegment::from_quadratic).collect();
        Self::from_segments(segments, y_min, y_max)
    }

    /// Normalisiert eine Segmentliste auf eine Partition von `[y_min, y_max]`.
    pub fn from_segments(mut segments: Vec<ProfileSegment>, y_min: f64, y_max: f64) -> Self {
        if segments.is_empty() {
            log::warn!("Leeres Profil, verwende flachen Spiegel");
            return Self::flat(0.0, y_min, y_max);
        }
        if segments.len() > MAX_PROFILE_SEGMENTS {
            log::warn!(
                "Profil hat {} Segmente, kürze auf {}",
                segments.len(),
                MAX_PROFILE_SEGMENTS
            );
            segments.truncate(MAX_PROFILE_SEGMENTS);
        }

        // Nähte verketten: jede Domäne beginnt exakt am Ende der vorherigen
        // und endet innerhalb von [y_min, y_max]
        let upper = y_max.max(y_min);
        let mut cursor = y_min;
        let mut clamped = 0usize;
        for seg in segments.iter_mut() {
            seg.y_min = cursor;
            let end = seg.y_max.clamp(cursor, upper);
            if end != seg.y_max {
                clamped += 1;
                seg.y_max = end;
            }
            cursor = seg.y_max;
        }
        if clamped > 0 {
            log::warn!(
                "{} Segment(e) außerhalb der Profil-Domäne geklemmt",
                clamped
            );
        }
        if let Some(last) = segments.last_mut() {
            last.y_max = y_max.max(last.y_min);
        }

        Self { segments }
    }

    /// Alle Segmente in Höhenreihenfolge.
    pub fn segments(&self) -> &[ProfileSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Untere Grenze der Profil-Domäne.
    pub fn y_min(&self) -> f64 {
        self.segments.first().map_or(0.0, |s| s.y_min)
    }

    /// Obere Grenze der Profil-Domäne.
    pub fn y_max(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.y_max)
    }

    /// Index des Segments, das `y` enthält.
    pub fn segment_at(&self, y: f64) -> Option<usize> {
        if y < self.y_min() || y > self.y_max() {
            return None;
        }
        let idx = self.segments.partition_point(|s| s.y_max < y);
        (idx < self.segments.len()).then_some(idx)
    }

    /// Tiefe des Profils an Höhe `y` (None außerhalb der Domäne).
    pub fn eval(&self, y: f64) -> Option<f64> {
        self.segment_at(y).map(|i| self.segments[i].eval(y))
    }

    /// Misst Tiefen- und Steigungssprünge an allen inneren Nähten.
    pub fn seam_report(&self) -> SeamReport {
        self.segments
            .windows(2)
            .fold(SeamReport::default(), |mut report, w| {
                let y = w[0].y_max;
                let gap = (w[0].eval(y) - w[1].eval(y)).abs();
                report.max_depth_gap = report.max_depth_gap.max(gap);
                report.max_slope_jump =
                    report.max_slope_jump.max((w[0].slope(y) - w[1].slope(y)).abs());
                report
            })
    }
}
