//! Geschlossene Nullstellen-Löser für Polynome bis Grad 4.
//!
//! Alle Löser liefern ausschließlich reelle Nullstellen, aufsteigend sortiert.
//! Fehlende Lösungen (negative Diskriminante, entarteter Faktor) ergeben eine
//! leere Menge, niemals einen Platzhalterwert.

/// Schwelle für den Gradabbau: ein Leitkoeffizient gilt als Null, wenn die
/// Nullstellen-Schranke des normierten Polynoms `1 / DEGREE_EPSILON` übersteigt.
///
/// Verhindert die Normierung durch nahezu verschwindende Werte (z.B. Strahlen
/// entlang der optischen Achse beim Rotationsprofil), ohne monische Polynome
/// mit großen Koeffizienten abzubauen.
pub const DEGREE_EPSILON: f64 = 1e-9;

/// Newton-Schritte zum Nachschärfen der Ferrari-Nullstellen.
const POLISH_STEPS: usize = 2;

/// Bis zu vier reelle Nullstellen ohne Heap-Allokation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Roots {
    values: [f64; 4],
    len: usize,
}

impl Roots {
    fn push(&mut self, value: f64) {
        if self.len < self.values.len() && value.is_finite() {
            self.values[self.len] = value;
            self.len += 1;
        }
    }

    fn extend(&mut self, other: Roots) {
        for &value in other.as_slice() {
            self.push(value);
        }
    }

    fn sorted(mut self) -> Self {
        self.values[..self.len].sort_by(f64::total_cmp);
        self
    }

    fn shifted(self, offset: f64) -> Self {
        self.mapped(|value| value + offset)
    }

    fn mapped(mut self, f: impl Fn(f64) -> f64) -> Self {
        for value in &mut self.values[..self.len] {
            *value = f(*value);
        }
        self
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Kleinste Nullstelle strikt größer als `epsilon`.
    pub fn smallest_above(&self, epsilon: f64) -> Option<f64> {
        self.as_slice().iter().copied().find(|&t| t > epsilon)
    }
}

/// Fujiwara-Schranke für die Beträge aller Nullstellen von
/// `lead·tⁿ + rest[0]·tⁿ⁻¹ + … + rest[n−1]`.
fn root_bound(lead: f64, rest: &[f64]) -> f64 {
    let bound = rest.iter().enumerate().fold(0.0_f64, |bound, (k, v)| {
        bound.max((v / lead).abs().powf(1.0 / (k + 1) as f64))
    });
    2.0 * bound
}

/// Prüft, ob `lead` vernachlässigbar ist: die Nullstellen des normierten
/// Polynoms lägen jenseits von `1 / DEGREE_EPSILON`.
fn negligible(lead: f64, rest: &[f64]) -> bool {
    if lead == 0.0 {
        return true;
    }
    let bound = root_bound(lead, rest);
    !bound.is_finite() || bound * DEGREE_EPSILON > 1.0
}

/// `b·t + c = 0`
pub fn linear_roots(b: f64, c: f64) -> Roots {
    let mut roots = Roots::default();
    if b != 0.0 {
        roots.push(-c / b);
    }
    roots
}

/// `a·t² + b·t + c = 0` (numerisch stabile Form ohne Auslöschung).
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> Roots {
    if negligible(a, &[b, c]) {
        return linear_roots(b, c);
    }
    solve_quadratic(a, b, c)
}

fn solve_quadratic(a: f64, b: f64, c: f64) -> Roots {
    let disc = b * b - 4.0 * a * c;
    let mut roots = Roots::default();
    if disc < 0.0 {
        return roots;
    }

    let q = -0.5 * (b + b.signum() * disc.sqrt());
    if q == 0.0 {
        // b = 0 und c = 0: doppelte Nullstelle bei 0
        roots.push(0.0);
        return roots;
    }
    let (r1, r2) = (q / a, c / q);
    roots.push(r1);
    if r2 != r1 {
        roots.push(r2);
    }
    roots.sorted()
}

/// `a·t³ + b·t² + c·t + d = 0` nach Cardano.
///
/// Eine reelle Lösung bei positiver Diskriminante, sonst trigonometrische
/// Drei-Wurzel-Form.
pub fn cubic_roots(a: f64, b: f64, c: f64, d: f64) -> Roots {
    if negligible(a, &[b, c, d]) {
        return quadratic_roots(b, c, d);
    }
    monic_cubic_roots(b / a, c / a, d / a)
}

/// `t³ + b·t² + c·t + d = 0`; ohne Gradabbau, der Leitkoeffizient ist exakt 1.
fn monic_cubic_roots(b: f64, c: f64, d: f64) -> Roots {
    // t = y − b/3 → y³ + p·y + q = 0
    let shift = -b / 3.0;
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;

    let half_q = 0.5 * q;
    let third_p = p / 3.0;
    let disc = half_q * half_q + third_p * third_p * third_p;

    let mut roots = Roots::default();
    if disc > 0.0 {
        let sqrt_disc = disc.sqrt();
        roots.push((-half_q + sqrt_disc).cbrt() + (-half_q - sqrt_disc).cbrt());
    } else if p == 0.0 {
        // disc ≤ 0 und p = 0 erzwingt q = 0: dreifache Nullstelle
        roots.push(0.0);
    } else {
        let radius = 2.0 * (-third_p).sqrt();
        let arg = ((3.0 * q) / (2.0 * p) * (-3.0 / p).sqrt()).clamp(-1.0, 1.0);
        let phi = arg.acos() / 3.0;
        for k in 0..3 {
            roots.push(radius * (phi - 2.0 * std::f64::consts::PI * k as f64 / 3.0).cos());
        }
    }
    roots.shifted(shift).sorted()
}

/// `a·t⁴ + b·t³ + c·t² + d·t + e = 0` nach Ferrari.
///
/// Reduziert auf die depressive Quartik `u⁴ + p·u² + q·u + r`, löst die
/// Resolvente für die größte reelle Wurzel `m` und zerlegt in zwei Quadratiken.
/// Weit auseinanderliegende Nullstellen verlieren dabei Stellen; jede Lösung
/// wird deshalb mit Newton-Schritten am Originalpolynom nachgeschärft.
pub fn quartic_roots(a: f64, b: f64, c: f64, d: f64, e: f64) -> Roots {
    if negligible(a, &[b, c, d, e]) {
        return cubic_roots(b, c, d, e);
    }

    let (b, c, d, e) = (b / a, c / a, d / a, e / a);
    let monic = [1.0, b, c, d, e];
    let shift = -b / 4.0;
    let b2 = b * b;
    let p = c - 3.0 * b2 / 8.0;
    let q = d - b * c / 2.0 + b2 * b / 8.0;
    let r = e - b * d / 4.0 + b2 * c / 16.0 - 3.0 * b2 * b2 / 256.0;

    let q_scale = 1.0 + p.abs() * p.abs().sqrt() + r.abs().powf(0.75);
    if q.abs() <= 1e-12 * q_scale {
        return biquadratic_roots(p, r)
            .shifted(shift)
            .mapped(|t| polish(&monic, t))
            .sorted();
    }

    // Resolvente: m³ + p·m² + (p²/4 − r)·m − q²/8 = 0
    let resolvent = monic_cubic_roots(p, p * p / 4.0 - r, -q * q / 8.0);
    let Some(m) = resolvent
        .as_slice()
        .iter()
        .copied()
        .max_by(f64::total_cmp)
    else {
        return Roots::default();
    };
    if m <= 0.0 {
        return Roots::default();
    }

    let s = (2.0 * m).sqrt();
    let base = p / 2.0 + m;
    let skew = q / (2.0 * s);

    let mut roots = solve_quadratic(1.0, -s, base + skew);
    roots.extend(solve_quadratic(1.0, s, base - skew));
    roots
        .shifted(shift)
        .mapped(|t| polish(&monic, t))
        .sorted()
}

/// Newton-Verfeinerung einer Nullstelle von `coeffs` (höchster Grad zuerst).
///
/// Ein Schritt wird nur übernommen, wenn er das Residuum nicht vergrößert.
fn polish(coeffs: &[f64], mut t: f64) -> f64 {
    let eval = |t: f64| {
        coeffs
            .iter()
            .fold((0.0, 0.0), |(f, df), &c| (f * t + c, df * t + f))
    };
    for _ in 0..POLISH_STEPS {
        let (f, df) = eval(t);
        if f == 0.0 || df == 0.0 {
            break;
        }
        let next = t - f / df;
        if !next.is_finite() || eval(next).0.abs() > f.abs() {
            break;
        }
        t = next;
    }
    t
}

/// `u⁴ + p·u² + r = 0` über `w = u²`.
fn biquadratic_roots(p: f64, r: f64) -> Roots {
    let mut roots = Roots::default();
    for &w in solve_quadratic(1.0, p, r).as_slice() {
        if w > 0.0 {
            let u = w.sqrt();
            roots.push(-u);
            roots.push(u);
        } else if w == 0.0 {
            roots.push(0.0);
        }
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_roots(roots: Roots, expected: &[f64], eps: f64) {
        assert_eq!(
            roots.len(),
            expected.len(),
            "Nullstellen {:?}, erwartet {:?}",
            roots.as_slice(),
            expected
        );
        for (got, want) in roots.as_slice().iter().zip(expected) {
            assert_relative_eq!(*got, *want, epsilon = eps);
        }
    }

    #[test]
    fn test_linear() {
        assert_roots(linear_roots(2.0, -4.0), &[2.0], 1e-12);
        assert!(linear_roots(0.0, 1.0).is_empty());
    }

    #[test]
    fn test_quadratic_two_roots_sorted() {
        // (t − 1)(t − 3)
        assert_roots(quadratic_roots(1.0, -4.0, 3.0), &[1.0, 3.0], 1e-12);
    }

    #[test]
    fn test_quadratic_negative_discriminant_is_empty() {
        assert!(quadratic_roots(1.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_quadratic_tiny_leading_coefficient_degrades_to_linear() {
        let roots = quadratic_roots(1e-14, -1.0, 2.0);
        assert_roots(roots, &[2.0], 1e-9);
    }

    #[test]
    fn test_quadratic_without_cancellation() {
        // Nullstellen 1e-8 und 1e8
        let roots = quadratic_roots(1.0, -(1e8 + 1e-8), 1.0);
        assert_eq!(roots.len(), 2);
        assert_relative_eq!(roots.as_slice()[0], 1e-8, max_relative = 1e-9);
        assert_relative_eq!(roots.as_slice()[1], 1e8, max_relative = 1e-9);
    }

    #[test]
    fn test_cubic_three_real_roots() {
        // (t + 1)(t − 2)(t − 4) = t³ − 5t² + 2t + 8
        assert_roots(cubic_roots(1.0, -5.0, 2.0, 8.0), &[-1.0, 2.0, 4.0], 1e-9);
    }

    #[test]
    fn test_cubic_single_real_root() {
        // (t − 2)(t² + 1) = t³ − 2t² + t − 2
        assert_roots(cubic_roots(1.0, -2.0, 1.0, -2.0), &[2.0], 1e-9);
    }

    #[test]
    fn test_cubic_triple_root() {
        // (t − 1)³
        let roots = cubic_roots(1.0, -3.0, 3.0, -1.0);
        assert!(!roots.is_empty());
        for &t in roots.as_slice() {
            assert_relative_eq!(t, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_quartic_four_real_roots() {
        // (t − 1)(t − 2)(t − 3)(t − 4) = t⁴ − 10t³ + 35t² − 50t + 24
        assert_roots(
            quartic_roots(1.0, -10.0, 35.0, -50.0, 24.0),
            &[1.0, 2.0, 3.0, 4.0],
            1e-7,
        );
    }

    #[test]
    fn test_quartic_two_real_roots() {
        // (t − 1)(t + 2)(t² + 1) = t⁴ + t³ − t² + t − 2
        assert_roots(quartic_roots(1.0, 1.0, -1.0, 1.0, -2.0), &[-2.0, 1.0], 1e-9);
    }

    #[test]
    fn test_quartic_no_real_roots() {
        // (t² + 1)(t² + 4)
        assert!(quartic_roots(1.0, 0.0, 5.0, 0.0, 4.0).is_empty());
    }

    #[test]
    fn test_quartic_biquadratic_branch() {
        // (t² − 1)(t² − 9)
        assert_roots(
            quartic_roots(1.0, 0.0, -10.0, 0.0, 9.0),
            &[-3.0, -1.0, 1.0, 3.0],
            1e-9,
        );
    }

    #[test]
    fn test_quartic_scaled_leading_coefficient() {
        // 2·(t − 0.5)(t − 1.5)(t² + 1) = 2t⁴ − 4t³ + 3.5t² − 4t + 1.5
        assert_roots(quartic_roots(2.0, -4.0, 3.5, -4.0, 1.5), &[0.5, 1.5], 1e-9);
    }

    #[test]
    fn test_quartic_degrades_when_leading_vanishes() {
        // Achsnaher Strahl: a ≈ 0, b ≈ 0 → effektiv linear
        let roots = quartic_roots(1e-30, 1e-25, 0.0, -1.0, 2.0);
        assert_roots(roots, &[2.0], 1e-9);
    }

    #[test]
    fn test_quartic_widely_separated_roots() {
        // (t − 2)(t − 300)(t² + 1): Resolvente mit großem q²/8
        assert_roots(
            quartic_roots(1.0, -302.0, 601.0, -302.0, 600.0),
            &[2.0, 300.0],
            1e-6,
        );
    }

    #[test]
    fn test_cubic_with_large_coefficients_is_not_degraded() {
        // (t − 1000)(t + 1000)(t − 0.5): monisch, aber Koeffizienten ~ 1e6
        assert_roots(
            cubic_roots(1.0, -0.5, -1e6, 5e5),
            &[-1000.0, 0.5, 1000.0],
            1e-6,
        );
    }

    #[test]
    fn test_quartic_near_axis_revolution_ray() {
        // a₂·A²·t⁴ + a₁·A·t² − t + 2 mit A = 4e-4: kleiner Leitkoeffizient,
        // die physikalische Nullstelle bei t ≈ 2 muss erhalten bleiben
        let (a2, a1, big_a) = (0.15, -0.3, 4e-4);
        let roots = quartic_roots(a2 * big_a * big_a, 0.0, a1 * big_a, -1.0, 2.0);
        let t = roots.smallest_above(0.001).unwrap_or(f64::NAN);
        assert_relative_eq!(t, 2.0, epsilon = 1e-3);
        let residual = a2 * big_a * big_a * t.powi(4) + a1 * big_a * t * t - t + 2.0;
        assert!(residual.abs() < 1e-9, "Residuum {}", residual);
    }

    #[test]
    fn test_smallest_above_skips_small_roots() {
        let roots = quadratic_roots(1.0, -4.0, 3.0);
        assert_eq!(roots.smallest_above(1.5), Some(3.0));
        assert_eq!(roots.smallest_above(5.0), None);
        let near_zero = quadratic_roots(1.0, -1.0005, 0.0005);
        assert_relative_eq!(
            near_zero.smallest_above(0.001).unwrap_or(f64::NAN),
            1.0,
            epsilon = 1e-12
        );
    }
}
