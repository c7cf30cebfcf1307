//! Spiegel-Designer: Anker-Bearbeitung und vollständige Profil-Neuableitung.
//!
//! Jede Änderung (Anker hinzufügen/ziehen/löschen, Slider) leitet die Kette
//! Anker → Kurve → Quadratiken → Profil-Segmente komplett neu ab und
//! veröffentlicht das Ergebnis per Arc-Ersetzung.

use super::fitter::{fit_curve, CurvePiece, FittedCurve};
use crate::core::{AnchorPoint, AnchorSet, ProfileSet, MAX_PROFILE_SEGMENTS};
use crate::shared::{MirrorOptions, ProfileChannel};
use glam::DVec2;
use std::sync::Arc;
use thiserror::Error;

/// Wie oft die Toleranz bei Segment-Überlauf verdoppelt wird, bevor gekürzt wird.
const MAX_TOLERANCE_RETRIES: u32 = 4;

/// Fehler der Designer-API (erreichen nie den Render-Pfad).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DesignError {
    #[error("Anker {0} existiert nicht")]
    UnknownAnchor(u64),
    #[error("Maximal {0} Anker erlaubt")]
    TooManyAnchors(usize),
    #[error("Ankerposition ist nicht endlich")]
    NonFinitePosition,
}

/// Ergebnis einer Profil-Ableitung.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileBuild {
    /// Gefittete Kurve (Vorschau)
    pub curve: FittedCurve,
    /// Abgeleitetes Profil
    pub profile: ProfileSet,
    /// Tatsächlich verwendete Approximations-Toleranz
    pub tolerance: f64,
}

/// Leitet das Profil aus sortierten Ankerpositionen ab (reine Funktion).
///
/// Überschreitet die Quadratik-Anzahl [`MAX_PROFILE_SEGMENTS`], wird die
/// Toleranz bis zu [`MAX_TOLERANCE_RETRIES`] mal verdoppelt; danach kürzt
/// `ProfileSet` mit Warnung.
pub fn build_profile(anchors: &[DVec2], options: &MirrorOptions) -> ProfileBuild {
    let (y_min, y_max) = options.profile_bounds();
    let start = DVec2::new(options.boundary_depth_bottom, y_min);
    let end = DVec2::new(options.boundary_depth_top, y_max);

    let curve = fit_curve(
        start,
        end,
        anchors,
        options.fit_strategy,
        options.spline_tension,
    );

    // Nur Kubiken reagieren auf die Toleranz
    let has_cubics = curve
        .pieces()
        .iter()
        .any(|p| matches!(p, CurvePiece::Cubic(_)));

    let mut tolerance = options.fit_tolerance;
    let mut quads = curve.to_quadratics(tolerance);
    let mut retries = 0;
    while has_cubics && quads.len() > MAX_PROFILE_SEGMENTS && retries < MAX_TOLERANCE_RETRIES {
        tolerance *= 2.0;
        quads = curve.to_quadratics(tolerance);
        retries += 1;
        log::debug!(
            "Segment-Überlauf, Toleranz auf {:.4e} erhöht ({} Quadratiken)",
            tolerance,
            quads.len()
        );
    }

    let profile = ProfileSet::from_quadratics(&quads, y_min, y_max);
    ProfileBuild {
        curve,
        profile,
        tolerance,
    }
}

/// Zustand des Kurven-Designers.
pub struct MirrorDesigner {
    anchors: AnchorSet,
    options: MirrorOptions,
    build: ProfileBuild,
    current: Arc<ProfileSet>,
    channel: ProfileChannel,
}

impl MirrorDesigner {
    /// Erstellt einen Designer ohne Anker (Verbindung der Randpunkte).
    pub fn new(options: MirrorOptions) -> Self {
        let options = options.sanitized();
        let build = build_profile(&[], &options);
        let current = Arc::new(build.profile.clone());
        Self {
            anchors: AnchorSet::new(),
            options,
            build,
            channel: ProfileChannel::new(Arc::clone(&current)),
            current,
        }
    }

    /// Fügt einen Anker hinzu und gibt seine ID zurück.
    pub fn add_anchor(&mut self, position: DVec2) -> Result<u64, DesignError> {
        if self.anchors.len() >= self.options.max_anchors {
            return Err(DesignError::TooManyAnchors(self.options.max_anchors));
        }
        let position = self.clamp_position(position)?;
        let id = self.anchors.add(position);
        self.rebuild();
        Ok(id)
    }

    /// Verschiebt einen Anker (Drag).
    pub fn move_anchor(&mut self, id: u64, position: DVec2) -> Result<(), DesignError> {
        let position = self.clamp_position(position)?;
        if !self.anchors.move_to(id, position) {
            return Err(DesignError::UnknownAnchor(id));
        }
        self.rebuild();
        Ok(())
    }

    /// Entfernt einen Anker.
    pub fn remove_anchor(&mut self, id: u64) -> Result<(), DesignError> {
        if !self.anchors.remove(id) {
            return Err(DesignError::UnknownAnchor(id));
        }
        self.rebuild();
        Ok(())
    }

    /// Entfernt alle Anker.
    pub fn clear_anchors(&mut self) {
        self.anchors.clear();
        self.rebuild();
    }

    /// Übernimmt neue Optionen (Slider) und leitet das Profil neu ab.
    ///
    /// Anker außerhalb der neuen Höhen-Domäne werden geklemmt; bei gesenktem
    /// `max_anchors` entfallen die zuletzt hinzugefügten Anker.
    pub fn set_options(&mut self, options: MirrorOptions) {
        self.options = options.sanitized();

        let excess = self.anchors.len().saturating_sub(self.options.max_anchors);
        if excess > 0 {
            let mut ids: Vec<u64> = self.anchors.as_slice().iter().map(|a| a.id).collect();
            ids.sort_unstable();
            for id in ids.into_iter().rev().take(excess) {
                self.anchors.remove(id);
            }
            log::warn!(
                "{} Anker über dem Limit {} entfernt",
                excess,
                self.options.max_anchors
            );
        }

        let (y_min, y_max) = self.options.profile_bounds();
        let moved: Vec<(u64, DVec2)> = self
            .anchors
            .as_slice()
            .iter()
            .filter(|a| a.position.y < y_min || a.position.y > y_max)
            .map(|a| (a.id, a.position))
            .collect();
        for (id, position) in moved {
            let clamped = DVec2::new(position.x, position.y.clamp(y_min, y_max));
            self.anchors.move_to(id, clamped);
        }
        self.rebuild();
    }

    pub fn options(&self) -> &MirrorOptions {
        &self.options
    }

    /// Anker in Höhenreihenfolge.
    pub fn anchors(&self) -> &[AnchorPoint] {
        self.anchors.as_slice()
    }

    /// Aktuell gültiges Profil.
    pub fn profile(&self) -> Arc<ProfileSet> {
        Arc::clone(&self.current)
    }

    /// Gefittete Kurve der letzten Ableitung (für die Vorschau).
    pub fn curve(&self) -> &FittedCurve {
        &self.build.curve
    }

    /// Zuletzt verwendete Approximations-Toleranz.
    pub fn effective_tolerance(&self) -> f64 {
        self.build.tolerance
    }

    /// Kanal für Render-Threads (Clone teilt den Slot).
    pub fn channel(&self) -> ProfileChannel {
        self.channel.clone()
    }

    /// Leitet Kurve und Profil vollständig neu ab und veröffentlicht es.
    pub fn rebuild(&mut self) {
        let positions = self.anchors.positions();
        self.build = build_profile(&positions, &self.options);
        self.current = Arc::new(self.build.profile.clone());

        let seams = self.current.seam_report();
        log::debug!(
            "Profil neu abgeleitet: {} Anker, {} Segmente, Naht-Sprung C0 {:.2e} / C1 {:.2e}",
            positions.len(),
            self.current.len(),
            seams.max_depth_gap,
            seams.max_slope_jump
        );
        self.channel.publish(Arc::clone(&self.current));
    }

    /// Prüft Endlichkeit und klemmt die Höhe in die Profil-Domäne.
    fn clamp_position(&self, position: DVec2) -> Result<DVec2, DesignError> {
        if !position.is_finite() {
            return Err(DesignError::NonFinitePosition);
        }
        let (y_min, y_max) = self.options.profile_bounds();
        let y = position.y.clamp(y_min, y_max);
        if y != position.y {
            log::warn!(
                "Anker-Höhe {:.3} außerhalb [{:.3}, {:.3}], geklemmt",
                position.y,
                y_min,
                y_max
            );
        }
        Ok(DVec2::new(position.x, y))
    }
}

impl Default for MirrorDesigner {
    fn default() -> Self {
        Self::new(MirrorOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::FitStrategy;
    use approx::assert_relative_eq;

    fn assert_partition(profile: &ProfileSet, y_min: f64, y_max: f64) {
        let segs = profile.segments();
        assert_eq!(segs[0].y_min, y_min);
        assert_eq!(segs[segs.len() - 1].y_max, y_max);
        for w in segs.windows(2) {
            assert_eq!(w[0].y_max, w[1].y_min);
        }
    }

    #[test]
    fn test_new_designer_is_flat() {
        let designer = MirrorDesigner::default();
        let profile = designer.profile();
        assert_eq!(profile.len(), 1);
        assert_relative_eq!(profile.eval(0.3).unwrap_or(f64::NAN), 0.0);
    }

    #[test]
    fn test_single_midpoint_anchor_scenario() {
        let mut designer = MirrorDesigner::default();
        designer
            .add_anchor(DVec2::new(-0.5, 0.0))
            .expect("Anker muss angenommen werden");

        let profile = designer.profile();
        assert_eq!(profile.len(), 1);
        let seg = profile.segments()[0];
        assert_relative_eq!(seg.eval(-1.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(seg.eval(1.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(seg.eval(0.0), -0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_partition_for_every_strategy_and_anchor_count() {
        let anchors = [
            DVec2::new(0.2, -0.7),
            DVec2::new(-0.3, -0.2),
            DVec2::new(0.1, 0.25),
            DVec2::new(-0.4, 0.5),
            DVec2::new(0.15, 0.8),
        ];
        for strategy in [
            FitStrategy::PointPassthrough,
            FitStrategy::SpringSpline,
            FitStrategy::Hybrid,
        ] {
            let options = MirrorOptions {
                fit_strategy: strategy,
                ..MirrorOptions::default()
            };
            for n in 0..=anchors.len() {
                let build = build_profile(&anchors[..n], &options);
                assert!(build.profile.len() <= MAX_PROFILE_SEGMENTS);
                assert_partition(&build.profile, -1.0, 1.0);
            }
        }
    }

    #[test]
    fn test_build_is_bit_identical() {
        let anchors = [DVec2::new(0.2, -0.5), DVec2::new(-0.3, 0.4)];
        let options = MirrorOptions::default();
        let a = build_profile(&anchors, &options);
        let b = build_profile(&anchors, &options);
        assert_eq!(a.profile.segments(), b.profile.segments());
    }

    #[test]
    fn test_point_passthrough_profile_is_c1() {
        let options = MirrorOptions {
            fit_strategy: FitStrategy::PointPassthrough,
            ..MirrorOptions::default()
        };
        let anchors = [DVec2::new(0.2, -0.5), DVec2::new(-0.3, 0.1), DVec2::new(0.05, 0.7)];
        let build = build_profile(&anchors, &options);
        let seams = build.profile.seam_report();
        assert!(seams.max_depth_gap < 1e-9, "C0: {}", seams.max_depth_gap);
        assert!(seams.max_slope_jump < 1e-9, "C1: {}", seams.max_slope_jump);
    }

    #[test]
    fn test_overflow_raises_tolerance() {
        let options = MirrorOptions {
            fit_strategy: FitStrategy::SpringSpline,
            fit_tolerance: 1e-7,
            ..MirrorOptions::default()
        };
        let anchors = [
            DVec2::new(0.6, -0.6),
            DVec2::new(-0.6, -0.2),
            DVec2::new(0.6, 0.2),
            DVec2::new(-0.6, 0.6),
        ];
        let build = build_profile(&anchors, &options);
        assert!(build.tolerance > options.fit_tolerance);
        assert!(build.profile.len() <= MAX_PROFILE_SEGMENTS);
        assert_partition(&build.profile, -1.0, 1.0);
    }

    #[test]
    fn test_anchor_limit() {
        let mut designer = MirrorDesigner::new(MirrorOptions {
            max_anchors: 2,
            ..MirrorOptions::default()
        });
        designer.add_anchor(DVec2::new(0.1, -0.3)).expect("erster Anker");
        designer.add_anchor(DVec2::new(0.1, 0.3)).expect("zweiter Anker");
        assert_eq!(
            designer.add_anchor(DVec2::new(0.1, 0.0)),
            Err(DesignError::TooManyAnchors(2))
        );
    }

    #[test]
    fn test_unknown_anchor_errors() {
        let mut designer = MirrorDesigner::default();
        assert_eq!(
            designer.move_anchor(7, DVec2::ZERO),
            Err(DesignError::UnknownAnchor(7))
        );
        assert_eq!(designer.remove_anchor(7), Err(DesignError::UnknownAnchor(7)));
    }

    #[test]
    fn test_non_finite_position_rejected() {
        let mut designer = MirrorDesigner::default();
        assert_eq!(
            designer.add_anchor(DVec2::new(f64::NAN, 0.0)),
            Err(DesignError::NonFinitePosition)
        );
        assert!(designer.anchors().is_empty());
    }

    #[test]
    fn test_out_of_range_anchor_is_clamped() {
        let mut designer = MirrorDesigner::default();
        let id = designer.add_anchor(DVec2::new(0.2, 5.0)).expect("Anker");
        let anchor = designer.anchors().iter().find(|a| a.id == id).copied();
        assert_eq!(anchor.map(|a| a.position.y), Some(1.0));
        assert_partition(&designer.profile(), -1.0, 1.0);
    }

    #[test]
    fn test_drag_and_delete_republish() {
        let mut designer = MirrorDesigner::default();
        let reader = designer.channel();
        let id = designer.add_anchor(DVec2::new(-0.5, 0.0)).expect("Anker");
        assert_relative_eq!(
            reader.snapshot().eval(0.0).unwrap_or(f64::NAN),
            -0.5,
            epsilon = 1e-9
        );

        designer.move_anchor(id, DVec2::new(0.25, 0.0)).expect("Drag");
        assert_relative_eq!(
            reader.snapshot().eval(0.0).unwrap_or(f64::NAN),
            0.25,
            epsilon = 1e-9
        );

        designer.remove_anchor(id).expect("Löschen");
        assert_relative_eq!(
            reader.snapshot().eval(0.0).unwrap_or(f64::NAN),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_set_options_clamps_existing_anchors() {
        let mut designer = MirrorDesigner::default();
        designer.add_anchor(DVec2::new(0.1, 0.9)).expect("Anker");
        designer.set_options(MirrorOptions {
            mirror_half_height: 0.5,
            ..MirrorOptions::default()
        });
        assert_eq!(designer.anchors()[0].position.y, 0.5);
        assert_partition(&designer.profile(), -0.5, 0.5);
    }

    #[test]
    fn test_lowered_anchor_limit_drops_newest_anchors() {
        let mut designer = MirrorDesigner::default();
        let first = designer.add_anchor(DVec2::new(0.1, 0.4)).expect("Anker");
        let second = designer.add_anchor(DVec2::new(-0.2, -0.4)).expect("Anker");
        designer.add_anchor(DVec2::new(0.3, 0.0)).expect("Anker");

        designer.set_options(MirrorOptions {
            max_anchors: 2,
            ..MirrorOptions::default()
        });

        let mut ids: Vec<u64> = designer.anchors().iter().map(|a| a.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(designer.build.profile, *designer.profile());
        assert_eq!(
            designer.add_anchor(DVec2::new(0.0, 0.2)),
            Err(DesignError::TooManyAnchors(2))
        );
    }
}
