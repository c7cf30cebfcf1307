//! Zentrale Konfiguration für Szene, Profil, Kurven-Fit und Shading.
//!
//! `MirrorOptions` enthält alle zur Laufzeit änderbaren Werte (Slider).
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::RevolutionProfile;
use serde::{Deserialize, Serialize};

// ── Szene ───────────────────────────────────────────────────────────

/// Abstand der Spiegelebene von der Kamera (Welteinheiten).
pub const MIRROR_DISTANCE: f64 = 2.0;
/// Halbe Spiegelbreite (Extrusionsprofil).
pub const MIRROR_HALF_WIDTH: f64 = 1.0;
/// Halbe Spiegelhöhe (Extrusionsprofil, Domäne der Segmente).
pub const MIRROR_HALF_HEIGHT: f64 = 1.0;
/// Spiegelradius (Rotationsprofil).
pub const MIRROR_RADIUS: f64 = 1.0;
/// Abstand der Bildebene hinter der Kamera.
pub const IMAGE_PLANE_DISTANCE: f64 = 0.5;
/// Physikalische Größe des Quellbilds auf der Bildebene [Breite, Höhe].
pub const IMAGE_SIZE: [f64; 2] = [2.0, 2.0];
/// Vertikales Sichtfeld der Kamera (Radiant, 60°).
pub const FIELD_OF_VIEW: f64 = std::f64::consts::FRAC_PI_3;

// ── Kurven-Fit ──────────────────────────────────────────────────────

/// Maximale Abweichung Kubik → Quadratik (Welteinheiten).
pub const FIT_TOLERANCE: f64 = 0.01;
/// Maximale Anzahl Benutzer-Anker.
pub const MAX_ANCHORS: usize = 5;

// ── Shading ─────────────────────────────────────────────────────────

/// Breite des Rand-Fades (normierte Spiegelkoordinate).
pub const EDGE_FADE_WIDTH: f64 = 0.08;
/// Stärke des Fresnel-Terms.
pub const FRESNEL_STRENGTH: f64 = 0.35;
/// Exponent des Fresnel-Terms.
pub const FRESNEL_POWER: f64 = 3.0;
/// Hintergrund bei Fehlschuss (RGBA: Dunkelgrau).
pub const BACKGROUND_COLOR: [f32; 4] = [0.08, 0.08, 0.1, 1.0];
/// Farbe für Reflexionen, die vom Bild weg laufen (RGBA: nahezu Schwarz).
pub const BEHIND_MIRROR_COLOR: [f32; 4] = [0.02, 0.02, 0.02, 1.0];
/// Verlauf der Sekundärebene oben (RGBA: Hellblau).
pub const GRADIENT_TOP_COLOR: [f32; 4] = [0.55, 0.65, 0.8, 1.0];
/// Verlauf der Sekundärebene unten (RGBA: Dunkelblau).
pub const GRADIENT_BOTTOM_COLOR: [f32; 4] = [0.1, 0.12, 0.2, 1.0];

/// Profilfamilie des Spiegels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileFamily {
    /// Stückweises Höhenprofil, entlang x extrudiert (quadratisch in t)
    #[default]
    Extruded,
    /// Rotationssymmetrisches Profil (quartisch in t)
    Revolution,
}

/// Strategie des Kurven-Fitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStrategy {
    /// Direkte Quadratik-Konstruktion durch die Anker (S-Kurve)
    PointPassthrough,
    /// Kardinal-Spline mit Spannung durch alle Knoten
    SpringSpline,
    /// 0/1 Anker direkt, ab 2 Ankern Spline
    #[default]
    Hybrid,
}

/// Diagnose-Ansicht statt Videobild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugView {
    #[default]
    Off,
    /// Flächennormale als Farbe
    Normals,
    /// Farbpalette je Profil-Segment
    SegmentIndex,
    /// UV-Koordinaten als Rot/Grün
    Uv,
}

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `curved_mirror.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MirrorOptions {
    // ── Szene ───────────────────────────────────────────────────
    /// Abstand Kamera → Spiegelebene
    pub mirror_distance: f64,
    /// Halbe Spiegelbreite (Extrusionsprofil)
    pub mirror_half_width: f64,
    /// Halbe Spiegelhöhe (Extrusionsprofil)
    pub mirror_half_height: f64,
    /// Spiegelradius (Rotationsprofil)
    pub mirror_radius: f64,
    /// Abstand der Bildebene hinter der Kamera
    pub image_plane_distance: f64,
    /// Physikalische Bildgröße auf der Bildebene [Breite, Höhe]
    pub image_size: [f64; 2],
    /// Vertikales Sichtfeld (Radiant)
    pub field_of_view: f64,

    // ── Profil ──────────────────────────────────────────────────
    /// Aktive Profilfamilie
    #[serde(default)]
    pub profile_family: ProfileFamily,
    /// Tiefe am unteren Rand (y = −Halbhöhe)
    pub boundary_depth_bottom: f64,
    /// Tiefe am oberen Rand (y = +Halbhöhe)
    pub boundary_depth_top: f64,

    // ── Kurven-Fit ──────────────────────────────────────────────
    /// Fit-Strategie
    #[serde(default)]
    pub fit_strategy: FitStrategy,
    /// Spline-Spannung [0, 1] (0 = Catmull-Rom)
    #[serde(default)]
    pub spline_tension: f64,
    /// Maximale Abweichung Kubik → Quadratik
    pub fit_tolerance: f64,
    /// Maximale Anzahl Anker
    #[serde(default = "default_max_anchors")]
    pub max_anchors: usize,

    // ── Shading ─────────────────────────────────────────────────
    /// Breite des Rand-Fades (normiert)
    pub edge_fade_width: f64,
    /// Stärke des Fresnel-Terms
    pub fresnel_strength: f64,
    /// Exponent des Fresnel-Terms
    pub fresnel_power: f64,
    /// Hintergrund bei Fehlschuss
    pub background_color: [f32; 4],
    /// Farbe für vom Bild weg laufende Reflexionen
    pub behind_mirror_color: [f32; 4],
    /// Sekundärebene: Verlauf oben
    pub gradient_top_color: [f32; 4],
    /// Sekundärebene: Verlauf unten
    pub gradient_bottom_color: [f32; 4],
    /// Diagnose-Ansicht
    #[serde(default)]
    pub debug_view: DebugView,

    // ── Rotationsprofil (als TOML-Tabelle zuletzt) ──────────────
    /// Koeffizienten des Rotationsprofils
    #[serde(default)]
    pub revolution: RevolutionProfile,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            mirror_distance: MIRROR_DISTANCE,
            mirror_half_width: MIRROR_HALF_WIDTH,
            mirror_half_height: MIRROR_HALF_HEIGHT,
            mirror_radius: MIRROR_RADIUS,
            image_plane_distance: IMAGE_PLANE_DISTANCE,
            image_size: IMAGE_SIZE,
            field_of_view: FIELD_OF_VIEW,

            profile_family: ProfileFamily::default(),
            boundary_depth_bottom: 0.0,
            boundary_depth_top: 0.0,

            fit_strategy: FitStrategy::default(),
            spline_tension: 0.0,
            fit_tolerance: FIT_TOLERANCE,
            max_anchors: MAX_ANCHORS,

            edge_fade_width: EDGE_FADE_WIDTH,
            fresnel_strength: FRESNEL_STRENGTH,
            fresnel_power: FRESNEL_POWER,
            background_color: BACKGROUND_COLOR,
            behind_mirror_color: BEHIND_MIRROR_COLOR,
            gradient_top_color: GRADIENT_TOP_COLOR,
            gradient_bottom_color: GRADIENT_BOTTOM_COLOR,
            debug_view: DebugView::default(),

            revolution: RevolutionProfile::default(),
        }
    }
}

/// Serde-Default für `max_anchors` (Abwärtskompatibilität).
fn default_max_anchors() -> usize {
    MAX_ANCHORS
}

/// Ersetzt `value` durch `fallback`, wenn er nicht endlich und positiv ist.
fn positive_or(name: &str, value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!(
            "Option '{}' ungültig ({}), verwende {}",
            name,
            value,
            fallback
        );
        fallback
    }
}

impl MirrorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts.sanitized()
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("curved_mirror"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("curved_mirror.toml")
    }

    /// Klemmt ungültige Werte auf Defaults bzw. gültige Bereiche.
    ///
    /// Ein fehlerhafter Wert degradiert nur die Darstellung, nie den Render.
    pub fn sanitized(mut self) -> Self {
        self.mirror_distance =
            positive_or("mirror_distance", self.mirror_distance, MIRROR_DISTANCE);
        self.mirror_half_width =
            positive_or("mirror_half_width", self.mirror_half_width, MIRROR_HALF_WIDTH);
        self.mirror_half_height = positive_or(
            "mirror_half_height",
            self.mirror_half_height,
            MIRROR_HALF_HEIGHT,
        );
        self.mirror_radius = positive_or("mirror_radius", self.mirror_radius, MIRROR_RADIUS);
        self.image_plane_distance = positive_or(
            "image_plane_distance",
            self.image_plane_distance,
            IMAGE_PLANE_DISTANCE,
        );
        self.image_size = [
            positive_or("image_size[0]", self.image_size[0], IMAGE_SIZE[0]),
            positive_or("image_size[1]", self.image_size[1], IMAGE_SIZE[1]),
        ];
        self.field_of_view = positive_or("field_of_view", self.field_of_view, FIELD_OF_VIEW)
            .min(std::f64::consts::PI - 0.01);
        self.fit_tolerance = positive_or("fit_tolerance", self.fit_tolerance, FIT_TOLERANCE);
        if !self.spline_tension.is_finite() {
            self.spline_tension = 0.0;
        }
        self.spline_tension = self.spline_tension.clamp(0.0, 1.0);
        self.edge_fade_width = if self.edge_fade_width.is_finite() {
            self.edge_fade_width.clamp(0.0, 1.0)
        } else {
            EDGE_FADE_WIDTH
        };
        self.fresnel_power = positive_or("fresnel_power", self.fresnel_power, FRESNEL_POWER);
        if !self.fresnel_strength.is_finite() {
            self.fresnel_strength = FRESNEL_STRENGTH;
        }
        for (name, depth) in [
            ("boundary_depth_bottom", &mut self.boundary_depth_bottom),
            ("boundary_depth_top", &mut self.boundary_depth_top),
        ] {
            if !depth.is_finite() {
                log::warn!("Option '{}' ungültig, verwende 0.0", name);
                *depth = 0.0;
            }
        }
        self
    }

    /// Untere und obere Grenze der Profil-Domäne.
    pub fn profile_bounds(&self) -> (f64, f64) {
        (-self.mirror_half_height, self.mirror_half_height)
    }
}
