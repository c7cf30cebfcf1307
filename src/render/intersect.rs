//! Geschlossene Strahl-Spiegel-Schnitte für beide Profilfamilien.
//!
//! Kein Treffer ist kein Fehler: alle Funktionen liefern `None`, der Shader
//! zeichnet dann den Hintergrund.

use super::solver::{quadratic_roots, quartic_roots};
use crate::core::{Hit, ProfileSet, Ray, RevolutionProfile};
use crate::shared::{ProfileFamily, RenderScene};
use glam::DVec3;

/// Mindestabstand entlang des Strahls (unterdrückt Selbsttreffer).
pub const HIT_EPSILON: f64 = 0.001;

/// Nächster gültiger Treffer auf dem Spiegel der Szene.
pub fn intersect(ray: &Ray, scene: &RenderScene) -> Option<Hit> {
    let options = &scene.options;
    match options.profile_family {
        ProfileFamily::Extruded => intersect_extruded(
            ray,
            &scene.profile,
            options.mirror_distance,
            options.mirror_half_width,
        ),
        ProfileFamily::Revolution => intersect_revolution(
            ray,
            &options.revolution,
            options.mirror_distance,
            options.mirror_radius,
        ),
    }
}

/// Schnitt mit dem extrudierten Profil `z = D + a·y² + b·y + c`.
///
/// Pro Segment wird die quadratische Gleichung in `t` gelöst. Liegt die
/// kleinere Nullstelle außerhalb des Segments oder der Breite, gilt die
/// nächste. Über alle Segmente gewinnt das kleinste gültige `t`.
pub fn intersect_extruded(
    ray: &Ray,
    profile: &ProfileSet,
    mirror_distance: f64,
    half_width: f64,
) -> Option<Hit> {
    let (o, d) = (ray.origin, ray.direction);
    let mut best: Option<Hit> = None;

    for (index, seg) in profile.segments().iter().enumerate() {
        let qa = seg.a * d.y * d.y;
        let qb = 2.0 * seg.a * o.y * d.y + seg.b * d.y - d.z;
        let qc = seg.a * o.y * o.y + seg.b * o.y + seg.c + mirror_distance - o.z;

        let candidate = quadratic_roots(qa, qb, qc)
            .as_slice()
            .iter()
            .copied()
            .filter(|&t| t > HIT_EPSILON)
            .map(|t| (t, ray.at(t)))
            .find(|(_, p)| seg.contains(p.y) && p.x.abs() <= half_width);

        if let Some((t, position)) = candidate {
            if best.map_or(true, |b| t < b.t) {
                best = Some(Hit {
                    t,
                    position,
                    segment_index: index,
                });
            }
        }
    }
    best
}

/// Schnitt mit dem Rotationsprofil `z = D + a₂·r⁴ + a₁·r² + a₀`.
///
/// Mit `r²(t) = A·t² + B·t + C` entsteht eine Quartik in `t`; für `a₂ ≈ 0`
/// genügt die Quadratik des Paraboloids.
pub fn intersect_revolution(
    ray: &Ray,
    profile: &RevolutionProfile,
    mirror_distance: f64,
    radius: f64,
) -> Option<Hit> {
    let (o, d) = (ray.origin, ray.direction);
    let big_a = d.x * d.x + d.y * d.y;
    let big_b = 2.0 * (o.x * d.x + o.y * d.y);
    let big_c = o.x * o.x + o.y * o.y;
    let (a2, a1) = (profile.a2, profile.a1);
    let constant = profile.a0 + mirror_distance - o.z;

    let roots = if profile.is_paraboloid() {
        quadratic_roots(a1 * big_a, a1 * big_b - d.z, a1 * big_c + constant)
    } else {
        quartic_roots(
            a2 * big_a * big_a,
            2.0 * a2 * big_a * big_b,
            a2 * (big_b * big_b + 2.0 * big_a * big_c) + a1 * big_a,
            2.0 * a2 * big_b * big_c + a1 * big_b - d.z,
            a2 * big_c * big_c + a1 * big_c + constant,
        )
    };

    let radius_sq = radius * radius;
    roots
        .as_slice()
        .iter()
        .copied()
        .filter(|&t| t > HIT_EPSILON)
        .map(|t| (t, ray.at(t)))
        .find(|(_, p)| p.x * p.x + p.y * p.y <= radius_sq)
        .map(|(t, position)| Hit {
            t,
            position,
            segment_index: 0,
        })
}

/// Analytische Flächennormale am Treffer, zur Kamera zeigend (`N.z < 0`).
pub fn surface_normal(hit: &Hit, scene: &RenderScene) -> DVec3 {
    let p = hit.position;
    let (dz_dx, dz_dy) = match scene.options.profile_family {
        ProfileFamily::Extruded => {
            let slope = scene
                .profile
                .segments()
                .get(hit.segment_index)
                .map_or(0.0, |seg| seg.slope(p.y));
            (0.0, slope)
        }
        ProfileFamily::Revolution => {
            let k = scene.options.revolution.dz_dr2(p.x * p.x + p.y * p.y);
            (2.0 * p.x * k, 2.0 * p.y * k)
        }
    };

    let n = DVec3::new(-dz_dx, -dz_dy, 1.0).normalize();
    if n.z > 0.0 {
        -n
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProfileSegment;
    use crate::shared::MirrorOptions;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn flat_profile(depth: f64) -> ProfileSet {
        ProfileSet::flat(depth, -1.0, 1.0)
    }

    #[test]
    fn test_flat_mirror_hit_distance() {
        let profile = flat_profile(-0.25);
        for dir in [
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(0.1, 0.2, 1.0),
            DVec3::new(-0.3, -0.1, 1.0),
        ] {
            let ray = Ray::new(DVec3::ZERO, dir);
            let hit = intersect_extruded(&ray, &profile, 2.0, 1.0).expect("Treffer erwartet");
            assert_relative_eq!(hit.t, (-0.25 + 2.0) / ray.direction.z, epsilon = 1e-12);
            assert_relative_eq!(hit.position.z, 1.75, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_ray_outside_width_misses() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(1.0, 0.0, 1.0));
        assert!(intersect_extruded(&ray, &flat_profile(0.0), 2.0, 1.0).is_none());
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        assert!(intersect_extruded(&ray, &flat_profile(0.0), 2.0, 1.0).is_none());
    }

    #[test]
    fn test_curved_segment_hit_lies_on_surface() {
        // Konkaver Parabelspiegel z = 2 + 0.5·y² − 0.5
        let seg = ProfileSegment {
            a: 0.5,
            b: 0.0,
            c: -0.5,
            y_min: -1.0,
            y_max: 1.0,
        };
        let profile = ProfileSet::from_segments(vec![seg], -1.0, 1.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.3, 1.0));
        let hit = intersect_extruded(&ray, &profile, 2.0, 1.0).expect("Treffer erwartet");
        assert_relative_eq!(
            hit.position.z,
            2.0 + seg.eval(hit.position.y),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_nearest_segment_wins() {
        // Zwei Segmente, der Strahl trifft nur das obere im gültigen Bereich
        let lower = ProfileSegment::flat(0.0, -1.0, 0.0);
        let upper = ProfileSegment::flat(-0.5, 0.0, 1.0);
        let profile = ProfileSet::from_segments(vec![lower, upper], -1.0, 1.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.2, 1.0));
        let hit = intersect_extruded(&ray, &profile, 2.0, 1.0).expect("Treffer erwartet");
        assert_eq!(hit.segment_index, 1);
        assert_relative_eq!(hit.position.z, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_revolution_paraboloid_on_axis() {
        let profile = RevolutionProfile::new(0.0, -0.2, 0.1);
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        let hit = intersect_revolution(&ray, &profile, 2.0, 1.0).expect("Treffer erwartet");
        assert_relative_eq!(hit.t, 2.1, epsilon = 1e-12);
    }

    #[test]
    fn test_revolution_quartic_hit_lies_on_surface() {
        let profile = RevolutionProfile::new(0.15, -0.3, 0.0);
        for dir in [
            DVec3::new(0.2, 0.0, 1.0),
            DVec3::new(0.1, -0.25, 1.0),
            DVec3::new(-0.3, 0.3, 1.0),
        ] {
            let ray = Ray::new(DVec3::ZERO, dir);
            let hit = intersect_revolution(&ray, &profile, 2.0, 1.0).expect("Treffer erwartet");
            let p = hit.position;
            let r2 = p.x * p.x + p.y * p.y;
            assert_relative_eq!(p.z, 2.0 + profile.eval_r2(r2), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_revolution_near_axis_rays_hit() {
        let profile = RevolutionProfile::new(0.15, -0.3, 0.0);
        for dx in [0.001, 0.013, 0.02, 0.03, 0.05, 0.08] {
            let ray = Ray::new(DVec3::ZERO, DVec3::new(dx, 0.0, 1.0));
            let hit = intersect_revolution(&ray, &profile, 2.0, 1.0)
                .unwrap_or_else(|| panic!("kein Treffer bei dx = {}", dx));
            let p = hit.position;
            assert_relative_eq!(p.z, 2.0 + profile.eval_r2(p.x * p.x), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_revolution_on_axis_ray_degrades_gracefully() {
        let profile = RevolutionProfile::new(0.15, -0.3, 0.05);
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        let hit = intersect_revolution(&ray, &profile, 2.0, 1.0).expect("Treffer erwartet");
        assert_relative_eq!(hit.t, 2.05, epsilon = 1e-9);
    }

    #[test]
    fn test_revolution_outside_radius_misses() {
        let profile = RevolutionProfile::new(0.1, -0.2, 0.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.8, 0.0, 1.0));
        assert!(intersect_revolution(&ray, &profile, 2.0, 1.0).is_none());
    }

    #[test]
    fn test_normals_face_camera() {
        let mut options = MirrorOptions::default();
        let seg = ProfileSegment {
            a: 0.4,
            b: -0.2,
            c: 0.0,
            y_min: -1.0,
            y_max: 1.0,
        };
        let scene = RenderScene::new(
            Arc::new(ProfileSet::from_segments(vec![seg], -1.0, 1.0)),
            options.clone(),
        );
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.1, 0.3, 1.0));
        let hit = intersect(&ray, &scene).expect("Treffer erwartet");
        let n = surface_normal(&hit, &scene);
        assert!(n.z < 0.0);
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
        // Normale steht senkrecht auf der Tangente (0, 1, dz/dy)
        let tangent = DVec3::new(0.0, 1.0, seg.slope(hit.position.y));
        assert_relative_eq!(n.dot(tangent), 0.0, epsilon = 1e-12);

        options.profile_family = ProfileFamily::Revolution;
        options.revolution = RevolutionProfile::new(0.1, -0.3, 0.0);
        let scene = RenderScene::new(scene.profile.clone(), options);
        let hit = intersect(&ray, &scene).expect("Treffer erwartet");
        let n = surface_normal(&hit, &scene);
        assert!(n.z < 0.0);
    }
}
