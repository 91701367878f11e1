//! Light sources for scene illumination.

use crate::math::vec3::Vec3;

/// What kind of light this is, with the data that only that kind carries.
///
/// Point lights sit at a world position and fall off with distance.
/// Directional lights behave like the sun: parallel rays from a fixed
/// direction, no falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Point {
        /// World-space position of the emitter.
        position: Vec3,
    },
    Directional {
        /// Unit-length direction the light travels (not where it comes from).
        direction: Vec3,
    },
}

/// A light source illuminating the scene.
///
/// Construct through [`Light::point`] or [`Light::directional`] so the
/// per-kind invariants hold (normalized direction, non-negative intensity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    /// Color/tint of the emitted light.
    pub color: Vec3,
    /// Brightness multiplier applied to the diffuse and specular terms.
    pub intensity: f32,
}

impl Light {
    /// Creates a point light at `position`.
    pub fn point(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Point { position },
            color,
            intensity: intensity.max(0.0),
        }
    }

    /// Creates a directional light traveling along `direction`.
    /// The direction is normalized here so shading never has to.
    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional {
                direction: direction.normalize(),
            },
            color,
            intensity: intensity.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_directional_normalizes_direction() {
        let light = Light::directional(Vec3::new(0.0, -2.0, 0.0), Vec3::ONE, 1.0);
        match light.kind {
            LightKind::Directional { direction } => {
                assert_relative_eq!(direction.magnitude(), 1.0, epsilon = 1e-6);
                assert_relative_eq!(direction.y, -1.0, epsilon = 1e-6);
            }
            LightKind::Point { .. } => panic!("expected a directional light"),
        }
    }

    #[test]
    fn test_point_keeps_position() {
        let light = Light::point(Vec3::new(3.0, 4.0, 2.0), Vec3::ONE, 1.0);
        assert_eq!(
            light.kind,
            LightKind::Point {
                position: Vec3::new(3.0, 4.0, 2.0)
            }
        );
    }

    #[test]
    fn test_negative_intensity_is_floored() {
        let light = Light::point(Vec3::ZERO, Vec3::ONE, -2.0);
        assert_relative_eq!(light.intensity, 0.0);
    }
}
