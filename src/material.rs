//! Surface material parameters for the Phong reflection model.

use crate::math::vec3::Vec3;

/// Optical surface properties consumed by the lighting calculation.
///
/// Materials are plain value types; clone them freely between meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color under diffuse illumination.
    pub diffuse_color: Vec3,
    /// Tint of specular highlights.
    pub specular_color: Vec3,
    /// Specular exponent. Higher values give tighter highlights.
    pub shininess: f32,
    /// How strongly global ambient light affects this surface, in `[0, 1]`.
    pub ambient_strength: f32,
}

impl Default for Material {
    /// Neutral gray plastic: soft white highlights, moderate shininess.
    fn default() -> Self {
        Self {
            diffuse_color: Vec3::new(0.7, 0.7, 0.7),
            specular_color: Vec3::ONE,
            shininess: 32.0,
            ambient_strength: 0.1,
        }
    }
}

impl Material {
    /// Creates a material with the given colors and specular exponent.
    ///
    /// Ambient strength defaults to 0.1; override with
    /// [`with_ambient_strength`](Self::with_ambient_strength).
    pub fn new(diffuse_color: Vec3, specular_color: Vec3, shininess: f32) -> Self {
        debug_assert!(shininess > 0.0, "shininess must be positive");
        Self {
            diffuse_color,
            specular_color,
            shininess,
            ambient_strength: 0.1,
        }
    }

    /// Returns the material with its ambient strength replaced.
    ///
    /// Values are clamped to `[0, 1]`.
    pub fn with_ambient_strength(mut self, strength: f32) -> Self {
        self.ambient_strength = strength.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_neutral_gray() {
        let material = Material::default();
        assert_relative_eq!(material.diffuse_color.x, 0.7);
        assert_relative_eq!(material.shininess, 32.0);
        assert_relative_eq!(material.ambient_strength, 0.1);
    }

    #[test]
    fn test_ambient_strength_is_clamped() {
        let material = Material::default().with_ambient_strength(2.0);
        assert_relative_eq!(material.ambient_strength, 1.0);

        let material = Material::default().with_ambient_strength(-1.0);
        assert_relative_eq!(material.ambient_strength, 0.0);
    }
}
