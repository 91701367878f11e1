//! Color constants and conversions between float and byte color spaces.
//!
//! Colors travel through the pipeline as [`Vec3`] with components nominally
//! in `[0, 1]`. Lighting is free to push components above 1; quantization to
//! bytes clamps first, so overbright results saturate instead of wrapping.

use crate::math::vec3::Vec3;

pub const BLACK: Vec3 = Vec3::new(0.0, 0.0, 0.0);
pub const WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
pub const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Dark blue clear color used as the default scene background.
pub const BACKGROUND: Vec3 = Vec3::new(0.1, 0.1, 0.2);

/// Fixed color for wireframe edges.
pub const WIREFRAME: Vec3 = WHITE;

/// Clamps each color component to `[0, 1]`.
#[inline]
pub fn clamp(color: Vec3) -> Vec3 {
    Vec3::new(
        color.x.clamp(0.0, 1.0),
        color.y.clamp(0.0, 1.0),
        color.z.clamp(0.0, 1.0),
    )
}

/// Converts a float color to byte components, clamping then truncating.
#[inline]
pub fn to_bytes(color: Vec3) -> [u8; 3] {
    let clamped = clamp(color);
    [
        (clamped.x * 255.0) as u8,
        (clamped.y * 255.0) as u8,
        (clamped.z * 255.0) as u8,
    ]
}

/// Converts byte components back to a float color in `[0, 1]`.
#[inline]
pub fn from_bytes(r: u8, g: u8, b: u8) -> Vec3 {
    Vec3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}
