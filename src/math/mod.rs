//! Vector and matrix primitives for the rendering pipeline.

pub mod mat4;
pub mod vec3;
