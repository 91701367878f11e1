//! A CPU-based software-rendered 3D graphics engine.
//!
//! This crate implements the classic rasterization pipeline entirely on the
//! CPU: model/view/projection transforms, perspective divide, back-face
//! culling, flat Phong lighting, and scanline rasterization with z-buffer
//! depth testing. Finished frames are written out as PPM or PNG images.
//!
//! # Quick Start
//!
//! ```ignore
//! use rastra::prelude::*;
//!
//! let mut renderer = Renderer::new(800, 600);
//! let scene = Scene::demo();
//! scene.render(&mut renderer, false);
//! renderer.save_image("render.ppm");
//! ```

pub mod camera;
pub mod color;
pub mod light;
pub mod material;
pub mod math;
pub mod mesh;
pub mod render;
pub mod scene;

// Re-export the main entry points at the crate root for convenience
pub use mesh::{Mesh, MeshLoadError};
pub use render::{Framebuffer, Renderer};
pub use scene::Scene;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use rastra::prelude::*;
/// ```
pub mod prelude {
    // Scene building
    pub use crate::camera::Camera;
    pub use crate::light::{Light, LightKind};
    pub use crate::material::Material;
    pub use crate::mesh::{Mesh, Vertex};
    pub use crate::scene::Scene;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;

    // Rendering
    pub use crate::render::{Framebuffer, Renderer};
}
