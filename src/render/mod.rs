//! Rendering: the framebuffer and the rasterization pipeline.

pub mod framebuffer;
pub mod renderer;

pub use framebuffer::Framebuffer;
pub use renderer::Renderer;
