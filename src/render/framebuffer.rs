//! Framebuffer with per-pixel color and depth storage.
//!
//! The depth buffer enables hidden surface removal via the z-buffer
//! algorithm: a fragment is kept only when it is strictly closer than what
//! the pixel already holds.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::color;
use crate::math::vec3::Vec3;

/// One framebuffer cell: quantized color plus z-buffer depth.
///
/// Depth 1.0 is the far plane in normalized device coordinates; smaller
/// values are closer to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub depth: f32,
}

impl Default for Pixel {
    fn default() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            depth: 1.0,
        }
    }
}

impl Pixel {
    /// Stores a float color, clamping to `[0, 1]` and truncating to bytes.
    /// One-way lossy; reads give back the dequantized approximation.
    fn set_color(&mut self, color: Vec3) {
        [self.r, self.g, self.b] = color::to_bytes(color);
    }
}

/// An owning width x height grid of [`Pixel`]s.
///
/// Dimensions are fixed at construction. All pixel access is
/// bounds-checked; out-of-range writes are silently dropped and
/// out-of-range reads return black, so callers never need to clip
/// coordinates themselves.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Framebuffer {
    /// Creates a framebuffer cleared to black at the far plane.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "framebuffer dimensions must be non-zero"
        );
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Clears every pixel to `color` and resets all depths to the far plane.
    pub fn clear(&mut self, color: Vec3) {
        let mut cleared = Pixel::default();
        cleared.set_color(color);
        self.pixels.fill(cleared);
    }

    /// Writes a pixel through the depth test.
    ///
    /// The write lands only if `depth` is strictly less than the stored
    /// depth, so an equal-depth fragment submitted later never overwrites
    /// an earlier one. Out-of-bounds coordinates are silently ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Vec3, depth: f32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = y as usize * self.width + x as usize;
            if depth < self.pixels[index].depth {
                self.pixels[index].set_color(color);
                self.pixels[index].depth = depth;
            }
        }
    }

    /// Reads a pixel color back as floats in `[0, 1]`.
    ///
    /// Returns the dequantized approximation of what was stored, not the
    /// original pre-quantization value. Out-of-bounds reads return black.
    pub fn get_pixel_color(&self, x: i32, y: i32) -> Vec3 {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let pixel = &self.pixels[y as usize * self.width + x as usize];
            color::from_bytes(pixel.r, pixel.g, pixel.b)
        } else {
            Vec3::ZERO
        }
    }

    /// Reads the stored depth at a coordinate, or 1.0 when out of bounds.
    pub fn get_depth(&self, x: i32, y: i32) -> f32 {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.pixels[y as usize * self.width + x as usize].depth
        } else {
            1.0
        }
    }

    // =========================================================================
    // Image output
    // =========================================================================

    /// Writes the image in plain-text PPM (P3): `P3`, dimensions, max channel
    /// value, then one `r g b` line per pixel, row-major, top row first.
    pub fn write_ppm<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for pixel in &self.pixels {
            writeln!(writer, "{} {} {}", pixel.r, pixel.g, pixel.b)?;
        }

        Ok(())
    }

    /// Saves the image as a plain-text PPM file.
    pub fn save_ppm(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut file)?;
        file.flush()
    }

    /// Saves the image as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        let mut img = image::RgbImage::new(self.width as u32, self.height as u32);
        for (index, pixel) in self.pixels.iter().enumerate() {
            let x = (index % self.width) as u32;
            let y = (index / self.width) as u32;
            img.put_pixel(x, y, image::Rgb([pixel.r, pixel.g, pixel.b]));
        }
        img.save(path)
    }
}
