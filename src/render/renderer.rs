//! The rendering pipeline: transformation, lighting, and rasterization.
//!
//! [`Renderer`] owns a [`Framebuffer`] and walks each mesh through the
//! classic pipeline stages a GPU would run in hardware: model to clip space
//! transforms, perspective divide, viewport mapping, back-face culling, flat
//! Phong lighting, and scanline rasterization with depth testing.

use crate::camera::Camera;
use crate::color;
use crate::light::{Light, LightKind};
use crate::material::Material;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::render::framebuffer::Framebuffer;

/// Default global ambient illumination.
const AMBIENT_LIGHT: Vec3 = Vec3::new(0.2, 0.2, 0.2);

/// CPU rasterizer rendering meshes into an owned framebuffer.
pub struct Renderer {
    framebuffer: Framebuffer,
    ambient_light: Vec3,
}

impl Renderer {
    /// Creates a renderer with a framebuffer of the given resolution.
    ///
    /// # Panics
    /// Panics if either dimension is zero (see [`Framebuffer::new`]).
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            framebuffer: Framebuffer::new(width, height),
            ambient_light: AMBIENT_LIGHT,
        }
    }

    /// Read access to the rendered image.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Returns the global ambient light color.
    pub fn ambient_light(&self) -> Vec3 {
        self.ambient_light
    }

    /// Replaces the global ambient light color.
    pub fn set_ambient_light(&mut self, ambient: Vec3) {
        self.ambient_light = ambient;
    }

    /// Clears the framebuffer to `color` and resets the depth buffer.
    pub fn clear(&mut self, color: Vec3) {
        self.framebuffer.clear(color);
    }

    // =========================================================================
    // Lighting
    // =========================================================================

    /// Evaluates the Phong reflection model at a surface point.
    ///
    /// Sums ambient, diffuse (Lambert), and specular terms over all lights.
    /// Point lights attenuate as `1 / (1 + 0.1d + 0.01d^2)` with distance
    /// `d`; directional lights do not attenuate. The result is not clamped
    /// here; the framebuffer clamps at pixel-write time, so overbright sums
    /// saturate there.
    pub fn calculate_lighting(
        &self,
        position: Vec3,
        normal: Vec3,
        material: &Material,
        lights: &[Light],
        view_dir: Vec3,
    ) -> Vec3 {
        let mut final_color =
            self.ambient_light * material.diffuse_color * material.ambient_strength;

        for light in lights {
            let (light_dir, attenuation) = match light.kind {
                LightKind::Point { position: light_pos } => {
                    let light_vec = light_pos - position;
                    let distance = light_vec.magnitude();
                    let attenuation =
                        1.0 / (1.0 + 0.1 * distance + 0.01 * distance * distance);
                    (light_vec.normalize(), attenuation)
                }
                LightKind::Directional { direction } => (-direction, 1.0),
            };

            // Diffuse term, Lambert's cosine law clamped at zero.
            let diffuse_intensity = normal.dot(light_dir).max(0.0);
            let diffuse = material.diffuse_color * light.color * diffuse_intensity;

            // Specular term: reflect the incident ray about the normal and
            // compare against the view direction.
            let reflect_dir = (-light_dir).reflect(normal);
            let specular_intensity = view_dir.dot(reflect_dir).max(0.0).powf(material.shininess);
            let specular = material.specular_color * light.color * specular_intensity;

            final_color =
                final_color + (diffuse + specular) * (light.intensity * attenuation);
        }

        final_color
    }

    // =========================================================================
    // Rasterization primitives
    // =========================================================================

    /// Draws a line between two screen-space points with Bresenham's
    /// integer algorithm.
    ///
    /// Every pixel uses the first endpoint's depth; depth is not
    /// interpolated along the line. Good enough for wireframe edges, where
    /// both endpoints sit on the same triangle.
    pub fn draw_line(&mut self, p1: Vec3, p2: Vec3, color: Vec3) {
        let (mut x1, mut y1) = (p1.x as i32, p1.y as i32);
        let (x2, y2) = (p2.x as i32, p2.y as i32);

        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.framebuffer.set_pixel(x1, y1, color, p1.z);

            if x1 == x2 && y1 == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x1 += sx;
            }
            if e2 < dx {
                err += dx;
                y1 += sy;
            }
        }
    }

    /// Fills a screen-space triangle with one flat-shaded color.
    ///
    /// Lighting is evaluated once at the centroid, then the bounding box is
    /// scanned and each pixel is tested with barycentric coordinates.
    /// Pixels exactly on an edge satisfy the inclusive `u + v <= 1` rule,
    /// so an edge shared by two triangles may be shaded by both; the strict
    /// depth test then keeps whichever landed first.
    fn draw_triangle_flat(
        &mut self,
        positions: [Vec3; 3],
        face_normal: Vec3,
        material: &Material,
        lights: &[Light],
        view_dir: Vec3,
    ) {
        let center = (positions[0] + positions[1] + positions[2]) / 3.0;
        let color = self.calculate_lighting(center, face_normal, material, lights, view_dir);

        // Sort by ascending y for the scan order. Tie order is irrelevant
        // with a single flat color and one depth plane.
        let mut points = positions;
        points.sort_by(|a, b| a.y.total_cmp(&b.y));

        let y_min = (points[0].y as i32).max(0);
        let y_max = (points[2].y as i32).min(self.framebuffer.height() as i32 - 1);
        let x_min = (points[0].x.min(points[1].x).min(points[2].x) as i32).max(0);
        let x_max = (points[0].x.max(points[1].x).max(points[2].x) as i32)
            .min(self.framebuffer.width() as i32 - 1);

        // Barycentric setup: u runs toward points[2], v toward points[1].
        let v0 = points[2] - points[0];
        let v1 = points[1] - points[0];
        let dot00 = v0.dot(v0);
        let dot01 = v0.dot(v1);
        let dot11 = v1.dot(v1);
        let inv_denom = 1.0 / (dot00 * dot11 - dot01 * dot01);

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let v2 = Vec3::new(x as f32, y as f32, 0.0) - points[0];
                let dot02 = v0.dot(v2);
                let dot12 = v1.dot(v2);

                let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
                let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

                // Inside test; a degenerate triangle makes u and v NaN,
                // which fails the comparisons and draws nothing.
                if u >= 0.0 && v >= 0.0 && u + v <= 1.0 {
                    let z = points[0].z
                        + u * (points[2].z - points[0].z)
                        + v * (points[1].z - points[0].z);
                    self.framebuffer.set_pixel(x, y, color, z);
                }
            }
        }
    }

    // =========================================================================
    // Mesh pipeline
    // =========================================================================

    /// Renders one mesh into the framebuffer.
    ///
    /// Each vertex goes through model, view, and projection transforms; the
    /// perspective divide maps clip space onto pixels, with y flipped so
    /// image rows grow downward. A vertex with a zero clip-space z keeps
    /// its untransformed position (degenerate case at the camera plane).
    /// Triangles whose screen-space winding faces away from the viewer are
    /// culled; the rest are drawn as wireframe edges or flat-shaded fills.
    ///
    /// Face normals are pushed through the forward model transform and
    /// renormalized; non-uniform scaling skews them (no inverse-transpose).
    pub fn render_mesh(
        &mut self,
        mesh: &Mesh,
        camera: &Camera,
        lights: &[Light],
        wireframe: bool,
    ) {
        let mvp = camera.projection_matrix() * camera.view_matrix() * mesh.transform;
        let width = self.framebuffer.width() as f32;
        let height = self.framebuffer.height() as f32;

        let screen_positions: Vec<Vec3> = mesh
            .vertices()
            .iter()
            .map(|vertex| {
                let clip = mvp.transform_point(vertex.position);
                if clip.z != 0.0 {
                    Vec3::new(
                        (clip.x / clip.z + 1.0) * width * 0.5,
                        (1.0 - clip.y / clip.z) * height * 0.5,
                        clip.z,
                    )
                } else {
                    vertex.position
                }
            })
            .collect();

        let view_dir = (camera.target() - camera.position()).normalize();
        let mut culled = 0usize;

        for triangle in mesh.triangles() {
            let p1 = screen_positions[triangle.v0];
            let p2 = screen_positions[triangle.v1];
            let p3 = screen_positions[triangle.v2];

            // Back-face culling in screen space: positive z means the
            // projected winding is clockwise, facing away from the viewer.
            let screen_normal = (p2 - p1).cross(p3 - p1);
            if screen_normal.z > 0.0 {
                culled += 1;
                continue;
            }

            if wireframe {
                self.draw_line(p1, p2, color::WIREFRAME);
                self.draw_line(p2, p3, color::WIREFRAME);
                self.draw_line(p3, p1, color::WIREFRAME);
            } else {
                let world_normal = mesh
                    .transform
                    .transform_direction(triangle.normal)
                    .normalize();
                self.draw_triangle_flat(
                    [p1, p2, p3],
                    world_normal,
                    &mesh.material,
                    lights,
                    view_dir,
                );
            }
        }

        log::debug!(
            "mesh rendered: {} triangles drawn, {} culled",
            mesh.triangles().len() - culled,
            culled
        );
    }

    // =========================================================================
    // Image output
    // =========================================================================

    /// Saves the framebuffer as a PPM file.
    ///
    /// Failure to write is reported on the log and otherwise ignored; a
    /// missed snapshot should not take down the render loop.
    pub fn save_image(&self, filename: &str) {
        match self.framebuffer.save_ppm(filename) {
            Ok(()) => log::info!("image saved as {filename}"),
            Err(err) => log::error!("could not write {filename}: {err}"),
        }
    }

    /// Saves the framebuffer as a PNG file, with the same
    /// report-and-continue contract as [`save_image`](Self::save_image).
    pub fn save_png(&self, filename: &str) {
        match self.framebuffer.save_png(filename) {
            Ok(()) => log::info!("image saved as {filename}"),
            Err(err) => log::error!("could not write {filename}: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::mat4::Mat4;
    use approx::assert_relative_eq;

    fn lit_pixel_count(fb: &Framebuffer, background: Vec3) -> usize {
        let bg = color::from_bytes(
            (background.x * 255.0) as u8,
            (background.y * 255.0) as u8,
            (background.z * 255.0) as u8,
        );
        let mut count = 0;
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if fb.get_pixel_color(x, y) != bg {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_ambient_only_without_lights() {
        let renderer = Renderer::new(16, 16);
        let material = Material::default();
        let color = renderer.calculate_lighting(
            Vec3::ZERO,
            Vec3::UP,
            &material,
            &[],
            Vec3::new(0.0, 0.0, 1.0),
        );

        let expected = renderer.ambient_light() * material.diffuse_color * material.ambient_strength;
        assert_relative_eq!(color.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(color.y, expected.y, epsilon = 1e-6);
        assert_relative_eq!(color.z, expected.z, epsilon = 1e-6);
    }

    #[test]
    fn test_directional_light_adds_lambert_diffuse() {
        let renderer = Renderer::new(16, 16);
        let material = Material::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, 32.0);
        // Light straight down onto an upward-facing surface: full diffuse.
        let lights = [Light::directional(Vec3::new(0.0, -1.0, 0.0), Vec3::ONE, 1.0)];

        let lit = renderer.calculate_lighting(
            Vec3::ZERO,
            Vec3::UP,
            &material,
            &lights,
            Vec3::new(0.0, 0.0, 1.0),
        );
        let ambient = renderer.calculate_lighting(
            Vec3::ZERO,
            Vec3::UP,
            &material,
            &[],
            Vec3::new(0.0, 0.0, 1.0),
        );

        assert_relative_eq!(lit.x - ambient.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_surface_facing_away_gets_no_diffuse() {
        let renderer = Renderer::new(16, 16);
        let material = Material::new(Vec3::ONE, Vec3::ZERO, 8.0);
        let lights = [Light::directional(Vec3::new(0.0, -1.0, 0.0), Vec3::ONE, 1.0)];

        // Normal points down, away from the light: only ambient survives.
        let lit = renderer.calculate_lighting(
            Vec3::ZERO,
            -Vec3::UP,
            &material,
            &lights,
            Vec3::new(0.0, 0.0, 1.0),
        );
        let ambient = renderer.calculate_lighting(
            Vec3::ZERO,
            -Vec3::UP,
            &material,
            &[],
            Vec3::new(0.0, 0.0, 1.0),
        );

        assert_relative_eq!(lit.x, ambient.x, epsilon = 1e-6);
    }

    #[test]
    fn test_point_light_attenuates_with_distance() {
        let renderer = Renderer::new(16, 16);
        let material = Material::new(Vec3::ONE, Vec3::ZERO, 8.0);

        let near = [Light::point(Vec3::new(0.0, 1.0, 0.0), Vec3::ONE, 1.0)];
        let far = [Light::point(Vec3::new(0.0, 10.0, 0.0), Vec3::ONE, 1.0)];

        let near_lit =
            renderer.calculate_lighting(Vec3::ZERO, Vec3::UP, &material, &near, Vec3::UP);
        let far_lit =
            renderer.calculate_lighting(Vec3::ZERO, Vec3::UP, &material, &far, Vec3::UP);

        assert!(near_lit.x > far_lit.x);
    }

    #[test]
    fn test_back_face_is_culled() {
        let mut renderer = Renderer::new(64, 64);
        renderer.clear(color::BACKGROUND);

        // Clockwise screen-space winding after projection: the cube face
        // away from the camera must leave the framebuffer untouched.
        let mut mesh = Mesh::new(Material::default());
        mesh.add_vertex(crate::mesh::Vertex::new(Vec3::new(-0.5, -0.5, 0.0)));
        mesh.add_vertex(crate::mesh::Vertex::new(Vec3::new(0.5, -0.5, 0.0)));
        mesh.add_vertex(crate::mesh::Vertex::new(Vec3::new(0.0, 0.5, 0.0)));
        // Winding reversed relative to the camera on +Z.
        mesh.add_triangle(0, 2, 1);

        let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO);
        renderer.render_mesh(&mesh, &camera, &[], false);

        assert_eq!(lit_pixel_count(renderer.framebuffer(), color::BACKGROUND), 0);
    }

    #[test]
    fn test_front_face_is_drawn() {
        let mut renderer = Renderer::new(64, 64);
        renderer.clear(color::BACKGROUND);

        let mut mesh = Mesh::new(Material::default());
        mesh.add_vertex(crate::mesh::Vertex::new(Vec3::new(-0.5, -0.5, 0.0)));
        mesh.add_vertex(crate::mesh::Vertex::new(Vec3::new(0.5, -0.5, 0.0)));
        mesh.add_vertex(crate::mesh::Vertex::new(Vec3::new(0.0, 0.5, 0.0)));
        mesh.add_triangle(0, 1, 2);

        let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO);
        let lights = [Light::point(Vec3::new(3.0, 4.0, 2.0), Vec3::ONE, 1.0)];
        renderer.render_mesh(&mesh, &camera, &lights, false);

        assert!(lit_pixel_count(renderer.framebuffer(), color::BACKGROUND) > 0);
    }

    #[test]
    fn test_wireframe_and_solid_differ() {
        let camera = Camera::new(Vec3::new(5.0, 3.0, 5.0), Vec3::ZERO);
        let lights = [Light::point(Vec3::new(3.0, 4.0, 2.0), Vec3::ONE, 1.0)];
        let cube = Mesh::cube(1.0, Material::default());

        let mut solid = Renderer::new(128, 96);
        solid.clear(color::BACKGROUND);
        solid.render_mesh(&cube, &camera, &lights, false);

        let mut wire = Renderer::new(128, 96);
        wire.clear(color::BACKGROUND);
        wire.render_mesh(&cube, &camera, &lights, true);

        let solid_lit = lit_pixel_count(solid.framebuffer(), color::BACKGROUND);
        let wire_lit = lit_pixel_count(wire.framebuffer(), color::BACKGROUND);

        assert!(solid_lit > wire_lit);
        assert!(wire_lit > 0);
    }

    #[test]
    fn test_nearer_mesh_occludes_farther_one() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let lights = [Light::directional(Vec3::new(0.0, 0.0, -1.0), Vec3::ONE, 1.0)];

        let red = Material::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, 8.0);
        let blue = Material::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, 8.0);

        let near_cube = Mesh::cube(1.0, red);
        let mut far_cube = Mesh::cube(1.0, blue);
        far_cube.transform = Mat4::translation(0.0, 0.0, -2.0);

        // Draw far first, then near; then the other order. Center pixel
        // must be red both times.
        let center = (64, 48);
        for order in [[&far_cube, &near_cube], [&near_cube, &far_cube]] {
            let mut renderer = Renderer::new(128, 96);
            renderer.clear(color::BACKGROUND);
            for mesh in order {
                renderer.render_mesh(mesh, &camera, &lights, false);
            }
            let pixel = renderer.framebuffer().get_pixel_color(center.0, center.1);
            assert!(
                pixel.x > pixel.z,
                "expected the near red cube to win the depth test"
            );
        }
    }
}
