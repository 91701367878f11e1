//! Scene graph: meshes, lights, and the camera that views them.

use crate::camera::Camera;
use crate::color;
use crate::light::Light;
use crate::material::Material;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::render::renderer::Renderer;

/// A complete renderable scene.
///
/// Owns its meshes and lights by value; a frame is rendered by clearing the
/// renderer to the background color and drawing each mesh in insertion
/// order (the depth test resolves visibility, so order does not matter for
/// solid shading).
#[derive(Debug, Clone)]
pub struct Scene {
    meshes: Vec<Mesh>,
    lights: Vec<Light>,
    pub camera: Camera,
    pub background: Vec3,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl Scene {
    /// Creates an empty scene viewed through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            meshes: Vec::new(),
            lights: Vec::new(),
            camera,
            background: color::BACKGROUND,
        }
    }

    /// Builds the demo scene: three primitives on a ground plane under a
    /// white point light and a blue directional fill light.
    pub fn demo() -> Self {
        let mut scene = Scene::new(Camera::new(Vec3::new(5.0, 3.0, 5.0), Vec3::ZERO));

        let red_shiny = Material::new(Vec3::new(0.8, 0.2, 0.2), Vec3::ONE, 64.0);
        let blue = Material::new(Vec3::new(0.2, 0.2, 0.8), Vec3::ONE, 32.0);
        let green_matte = Material::new(Vec3::new(0.2, 0.8, 0.2), Vec3::ONE, 16.0);
        let gray_metal = Material::new(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(0.8, 0.8, 0.8),
            128.0,
        );

        let mut cube = Mesh::cube(1.0, red_shiny);
        cube.transform = Mat4::translation(-2.0, 0.0, 0.0);
        scene.add_mesh(cube);

        let mut sphere = Mesh::sphere(1.0, 20, blue);
        sphere.transform = Mat4::translation(0.0, 1.0, 0.0);
        scene.add_mesh(sphere);

        let mut ground = Mesh::plane(10.0, gray_metal);
        ground.transform = Mat4::translation(0.0, -1.0, 0.0);
        scene.add_mesh(ground);

        let mut accent = Mesh::sphere(0.5, 16, green_matte);
        accent.transform = Mat4::translation(2.0, 0.5, -1.0);
        scene.add_mesh(accent);

        scene.add_light(Light::point(Vec3::new(3.0, 4.0, 2.0), Vec3::ONE, 1.0));
        scene.add_light(Light::directional(
            Vec3::new(-0.5, -1.0, -0.3),
            Vec3::new(0.3, 0.3, 0.5),
            0.5,
        ));

        scene
    }

    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Mutable access to the meshes, for per-frame transform updates.
    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        &mut self.meshes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Renders one frame into `renderer`, solid or wireframe.
    pub fn render(&self, renderer: &mut Renderer, wireframe: bool) {
        renderer.clear(self.background);
        for mesh in &self.meshes {
            renderer.render_mesh(mesh, &self.camera, &self.lights, wireframe);
        }
    }

    /// Removes every mesh and light; the camera and background stay.
    pub fn clear(&mut self) {
        self.meshes.clear();
        self.lights.clear();
    }
}
