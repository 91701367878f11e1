//! Triangle mesh storage and construction.
//!
//! A mesh is a flat arena of vertices plus index triples referencing them.
//! Shared vertices are stored once; triangles address them by index, which
//! keeps cube corners and sphere grid points from being duplicated per face.
//!
//! Meshes come from three places: the primitive factories ([`Mesh::cube`],
//! [`Mesh::sphere`], [`Mesh::plane`]), manual assembly via
//! [`Mesh::add_vertex`] / [`Mesh::add_triangle`], and OBJ files via
//! [`Mesh::from_obj`].

use std::path::Path;

use thiserror::Error;

use crate::material::Material;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// A single point of a mesh: position, surface normal, and vertex color.
///
/// The normal may stay zero until [`Mesh::calculate_vertex_normals`] runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: Vec3,
}

impl Vertex {
    /// Creates a vertex at `position` with a zero normal and white color.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::ZERO,
            color: Vec3::ONE,
        }
    }

    /// Creates a vertex with an explicit normal (for analytic normals, as in
    /// the sphere and plane factories).
    pub fn with_normal(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            color: Vec3::ONE,
        }
    }
}

/// Three vertex indices plus the face normal derived from their winding.
///
/// Counter-clockwise winding yields the stored normal via
/// `normalize((p1 - p0) x (p2 - p0))`. Degenerate (zero-area) faces get a
/// zero normal and simply contribute no lighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleFace {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
    pub normal: Vec3,
}

/// Errors surfaced while loading a mesh from an OBJ file.
#[derive(Error, Debug)]
pub enum MeshLoadError {
    #[error("failed to load OBJ file: {0}")]
    Load(#[from] tobj::LoadError),
    #[error("face references vertex {index} but only {vertex_count} vertices exist")]
    IndexOutOfRange { index: usize, vertex_count: usize },
    #[error("OBJ file contains no geometry")]
    Empty,
}

/// A triangle mesh with a material and a model-to-world transform.
///
/// Vertices and triangles are append-only through the checked `add_*`
/// methods, so every stored index is in range by construction. The
/// `transform` and `material` fields are free to change between frames;
/// topology is expected to stay fixed once rendering begins.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    triangles: Vec<TriangleFace>,
    pub material: Material,
    pub transform: Mat4,
}

impl Mesh {
    /// Creates an empty mesh with the given material and identity transform.
    pub fn new(material: Material) -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            material,
            transform: Mat4::identity(),
        }
    }

    /// Appends a vertex and returns its index for use in [`add_triangle`](Self::add_triangle).
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Appends a triangle referencing three existing vertices and computes
    /// its face normal from the winding order.
    ///
    /// # Panics
    /// Panics if any index does not refer to an already-added vertex. An
    /// invalid index would otherwise corrupt rendering far from the call
    /// site, so construction is where it fails.
    pub fn add_triangle(&mut self, v0: usize, v1: usize, v2: usize) {
        let vertex_count = self.vertices.len();
        assert!(
            v0 < vertex_count && v1 < vertex_count && v2 < vertex_count,
            "triangle indices ({v0}, {v1}, {v2}) out of range for {vertex_count} vertices"
        );

        let edge1 = self.vertices[v1].position - self.vertices[v0].position;
        let edge2 = self.vertices[v2].position - self.vertices[v0].position;
        let normal = edge1.cross(edge2).normalize();

        self.triangles.push(TriangleFace { v0, v1, v2, normal });
    }

    /// Recomputes smooth per-vertex normals by averaging adjacent face
    /// normals.
    ///
    /// Every vertex normal is zeroed, each face normal is accumulated into
    /// its three corners unweighted, and the sums are renormalized.
    /// Degenerate faces carry a zero normal and contribute nothing; a vertex
    /// referenced by no triangle keeps a zero normal.
    pub fn calculate_vertex_normals(&mut self) {
        for vertex in &mut self.vertices {
            vertex.normal = Vec3::ZERO;
        }

        for triangle in &self.triangles {
            self.vertices[triangle.v0].normal = self.vertices[triangle.v0].normal + triangle.normal;
            self.vertices[triangle.v1].normal = self.vertices[triangle.v1].normal + triangle.normal;
            self.vertices[triangle.v2].normal = self.vertices[triangle.v2].normal + triangle.normal;
        }

        for vertex in &mut self.vertices {
            vertex.normal = vertex.normal.normalize();
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[TriangleFace] {
        &self.triangles
    }

    // =========================================================================
    // Primitive factories
    // =========================================================================

    /// Creates a cube of the given edge length centered at the origin, with
    /// smooth vertex normals.
    pub fn cube(size: f32, material: Material) -> Self {
        let mut cube = Mesh::new(material);
        let half = size * 0.5;

        let positions = [
            Vec3::new(-half, -half, -half),
            Vec3::new(half, -half, -half),
            Vec3::new(half, half, -half),
            Vec3::new(-half, half, -half),
            Vec3::new(-half, -half, half),
            Vec3::new(half, -half, half),
            Vec3::new(half, half, half),
            Vec3::new(-half, half, half),
        ];

        for position in positions {
            cube.add_vertex(Vertex::new(position));
        }

        // Two triangles per face
        let faces = [
            [0, 1, 2],
            [0, 2, 3], // front
            [5, 4, 7],
            [5, 7, 6], // back
            [4, 0, 3],
            [4, 3, 7], // left
            [1, 5, 6],
            [1, 6, 2], // right
            [3, 2, 6],
            [3, 6, 7], // top
            [4, 5, 1],
            [4, 1, 0], // bottom
        ];

        for [v0, v1, v2] in faces {
            cube.add_triangle(v0, v1, v2);
        }

        cube.calculate_vertex_normals();
        cube
    }

    /// Creates a sphere from a latitude/longitude grid.
    ///
    /// `segments` controls subdivision in both directions. Normals are
    /// analytic (normalized position), which is exact for a sphere and
    /// smoother than averaged face normals.
    pub fn sphere(radius: f32, segments: u32, material: Material) -> Self {
        let mut sphere = Mesh::new(material);

        for lat in 0..=segments {
            let theta = lat as f32 * std::f32::consts::PI / segments as f32;
            let sin_theta = theta.sin();
            let cos_theta = theta.cos();

            for lon in 0..=segments {
                let phi = lon as f32 * 2.0 * std::f32::consts::PI / segments as f32;
                let position = Vec3::new(
                    radius * sin_theta * phi.cos(),
                    radius * cos_theta,
                    radius * sin_theta * phi.sin(),
                );
                sphere.add_vertex(Vertex::with_normal(position, position.normalize()));
            }
        }

        // Each grid cell becomes two triangles. Rows are (segments + 1) wide
        // because the seam column is duplicated.
        for lat in 0..segments {
            for lon in 0..segments {
                let v0 = (lat * (segments + 1) + lon) as usize;
                let v1 = v0 + (segments + 1) as usize;
                let v2 = v0 + 1;
                let v3 = v1 + 1;

                sphere.add_triangle(v0, v1, v2);
                sphere.add_triangle(v2, v1, v3);
            }
        }

        sphere
    }

    /// Creates a flat square in the XZ plane with +Y vertex normals.
    pub fn plane(size: f32, material: Material) -> Self {
        let mut plane = Mesh::new(material);
        let half = size * 0.5;

        plane.add_vertex(Vertex::with_normal(Vec3::new(-half, 0.0, -half), Vec3::UP));
        plane.add_vertex(Vertex::with_normal(Vec3::new(half, 0.0, -half), Vec3::UP));
        plane.add_vertex(Vertex::with_normal(Vec3::new(half, 0.0, half), Vec3::UP));
        plane.add_vertex(Vertex::with_normal(Vec3::new(-half, 0.0, half), Vec3::UP));

        plane.add_triangle(0, 1, 2);
        plane.add_triangle(0, 2, 3);

        plane
    }

    // =========================================================================
    // OBJ loading
    // =========================================================================

    /// Loads a mesh from an OBJ file, merging all models into one mesh.
    ///
    /// Faces are triangulated at load time. If a material library is present
    /// the first material's diffuse/specular/shininess values are used;
    /// otherwise the default material applies. When any model lacks normals,
    /// smooth normals are recomputed for the whole mesh.
    pub fn from_obj(path: impl AsRef<Path>) -> Result<Self, MeshLoadError> {
        let path = path.as_ref();
        let (models, materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let materials = materials.unwrap_or_else(|err| {
            log::debug!("ignoring material library for {}: {err}", path.display());
            Vec::new()
        });
        let material = materials
            .first()
            .map(material_from_mtl)
            .unwrap_or_default();

        let mut mesh = Mesh::new(material);
        let mut has_normals = true;

        for model in &models {
            let data = &model.mesh;
            let base = mesh.vertices.len();

            if !data.positions.is_empty() && data.normals.len() == data.positions.len() {
                for (position, normal) in data
                    .positions
                    .chunks_exact(3)
                    .zip(data.normals.chunks_exact(3))
                {
                    mesh.add_vertex(Vertex::with_normal(
                        Vec3::new(position[0], position[1], position[2]),
                        Vec3::new(normal[0], normal[1], normal[2]),
                    ));
                }
            } else {
                has_normals = false;
                for position in data.positions.chunks_exact(3) {
                    mesh.add_vertex(Vertex::new(Vec3::new(
                        position[0],
                        position[1],
                        position[2],
                    )));
                }
            }

            let vertex_count = mesh.vertices.len();
            for face in data.indices.chunks_exact(3) {
                let indices = [
                    base + face[0] as usize,
                    base + face[1] as usize,
                    base + face[2] as usize,
                ];
                for index in indices {
                    if index >= vertex_count {
                        return Err(MeshLoadError::IndexOutOfRange {
                            index,
                            vertex_count,
                        });
                    }
                }
                mesh.add_triangle(indices[0], indices[1], indices[2]);
            }
        }

        if mesh.vertices.is_empty() {
            return Err(MeshLoadError::Empty);
        }
        if !has_normals {
            mesh.calculate_vertex_normals();
        }

        log::debug!(
            "loaded {}: {} vertices, {} triangles",
            path.display(),
            mesh.vertices.len(),
            mesh.triangles.len()
        );

        Ok(mesh)
    }
}

fn material_from_mtl(mtl: &tobj::Material) -> Material {
    let defaults = Material::default();
    Material::new(
        mtl.diffuse
            .map(|[r, g, b]| Vec3::new(r, g, b))
            .unwrap_or(defaults.diffuse_color),
        mtl.specular
            .map(|[r, g, b]| Vec3::new(r, g, b))
            .unwrap_or(defaults.specular_color),
        mtl.shininess
            .filter(|shininess| *shininess > 0.0)
            .unwrap_or(defaults.shininess),
    )
}
