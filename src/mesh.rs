//! Geometry model: vertices, triangular faces and meshes.

use thiserror::Error;

use crate::math::Vec3;
use crate::transform::Transform;

/// Faces index vertices with `u16`, which caps a mesh at this many vertices.
pub const MAX_VERTICES: usize = u16::MAX as usize;

/// Errors raised when assembling a mesh from external data.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("mesh has {count} vertices, at most 65535 can be indexed by 16-bit faces")]
    TooManyVertices { count: usize },

    #[error("face {face} references vertex {index}, but the mesh has only {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// A mesh vertex.
///
/// Source vertices only carry `coordinates` and `normal`. The projection
/// stage returns a new `Vertex` whose `coordinates` are in screen space and
/// whose `world_coordinates` hold the camera-space position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub coordinates: Vec3,
    pub world_coordinates: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(coordinates: Vec3, normal: Vec3) -> Self {
        Self {
            coordinates,
            world_coordinates: Vec3::ZERO,
            normal,
        }
    }
}

// The members a, b, and c are indices into the vertex array of the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: u16,
    pub b: u16,
    pub c: u16,
}

impl Face {
    pub const fn new(a: u16, b: u16, c: u16) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a as usize, self.b as usize, self.c as usize]
    }
}

/// A named triangle mesh with its own placement in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    name: String,
    transform: Transform,
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Builds a mesh, checking that every face index addresses a vertex.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vertex>,
        faces: Vec<Face>,
        position: Vec3,
    ) -> Result<Self, MeshError> {
        if vertices.len() > MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count: vertices.len(),
            });
        }

        for (face_index, face) in faces.iter().enumerate() {
            if let Some(&index) = face.indices().iter().find(|&&i| i >= vertices.len()) {
                return Err(MeshError::IndexOutOfRange {
                    face: face_index,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        Ok(Self {
            name: name.into(),
            transform: Transform::at(position),
            vertices,
            faces,
        })
    }

    /// An axis-aligned cube of edge length `size` centered on the origin.
    ///
    /// Each side has its own four vertices so that every vertex normal is
    /// the normal of the side it belongs to. Sides are split along the
    /// corner 1 to corner 3 diagonal; with the default camera the other
    /// diagonal leaves the front side's flat-topped half unfilled.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        // (normal, four corners counter-clockwise seen from outside)
        let sides: [(Vec3, [Vec3; 4]); 6] = [
            (
                Vec3::new(0.0, 0.0, 1.0),
                [
                    Vec3::new(-h, -h, h),
                    Vec3::new(h, -h, h),
                    Vec3::new(h, h, h),
                    Vec3::new(-h, h, h),
                ],
            ),
            (
                Vec3::new(0.0, 0.0, -1.0),
                [
                    Vec3::new(h, -h, -h),
                    Vec3::new(-h, -h, -h),
                    Vec3::new(-h, h, -h),
                    Vec3::new(h, h, -h),
                ],
            ),
            (
                Vec3::new(1.0, 0.0, 0.0),
                [
                    Vec3::new(h, -h, h),
                    Vec3::new(h, -h, -h),
                    Vec3::new(h, h, -h),
                    Vec3::new(h, h, h),
                ],
            ),
            (
                Vec3::new(-1.0, 0.0, 0.0),
                [
                    Vec3::new(-h, -h, -h),
                    Vec3::new(-h, -h, h),
                    Vec3::new(-h, h, h),
                    Vec3::new(-h, h, -h),
                ],
            ),
            (
                Vec3::new(0.0, 1.0, 0.0),
                [
                    Vec3::new(-h, h, h),
                    Vec3::new(h, h, h),
                    Vec3::new(h, h, -h),
                    Vec3::new(-h, h, -h),
                ],
            ),
            (
                Vec3::new(0.0, -1.0, 0.0),
                [
                    Vec3::new(-h, -h, -h),
                    Vec3::new(h, -h, -h),
                    Vec3::new(h, -h, h),
                    Vec3::new(-h, -h, h),
                ],
            ),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut faces = Vec::with_capacity(12);
        for (normal, corners) in sides {
            let base = vertices.len() as u16;
            vertices.extend(corners.iter().map(|&corner| Vertex::new(corner, normal)));
            faces.push(Face::new(base, base + 1, base + 3));
            faces.push(Face::new(base + 1, base + 2, base + 3));
        }

        Self {
            name: "Cube".to_string(),
            transform: Transform::default(),
            vertices,
            faces,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// The three vertices of `face`.
    ///
    /// # Panics
    /// Panics if an index is out of range, which `Mesh::new` rules out.
    #[inline]
    pub fn face_vertices(&self, face: &Face) -> [&Vertex; 3] {
        let [a, b, c] = face.indices();
        [&self.vertices[a], &self.vertices[b], &self.vertices[c]]
    }
}
