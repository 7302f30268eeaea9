//! Babylon JSON scene loading.
//!
//! Only the parts of the format the renderer uses are read:
//!
//! ```text
//! { "meshes": [ { "name": "Cube",
//!                 "position": [x, y, z],
//!                 "uvCount": 0 | 1 | 2,
//!                 "vertices": [px, py, pz, nx, ny, nz, (u, v)*uvCount, ...],
//!                 "indices": [a, b, c, ...] } ] }
//! ```
//!
//! All index validation happens here so that rendering can trust its input.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::math::Vec3;
use crate::mesh::{Face, Mesh, MeshError, Vertex, MAX_VERTICES};

/// Floats per vertex before any texture coordinates: position then normal.
const BASE_VERTEX_STRIDE: usize = 6;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("mesh '{mesh}' has uvCount {uv_count}, only 0, 1 or 2 are supported")]
    UnsupportedUvCount { mesh: String, uv_count: u32 },

    #[error("mesh '{mesh}' position has {len} components, expected 3")]
    BadPosition { mesh: String, len: usize },

    #[error("mesh '{mesh}' is invalid")]
    Mesh {
        mesh: String,
        #[source]
        source: MeshError,
    },
}

#[derive(Debug, Deserialize)]
struct SceneFile {
    meshes: Vec<MeshRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeshRecord {
    #[serde(default)]
    name: Option<String>,
    position: Vec<f32>,
    uv_count: u32,
    vertices: Vec<f32>,
    indices: Vec<u32>,
}

/// Reads and parses a Babylon scene file.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Vec<Mesh>, SceneError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let meshes = parse_scene(&json)?;
    info!("Loaded {} mesh(es) from {}", meshes.len(), path.display());
    Ok(meshes)
}

/// Parses a Babylon scene from a JSON string.
pub fn parse_scene(json: &str) -> Result<Vec<Mesh>, SceneError> {
    let scene: SceneFile = serde_json::from_str(json)?;

    scene
        .meshes
        .into_iter()
        .enumerate()
        .map(|(index, record)| build_mesh(index, record))
        .collect()
}

fn build_mesh(index: usize, record: MeshRecord) -> Result<Mesh, SceneError> {
    let name = record.name.unwrap_or_else(|| format!("mesh{index}"));

    let stride = match record.uv_count {
        0 => BASE_VERTEX_STRIDE,
        1 => BASE_VERTEX_STRIDE + 2,
        2 => BASE_VERTEX_STRIDE + 4,
        uv_count => {
            return Err(SceneError::UnsupportedUvCount {
                mesh: name,
                uv_count,
            })
        }
    };

    let position = Vec3::from_slice(&record.position).ok_or_else(|| SceneError::BadPosition {
        mesh: name.clone(),
        len: record.position.len(),
    })?;

    if record.vertices.len() % stride != 0 {
        warn!(
            "Mesh '{name}': {} trailing vertex floats ignored",
            record.vertices.len() % stride
        );
    }
    if record.indices.len() % 3 != 0 {
        warn!(
            "Mesh '{name}': {} trailing indices ignored",
            record.indices.len() % 3
        );
    }

    let vertices: Vec<Vertex> = record
        .vertices
        .chunks_exact(stride)
        .map(|v| Vertex::new(Vec3::new(v[0], v[1], v[2]), Vec3::new(v[3], v[4], v[5])))
        .collect();

    let mesh_error = |source| SceneError::Mesh {
        mesh: name.clone(),
        source,
    };

    if vertices.len() > MAX_VERTICES {
        return Err(mesh_error(MeshError::TooManyVertices {
            count: vertices.len(),
        }));
    }

    let vertex_count = vertices.len();
    let faces = record
        .indices
        .chunks_exact(3)
        .enumerate()
        .map(|(face, abc)| {
            let narrow = |index: u32| {
                u16::try_from(index)
                    .ok()
                    .filter(|&i| (i as usize) < vertex_count)
                    .ok_or(MeshError::IndexOutOfRange {
                        face,
                        index: index as usize,
                        vertex_count,
                    })
            };
            Ok(Face::new(narrow(abc[0])?, narrow(abc[1])?, narrow(abc[2])?))
        })
        .collect::<Result<Vec<_>, MeshError>>()
        .map_err(mesh_error)?;

    debug!(
        "Mesh '{name}': {} vertices, {} faces, stride {stride}, at {:?}",
        vertices.len(),
        faces.len(),
        position
    );

    Mesh::new(name.clone(), vertices, faces, position).map_err(mesh_error)
}
