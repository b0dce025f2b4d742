//! Platform-independent mesh data.

use glam::Vec3;
use serde::Serialize;

use crate::error::{Error, Result};

/// A model-space position, platform scale and axis signs already applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl From<Vec3> for Vertex {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// A vertex normal as stored in the asset (not re-normalized).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct VertexNormal {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl VertexNormal {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A texture coordinate. `v` is already flipped (`1 - v_raw`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct VertexTexture {
    pub u: f32,
    pub v: f32,
}

impl VertexTexture {
    /// Build from raw values, flipping `v`.
    pub fn from_raw(u: f32, v_raw: f32) -> Self {
        Self { u, v: 1.0 - v_raw }
    }
}

/// A triangle of 1-based indices into the vertex, normal and UV arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PolygonalFace {
    pub i1: u32,
    pub i2: u32,
    pub i3: u32,
}

impl PolygonalFace {
    pub fn new(i1: u32, i2: u32, i3: u32) -> Self {
        Self { i1, i2, i3 }
    }
}

/// Axis-aligned bounds of a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// A decoded model.
///
/// Attribute arrays are positionally aligned: element `i` of each array is
/// referenced by face index `i + 1`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    normals: Option<Vec<VertexNormal>>,
    uvs: Vec<VertexTexture>,
    faces: Vec<PolygonalFace>,
}

impl Mesh {
    /// Assemble a mesh. `normals` is `None` when the platform has no usable normals.
    pub(crate) fn new(
        vertices: Vec<Vertex>,
        normals: Option<Vec<VertexNormal>>,
        uvs: Vec<VertexTexture>,
        faces: Vec<PolygonalFace>,
    ) -> Self {
        Self {
            vertices,
            normals,
            uvs,
            faces,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex normals.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedFeature`] when the source platform's normal
    /// encoding is not decoded.
    pub fn normals(&self) -> Result<&[VertexNormal]> {
        self.normals.as_deref().ok_or_else(|| {
            Error::UnsupportedFeature("normals are not decoded for this platform".to_string())
        })
    }

    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    pub fn uvs(&self) -> &[VertexTexture] {
        &self.uvs
    }

    pub fn faces(&self) -> &[PolygonalFace] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Bounding box of all vertices, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.vertices.first()?.to_vec3();
        let (min, max) = self
            .vertices
            .iter()
            .map(|v| v.to_vec3())
            .fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Bounds { min, max })
    }

    /// Take the arrays out of the mesh.
    pub fn into_parts(
        self,
    ) -> (
        Vec<Vertex>,
        Option<Vec<VertexNormal>>,
        Vec<VertexTexture>,
        Vec<PolygonalFace>,
    ) {
        (self.vertices, self.normals, self.uvs, self.faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_flip() {
        let uv = VertexTexture::from_raw(0.25, 0.75);
        assert_eq!(uv, VertexTexture { u: 0.25, v: 0.25 });
    }

    #[test]
    fn test_bounds() {
        let mesh = Mesh::new(
            vec![
                Vertex::new(1.0, -2.0, 0.5),
                Vertex::new(-1.0, 3.0, 0.0),
            ],
            None,
            Vec::new(),
            Vec::new(),
        );
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 3.0, 0.5));
        assert_eq!(bounds.size(), Vec3::new(2.0, 5.0, 0.5));
        assert!(Mesh::default().bounds().is_none());
    }

    #[test]
    fn test_into_parts() {
        let mesh = Mesh::new(
            vec![Vertex::new(0.0, 0.0, 0.0); 3],
            Some(vec![VertexNormal::new(0.0, 1.0, 0.0); 3]),
            vec![VertexTexture::from_raw(0.5, 0.5); 3],
            vec![PolygonalFace::new(1, 2, 3)],
        );
        let (vertices, normals, uvs, faces) = mesh.into_parts();
        assert_eq!(vertices.len(), 3);
        assert_eq!(normals.as_ref().map(Vec::len), Some(3));
        assert_eq!(uvs[2], VertexTexture { u: 0.5, v: 0.5 });
        assert_eq!(faces, vec![PolygonalFace::new(1, 2, 3)]);
    }

    #[test]
    fn test_missing_normals() {
        let mesh = Mesh::new(Vec::new(), None, Vec::new(), Vec::new());
        assert!(!mesh.has_normals());
        assert!(matches!(mesh.normals(), Err(Error::UnsupportedFeature(_))));
    }
}
