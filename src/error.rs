//! Error types for spawncore.
//!
//! Shape sampling itself never fails: degenerate parameters (zero radius,
//! thickness outside `[0, 1]`) are clamped and produce degenerate but
//! deterministic output. Errors only arise when a mesh emitter shape is
//! built from mesh data that is missing a required vertex attribute or
//! carries inconsistent buffers, and they surface at construction time,
//! never during `spawn`.

use std::fmt;

/// Errors that can occur while building a mesh emitter shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// The mesh has no vertices.
    EmptyMesh,
    /// The normal buffer length does not match the position buffer length.
    NormalCountMismatch {
        /// Number of vertex positions.
        expected: usize,
        /// Number of normals actually present.
        actual: usize,
    },
    /// Skinned emission requires a blend-index vertex attribute.
    MissingBoneIndices,
    /// Skinned emission requires a blend-weight vertex attribute.
    MissingBoneWeights,
    /// A blend attribute buffer length does not match the position buffer length.
    BoneAttributeCountMismatch {
        /// Number of vertex positions.
        expected: usize,
        /// Number of blend attribute entries actually present.
        actual: usize,
    },
    /// A triangle index points past the end of the vertex buffer.
    IndexOutOfRange {
        /// The offending index value.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
    /// Triangle or edge emission requires a non-empty triangle list.
    NoTriangles,
    /// Every triangle (or edge) has zero measure; no sampling table could be built.
    DegenerateGeometry,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::EmptyMesh => write!(f, "Mesh has no vertices"),
            ShapeError::NormalCountMismatch { expected, actual } => {
                write!(f, "Mesh has {} positions but {} normals", expected, actual)
            }
            ShapeError::MissingBoneIndices => {
                write!(f, "Skinned mesh emission requires a blend-index attribute")
            }
            ShapeError::MissingBoneWeights => {
                write!(f, "Skinned mesh emission requires a blend-weight attribute")
            }
            ShapeError::BoneAttributeCountMismatch { expected, actual } => write!(
                f,
                "Mesh has {} positions but {} blend attribute entries",
                expected, actual
            ),
            ShapeError::IndexOutOfRange {
                index,
                vertex_count,
            } => write!(
                f,
                "Triangle index {} is out of range for {} vertices",
                index, vertex_count
            ),
            ShapeError::NoTriangles => {
                write!(f, "Triangle or edge emission requires a triangle list")
            }
            ShapeError::DegenerateGeometry => {
                write!(f, "Mesh geometry is fully degenerate; nothing to sample")
            }
        }
    }
}

impl std::error::Error for ShapeError {}
