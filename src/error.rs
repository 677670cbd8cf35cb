use thiserror::Error;

/// Errors raised at the argument-validation boundary of the crate.
///
/// Geometric degeneracies (zero-length edges, zero-area faces) are not
/// errors; they are absorbed locally with zero-valued results so that a
/// modifier pipeline does not abort over a transient degenerate state.
/// Non-manifold topology is likewise not detected here; see
/// [`check`](crate::check) for the opt-in validation pass.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A face was constructed with fewer than three vertex indices.
    #[error("face needs at least 3 vertex indices, got {got}")]
    EmptyFace { got: usize },

    /// A face references a vertex index outside the mesh's vertex list.
    #[error("vertex index {index} out of range (mesh has {vertex_count} vertices)")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// A face index does not name a face of the mesh.
    #[error("face index {face} out of range (mesh has {face_count} faces)")]
    FaceOutOfRange { face: usize, face_count: usize },

    /// The UV index list of a face does not match its vertex index list.
    #[error("face has {indices} vertex indices but {uvs} uv indices")]
    MismatchedUvCount { indices: usize, uvs: usize },
}
