use crate::{error::Error, geometry::Aabb};
use glam::{Vec3, Vec4};
use hashbrown::{HashMap, HashSet};

/// A polygonal face: an ordered ring of vertex indices, at least three of
/// them. The index order defines the winding, which decides the sign of the
/// computed normal.
///
/// Faces optionally carry a parallel ring of UV indices, a cached normal, a
/// color, and a free form tag that selection and modifier pipelines use to
/// mark provenance (e.g. faces created by a specific operation).
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    indices: Vec<u32>,
    uvs: Option<Vec<u32>>,
    /// Cached normal; zero until computed, and zero for degenerate faces.
    pub normal: Vec3,
    pub color: Vec4,
    pub tag: String,
}

impl Face {
    /// Create a face from a ring of vertex indices.
    ///
    /// The ring must have at least three entries. Whether the indices are in
    /// range is checked by the mesh the face is added to.
    pub fn new(indices: Vec<u32>) -> Result<Self, Error> {
        if indices.len() < 3 {
            return Err(Error::EmptyFace {
                got: indices.len(),
            });
        }
        Ok(Face {
            indices,
            uvs: None,
            normal: Vec3::ZERO,
            color: Vec4::ONE,
            tag: String::new(),
        })
    }

    /// Attach a parallel ring of UV indices. Its length must match the
    /// vertex index ring.
    pub fn with_uvs(mut self, uvs: Vec<u32>) -> Result<Self, Error> {
        if uvs.len() != self.indices.len() {
            return Err(Error::MismatchedUvCount {
                indices: self.indices.len(),
                uvs: uvs.len(),
            });
        }
        self.uvs = Some(uvs);
        Ok(self)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn uvs(&self) -> Option<&[u32]> {
        self.uvs.as_deref()
    }

    /// The number of vertices (and edges) of this face.
    pub fn valence(&self) -> usize {
        self.indices.len()
    }

    /// The directed edges of this face, in ring order, wrapping at the end.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.indices
            .iter()
            .zip(self.indices.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
    }

    pub(crate) fn indices_mut(&mut self) -> &mut Vec<u32> {
        &mut self.indices
    }

    /// Sorted copy of the index ring; the canonical key for detecting faces
    /// that reference the same vertex set regardless of order.
    pub(crate) fn sorted_indices(&self) -> Vec<u32> {
        let mut key = self.indices.clone();
        key.sort_unstable();
        key
    }
}

/// An indexed polygon mesh: an ordered list of vertex positions and an
/// ordered list of [`Face`]s.
///
/// The mesh exclusively owns its storage and maintains one invariant: every
/// face index is in `[0, vertex_count)`. All mutation goes through methods
/// that enforce this at the boundary. Derived views ([`TraverseHelper`]
/// (crate::TraverseHelper), [`FaceSelection`](crate::FaceSelection)) borrow
/// the mesh and must be rebuilt after any mutation.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Mesh::default()
    }

    pub fn with_capacity(nverts: usize, nfaces: usize) -> Self {
        Mesh {
            vertices: Vec::with_capacity(nverts),
            faces: Vec::with_capacity(nfaces),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    /// Vertex positions, indexed by the faces.
    pub fn positions(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Mutable vertex positions. Positions cannot violate the index
    /// invariant, so handing out the slice is safe.
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face(&self, face: usize) -> Result<&Face, Error> {
        self.faces.get(face).ok_or(Error::FaceOutOfRange {
            face,
            face_count: self.faces.len(),
        })
    }

    pub fn point(&self, index: u32) -> Result<Vec3, Error> {
        self.vertices
            .get(index as usize)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                vertex_count: self.vertices.len(),
            })
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, pos: Vec3) -> u32 {
        self.vertices.push(pos);
        (self.vertices.len() - 1) as u32
    }

    /// Add a face from a ring of vertex indices and return its index.
    pub fn add_face(&mut self, indices: &[u32]) -> Result<usize, Error> {
        self.push_face(Face::new(indices.to_vec())?)
    }

    pub fn add_tri(&mut self, a: u32, b: u32, c: u32) -> Result<usize, Error> {
        self.add_face(&[a, b, c])
    }

    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) -> Result<usize, Error> {
        self.add_face(&[a, b, c, d])
    }

    /// Add an already constructed face, validating its indices against the
    /// current vertex list.
    pub fn push_face(&mut self, face: Face) -> Result<usize, Error> {
        self.check_indices(face.indices())?;
        self.faces.push(face);
        Ok(self.faces.len() - 1)
    }

    /// Replace the index ring of an existing face, validated.
    pub fn set_face_indices(&mut self, face: usize, indices: Vec<u32>) -> Result<(), Error> {
        if indices.len() < 3 {
            return Err(Error::EmptyFace {
                got: indices.len(),
            });
        }
        self.check_indices(&indices)?;
        let face_count = self.faces.len();
        let f = self
            .faces
            .get_mut(face)
            .ok_or(Error::FaceOutOfRange { face, face_count })?;
        *f.indices_mut() = indices;
        f.uvs = None;
        Ok(())
    }

    /// Remove a face, shifting the faces after it down by one.
    pub fn remove_face(&mut self, face: usize) -> Result<Face, Error> {
        if face >= self.faces.len() {
            return Err(Error::FaceOutOfRange {
                face,
                face_count: self.faces.len(),
            });
        }
        Ok(self.faces.remove(face))
    }

    /// Append another mesh. Incoming face indices are re-based by the
    /// running vertex count, preserving their relative topology.
    pub fn append(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.reserve(other.faces.len());
        for face in &other.faces {
            let mut face = face.clone();
            for vi in face.indices_mut() {
                *vi += offset;
            }
            self.faces.push(face);
        }
    }

    /// Deep copy of vertices and faces.
    pub fn copy(&self) -> Mesh {
        self.clone()
    }

    /// Axis aligned bounds of the vertex positions. An empty mesh yields a
    /// degenerate zero box.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().copied())
    }

    /// Merge geometrically equal vertices and drop duplicate faces.
    ///
    /// Vertices comparing exactly equal are collapsed onto the first
    /// occurrence, every face ring is rewritten through that map, rings
    /// are stripped of the zero length edges the collapse can create,
    /// faces left referencing the same vertex set as an earlier face (or
    /// with fewer than three distinct vertices) are dropped, and vertices
    /// no longer referenced by any face are removed. With `decimals`,
    /// coordinates are first quantized to that many decimal places so the
    /// comparison tolerates floating point noise.
    ///
    /// Returns whether anything was merged or dropped. Calling this twice
    /// in a row leaves the second call with nothing to do.
    pub fn remove_doubles(&mut self, decimals: Option<u32>) -> bool {
        if let Some(d) = decimals {
            let scale = 10f32.powi(d as i32);
            for v in &mut self.vertices {
                *v = (*v * scale).round() / scale;
            }
        }
        // Canonical index per exact position.
        let mut canon: HashMap<[u32; 3], u32> = HashMap::with_capacity(self.vertices.len());
        let remap: Vec<u32> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, v)| *canon.entry(position_key(*v)).or_insert(i as u32))
            .collect();
        for face in &mut self.faces {
            let ring = face.indices_mut();
            for vi in ring.iter_mut() {
                *vi = remap[*vi as usize];
            }
            // Merging can leave the same vertex on both ends of a ring
            // edge; collapse those zero length edges.
            ring.dedup();
            while ring.len() > 1 && ring.first() == ring.last() {
                ring.pop();
            }
        }
        // Drop faces collapsed below a triangle, and faces that now
        // reference the same vertex set as an earlier face, regardless of
        // ring order.
        let faces_before = self.faces.len();
        let mut seen: HashSet<Vec<u32>> = HashSet::with_capacity(self.faces.len());
        self.faces
            .retain(|face| face.valence() >= 3 && seen.insert(face.sorted_indices()));
        // Compact away vertices no longer referenced by any face.
        let verts_before = self.vertices.len();
        let mut used = vec![false; self.vertices.len()];
        for face in &self.faces {
            for &vi in face.indices() {
                used[vi as usize] = true;
            }
        }
        let mut compact = vec![0u32; self.vertices.len()];
        let mut next = 0u32;
        for (i, flag) in used.iter().enumerate() {
            compact[i] = next;
            if *flag {
                let p = self.vertices[i];
                self.vertices[next as usize] = p;
                next += 1;
            }
        }
        self.vertices.truncate(next as usize);
        for face in &mut self.faces {
            for vi in face.indices_mut() {
                *vi = compact[*vi as usize];
            }
        }
        verts_before != self.vertices.len() || faces_before != self.faces.len()
    }

    pub(crate) fn check_indices(&self, ring: &[u32]) -> Result<(), Error> {
        let vertex_count = self.vertices.len();
        match ring.iter().find(|&&vi| vi as usize >= vertex_count) {
            Some(&index) => Err(Error::IndexOutOfRange {
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn faces_mut(&mut self) -> &mut Vec<Face> {
        &mut self.faces
    }
}

/// Bitwise position key, with the two zero signs collapsed so that `0.0`
/// and `-0.0` merge.
fn position_key(v: Vec3) -> [u32; 3] {
    let k = |x: f32| if x == 0.0 { 0f32.to_bits() } else { x.to_bits() };
    [k(v.x), k(v.y), k(v.z)]
}
