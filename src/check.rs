/*!
Opt-in structural validation.

The core tolerates non-manifold input silently (the traversal maps keep
whichever registration came last); generator pipelines routinely pass
through transient non-manifold states, so nothing in the hot path rejects
them. These checks are the explicit, callable form of the invariants for
callers that want to validate a finished mesh.
*/

use crate::{error::Error, mesh::Mesh, traverse::Edge};
use hashbrown::HashMap;

/// Verify that every face index is in `[0, vertex_count)`.
pub fn check_indices(mesh: &Mesh) -> Result<(), Error> {
    for face in mesh.faces() {
        mesh.check_indices(face.indices())?;
    }
    Ok(())
}

/// Count undirected edges, each shared edge counted once.
pub fn count_edges(mesh: &Mesh) -> usize {
    let mut edges: HashMap<(u32, u32), usize> = HashMap::new();
    for face in mesh.faces() {
        for (a, b) in face.edges() {
            *edges.entry(Edge::new(a, b).undirected()).or_insert(0) += 1;
        }
    }
    edges.len()
}

/// The Euler characteristic `V - E + F`, with E counted undirected.
///
/// Equals 2 for a closed genus-0 manifold, and 2 per component for a
/// disjoint union of such shells.
pub fn euler_characteristic(mesh: &Mesh) -> i64 {
    mesh.vertex_count() as i64 - count_edges(mesh) as i64 + mesh.face_count() as i64
}

/// Whether every undirected edge is shared by exactly two faces that
/// reference it in opposite directions (watertight, consistently wound).
pub fn is_manifold(mesh: &Mesh) -> bool {
    // Per undirected edge: count of uses, and the direction balance. A
    // manifold edge has two uses that cancel.
    let mut edges: HashMap<(u32, u32), (usize, i64)> = HashMap::new();
    for face in mesh.faces() {
        for (a, b) in face.edges() {
            if a == b {
                return false;
            }
            let entry = edges.entry(Edge::new(a, b).undirected()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += if a < b { 1 } else { -1 };
        }
    }
    edges.values().all(|&(count, balance)| count == 2 && balance == 0)
}

/// Find faces referencing the same vertex set as an earlier face,
/// regardless of ring order. Returns `(earlier, duplicate)` index pairs in
/// mesh order, using one canonical sorted-key map over the faces.
pub fn duplicate_faces(mesh: &Mesh) -> Vec<(usize, usize)> {
    let mut first: HashMap<Vec<u32>, usize> = HashMap::with_capacity(mesh.face_count());
    let mut pairs = Vec::new();
    for (fi, face) in mesh.faces().iter().enumerate() {
        match first.entry(face.sorted_indices()) {
            hashbrown::hash_map::Entry::Occupied(e) => pairs.push((*e.get(), fi)),
            hashbrown::hash_map::Entry::Vacant(e) => {
                e.insert(fi);
            }
        }
    }
    pairs
}
