use crate::mesh::Mesh;
use hashbrown::HashMap;
use std::fmt::{Debug, Display};

/// A directed edge between two vertex indices. Used purely as a derived
/// key; edges are never stored on the mesh itself.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub from: u32,
    pub to: u32,
}

impl Edge {
    pub fn new(from: u32, to: u32) -> Self {
        Edge { from, to }
    }

    /// The twin of this edge: the same vertex pair, reversed. A pure
    /// reversal, independent of any mesh.
    pub fn pair(self) -> Edge {
        Edge {
            from: self.to,
            to: self.from,
        }
    }

    /// The vertex pair with the smaller index first; the canonical key for
    /// undirected edge maps shared between the two sides.
    pub fn undirected(self) -> (u32, u32) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Edge({} -> {})", self.from, self.to)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Edge({} -> {})", self.from, self.to)
    }
}

/// A derived adjacency index over a mesh snapshot, supporting halfedge
/// style traversal without a persistent halfedge structure.
///
/// Three maps are built by iterating every face: directed edge to its
/// owning face, directed edge to the next directed edge within the same
/// face (wrapping), and vertex to one of its outgoing edges (the last one
/// encountered during construction).
///
/// The helper borrows nothing; it is a value derived from the mesh at
/// construction time and becomes stale the instant the mesh's vertex or
/// face lists change. Rebuild it with [`TraverseHelper::rebuild`] after
/// any mutation.
///
/// If more than two faces share an edge (non-manifold input), the maps
/// silently keep only the last registered face and successor for that
/// edge. This is a documented limitation, not a detected error; see
/// [`check`](crate::check) for explicit validation.
#[derive(Debug, Default, Clone)]
pub struct TraverseHelper {
    edge_face: HashMap<Edge, usize>,
    edge_next: HashMap<Edge, Edge>,
    outgoing: HashMap<u32, Edge>,
}

impl TraverseHelper {
    pub fn new(mesh: &Mesh) -> Self {
        let mut helper = TraverseHelper::default();
        helper.rebuild(mesh);
        helper
    }

    /// Discard the maps. Required before reusing the helper across a mesh
    /// mutation mid-algorithm.
    pub fn clear(&mut self) {
        self.edge_face.clear();
        self.edge_next.clear();
        self.outgoing.clear();
    }

    /// Rebuild the maps from the current state of `mesh`.
    pub fn rebuild(&mut self, mesh: &Mesh) {
        self.clear();
        for (fi, face) in mesh.faces().iter().enumerate() {
            let ring = face.indices();
            let n = ring.len();
            for k in 0..n {
                let e = Edge::new(ring[k], ring[(k + 1) % n]);
                let next = Edge::new(ring[(k + 1) % n], ring[(k + 2) % n]);
                self.edge_face.insert(e, fi);
                self.edge_next.insert(e, next);
                // Last write wins on duplicates.
                self.outgoing.insert(e.from, e);
            }
        }
    }

    /// One outgoing edge of `vertex`, if any face uses it. The choice is
    /// arbitrary but stable: the last edge registered during construction.
    pub fn outgoing(&self, vertex: u32) -> Option<Edge> {
        self.outgoing.get(&vertex).copied()
    }

    /// The face owning the directed edge `(from, to)`.
    pub fn face_by_edge(&self, from: u32, to: u32) -> Option<usize> {
        self.edge_face.get(&Edge::new(from, to)).copied()
    }

    /// The face-local successor of the directed edge `(from, to)`.
    pub fn next(&self, from: u32, to: u32) -> Option<Edge> {
        self.edge_next.get(&Edge::new(from, to)).copied()
    }

    /// The twin of `(from, to)`. A pure reversal, no map lookup.
    pub fn pair(&self, from: u32, to: u32) -> Edge {
        Edge::new(from, to).pair()
    }

    /// The face-local successor of the twin of `(from, to)`: the step used
    /// to walk around a vertex fan. Absent at a mesh boundary.
    pub fn pair_next(&self, from: u32, to: u32) -> Option<Edge> {
        self.next(to, from)
    }

    /// Number of directed edges registered.
    pub fn edge_count(&self) -> usize {
        self.edge_face.len()
    }

    pub(crate) fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edge_face.keys().copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::primitive;

    #[test]
    fn t_pair_is_pure_reversal() {
        let helper = TraverseHelper::new(&Mesh::new());
        // Independent of mesh content.
        assert_eq!(Edge::new(7, 3), helper.pair(3, 7));
        assert_eq!(Edge::new(3, 7), helper.pair(3, 7).pair());
    }

    #[test]
    fn t_box_edge_face_symmetry() {
        let mesh = primitive::unit_box().expect("Cannot create box");
        let helper = TraverseHelper::new(&mesh);
        assert_eq!(24, helper.edge_count());
        for e in helper.edges() {
            let f = helper.face_by_edge(e.from, e.to).expect("Missing face");
            let g = helper
                .face_by_edge(e.to, e.from)
                .expect("Closed mesh must own both edge sides");
            assert_ne!(f, g, "The two sides of {e} must be distinct faces");
        }
    }

    #[test]
    fn t_next_wraps_around_face() {
        let mesh = primitive::unit_box().expect("Cannot create box");
        let helper = TraverseHelper::new(&mesh);
        for face in mesh.faces() {
            let ring = face.indices();
            let mut e = Edge::new(ring[0], ring[1]);
            for _ in 0..ring.len() {
                e = helper.next(e.from, e.to).expect("Missing successor");
            }
            assert_eq!(Edge::new(ring[0], ring[1]), e);
        }
    }

    #[test]
    fn t_outgoing_present_for_every_vertex() {
        let mesh = primitive::unit_box().expect("Cannot create box");
        let helper = TraverseHelper::new(&mesh);
        for vi in 0..mesh.vertex_count() as u32 {
            let e = helper.outgoing(vi).expect("Missing outgoing edge");
            assert_eq!(vi, e.from);
        }
    }

    #[test]
    fn t_pair_next_walks_vertex_fan() {
        let mesh = primitive::unit_box().expect("Cannot create box");
        let helper = TraverseHelper::new(&mesh);
        // Walking the fan from any outgoing edge of a box corner visits
        // exactly three edges before returning to the start.
        for vi in 0..8u32 {
            let start = helper.outgoing(vi).expect("Missing outgoing edge");
            let mut e = start;
            let mut count = 0;
            loop {
                e = helper.pair_next(e.from, e.to).expect("Fan hit a boundary");
                count += 1;
                if e == start {
                    break;
                }
            }
            assert_eq!(3, count);
        }
    }

    #[test]
    fn t_boundary_has_no_pair_face() {
        let mesh = primitive::quad_grid(1, 1).expect("Cannot create grid");
        let helper = TraverseHelper::new(&mesh);
        let ring: Vec<u32> = mesh.face(0).expect("No face").indices().to_vec();
        for (a, b) in [(ring[0], ring[1]), (ring[1], ring[2])] {
            assert!(helper.face_by_edge(a, b).is_some());
            assert_eq!(None, helper.face_by_edge(b, a));
            assert_eq!(None, helper.pair_next(a, b));
        }
    }

    #[test]
    fn t_rebuild_after_mutation() {
        let mut mesh = primitive::quad_grid(1, 1).expect("Cannot create grid");
        let mut helper = TraverseHelper::new(&mesh);
        assert_eq!(4, helper.edge_count());
        let other = primitive::quad_grid(1, 1).expect("Cannot create grid");
        mesh.append(&other);
        helper.rebuild(&mesh);
        assert_eq!(8, helper.edge_count());
    }
}
