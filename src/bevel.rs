use crate::{
    error::Error,
    mesh::{Face, Mesh},
    modifier::Modifier,
    traverse::{Edge, TraverseHelper},
};
use hashbrown::HashMap;

/// Tag written onto the corner faces created by [`BevelVertices`].
pub const BEVEL_TAG: &str = "bevel";

/// Chamfer every vertex of the mesh.
///
/// For each face, every edge gets two new edge points, interpolated from
/// the edge endpoints toward each other by `amount`; the face is replaced
/// by the polygon through all of its edge points. For each original
/// vertex, the outgoing edge fan is walked with
/// [`pair_next`](TraverseHelper::pair_next) and the edge points around
/// the vertex are connected into a corner face closing the chamfer.
///
/// Edge points are created per directed edge, so the points of the two
/// sides of an edge coincide geometrically but are distinct vertices;
/// run [`Mesh::remove_doubles`] afterwards to weld them. Corner faces are
/// only emitted where the fan walk closes: at mesh boundaries the corner
/// stays open, and at non-manifold vertices the walk silently follows
/// whichever adjacency survived map construction (a documented
/// limitation of the traversal index).
#[derive(Debug, Copy, Clone)]
pub struct BevelVertices {
    /// Interpolation factor toward the far end of each edge, in `(0, 0.5)`
    /// for a geometrically sensible chamfer.
    pub amount: f32,
}

impl Modifier for BevelVertices {
    fn modify(&self, mesh: &mut Mesh) -> Result<(), Error> {
        let vertex_count = mesh.vertex_count() as u32;
        // Fan cycles around every vertex, collected before mutation.
        let fans: Vec<Vec<Edge>> = {
            let helper = TraverseHelper::new(mesh);
            let cap = helper.edge_count() + 1;
            (0..vertex_count)
                .map(|vi| closed_fan(&helper, vi, cap))
                .collect()
        };
        // The edge preceding each directed edge within its face.
        let mut prev: HashMap<Edge, Edge> = HashMap::new();
        for face in mesh.faces() {
            let ring = face.indices();
            let n = ring.len();
            for k in 0..n {
                prev.insert(
                    Edge::new(ring[k], ring[(k + 1) % n]),
                    Edge::new(ring[(k + n - 1) % n], ring[k]),
                );
            }
        }
        // Two edge points per directed edge: one near `from`, one near `to`.
        let mut edge_points: HashMap<Edge, (u32, u32)> = HashMap::new();
        let face_count = mesh.face_count();
        for fi in 0..face_count {
            let ring: Vec<u32> = mesh.faces()[fi].indices().to_vec();
            mesh.check_indices(&ring)?;
            let n = ring.len();
            for k in 0..n {
                let (a, b) = (ring[k], ring[(k + 1) % n]);
                let (pa, pb) = (mesh.positions()[a as usize], mesh.positions()[b as usize]);
                let near_a = mesh.add_vertex(pa.lerp(pb, self.amount));
                let near_b = mesh.add_vertex(pb.lerp(pa, self.amount));
                edge_points.insert(Edge::new(a, b), (near_a, near_b));
            }
        }
        // Replace each face with the polygon through its edge points.
        for fi in 0..face_count {
            let ring: Vec<u32> = mesh.faces()[fi].indices().to_vec();
            let n = ring.len();
            let mut shrunk = Vec::with_capacity(2 * n);
            for k in 0..n {
                let (na, nb) = edge_points[&Edge::new(ring[k], ring[(k + 1) % n])];
                shrunk.push(na);
                shrunk.push(nb);
            }
            mesh.set_face_indices(fi, shrunk)?;
        }
        // Close each chamfered corner with a face through the edge points
        // around the original vertex.
        for fan in fans.iter().filter(|fan| !fan.is_empty()) {
            let mut corner = Vec::with_capacity(2 * fan.len());
            for e in fan {
                corner.push(edge_points[&prev[e]].1);
                corner.push(edge_points[e].0);
            }
            // The fan walk runs clockwise around the vertex; reverse for
            // an outward-facing corner.
            corner.reverse();
            mesh.push_face(Face::new(corner)?.with_tag(BEVEL_TAG))?;
        }
        Ok(())
    }
}

/// Walk the outgoing edge fan of `vertex`. Returns the full cycle if the
/// walk closes, an empty list if it hits a boundary or exceeds `cap`
/// steps.
fn closed_fan(helper: &TraverseHelper, vertex: u32, cap: usize) -> Vec<Edge> {
    let start = match helper.outgoing(vertex) {
        Some(e) => e,
        None => return Vec::new(),
    };
    let mut fan = vec![start];
    let mut e = start;
    for _ in 0..cap {
        e = match helper.pair_next(e.from, e.to) {
            Some(next) => next,
            None => return Vec::new(),
        };
        if e == start {
            return fan;
        }
        fan.push(e);
    }
    Vec::new()
}
