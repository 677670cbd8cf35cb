/*!
Face selection: an ordered, filterable set of face indices used to scope
modifiers.

A [`FaceSelection`] borrows its source mesh, so the borrow checker makes
staleness structural: the mesh cannot be mutated while a selection is
alive. Consume the selection into plain indices with
[`FaceSelection::into_indices`] before handing them to a modifier.

The [`rules`] submodule offers AND/OR composition of independent per-face
predicates for callers that want to describe a selection declaratively.
*/

use crate::{
    geometry::{self, Aabb},
    mesh::{Face, Mesh},
    traverse::TraverseHelper,
};
use glam::Vec3;
use hashbrown::HashMap;
use indexmap::IndexSet;

const DISTANCE_EPSILON: f32 = 1e-5;

/// A signed unit axis, for directional face selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::PosX => Vec3::X,
            Axis::NegX => Vec3::NEG_X,
            Axis::PosY => Vec3::Y,
            Axis::NegY => Vec3::NEG_Y,
            Axis::PosZ => Vec3::Z,
            Axis::NegZ => Vec3::NEG_Z,
        }
    }

    /// Round a direction to the nearest signed unit axis: the dominant
    /// component wins, its sign picks the side. Zero vectors round to
    /// `PosX` by convention of the dominant-component scan.
    pub fn nearest(dir: Vec3) -> Axis {
        let a = dir.abs();
        if a.x >= a.y && a.x >= a.z {
            if dir.x >= 0.0 { Axis::PosX } else { Axis::NegX }
        } else if a.y >= a.z {
            if dir.y >= 0.0 { Axis::PosY } else { Axis::NegY }
        } else if dir.z >= 0.0 {
            Axis::PosZ
        } else {
            Axis::NegZ
        }
    }
}

/// An insertion-order-preserving set of face indices over a borrowed mesh.
///
/// Selection methods append matches in mesh face order and return
/// `&mut Self` for chaining. A face already in the set keeps its original
/// position.
pub struct FaceSelection<'m> {
    mesh: &'m Mesh,
    faces: IndexSet<usize>,
}

impl<'m> FaceSelection<'m> {
    /// An empty selection over `mesh`.
    pub fn new(mesh: &'m Mesh) -> Self {
        FaceSelection {
            mesh,
            faces: IndexSet::new(),
        }
    }

    /// A selection holding every face of `mesh`, in order.
    pub fn all(mesh: &'m Mesh) -> Self {
        FaceSelection {
            mesh,
            faces: (0..mesh.face_count()).collect(),
        }
    }

    pub fn mesh(&self) -> &'m Mesh {
        self.mesh
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn contains(&self, face: usize) -> bool {
        self.faces.contains(&face)
    }

    /// Face indices in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.faces.iter().copied()
    }

    /// Consume the selection into plain face indices, releasing the borrow
    /// of the mesh so a modifier can take over.
    pub fn into_indices(self) -> Vec<usize> {
        self.faces.into_iter().collect()
    }

    /// Add a single face by index. Out of range indices are ignored.
    pub fn select_face(&mut self, face: usize) -> &mut Self {
        if face < self.mesh.face_count() {
            self.faces.insert(face);
        }
        self
    }

    fn select_where(&mut self, mut pred: impl FnMut(&Mesh, usize, &Face) -> bool) -> &mut Self {
        for (fi, face) in self.mesh.faces().iter().enumerate() {
            if pred(self.mesh, fi, face) {
                self.faces.insert(fi);
            }
        }
        self
    }

    /// Select faces with exactly `n` vertices.
    pub fn select_vertex_count(&mut self, n: usize) -> &mut Self {
        self.select_where(|_, _, face| face.valence() == n)
    }

    pub fn select_triangles(&mut self) -> &mut Self {
        self.select_vertex_count(3)
    }

    pub fn select_quads(&mut self) -> &mut Self {
        self.select_vertex_count(4)
    }

    /// Select faces with more than four vertices.
    pub fn select_ngons(&mut self) -> &mut Self {
        self.select_where(|_, _, face| face.valence() > 4)
    }

    /// Select faces whose computed normal lies within `max_angle` radians
    /// of `dir`. Degenerate faces never match.
    pub fn select_normal_near(&mut self, dir: Vec3, max_angle: f32) -> &mut Self {
        let dir = dir.normalize_or_zero();
        self.select_where(|mesh, _, face| {
            let n = geometry::normal_of(mesh.positions(), face.indices());
            n != Vec3::ZERO && n.angle_between(dir) <= max_angle
        })
    }

    /// Select faces whose center lies within `distance` of `point`.
    pub fn select_within_distance(&mut self, point: Vec3, distance: f32) -> &mut Self {
        self.select_where(|mesh, _, face| {
            geometry::center_of(mesh.positions(), face.indices()).distance(point) <= distance
        })
    }

    /// Select faces whose center lies at exactly `distance` of `point`, up
    /// to a small epsilon.
    pub fn select_at_distance(&mut self, point: Vec3, distance: f32) -> &mut Self {
        self.select_where(|mesh, _, face| {
            let d = geometry::center_of(mesh.positions(), face.indices()).distance(point);
            (d - distance).abs() <= DISTANCE_EPSILON
        })
    }

    /// Select faces carrying the given provenance tag.
    pub fn select_tagged(&mut self, tag: &str) -> &mut Self {
        self.select_where(|_, _, face| face.tag == tag)
    }

    /// Select faces whose ring contains the given vertex index.
    pub fn select_containing_vertex(&mut self, vertex: u32) -> &mut Self {
        self.select_where(|_, _, face| face.indices().contains(&vertex))
    }

    /// Select faces entirely inside the axis aligned region.
    pub fn select_in_region(&mut self, region: &Aabb) -> &mut Self {
        self.select_where(|mesh, _, face| {
            face.indices()
                .iter()
                .all(|&vi| region.contains(mesh.positions()[vi as usize]))
        })
    }

    /// Select faces that share their vertex set with another face,
    /// regardless of ring order. A canonical sorted-key pass, one hash map
    /// over the faces.
    pub fn select_doubles(&mut self) -> &mut Self {
        let mut groups: HashMap<Vec<u32>, Vec<usize>> = HashMap::new();
        for (fi, face) in self.mesh.faces().iter().enumerate() {
            groups.entry(face.sorted_indices()).or_default().push(fi);
        }
        let doubled: Vec<bool> = {
            let mut flags = vec![false; self.mesh.face_count()];
            for group in groups.values().filter(|g| g.len() > 1) {
                for &fi in group {
                    flags[fi] = true;
                }
            }
            flags
        };
        self.select_where(|_, fi, _| doubled[fi])
    }

    /// Select faces whose normal rounds to the given signed unit axis.
    pub fn select_facing(&mut self, axis: Axis) -> &mut Self {
        self.select_where(|mesh, _, face| {
            let n = geometry::normal_of(mesh.positions(), face.indices());
            n != Vec3::ZERO && Axis::nearest(n) == axis
        })
    }

    /// Reduce the selection to its inner boundary: the selected faces that
    /// have at least one edge whose twin face is outside the selection (or
    /// absent at a mesh boundary).
    pub fn inner_boundary(&mut self) -> &mut Self {
        let helper = TraverseHelper::new(self.mesh);
        let rim: IndexSet<usize> = self
            .faces
            .iter()
            .copied()
            .filter(|&fi| {
                self.mesh.faces()[fi].edges().any(|(a, b)| {
                    match helper.face_by_edge(b, a) {
                        Some(twin) => !self.faces.contains(&twin),
                        None => true,
                    }
                })
            })
            .collect();
        self.faces = rim;
        self
    }

    /// Replace the selection with its outer boundary: the unselected faces
    /// adjacent to the selection across an edge, in the order their edges
    /// are walked.
    pub fn outer_boundary(&mut self) -> &mut Self {
        let helper = TraverseHelper::new(self.mesh);
        let mut ring: IndexSet<usize> = IndexSet::new();
        for &fi in &self.faces {
            for (a, b) in self.mesh.faces()[fi].edges() {
                if let Some(twin) = helper.face_by_edge(b, a) {
                    if !self.faces.contains(&twin) {
                        ring.insert(twin);
                    }
                }
            }
        }
        self.faces = ring;
        self
    }

    /// Add every face of `other` to this selection. Both selections must
    /// view the same mesh.
    pub fn union(&mut self, other: &FaceSelection<'_>) -> &mut Self {
        debug_assert!(std::ptr::eq(self.mesh, other.mesh));
        for fi in other.iter() {
            self.faces.insert(fi);
        }
        self
    }

    /// Remove every face of `other` from this selection, keeping the order
    /// of the remaining faces.
    pub fn subtract(&mut self, other: &FaceSelection<'_>) -> &mut Self {
        debug_assert!(std::ptr::eq(self.mesh, other.mesh));
        self.faces.retain(|fi| !other.contains(*fi));
        self
    }

    /// Complement against all faces of the mesh, in mesh order.
    pub fn invert(&mut self) -> &mut Self {
        self.faces = (0..self.mesh.face_count())
            .filter(|fi| !self.faces.contains(fi))
            .collect();
        self
    }
}

pub mod rules {
    /*!
    Declarative AND/OR composition of independent per-face predicates.

    A [`Rules`] value is built once and evaluated per face; external code
    may contribute arbitrary predicates through [`Rules::predicate`].
    */

    use super::FaceSelection;
    use crate::{
        geometry,
        mesh::{Face, Mesh},
    };
    use glam::Vec3;

    /// How the individual rules combine.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub enum Combine {
        /// Every rule must match (AND).
        All,
        /// At least one rule must match (OR).
        Any,
    }

    /// A coordinate axis of the face centroid.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub enum Coord {
        X,
        Y,
        Z,
    }

    impl Coord {
        fn of(self, v: Vec3) -> f32 {
            match self {
                Coord::X => v.x,
                Coord::Y => v.y,
                Coord::Z => v.z,
            }
        }
    }

    enum Rule {
        VertexCount(usize),
        CentroidAbove(Coord, f32),
        CentroidBelow(Coord, f32),
        NormalNear(Vec3, f32),
        Custom(Box<dyn Fn(&Mesh, &Face) -> bool>),
    }

    /// A composable per-face filter.
    pub struct Rules {
        combine: Combine,
        invert: bool,
        rules: Vec<Rule>,
    }

    impl Rules {
        /// Rules that all must match.
        pub fn all() -> Self {
            Rules {
                combine: Combine::All,
                invert: false,
                rules: Vec::new(),
            }
        }

        /// Rules where any match suffices.
        pub fn any() -> Self {
            Rules {
                combine: Combine::Any,
                invert: false,
                rules: Vec::new(),
            }
        }

        /// Match faces with exactly `n` vertices.
        pub fn vertex_count(mut self, n: usize) -> Self {
            self.rules.push(Rule::VertexCount(n));
            self
        }

        /// Match faces whose centroid coordinate exceeds `value`.
        pub fn centroid_above(mut self, coord: Coord, value: f32) -> Self {
            self.rules.push(Rule::CentroidAbove(coord, value));
            self
        }

        /// Match faces whose centroid coordinate is below `value`.
        pub fn centroid_below(mut self, coord: Coord, value: f32) -> Self {
            self.rules.push(Rule::CentroidBelow(coord, value));
            self
        }

        /// Match faces whose normal lies within `max_angle` radians of
        /// `dir`.
        pub fn normal_near(mut self, dir: Vec3, max_angle: f32) -> Self {
            self.rules
                .push(Rule::NormalNear(dir.normalize_or_zero(), max_angle));
            self
        }

        /// Match faces passing an arbitrary caller-supplied predicate.
        pub fn predicate(mut self, f: impl Fn(&Mesh, &Face) -> bool + 'static) -> Self {
            self.rules.push(Rule::Custom(Box::new(f)));
            self
        }

        /// Flip the final verdict.
        pub fn inverted(mut self) -> Self {
            self.invert = !self.invert;
            self
        }

        /// Evaluate the composed rules against one face.
        pub fn matches(&self, mesh: &Mesh, face: &Face) -> bool {
            let verdict = match self.combine {
                Combine::All => self.rules.iter().all(|r| r.matches(mesh, face)),
                Combine::Any => self.rules.iter().any(|r| r.matches(mesh, face)),
            };
            verdict != self.invert
        }

        /// Evaluate against every face of the mesh, producing a selection
        /// in mesh face order.
        pub fn select<'m>(&self, mesh: &'m Mesh) -> FaceSelection<'m> {
            let mut selection = FaceSelection::new(mesh);
            selection.select_where(|mesh, _, face| self.matches(mesh, face));
            selection
        }
    }

    impl Rule {
        fn matches(&self, mesh: &Mesh, face: &Face) -> bool {
            match self {
                Rule::VertexCount(n) => face.valence() == *n,
                Rule::CentroidAbove(coord, value) => {
                    coord.of(geometry::center_of(mesh.positions(), face.indices())) > *value
                }
                Rule::CentroidBelow(coord, value) => {
                    coord.of(geometry::center_of(mesh.positions(), face.indices())) < *value
                }
                Rule::NormalNear(dir, max_angle) => {
                    let n = geometry::normal_of(mesh.positions(), face.indices());
                    n != Vec3::ZERO && n.angle_between(*dir) <= *max_angle
                }
                Rule::Custom(f) => f(mesh, face),
            }
        }
    }
}
