use crate::{error::Error, mesh::Mesh};
use glam::Vec3;

/// Axis aligned bounding box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// A degenerate box of zero size at the origin.
    pub const ZERO: Aabb = Aabb {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }

    /// Compute the bounds of a set of points. Empty input yields the
    /// degenerate zero box.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut iter = points.into_iter();
        let first = match iter.next() {
            Some(p) => p,
            None => return Aabb::ZERO,
        };
        iter.fold(Aabb::new(first, first), |b, p| Aabb {
            min: b.min.min(p),
            max: b.max.max(p),
        })
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Compute the normal of a face using the Newell formula: a sum of cross
/// product terms over consecutive vertex pairs, normalized at the end.
///
/// Degenerate faces (zero length edges, zero area) produce a zero vector
/// rather than an error; procedurally generated meshes routinely pass
/// through transient degenerate states.
pub fn face_normal(mesh: &Mesh, face: usize) -> Result<Vec3, Error> {
    let ring = mesh.face(face)?.indices();
    mesh.check_indices(ring)?;
    Ok(normal_of(mesh.positions(), ring))
}

/// Compute the center of a face as the average of its ring vertices.
pub fn face_center(mesh: &Mesh, face: usize) -> Result<Vec3, Error> {
    let ring = mesh.face(face)?.indices();
    mesh.check_indices(ring)?;
    Ok(center_of(mesh.positions(), ring))
}

/// Compute the perimeter of a face as the sum of its edge lengths.
pub fn face_perimeter(mesh: &Mesh, face: usize) -> Result<f32, Error> {
    let ring = mesh.face(face)?.indices();
    mesh.check_indices(ring)?;
    let points = mesh.positions();
    Ok(ring
        .iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(&a, &b)| points[a as usize].distance(points[b as usize]))
        .sum())
}

/// Compute a normal per vertex by averaging the normals of the faces
/// incident on it. Vertices with no incident faces, and vertices whose
/// incident faces are all degenerate, get a zero vector.
pub fn vertex_normals(mesh: &Mesh) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; mesh.vertex_count()];
    for face in mesh.faces() {
        let n = normal_of(mesh.positions(), face.indices());
        for &vi in face.indices() {
            normals[vi as usize] += n;
        }
    }
    for n in &mut normals {
        *n = n.normalize_or_zero();
    }
    normals
}

// Raw variants over a position slice, for hot loops after the indices have
// already passed the boundary validation.

pub(crate) fn normal_of(points: &[Vec3], ring: &[u32]) -> Vec3 {
    let mut n = Vec3::ZERO;
    for (&a, &b) in ring.iter().zip(ring.iter().cycle().skip(1)) {
        let (a, b) = (points[a as usize], points[b as usize]);
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n.normalize_or_zero()
}

pub(crate) fn center_of(points: &[Vec3], ring: &[u32]) -> Vec3 {
    if ring.is_empty() {
        return Vec3::ZERO;
    }
    ring.iter().fold(Vec3::ZERO, |sum, &vi| {
        sum + points[vi as usize]
    }) / ring.len() as f32
}
