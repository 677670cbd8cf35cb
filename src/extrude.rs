use crate::{
    error::Error,
    geometry,
    mesh::{Face, Mesh},
    modifier::Modifier,
};

/// Tag written onto the side faces created by [`Extrude`].
pub const EXTRUDE_TAG: &str = "extrude";

/// Extrude faces along their normals.
///
/// For each target face the modifier computes the face center and normal,
/// creates a new ring of vertices (the original ring scaled toward or away
/// from the center by `scale`, then pushed along the normal by `amount`),
/// bridges old ring to new ring with one quad per original edge, and
/// finally remaps the original face onto the new ring. The old ring
/// vertices stay in the mesh, referenced only by the side quads.
///
/// With `remove_original`, the remapped cap face is removed instead,
/// leaving an open tube.
#[derive(Debug, Clone)]
pub struct Extrude {
    /// Factor applied to the ring about the face center.
    pub scale: f32,
    /// Offset along the face normal.
    pub amount: f32,
    /// Remove the cap face instead of remapping it.
    pub remove_original: bool,
    /// Target faces; `None` extrudes every face present when the modifier
    /// runs.
    pub faces: Option<Vec<usize>>,
}

impl Extrude {
    pub fn new(scale: f32, amount: f32) -> Self {
        Extrude {
            scale,
            amount,
            remove_original: false,
            faces: None,
        }
    }

    /// Restrict the extrusion to the given faces (e.g. a consumed
    /// [`FaceSelection`](crate::FaceSelection)).
    pub fn faces(mut self, faces: Vec<usize>) -> Self {
        self.faces = Some(faces);
        self
    }

    pub fn remove_original(mut self, flag: bool) -> Self {
        self.remove_original = flag;
        self
    }
}

impl Modifier for Extrude {
    fn modify(&self, mesh: &mut Mesh) -> Result<(), Error> {
        let targets: Vec<usize> = match &self.faces {
            Some(faces) => faces.clone(),
            None => (0..mesh.face_count()).collect(),
        };
        for &fi in &targets {
            extrude_face(mesh, fi, self.scale, self.amount)?;
        }
        if self.remove_original {
            // Descending order so earlier removals don't shift later ones.
            let mut doomed = targets;
            doomed.sort_unstable_by(|a, b| b.cmp(a));
            doomed.dedup();
            for fi in doomed {
                mesh.remove_face(fi)?;
            }
        }
        Ok(())
    }
}

/// Extrude a single face in place; see [`Extrude`] for the geometry.
pub fn extrude_face(mesh: &mut Mesh, face: usize, scale: f32, amount: f32) -> Result<(), Error> {
    let ring: Vec<u32> = mesh.face(face)?.indices().to_vec();
    mesh.check_indices(&ring)?;
    let center = geometry::center_of(mesh.positions(), &ring);
    let normal = geometry::normal_of(mesh.positions(), &ring);
    let new_ring: Vec<u32> = ring
        .iter()
        .map(|&vi| {
            let p = mesh.positions()[vi as usize];
            mesh.add_vertex(center + (p - center) * scale + normal * amount)
        })
        .collect();
    let n = ring.len();
    for k in 0..n {
        let (a, b) = (ring[k], ring[(k + 1) % n]);
        let (na, nb) = (new_ring[k], new_ring[(k + 1) % n]);
        let mut side = Face::new(vec![a, b, nb, na])?.with_tag(EXTRUDE_TAG);
        side.normal = geometry::normal_of(mesh.positions(), side.indices());
        mesh.push_face(side)?;
    }
    mesh.set_face_indices(face, new_ring)?;
    let cap = geometry::face_normal(mesh, face)?;
    mesh.faces_mut()[face].normal = cap;
    Ok(())
}
