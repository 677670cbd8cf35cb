use crate::{error::Error, mesh::Mesh, modifier::Modifier};
use glam::{Mat3, Vec3};

/// Translate every vertex by the given offset. Cached face normals are
/// unaffected.
#[derive(Debug, Copy, Clone)]
pub struct Translate(pub Vec3);

impl Modifier for Translate {
    fn modify(&self, mesh: &mut Mesh) -> Result<(), Error> {
        for p in mesh.positions_mut() {
            *p += self.0;
        }
        Ok(())
    }
}

/// Scale every vertex component-wise about the origin.
///
/// Non-uniform scaling leaves cached face normals stale; run
/// [`UpdateNormals`](crate::UpdateNormals) afterwards if they matter.
#[derive(Debug, Copy, Clone)]
pub struct Scale(pub Vec3);

impl Scale {
    pub fn uniform(factor: f32) -> Self {
        Scale(Vec3::splat(factor))
    }
}

impl Modifier for Scale {
    fn modify(&self, mesh: &mut Mesh) -> Result<(), Error> {
        for p in mesh.positions_mut() {
            *p *= self.0;
        }
        Ok(())
    }
}

/// Rotate every vertex about the X axis by the given angle in radians.
/// Cached face normals are rotated along.
#[derive(Debug, Copy, Clone)]
pub struct RotateX(pub f32);

/// Rotate every vertex about the Y axis by the given angle in radians.
/// Cached face normals are rotated along.
#[derive(Debug, Copy, Clone)]
pub struct RotateY(pub f32);

/// Rotate every vertex about the Z axis by the given angle in radians.
/// Cached face normals are rotated along.
#[derive(Debug, Copy, Clone)]
pub struct RotateZ(pub f32);

fn rotate(mesh: &mut Mesh, m: Mat3) {
    for p in mesh.positions_mut() {
        *p = m * *p;
    }
    for face in mesh.faces_mut() {
        face.normal = m * face.normal;
    }
}

impl Modifier for RotateX {
    fn modify(&self, mesh: &mut Mesh) -> Result<(), Error> {
        rotate(mesh, Mat3::from_rotation_x(self.0));
        Ok(())
    }
}

impl Modifier for RotateY {
    fn modify(&self, mesh: &mut Mesh) -> Result<(), Error> {
        rotate(mesh, Mat3::from_rotation_y(self.0));
        Ok(())
    }
}

impl Modifier for RotateZ {
    fn modify(&self, mesh: &mut Mesh) -> Result<(), Error> {
        rotate(mesh, Mat3::from_rotation_z(self.0));
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{mesh::Mesh, primitive};
    use glam::vec3;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn t_translate() {
        let mut mesh = primitive::unit_box().expect("Cannot create box");
        mesh.apply(&Translate(vec3(1.0, 2.0, 3.0)))
            .expect("Cannot translate");
        let b = mesh.bounds();
        assert_eq!(vec3(1.0, 2.0, 3.0), b.min);
        assert_eq!(vec3(2.0, 3.0, 4.0), b.max);
    }

    #[test]
    fn t_scale() {
        let mut mesh = primitive::unit_box().expect("Cannot create box");
        mesh.apply(&Scale(vec3(2.0, 3.0, 4.0))).expect("Cannot scale");
        assert_eq!(vec3(2.0, 3.0, 4.0), mesh.bounds().size());
    }

    #[test]
    fn t_rotate_z_quarter_turn() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(vec3(1.0, 0.0, 0.0));
        mesh.apply(&RotateZ(FRAC_PI_2)).expect("Cannot rotate");
        let p = mesh.point(0).expect("Cannot read point");
        assert!(p.distance(vec3(0.0, 1.0, 0.0)) < 1e-6);
    }

    #[test]
    fn t_rotation_composes_numerically() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(vec3(0.0, 1.0, 0.0));
        // Two quarter turns about X equal one half turn.
        mesh.apply(&RotateX(FRAC_PI_2))
            .expect("Cannot rotate")
            .apply(&RotateX(FRAC_PI_2))
            .expect("Cannot rotate");
        let p = mesh.point(0).expect("Cannot read point");
        assert!(p.distance(vec3(0.0, -1.0, 0.0)) < 1e-6);
    }

    #[test]
    fn t_rotate_updates_cached_normals() {
        let mut mesh = primitive::unit_box().expect("Cannot create box");
        mesh.apply(&crate::UpdateNormals).expect("Cannot update");
        mesh.apply(&RotateY(FRAC_PI_2)).expect("Cannot rotate");
        let n = mesh.face(5).expect("No face").normal;
        // The top face (+Z) now faces +X.
        assert!(n.distance(vec3(1.0, 0.0, 0.0)) < 1e-6);
    }
}
