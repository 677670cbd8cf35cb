use crate::{error::Error, geometry, mesh::Mesh, modifier::Modifier};

/// Merge geometrically equal vertices and drop duplicate faces, as a
/// chainable modifier over [`Mesh::remove_doubles`].
#[derive(Debug, Copy, Clone, Default)]
pub struct RemoveDoubles {
    /// Quantize coordinates to this many decimal places before comparing,
    /// to tolerate floating point noise. `None` compares exactly.
    pub decimals: Option<u32>,
}

impl RemoveDoubles {
    pub fn exact() -> Self {
        RemoveDoubles { decimals: None }
    }

    pub fn quantized(decimals: u32) -> Self {
        RemoveDoubles {
            decimals: Some(decimals),
        }
    }
}

impl Modifier for RemoveDoubles {
    fn modify(&self, mesh: &mut Mesh) -> Result<(), Error> {
        mesh.remove_doubles(self.decimals);
        Ok(())
    }
}

/// Recompute every face's cached normal from its current ring.
///
/// Degenerate faces get a zero vector rather than an error, so a pipeline
/// passing through a transient degenerate state keeps running.
#[derive(Debug, Copy, Clone, Default)]
pub struct UpdateNormals;

impl Modifier for UpdateNormals {
    fn modify(&self, mesh: &mut Mesh) -> Result<(), Error> {
        update_face_normals(mesh);
        Ok(())
    }
}

/// Free function form of [`UpdateNormals`].
pub fn update_face_normals(mesh: &mut Mesh) {
    let face_count = mesh.face_count();
    for fi in 0..face_count {
        let n = geometry::normal_of(mesh.positions(), mesh.faces()[fi].indices());
        mesh.faces_mut()[fi].normal = n;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::primitive;
    use glam::{Vec3, vec3};

    #[test]
    fn t_update_normals_box() {
        let mut mesh = primitive::unit_box().expect("Cannot create box");
        assert!(mesh.faces().iter().all(|f| f.normal == Vec3::ZERO));
        mesh.apply(&UpdateNormals).expect("Cannot update normals");
        // Bottom face points down, top face points up.
        assert_eq!(vec3(0.0, 0.0, -1.0), mesh.face(0).expect("No face").normal);
        assert_eq!(vec3(0.0, 0.0, 1.0), mesh.face(5).expect("No face").normal);
        assert!(mesh.faces().iter().all(|f| f.normal.length() > 0.99));
    }

    #[test]
    fn t_update_normals_degenerate() {
        let mut mesh = crate::Mesh::new();
        for _ in 0..3 {
            mesh.add_vertex(vec3(1.0, 2.0, 3.0));
        }
        mesh.add_tri(0, 1, 2).expect("Cannot add face");
        mesh.apply(&UpdateNormals).expect("Cannot update normals");
        assert_eq!(Vec3::ZERO, mesh.face(0).expect("No face").normal);
    }

    #[test]
    fn t_remove_doubles_modifier_chains() {
        let mut mesh = primitive::unit_box().expect("Cannot create box");
        let other = primitive::unit_box().expect("Cannot create box");
        mesh.append(&other);
        mesh.apply(&RemoveDoubles::exact())
            .expect("Cannot remove doubles")
            .apply(&UpdateNormals)
            .expect("Cannot update normals");
        assert_eq!(8, mesh.vertex_count());
        assert_eq!(6, mesh.face_count());
    }
}
