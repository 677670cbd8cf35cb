use crate::{
    error::Error,
    geometry,
    mesh::{Face, Mesh},
    modifier::Modifier,
    traverse::{Edge, TraverseHelper},
};

/// Tag written onto the faces created by [`Solidify`].
pub const SOLIDIFY_TAG: &str = "solidify";

/// Thicken a surface into a closed shell.
///
/// Every vertex is duplicated and offset inward along its averaged vertex
/// normal by `thickness`, every face is duplicated with reversed winding
/// onto the offset ring, and each boundary edge of the original surface is
/// bridged with a quad. A closed input produces two nested shells; an open
/// surface becomes watertight.
#[derive(Debug, Copy, Clone)]
pub struct Solidify {
    pub thickness: f32,
}

impl Modifier for Solidify {
    fn modify(&self, mesh: &mut Mesh) -> Result<(), Error> {
        let offset = mesh.vertex_count() as u32;
        let face_count = mesh.face_count();
        let normals = geometry::vertex_normals(mesh);
        // Boundary edges of the current surface, collected before any
        // mutation invalidates the helper.
        let boundary: Vec<Edge> = {
            let helper = TraverseHelper::new(mesh);
            helper
                .edges()
                .filter(|e| helper.face_by_edge(e.to, e.from).is_none())
                .collect()
        };
        for vi in 0..offset {
            let p = mesh.positions()[vi as usize];
            mesh.add_vertex(p - normals[vi as usize] * self.thickness);
        }
        for fi in 0..face_count {
            let mut ring: Vec<u32> = mesh.faces()[fi]
                .indices()
                .iter()
                .map(|&vi| vi + offset)
                .collect();
            ring.reverse();
            let mut face = Face::new(ring)?.with_tag(SOLIDIFY_TAG);
            face.normal = -mesh.faces()[fi].normal;
            face.color = mesh.faces()[fi].color;
            mesh.push_face(face)?;
        }
        for e in boundary {
            let bridge = Face::new(vec![e.to, e.from, e.from + offset, e.to + offset])?
                .with_tag(SOLIDIFY_TAG);
            mesh.push_face(bridge)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{check, primitive};

    #[test]
    fn t_solidify_single_quad() {
        let mut mesh = primitive::quad_grid(1, 1).expect("Cannot create grid");
        mesh.apply(&Solidify { thickness: 0.1 }).expect("Cannot solidify");
        // Front, back, and four bridge quads: a closed box shape.
        assert_eq!(8, mesh.vertex_count());
        assert_eq!(6, mesh.face_count());
        assert!(check::is_manifold(&mesh));
        assert_eq!(2, check::euler_characteristic(&mesh));
        // The duplicate shell sits below the original plane.
        assert!(mesh.bounds().min.z < 0.0);
    }

    #[test]
    fn t_solidify_grid() {
        let mut mesh = primitive::quad_grid(3, 2).expect("Cannot create grid");
        mesh.apply(&Solidify { thickness: 0.25 }).expect("Cannot solidify");
        // 12 original + 12 duplicated vertices; 6 + 6 faces + 10 bridges.
        assert_eq!(24, mesh.vertex_count());
        assert_eq!(22, mesh.face_count());
        assert!(check::is_manifold(&mesh));
        assert_eq!(2, check::euler_characteristic(&mesh));
    }

    #[test]
    fn t_solidify_closed_surface() {
        let mut mesh = primitive::unit_box().expect("Cannot create box");
        mesh.apply(&Solidify { thickness: 0.1 }).expect("Cannot solidify");
        // No boundary edges: two nested shells, no bridges.
        assert_eq!(16, mesh.vertex_count());
        assert_eq!(12, mesh.face_count());
        assert!(check::is_manifold(&mesh));
        // Two closed genus-0 components.
        assert_eq!(4, check::euler_characteristic(&mesh));
        // The inner shell is strictly smaller.
        let inner = mesh.positions()[8..].to_vec();
        let b = crate::Aabb::from_points(inner);
        assert!(b.size().x < 1.0);
    }

    #[test]
    fn t_solidify_tags_created_faces() {
        let mut mesh = primitive::quad_grid(1, 1).expect("Cannot create grid");
        mesh.apply(&Solidify { thickness: 0.1 }).expect("Cannot solidify");
        let tagged = mesh
            .faces()
            .iter()
            .filter(|f| f.tag == SOLIDIFY_TAG)
            .count();
        assert_eq!(5, tagged);
    }
}
