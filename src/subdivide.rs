use crate::{
    error::Error,
    geometry,
    mesh::{Face, Mesh},
    modifier::Modifier,
};
use hashbrown::HashMap;

/// Planar mid-edge subdivision.
///
/// Each face of valence `n` gains a center point and one midpoint per
/// edge, and is replaced by `n` quads connecting corner, the two adjacent
/// edge midpoints, and the center. Quads therefore split into exactly
/// four; triangles and N-gons follow the same rule and split into `n`
/// quads. Midpoints are cached per undirected edge so faces sharing an
/// edge reuse the same new vertex, preserving connectivity.
///
/// One pass over an all-quad mesh quadruples the face count and grows the
/// vertex count by the edge count plus the face count. Positions are not
/// smoothed; the surface shape is preserved.
#[derive(Debug, Copy, Clone)]
pub struct Subdivide {
    pub iterations: usize,
}

impl Modifier for Subdivide {
    fn modify(&self, mesh: &mut Mesh) -> Result<(), Error> {
        for _ in 0..self.iterations {
            subdivide_once(mesh)?;
        }
        Ok(())
    }
}

fn subdivide_once(mesh: &mut Mesh) -> Result<(), Error> {
    // Midpoint vertices shared across adjacent faces, keyed by the
    // undirected edge.
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
    let face_count = mesh.face_count();
    let mut subfaces: Vec<Face> = Vec::with_capacity(face_count * 4);
    for fi in 0..face_count {
        let ring: Vec<u32> = mesh.faces()[fi].indices().to_vec();
        mesh.check_indices(&ring)?;
        let n = ring.len();
        let center = mesh.add_vertex(geometry::center_of(mesh.positions(), &ring));
        let mids: Vec<u32> = (0..n)
            .map(|k| {
                let e = (ring[k], ring[(k + 1) % n]);
                let key = if e.0 <= e.1 { e } else { (e.1, e.0) };
                match midpoints.get(&key) {
                    Some(&vi) => vi,
                    None => {
                        let p = (mesh.positions()[e.0 as usize]
                            + mesh.positions()[e.1 as usize])
                            * 0.5;
                        let vi = mesh.add_vertex(p);
                        midpoints.insert(key, vi);
                        vi
                    }
                }
            })
            .collect();
        let parent = &mesh.faces()[fi];
        let (color, tag) = (parent.color, parent.tag.clone());
        for k in 0..n {
            let ring = vec![ring[k], mids[k], center, mids[(k + n - 1) % n]];
            let mut quad = Face::new(ring)?;
            quad.normal = geometry::normal_of(mesh.positions(), quad.indices());
            quad.color = color;
            quad.tag = tag.clone();
            subfaces.push(quad);
        }
    }
    *mesh.faces_mut() = subfaces;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{check, mesh::Mesh, primitive};

    #[test]
    fn t_box_subdivide_once() {
        let mut mesh = primitive::unit_box().expect("Cannot create box");
        mesh.apply(&Subdivide { iterations: 1 }).expect("Cannot subdivide");
        // 8 corners + 12 edge midpoints + 6 face centers.
        assert_eq!(26, mesh.vertex_count());
        assert_eq!(24, mesh.face_count());
        assert!(mesh.faces().iter().all(|f| f.valence() == 4));
        assert!(check::is_manifold(&mesh));
        assert_eq!(2, check::euler_characteristic(&mesh));
        // The shape is unchanged.
        assert_eq!(glam::Vec3::ONE, mesh.bounds().size());
    }

    #[test]
    fn t_box_subdivide_twice() {
        let mut mesh = primitive::unit_box().expect("Cannot create box");
        mesh.apply(&Subdivide { iterations: 2 }).expect("Cannot subdivide");
        assert_eq!(96, mesh.face_count());
        // 26 + 48 edges + 24 faces.
        assert_eq!(98, mesh.vertex_count());
        assert!(check::is_manifold(&mesh));
        assert_eq!(2, check::euler_characteristic(&mesh));
    }

    #[test]
    fn t_grid_shares_midpoints() {
        let mut mesh = primitive::quad_grid(2, 2).expect("Cannot create grid");
        // 9 vertices, 12 undirected edges, 4 faces.
        mesh.apply(&Subdivide { iterations: 1 }).expect("Cannot subdivide");
        assert_eq!(25, mesh.vertex_count());
        assert_eq!(16, mesh.face_count());
        assert_eq!(check::count_edges(&mesh), 40);
    }

    #[test]
    fn t_triangle_splits_into_three_quads() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(glam::vec3(0.0, 0.0, 0.0));
        mesh.add_vertex(glam::vec3(1.0, 0.0, 0.0));
        mesh.add_vertex(glam::vec3(0.0, 1.0, 0.0));
        mesh.add_tri(0, 1, 2).expect("Cannot add face");
        mesh.apply(&Subdivide { iterations: 1 }).expect("Cannot subdivide");
        assert_eq!(3, mesh.face_count());
        // 3 corners + 3 midpoints + 1 center.
        assert_eq!(7, mesh.vertex_count());
        assert!(mesh.faces().iter().all(|f| f.valence() == 4));
    }

    #[test]
    fn t_subdivide_inherits_tag() {
        let mut mesh = primitive::unit_box().expect("Cannot create box");
        mesh.faces_mut()[0].tag = "base".to_string();
        mesh.apply(&Subdivide { iterations: 1 }).expect("Cannot subdivide");
        let tagged = mesh.faces().iter().filter(|f| f.tag == "base").count();
        assert_eq!(4, tagged);
    }
}
