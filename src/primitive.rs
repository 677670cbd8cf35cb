/*!
Minimal construction fixtures. Full procedural creators live outside this
crate and drive the same [`Mesh`] construction API; these few shapes exist
so the toolkit (and its tests) have well known topology to work on.
*/

use crate::{error::Error, mesh::Mesh};
use glam::{Vec3, vec3};

/// Makes a box with the following topology, spanning from the min point
/// to the max point, faces wound outward.
///
///  ```text
///       7-----------6
///      /|          /|
///     / |         / |
///    4-----------5  |
///    |  |        |  |
///    |  3--------|--2
///    | /         | /
///    |/          |/
///    0-----------1
///  ```
pub fn quad_box(min: Vec3, max: Vec3) -> Result<Mesh, Error> {
    const BOX_POS: [(bool, bool, bool); 8] = [
        (false, false, false),
        (true, false, false),
        (true, true, false),
        (false, true, false),
        (false, false, true),
        (true, false, true),
        (true, true, true),
        (false, true, true),
    ];
    const BOX_IDX: [(u32, u32, u32, u32); 6] = [
        (0, 3, 2, 1),
        (0, 1, 5, 4),
        (1, 2, 6, 5),
        (2, 3, 7, 6),
        (3, 0, 4, 7),
        (4, 5, 6, 7),
    ];
    let mut qbox = Mesh::with_capacity(8, 6);
    for (xf, yf, zf) in BOX_POS {
        qbox.add_vertex(vec3(
            if xf { max.x } else { min.x },
            if yf { max.y } else { min.y },
            if zf { max.z } else { min.z },
        ));
    }
    for (a, b, c, d) in BOX_IDX {
        qbox.add_quad(a, b, c, d)?;
    }
    Ok(qbox)
}

/// A box of size 1 spanning from the origin to (1, 1, 1).
pub fn unit_box() -> Result<Mesh, Error> {
    quad_box(Vec3::ZERO, Vec3::ONE)
}

/// A planar grid of `nx` by `ny` unit quads in the XY plane, wound so the
/// normals face +Z. Vertices are laid out row major, `(nx + 1) * (ny + 1)`
/// of them.
pub fn quad_grid(nx: usize, ny: usize) -> Result<Mesh, Error> {
    let mut grid = Mesh::with_capacity((nx + 1) * (ny + 1), nx * ny);
    for y in 0..=ny {
        for x in 0..=nx {
            grid.add_vertex(vec3(x as f32, y as f32, 0.0));
        }
    }
    let stride = (nx + 1) as u32;
    for y in 0..ny as u32 {
        for x in 0..nx as u32 {
            let i = y * stride + x;
            grid.add_quad(i, i + 1, i + stride + 1, i + stride)?;
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::check;
    use glam::vec3;

    #[test]
    fn t_unit_box() {
        let mesh = unit_box().expect("Cannot create box");
        assert_eq!(8, mesh.vertex_count());
        assert_eq!(6, mesh.face_count());
        assert!(check::is_manifold(&mesh));
        assert_eq!(Vec3::ONE, mesh.bounds().size());
    }

    #[test]
    fn t_quad_grid() {
        let mesh = quad_grid(3, 2).expect("Cannot create grid");
        assert_eq!(12, mesh.vertex_count());
        assert_eq!(6, mesh.face_count());
        check::check_indices(&mesh).expect("Invalid indices");
        // All faces wound toward +Z.
        for fi in 0..mesh.face_count() {
            let n = crate::geometry::face_normal(&mesh, fi).expect("Cannot compute normal");
            assert_eq!(vec3(0.0, 0.0, 1.0), n);
        }
    }
}
