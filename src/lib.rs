/*!
A procedural polygon mesh toolkit built around an indexed mesh data model.

# Overview

+ [`Mesh`] owns vertex positions and polygonal faces (triangles, quads and
  N-gons) and is the single source of truth. Faces store ordered vertex
  indices; winding order decides the orientation of the computed normal.

+ [`TraverseHelper`] is a derived, rebuildable adjacency index over a mesh
  that supports halfedge style queries (edge to face, edge to next edge in
  the same face, vertex to an outgoing edge). It is built fresh from the
  current mesh state before a traversal-dependent operation and discarded
  afterwards; it is never kept valid across mutation.

+ [`FaceSelection`] is an insertion-order-preserving set of face indices
  used to scope modifiers. Selections are composable through predicates,
  set operations, and the [`select::rules`] engine.

+ Modifiers mutate a mesh in place following a `modify(&mut Mesh)` contract
  and chain through [`Mesh::apply`]: affine transforms, face extrusion,
  shell [`Solidify`], mid-edge [`Subdivide`], vertex [`BevelVertices`], and
  repair passes ([`RemoveDoubles`], [`UpdateNormals`]).

+ The [`check`] module holds opt-in structural validation: index bounds,
  manifoldness, Euler characteristic, and duplicate face detection.

The geometry is concrete `f32` using the [`glam`](https://crates.io/crates/glam)
vector types.

# Example

```rust
use hedron::{primitive, Subdivide, Translate, check};

let mut mesh = primitive::unit_box().expect("Cannot create box");
mesh.apply(&Translate(glam::vec3(0.0, 0.0, 1.0)))
    .expect("Cannot translate")
    .apply(&Subdivide { iterations: 1 })
    .expect("Cannot subdivide");
assert_eq!(24, mesh.face_count());
assert!(check::is_manifold(&mesh));
```
*/

mod bevel;
pub mod check;
mod error;
mod extrude;
pub mod geometry;
mod mesh;
mod modifier;
pub mod primitive;
mod repair;
pub mod select;
mod solidify;
mod subdivide;
mod transform;
mod traverse;

pub use bevel::{BEVEL_TAG, BevelVertices};
pub use error::Error;
pub use extrude::{EXTRUDE_TAG, Extrude, extrude_face};
pub use geometry::Aabb;
pub use mesh::{Face, Mesh};
pub use modifier::Modifier;
pub use repair::{RemoveDoubles, UpdateNormals, update_face_normals};
pub use select::{Axis, FaceSelection};
pub use solidify::{SOLIDIFY_TAG, Solidify};
pub use subdivide::Subdivide;
pub use transform::{RotateX, RotateY, RotateZ, Scale, Translate};
pub use traverse::{Edge, TraverseHelper};
