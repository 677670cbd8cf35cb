use crate::{error::Error, mesh::Mesh};

/// The common contract of mesh modifiers: mutate the mesh in place,
/// synchronously, confining side effects to its vertex and face lists.
///
/// Modifiers are stateless operator values; their fields are parameters,
/// not accumulated state. Reapplying a modifier composes numerically, not
/// symbolically. External code can implement this trait to join pipelines
/// built with [`Mesh::apply`].
pub trait Modifier {
    fn modify(&self, mesh: &mut Mesh) -> Result<(), Error>;
}

impl Mesh {
    /// Apply a modifier in place and return the mesh again for chaining.
    ///
    /// ```rust
    /// use hedron::{primitive, Scale, Translate};
    ///
    /// let mut mesh = primitive::unit_box().expect("Cannot create box");
    /// mesh.apply(&Scale::uniform(2.0))
    ///     .expect("Cannot scale")
    ///     .apply(&Translate(glam::vec3(-1.0, -1.0, -1.0)))
    ///     .expect("Cannot translate");
    /// assert_eq!(glam::vec3(-1.0, -1.0, -1.0), mesh.bounds().min);
    /// ```
    pub fn apply(&mut self, modifier: &impl Modifier) -> Result<&mut Self, Error> {
        modifier.modify(self)?;
        Ok(self)
    }
}
