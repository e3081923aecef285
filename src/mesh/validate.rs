//! Runtime checks for the caller contracts on a mesh record.

use super::{AttributeSet, IndexedGeometry};
use crate::common::PRIMITIVE_SIZE;

/// Every present attribute array must be parallel to `positions`.
pub fn check_attribute_lengths<M>(mesh: &M) -> anyhow::Result<()>
where
    M: IndexedGeometry + AttributeSet + ?Sized,
{
    let vertex_count = mesh.positions().len();
    for (attribute, len) in mesh.attribute_lengths() {
        if len != vertex_count {
            anyhow::bail!(
                "mesh {}: {:?} has {} entries but there are {} positions",
                mesh.id(),
                attribute,
                len,
                vertex_count
            );
        }
    }

    Ok(())
}

/// Indices must form whole triangles and stay inside the vertex arrays.
pub fn check_indices<M>(mesh: &M) -> anyhow::Result<()>
where
    M: IndexedGeometry + ?Sized,
{
    let indices = mesh.indices();
    if indices.len() % PRIMITIVE_SIZE != 0 {
        anyhow::bail!(
            "mesh {}: {} indices is not a whole number of triangles",
            mesh.id(),
            indices.len()
        );
    }

    let vertex_count = mesh.positions().len();
    if let Some((i, index)) = indices
        .iter()
        .enumerate()
        .find(|(_, &index)| index as usize >= vertex_count)
    {
        anyhow::bail!(
            "mesh {}: index {} at {} is out of range for {} vertices",
            mesh.id(),
            index,
            i,
            vertex_count
        );
    }

    Ok(())
}

pub fn validate<M>(mesh: &M) -> anyhow::Result<()>
where
    M: IndexedGeometry + AttributeSet + ?Sized,
{
    check_attribute_lengths(mesh)?;
    check_indices(mesh)
}

pub(crate) fn debug_assert_parallel<M>(mesh: &M)
where
    M: IndexedGeometry + AttributeSet + ?Sized,
{
    if cfg!(debug_assertions) {
        if let Err(e) = check_attribute_lengths(mesh) {
            panic!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::IdGenerator;
    use crate::mesh::{IndexedPositions, NormalMesh};

    fn positions() -> Vec<glm::Vec3> {
        vec![
            glm::vec3(0.0, 0.0, 0.0),
            glm::vec3(1.0, 0.0, 0.0),
            glm::vec3(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_valid_mesh_passes() {
        let ids = IdGenerator::new();
        let mesh = NormalMesh::new(
            &ids,
            vec![0, 1, 2],
            positions(),
            vec![glm::vec3(0.0, 0.0, 1.0); 3],
        );
        assert!(validate(&mesh).is_ok());
    }

    #[test]
    fn test_out_of_range_index() {
        let ids = IdGenerator::new();
        let mesh = IndexedPositions::new(&ids, vec![0, 1, 3], positions());
        let err = check_indices(&mesh).unwrap_err();
        assert!(err.to_string().contains("index 3 at 2"));
    }

    #[test]
    fn test_empty_mesh_is_valid() {
        let ids = IdGenerator::new();
        let mesh = IndexedPositions::new(&ids, vec![], vec![]);
        assert!(validate(&mesh).is_ok());
    }
}
