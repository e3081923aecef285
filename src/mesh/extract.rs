use super::variants::IndexedPositions;
use super::IndexedGeometry;
use crate::common::id::IdGenerator;
use itertools::Itertools;

/// Narrows any variant to positions and indices. The copy gets a fresh id
/// from `ids`, no name, an identity transform and no device buffer.
pub fn extract_indexed_positions<G>(mesh: &G, ids: &IdGenerator) -> IndexedPositions
where
    G: IndexedGeometry + ?Sized,
{
    IndexedPositions::new(ids, mesh.indices().to_vec(), mesh.positions().to_vec())
}

pub fn extract_indexed_positions_vec<G>(meshes: &[G], ids: &IdGenerator) -> Vec<IndexedPositions>
where
    G: IndexedGeometry,
{
    meshes
        .iter()
        .map(|mesh| extract_indexed_positions(mesh, ids))
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{BufferState, SpatialTransform};
    use crate::mesh::{AttributeFlags, AttributeSet, NormalMesh};

    fn normal_triangle(ids: &IdGenerator) -> NormalMesh {
        NormalMesh::new(
            ids,
            vec![0, 1, 2],
            vec![
                glm::vec3(0.0, 0.0, 0.0),
                glm::vec3(1.0, 0.0, 0.0),
                glm::vec3(0.0, 1.0, 0.0),
            ],
            vec![glm::vec3(0.0, 0.0, 1.0); 3],
        )
        .with_name("tri")
    }

    #[test]
    fn test_extract_drops_attributes_and_state() {
        let ids = IdGenerator::new();
        let mut mesh = normal_triangle(&ids);
        mesh.tracker_mut().mark_buffered();
        mesh.tracker_mut().mark_modified();
        mesh.transform_mut().set_scale(glm::vec3(2.0, 2.0, 2.0));

        let extracted = extract_indexed_positions(&mesh, &ids);
        assert_eq!(extracted.positions(), mesh.positions());
        assert_eq!(extracted.indices(), mesh.indices());
        assert_eq!(extracted.attributes(), AttributeFlags::empty());
        assert_eq!(extracted.tracker().state(), BufferState::NoBuffer);
        assert_eq!(extracted.transform().scale(), glm::vec3(1.0, 1.0, 1.0));
        assert_eq!(extracted.name(), None);
        assert_ne!(extracted.id(), mesh.id());
    }

    #[test]
    fn test_extract_vec_keeps_order() {
        let ids = IdGenerator::new();
        let mut meshes = vec![normal_triangle(&ids), normal_triangle(&ids)];
        meshes[1].positions_mut()[2] = glm::vec3(0.0, 5.0, 0.0);

        let extracted = extract_indexed_positions_vec(&meshes, &ids);
        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted[1].positions()[2], glm::vec3(0.0, 5.0, 0.0));
        assert!(extracted[0].id() < extracted[1].id());
    }
}
