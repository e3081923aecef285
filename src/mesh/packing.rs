//! Seam to an external texture-atlas packer.

use super::{IndexedGeometry, PackedTextured};
use anyhow::Context;

/// Where one mesh's texture landed in the atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasPlacement {
    pub packed_texture_coordinates: Vec<glm::Vec2>,
    pub packed_texture_index: i32,
    pub packed_texture_bounding_box_index: i32,
}

impl AtlasPlacement {
    pub fn unplaced(texture_coordinates: Vec<glm::Vec2>) -> Self {
        AtlasPlacement {
            packed_texture_coordinates: texture_coordinates,
            packed_texture_index: -1,
            packed_texture_bounding_box_index: -1,
        }
    }
}

pub trait AtlasPacker {
    /// Remaps producer coordinates of `texture_path` into the current atlas layout.
    fn place(
        &mut self,
        texture_path: &str,
        original_texture_coordinates: &[glm::Vec2],
    ) -> anyhow::Result<AtlasPlacement>;
}

/// Rewrites the packed fields only; geometry is untouched. The mesh is marked
/// modified since the packed coordinates live in the vertex data.
pub fn apply_placement<M>(mesh: &mut M, placement: AtlasPlacement)
where
    M: IndexedGeometry + PackedTextured + ?Sized,
{
    mesh.set_placement(placement);
    mesh.tracker_mut().mark_modified();
}

/// Asks the packer for a fresh placement of every mesh, in order. Stops at the
/// first mesh the packer rejects; meshes before it keep their new placement.
pub fn repack_all<M, P>(
    log: &slog::Logger,
    meshes: &mut [M],
    packer: &mut P,
) -> anyhow::Result<()>
where
    M: IndexedGeometry + PackedTextured,
    P: AtlasPacker + ?Sized,
{
    let log = log.new(o!("module" => "packing"));

    for mesh in meshes.iter_mut() {
        let placement = packer
            .place(mesh.packed_texture_path(), mesh.original_texture_coordinates())
            .with_context(|| {
                format!(
                    "packing {} for mesh {}",
                    mesh.packed_texture_path(),
                    mesh.id()
                )
            })?;

        let vertex_count = mesh.original_texture_coordinates().len();
        if placement.packed_texture_coordinates.len() != vertex_count {
            anyhow::bail!(
                "packer returned {} coordinates for mesh {} with {} vertices",
                placement.packed_texture_coordinates.len(),
                mesh.id(),
                vertex_count
            );
        }

        trace!(
            log,
            "mesh {} placed in atlas {} box {}",
            mesh.id(),
            placement.packed_texture_index,
            placement.packed_texture_bounding_box_index
        );
        apply_placement(mesh, placement);
    }

    debug!(log, "repacked {} meshes", meshes.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::IdGenerator;
    use crate::mesh::PackedTexturedMesh;

    fn discard() -> slog::Logger {
        slog::Logger::root(slog::Discard, o!())
    }

    /// Squeezes every texture into one quadrant per call.
    struct QuadrantPacker {
        next_box: i32,
    }

    impl AtlasPacker for QuadrantPacker {
        fn place(
            &mut self,
            _texture_path: &str,
            original: &[glm::Vec2],
        ) -> anyhow::Result<AtlasPlacement> {
            let offset = glm::vec2(0.5 * (self.next_box % 2) as f32, 0.0);
            let placement = AtlasPlacement {
                packed_texture_coordinates: original
                    .iter()
                    .map(|uv| uv * 0.5 + offset)
                    .collect(),
                packed_texture_index: 0,
                packed_texture_bounding_box_index: self.next_box,
            };
            self.next_box += 1;
            Ok(placement)
        }
    }

    struct RejectingPacker;

    impl AtlasPacker for RejectingPacker {
        fn place(
            &mut self,
            texture_path: &str,
            _: &[glm::Vec2],
        ) -> anyhow::Result<AtlasPlacement> {
            anyhow::bail!("{} does not fit", texture_path)
        }
    }

    fn quad(ids: &IdGenerator) -> PackedTexturedMesh {
        PackedTexturedMesh::unpacked(
            ids,
            vec![0, 1, 2, 2, 3, 0],
            vec![
                glm::vec3(0.0, 0.0, 0.0),
                glm::vec3(1.0, 0.0, 0.0),
                glm::vec3(1.0, 1.0, 0.0),
                glm::vec3(0.0, 1.0, 0.0),
            ],
            vec![
                glm::vec2(0.0, 0.0),
                glm::vec2(1.0, 0.0),
                glm::vec2(1.0, 1.0),
                glm::vec2(0.0, 1.0),
            ],
            "crate.png",
        )
    }

    #[test]
    fn test_repack_rewrites_only_packed_fields() {
        let ids = IdGenerator::new();
        let mut meshes = vec![quad(&ids), quad(&ids)];
        let positions_before = meshes[1].positions().to_vec();

        let mut packer = QuadrantPacker { next_box: 0 };
        repack_all(&discard(), &mut meshes, &mut packer).unwrap();

        assert_eq!(meshes[0].packed_texture_bounding_box_index(), 0);
        assert_eq!(meshes[1].packed_texture_bounding_box_index(), 1);
        assert_eq!(meshes[1].packed_texture_coordinates()[2], glm::vec2(1.0, 0.5));
        assert_eq!(meshes[1].original_texture_coordinates()[2], glm::vec2(1.0, 1.0));
        assert_eq!(meshes[1].positions(), &positions_before[..]);
    }

    #[test]
    fn test_placement_dirties_resident_mesh() {
        let ids = IdGenerator::new();
        let mut mesh = quad(&ids);
        mesh.tracker_mut().mark_buffered();

        let placement = AtlasPlacement {
            packed_texture_coordinates: mesh.original_texture_coordinates().to_vec(),
            packed_texture_index: 1,
            packed_texture_bounding_box_index: 3,
        };
        apply_placement(&mut mesh, placement);
        assert!(mesh.tracker().needs_reupload());
    }

    #[test]
    fn test_rejected_placement_is_an_error() {
        let ids = IdGenerator::new();
        let mut meshes = vec![quad(&ids)];
        let err = repack_all(&discard(), &mut meshes, &mut RejectingPacker).unwrap_err();
        assert!(format!("{:#}", err).contains("crate.png does not fit"));
        assert_eq!(meshes[0].packed_texture_index(), -1);
    }
}
