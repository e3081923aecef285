//! Host-side mesh records.
//!
//! Every variant is a positions-only mesh ([`IndexedPositions`]) plus a fixed
//! selection of per-vertex attribute components. Attribute access goes
//! through small traits, and variants forward them to the component that
//! owns the data, so each combination is spelled once as a struct
//! declaration rather than as a copy of every accessor.
//!
//! Attribute arrays are exposed as slices: callers may rewrite values in
//! place but can only change lengths through whole-record replacement, which
//! keeps every array parallel to `positions`.

use ambassador::delegatable_trait;

bitflags! {
    /// Per-vertex attributes carried next to positions.
    pub struct AttributeFlags: u8 {
        const NORMAL = 1;
        const COLOR = 2;
        const TEXTURE = 4;
        const PACKED_TEXTURE = 8;
        const BONES = 16;
    }
}

#[delegatable_trait]
pub trait IndexedGeometry {
    fn id(&self) -> crate::common::id::MeshId;
    fn set_id(&mut self, id: crate::common::id::MeshId);
    fn name(&self) -> Option<&str>;

    fn indices(&self) -> &[u32];
    fn positions(&self) -> &[glm::Vec3];
    fn positions_mut(&mut self) -> &mut [glm::Vec3];

    fn transform(&self) -> &crate::common::transform::Transform;
    fn transform_mut(&mut self) -> &mut crate::common::transform::Transform;

    fn tracker(&self) -> &crate::common::tracker::ModificationTracker;
    fn tracker_mut(&mut self) -> &mut crate::common::tracker::ModificationTracker;
}

#[delegatable_trait]
pub trait AttributeSet {
    fn attributes(&self) -> crate::mesh::AttributeFlags;
    /// Length of every attribute array present, keyed by its flag.
    fn attribute_lengths(&self) -> Vec<(crate::mesh::AttributeFlags, usize)>;
}

#[delegatable_trait]
pub trait Normals {
    fn normals(&self) -> &[glm::Vec3];
    fn normals_mut(&mut self) -> &mut [glm::Vec3];
}

#[delegatable_trait]
pub trait VertexColors {
    fn rgb_colors(&self) -> &[glm::Vec3];
    fn rgb_colors_mut(&mut self) -> &mut [glm::Vec3];
}

#[delegatable_trait]
pub trait Textured {
    fn texture_coordinates(&self) -> &[glm::Vec2];
    fn texture_coordinates_mut(&mut self) -> &mut [glm::Vec2];
    /// Not validated or loaded here.
    fn texture_path(&self) -> &str;
}

/// Fields owned jointly with an external atlas packer. The packer rewrites the
/// packed fields; `original_texture_coordinates` stay as the producer wrote them.
#[delegatable_trait]
pub trait PackedTextured {
    fn original_texture_coordinates(&self) -> &[glm::Vec2];
    fn packed_texture_coordinates(&self) -> &[glm::Vec2];
    fn packed_texture_index(&self) -> i32;
    fn packed_texture_bounding_box_index(&self) -> i32;
    fn packed_texture_path(&self) -> &str;
    fn set_placement(&mut self, placement: crate::mesh::packing::AtlasPlacement);
}

#[delegatable_trait]
pub trait Rigged {
    fn bone_data(&self) -> &[crate::mesh::bones::VertexBoneData];
    fn bone_data_mut(&mut self) -> &mut [crate::mesh::bones::VertexBoneData];
}

pub mod attributes;
pub mod bake;
pub mod bones;
pub mod extract;
pub mod group;
pub mod kind;
pub mod packing;
pub mod validate;
pub mod variants;

pub use attributes::{BoneData, ColorData, NormalData, PackedTextureData, TextureData};
pub use bake::Bake;
pub use bones::{BoneInfo, BoneWeight, VertexBoneData, MAX_BONE_INFLUENCES};
pub use extract::{extract_indexed_positions, extract_indexed_positions_vec};
pub use group::{MeshGroup, PackedTexturedGroup, PositionsGroup, RiggedPackedTexturedGroup};
pub use kind::{Mesh, MeshKind};
pub use packing::{AtlasPacker, AtlasPlacement};
pub use variants::{
    ColoredMesh, IndexedPositions, NormalColoredMesh, NormalMesh, NormalPackedTexturedMesh,
    NormalTexturedMesh, PackedTexturedMesh, RiggedPackedTexturedMesh, RiggedTexturedMesh,
    TexturedMesh,
};
