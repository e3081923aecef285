use super::attributes::{BoneData, ColorData, NormalData, PackedTextureData, TextureData};
use super::bones::VertexBoneData;
use super::validate::debug_assert_parallel;
use super::{
    AttributeFlags, AttributeSet, IndexedGeometry, Normals, PackedTextured, Rigged, Textured,
    VertexColors,
};
use crate::common::id::{IdGenerator, Identity, MeshId};
use crate::common::tracker::ModificationTracker;
use crate::common::transform::Transform;
use crate::common::PRIMITIVE_SIZE;
use ambassador::Delegate;

/// The minimal drawable: indices into a list of positions.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPositions {
    id: MeshId,
    name: Option<String>,
    indices: Vec<u32>,
    positions: Vec<glm::Vec3>,
    transform: Transform,
    tracker: ModificationTracker,
}

impl IndexedPositions {
    pub fn new(ids: &IdGenerator, indices: Vec<u32>, positions: Vec<glm::Vec3>) -> Self {
        Self::with_id(ids.next_id(), indices, positions)
    }

    pub fn with_id(id: MeshId, indices: Vec<u32>, positions: Vec<glm::Vec3>) -> Self {
        debug_assert!(
            indices.len() % PRIMITIVE_SIZE == 0,
            "index count {} is not a multiple of {}",
            indices.len(),
            PRIMITIVE_SIZE
        );
        IndexedPositions {
            id,
            name: None,
            indices,
            positions,
            transform: Transform::identity(),
            tracker: ModificationTracker::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / PRIMITIVE_SIZE
    }

    pub fn copy_draw_data_from(&mut self, other: &Self) {
        self.replace_geometry(other);
        self.tracker.mark_modified();
    }

    /// Prepares this record to become the base of a wider variant: the new
    /// variant has its own device layout, so it starts without a buffer.
    fn widen(mut self, identity: Identity) -> Self {
        self.id = identity.resolve(self.id);
        self.tracker = ModificationTracker::new();
        self
    }

    fn replace_geometry(&mut self, other: &Self) {
        self.indices = other.indices.clone();
        self.positions = other.positions.clone();
    }
}

impl IndexedGeometry for IndexedPositions {
    fn id(&self) -> MeshId {
        self.id
    }

    fn set_id(&mut self, id: MeshId) {
        self.id = id;
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn indices(&self) -> &[u32] {
        &self.indices
    }

    fn positions(&self) -> &[glm::Vec3] {
        &self.positions
    }

    fn positions_mut(&mut self) -> &mut [glm::Vec3] {
        &mut self.positions
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn tracker(&self) -> &ModificationTracker {
        &self.tracker
    }

    fn tracker_mut(&mut self) -> &mut ModificationTracker {
        &mut self.tracker
    }
}

impl AttributeSet for IndexedPositions {
    fn attributes(&self) -> AttributeFlags {
        AttributeFlags::empty()
    }

    fn attribute_lengths(&self) -> Vec<(AttributeFlags, usize)> {
        vec![]
    }
}

/// Shared impls for a variant built from `base` plus the listed components.
macro_rules! mesh_variant {
    ($name:ident { $($component:ident),+ }) => {
        impl $name {
            pub fn with_name(mut self, name: impl Into<String>) -> Self {
                self.base.name = Some(name.into());
                self
            }

            pub fn base(&self) -> &IndexedPositions {
                &self.base
            }

            pub fn vertex_count(&self) -> usize {
                self.base.vertex_count()
            }

            /// Replaces indices, positions and every attribute array with
            /// `other`'s. Identity, name and the pending transform are kept.
            pub fn copy_draw_data_from(&mut self, other: &Self) {
                self.base.replace_geometry(&other.base);
                $(self.$component = other.$component.clone();)+
                debug_assert_parallel(&*self);
                self.base.tracker.mark_modified();
            }
        }

        impl AttributeSet for $name {
            fn attributes(&self) -> AttributeFlags {
                AttributeFlags::empty() $(| self.$component.attributes())+
            }

            fn attribute_lengths(&self) -> Vec<(AttributeFlags, usize)> {
                let mut lengths = Vec::new();
                $(lengths.extend(self.$component.attribute_lengths());)+
                lengths
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Delegate)]
#[delegate(IndexedGeometry, target = "base")]
#[delegate(VertexColors, target = "colors")]
pub struct ColoredMesh {
    base: IndexedPositions,
    colors: ColorData,
}

mesh_variant!(ColoredMesh { colors });

impl ColoredMesh {
    pub fn new(
        ids: &IdGenerator,
        indices: Vec<u32>,
        positions: Vec<glm::Vec3>,
        rgb_colors: Vec<glm::Vec3>,
    ) -> Self {
        Self::from_positions(
            IndexedPositions::new(ids, indices, positions),
            rgb_colors,
            Identity::Preserve,
        )
    }

    pub fn from_positions(
        base: IndexedPositions,
        rgb_colors: Vec<glm::Vec3>,
        identity: Identity,
    ) -> Self {
        let mesh = ColoredMesh {
            base: base.widen(identity),
            colors: ColorData::new(rgb_colors),
        };
        debug_assert_parallel(&mesh);
        mesh
    }

    /// Every vertex gets `color`.
    pub fn uniform(base: IndexedPositions, color: glm::Vec3, identity: Identity) -> Self {
        let vertex_count = base.vertex_count();
        ColoredMesh {
            base: base.widen(identity),
            colors: ColorData::uniform(color, vertex_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Delegate)]
#[delegate(IndexedGeometry, target = "base")]
#[delegate(Normals, target = "normals")]
pub struct NormalMesh {
    base: IndexedPositions,
    normals: NormalData,
}

mesh_variant!(NormalMesh { normals });

impl NormalMesh {
    pub fn new(
        ids: &IdGenerator,
        indices: Vec<u32>,
        positions: Vec<glm::Vec3>,
        normals: Vec<glm::Vec3>,
    ) -> Self {
        Self::from_positions(
            IndexedPositions::new(ids, indices, positions),
            normals,
            Identity::Preserve,
        )
    }

    pub fn from_positions(
        base: IndexedPositions,
        normals: Vec<glm::Vec3>,
        identity: Identity,
    ) -> Self {
        let mesh = NormalMesh {
            base: base.widen(identity),
            normals: NormalData::new(normals),
        };
        debug_assert_parallel(&mesh);
        mesh
    }
}

#[derive(Debug, Clone, PartialEq, Delegate)]
#[delegate(IndexedGeometry, target = "base")]
#[delegate(Normals, target = "normals")]
#[delegate(VertexColors, target = "colors")]
pub struct NormalColoredMesh {
    base: IndexedPositions,
    normals: NormalData,
    colors: ColorData,
}

mesh_variant!(NormalColoredMesh { normals, colors });

impl NormalColoredMesh {
    pub fn new(
        ids: &IdGenerator,
        indices: Vec<u32>,
        positions: Vec<glm::Vec3>,
        normals: Vec<glm::Vec3>,
        rgb_colors: Vec<glm::Vec3>,
    ) -> Self {
        Self::from_normals(
            NormalMesh::new(ids, indices, positions, normals),
            rgb_colors,
            Identity::Preserve,
        )
    }

    pub fn from_normals(base: NormalMesh, rgb_colors: Vec<glm::Vec3>, identity: Identity) -> Self {
        let mesh = NormalColoredMesh {
            base: base.base.widen(identity),
            normals: base.normals,
            colors: ColorData::new(rgb_colors),
        };
        debug_assert_parallel(&mesh);
        mesh
    }

    pub fn uniform(base: NormalMesh, color: glm::Vec3, identity: Identity) -> Self {
        let vertex_count = base.vertex_count();
        Self::from_normals(base, vec![color; vertex_count], identity)
    }
}

#[derive(Debug, Clone, PartialEq, Delegate)]
#[delegate(IndexedGeometry, target = "base")]
#[delegate(Textured, target = "texture")]
pub struct TexturedMesh {
    base: IndexedPositions,
    texture: TextureData,
}

mesh_variant!(TexturedMesh { texture });

impl TexturedMesh {
    pub fn new(
        ids: &IdGenerator,
        indices: Vec<u32>,
        positions: Vec<glm::Vec3>,
        texture_coordinates: Vec<glm::Vec2>,
        texture_path: impl Into<String>,
    ) -> Self {
        Self::from_positions(
            IndexedPositions::new(ids, indices, positions),
            TextureData::new(texture_coordinates, texture_path),
            Identity::Preserve,
        )
    }

    pub fn from_positions(base: IndexedPositions, texture: TextureData, identity: Identity) -> Self {
        let mesh = TexturedMesh {
            base: base.widen(identity),
            texture,
        };
        debug_assert_parallel(&mesh);
        mesh
    }
}

#[derive(Debug, Clone, PartialEq, Delegate)]
#[delegate(IndexedGeometry, target = "base")]
#[delegate(Normals, target = "normals")]
#[delegate(Textured, target = "texture")]
pub struct NormalTexturedMesh {
    base: IndexedPositions,
    normals: NormalData,
    texture: TextureData,
}

mesh_variant!(NormalTexturedMesh { normals, texture });

impl NormalTexturedMesh {
    pub fn new(
        ids: &IdGenerator,
        indices: Vec<u32>,
        positions: Vec<glm::Vec3>,
        normals: Vec<glm::Vec3>,
        texture: TextureData,
    ) -> Self {
        Self::from_normals(
            NormalMesh::new(ids, indices, positions, normals),
            texture,
            Identity::Preserve,
        )
    }

    pub fn from_normals(base: NormalMesh, texture: TextureData, identity: Identity) -> Self {
        let mesh = NormalTexturedMesh {
            base: base.base.widen(identity),
            normals: base.normals,
            texture,
        };
        debug_assert_parallel(&mesh);
        mesh
    }
}

#[derive(Debug, Clone, PartialEq, Delegate)]
#[delegate(IndexedGeometry, target = "base")]
#[delegate(PackedTextured, target = "packed")]
pub struct PackedTexturedMesh {
    base: IndexedPositions,
    packed: PackedTextureData,
}

mesh_variant!(PackedTexturedMesh { packed });

impl PackedTexturedMesh {
    pub fn new(
        ids: &IdGenerator,
        indices: Vec<u32>,
        positions: Vec<glm::Vec3>,
        packed: PackedTextureData,
    ) -> Self {
        Self::from_positions(
            IndexedPositions::new(ids, indices, positions),
            packed,
            Identity::Preserve,
        )
    }

    /// A mesh the packer has not seen yet.
    pub fn unpacked(
        ids: &IdGenerator,
        indices: Vec<u32>,
        positions: Vec<glm::Vec3>,
        original_texture_coordinates: Vec<glm::Vec2>,
        texture_path: impl Into<String>,
    ) -> Self {
        Self::new(
            ids,
            indices,
            positions,
            PackedTextureData::unpacked(original_texture_coordinates, texture_path),
        )
    }

    pub fn from_positions(
        base: IndexedPositions,
        packed: PackedTextureData,
        identity: Identity,
    ) -> Self {
        let mesh = PackedTexturedMesh {
            base: base.widen(identity),
            packed,
        };
        debug_assert_parallel(&mesh);
        mesh
    }
}

#[derive(Debug, Clone, PartialEq, Delegate)]
#[delegate(IndexedGeometry, target = "base")]
#[delegate(Normals, target = "normals")]
#[delegate(PackedTextured, target = "packed")]
pub struct NormalPackedTexturedMesh {
    base: IndexedPositions,
    normals: NormalData,
    packed: PackedTextureData,
}

mesh_variant!(NormalPackedTexturedMesh { normals, packed });

impl NormalPackedTexturedMesh {
    pub fn new(
        ids: &IdGenerator,
        indices: Vec<u32>,
        positions: Vec<glm::Vec3>,
        normals: Vec<glm::Vec3>,
        packed: PackedTextureData,
    ) -> Self {
        Self::from_normals(
            NormalMesh::new(ids, indices, positions, normals),
            packed,
            Identity::Preserve,
        )
    }

    pub fn from_normals(base: NormalMesh, packed: PackedTextureData, identity: Identity) -> Self {
        let mesh = NormalPackedTexturedMesh {
            base: base.base.widen(identity),
            normals: base.normals,
            packed,
        };
        debug_assert_parallel(&mesh);
        mesh
    }
}

#[derive(Debug, Clone, PartialEq, Delegate)]
#[delegate(IndexedGeometry, target = "base")]
#[delegate(Normals, target = "normals")]
#[delegate(Textured, target = "texture")]
#[delegate(Rigged, target = "bones")]
pub struct RiggedTexturedMesh {
    base: IndexedPositions,
    normals: NormalData,
    texture: TextureData,
    bones: BoneData,
}

mesh_variant!(RiggedTexturedMesh { normals, texture, bones });

impl RiggedTexturedMesh {
    pub fn new(
        ids: &IdGenerator,
        indices: Vec<u32>,
        positions: Vec<glm::Vec3>,
        normals: Vec<glm::Vec3>,
        texture: TextureData,
        bone_data: Vec<VertexBoneData>,
    ) -> Self {
        Self::from_textured(
            NormalTexturedMesh::new(ids, indices, positions, normals, texture),
            bone_data,
            Identity::Preserve,
        )
    }

    pub fn from_textured(
        base: NormalTexturedMesh,
        bone_data: Vec<VertexBoneData>,
        identity: Identity,
    ) -> Self {
        let mesh = RiggedTexturedMesh {
            base: base.base.widen(identity),
            normals: base.normals,
            texture: base.texture,
            bones: BoneData::new(bone_data),
        };
        debug_assert_parallel(&mesh);
        mesh
    }
}

#[derive(Debug, Clone, PartialEq, Delegate)]
#[delegate(IndexedGeometry, target = "base")]
#[delegate(Normals, target = "normals")]
#[delegate(PackedTextured, target = "packed")]
#[delegate(Rigged, target = "bones")]
pub struct RiggedPackedTexturedMesh {
    base: IndexedPositions,
    normals: NormalData,
    packed: PackedTextureData,
    bones: BoneData,
}

mesh_variant!(RiggedPackedTexturedMesh { normals, packed, bones });

impl RiggedPackedTexturedMesh {
    pub fn new(
        ids: &IdGenerator,
        indices: Vec<u32>,
        positions: Vec<glm::Vec3>,
        normals: Vec<glm::Vec3>,
        packed: PackedTextureData,
        bone_data: Vec<VertexBoneData>,
    ) -> Self {
        Self::from_packed(
            NormalPackedTexturedMesh::new(ids, indices, positions, normals, packed),
            bone_data,
            Identity::Preserve,
        )
    }

    pub fn from_packed(
        base: NormalPackedTexturedMesh,
        bone_data: Vec<VertexBoneData>,
        identity: Identity,
    ) -> Self {
        let mesh = RiggedPackedTexturedMesh {
            base: base.base.widen(identity),
            normals: base.normals,
            packed: base.packed,
            bones: BoneData::new(bone_data),
        };
        debug_assert_parallel(&mesh);
        mesh
    }
}
