use super::bones::VertexBoneData;
use super::variants::*;
use super::{
    AttributeFlags, AttributeSet, IndexedGeometry, Normals, PackedTextured, Rigged, Textured,
    VertexColors,
};
use ambassador::Delegate;
use std::fmt;

/// Any mesh variant, for collections that hold more than one kind.
#[derive(Debug, Clone, PartialEq, Delegate)]
#[delegate(IndexedGeometry)]
#[delegate(AttributeSet)]
pub enum Mesh {
    Positions(IndexedPositions),
    Colored(ColoredMesh),
    Normal(NormalMesh),
    NormalColored(NormalColoredMesh),
    Textured(TexturedMesh),
    NormalTextured(NormalTexturedMesh),
    PackedTextured(PackedTexturedMesh),
    NormalPackedTextured(NormalPackedTexturedMesh),
    RiggedTextured(RiggedTexturedMesh),
    RiggedPackedTextured(RiggedPackedTexturedMesh),
}

/// The attribute combinations that name a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Positions,
    Colored,
    Normal,
    NormalColored,
    Textured,
    NormalTextured,
    PackedTextured,
    NormalPackedTextured,
    RiggedTextured,
    RiggedPackedTextured,
}

impl MeshKind {
    pub const ALL: [MeshKind; 10] = [
        MeshKind::Positions,
        MeshKind::Colored,
        MeshKind::Normal,
        MeshKind::NormalColored,
        MeshKind::Textured,
        MeshKind::NormalTextured,
        MeshKind::PackedTextured,
        MeshKind::NormalPackedTextured,
        MeshKind::RiggedTextured,
        MeshKind::RiggedPackedTextured,
    ];

    pub fn attributes(self) -> AttributeFlags {
        match self {
            MeshKind::Positions => AttributeFlags::empty(),
            MeshKind::Colored => AttributeFlags::COLOR,
            MeshKind::Normal => AttributeFlags::NORMAL,
            MeshKind::NormalColored => AttributeFlags::NORMAL | AttributeFlags::COLOR,
            MeshKind::Textured => AttributeFlags::TEXTURE,
            MeshKind::NormalTextured => AttributeFlags::NORMAL | AttributeFlags::TEXTURE,
            MeshKind::PackedTextured => AttributeFlags::PACKED_TEXTURE,
            MeshKind::NormalPackedTextured => {
                AttributeFlags::NORMAL | AttributeFlags::PACKED_TEXTURE
            }
            MeshKind::RiggedTextured => {
                AttributeFlags::NORMAL | AttributeFlags::TEXTURE | AttributeFlags::BONES
            }
            MeshKind::RiggedPackedTextured => {
                AttributeFlags::NORMAL | AttributeFlags::PACKED_TEXTURE | AttributeFlags::BONES
            }
        }
    }

    /// `None` when no variant carries exactly `flags`.
    pub fn from_attributes(flags: AttributeFlags) -> Option<MeshKind> {
        MeshKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.attributes() == flags)
    }
}

macro_rules! mesh_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for Mesh {
                fn from(mesh: $ty) -> Self {
                    Mesh::$variant(mesh)
                }
            }
        )+
    };
}

mesh_from!(
    Positions(IndexedPositions),
    Colored(ColoredMesh),
    Normal(NormalMesh),
    NormalColored(NormalColoredMesh),
    Textured(TexturedMesh),
    NormalTextured(NormalTexturedMesh),
    PackedTextured(PackedTexturedMesh),
    NormalPackedTextured(NormalPackedTexturedMesh),
    RiggedTextured(RiggedTexturedMesh),
    RiggedPackedTextured(RiggedPackedTexturedMesh),
);

macro_rules! optional_attribute {
    ($name:ident -> $ty:ty, [$($variant:ident),+]) => {
        pub fn $name(&self) -> Option<$ty> {
            match self {
                $(Mesh::$variant(m) => Some(m.$name()),)+
                _ => None,
            }
        }
    };
}

impl Mesh {
    pub fn kind(&self) -> MeshKind {
        match self {
            Mesh::Positions(_) => MeshKind::Positions,
            Mesh::Colored(_) => MeshKind::Colored,
            Mesh::Normal(_) => MeshKind::Normal,
            Mesh::NormalColored(_) => MeshKind::NormalColored,
            Mesh::Textured(_) => MeshKind::Textured,
            Mesh::NormalTextured(_) => MeshKind::NormalTextured,
            Mesh::PackedTextured(_) => MeshKind::PackedTextured,
            Mesh::NormalPackedTextured(_) => MeshKind::NormalPackedTextured,
            Mesh::RiggedTextured(_) => MeshKind::RiggedTextured,
            Mesh::RiggedPackedTextured(_) => MeshKind::RiggedPackedTextured,
        }
    }

    optional_attribute!(normals -> &[glm::Vec3], [
        Normal,
        NormalColored,
        NormalTextured,
        NormalPackedTextured,
        RiggedTextured,
        RiggedPackedTextured
    ]);

    optional_attribute!(rgb_colors -> &[glm::Vec3], [Colored, NormalColored]);

    optional_attribute!(texture_coordinates -> &[glm::Vec2], [
        Textured,
        NormalTextured,
        RiggedTextured
    ]);

    optional_attribute!(texture_path -> &str, [Textured, NormalTextured, RiggedTextured]);

    optional_attribute!(original_texture_coordinates -> &[glm::Vec2], [
        PackedTextured,
        NormalPackedTextured,
        RiggedPackedTextured
    ]);

    optional_attribute!(packed_texture_coordinates -> &[glm::Vec2], [
        PackedTextured,
        NormalPackedTextured,
        RiggedPackedTextured
    ]);

    optional_attribute!(packed_texture_index -> i32, [
        PackedTextured,
        NormalPackedTextured,
        RiggedPackedTextured
    ]);

    optional_attribute!(packed_texture_path -> &str, [
        PackedTextured,
        NormalPackedTextured,
        RiggedPackedTextured
    ]);

    optional_attribute!(bone_data -> &[VertexBoneData], [RiggedTextured, RiggedPackedTextured]);

    /// Bulk replacement across the enum; both sides must be the same kind.
    pub fn copy_draw_data_from(&mut self, other: &Mesh) -> anyhow::Result<()> {
        match (self, other) {
            (Mesh::Positions(m), Mesh::Positions(o)) => m.copy_draw_data_from(o),
            (Mesh::Colored(m), Mesh::Colored(o)) => m.copy_draw_data_from(o),
            (Mesh::Normal(m), Mesh::Normal(o)) => m.copy_draw_data_from(o),
            (Mesh::NormalColored(m), Mesh::NormalColored(o)) => m.copy_draw_data_from(o),
            (Mesh::Textured(m), Mesh::Textured(o)) => m.copy_draw_data_from(o),
            (Mesh::NormalTextured(m), Mesh::NormalTextured(o)) => m.copy_draw_data_from(o),
            (Mesh::PackedTextured(m), Mesh::PackedTextured(o)) => m.copy_draw_data_from(o),
            (Mesh::NormalPackedTextured(m), Mesh::NormalPackedTextured(o)) => {
                m.copy_draw_data_from(o)
            }
            (Mesh::RiggedTextured(m), Mesh::RiggedTextured(o)) => m.copy_draw_data_from(o),
            (Mesh::RiggedPackedTextured(m), Mesh::RiggedPackedTextured(o)) => {
                m.copy_draw_data_from(o)
            }
            (m, o) => anyhow::bail!(
                "cannot copy {:?} draw data into {:?} mesh {}",
                o.kind(),
                m.kind(),
                m.id()
            ),
        }

        Ok(())
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mesh {} ({:?}", self.id(), self.kind())?;
        if let Some(name) = self.name() {
            write!(f, " \"{}\"", name)?;
        }
        write!(
            f,
            ", {} vertices, {} indices, {})",
            self.positions().len(),
            self.indices().len(),
            self.tracker()
        )
    }
}
