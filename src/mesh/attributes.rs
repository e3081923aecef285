//! Attribute components. Each one owns the arrays for one capability and is
//! embedded by every variant that carries it.

use super::bones::VertexBoneData;
use super::packing::AtlasPlacement;
use super::{
    AttributeFlags, AttributeSet, Normals, PackedTextured, Rigged, Textured, VertexColors,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalData {
    normals: Vec<glm::Vec3>,
}

impl NormalData {
    pub fn new(normals: Vec<glm::Vec3>) -> Self {
        NormalData { normals }
    }
}

impl Normals for NormalData {
    fn normals(&self) -> &[glm::Vec3] {
        &self.normals
    }

    fn normals_mut(&mut self) -> &mut [glm::Vec3] {
        &mut self.normals
    }
}

impl AttributeSet for NormalData {
    fn attributes(&self) -> AttributeFlags {
        AttributeFlags::NORMAL
    }

    fn attribute_lengths(&self) -> Vec<(AttributeFlags, usize)> {
        vec![(AttributeFlags::NORMAL, self.normals.len())]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorData {
    rgb_colors: Vec<glm::Vec3>,
}

impl ColorData {
    pub fn new(rgb_colors: Vec<glm::Vec3>) -> Self {
        ColorData { rgb_colors }
    }

    pub fn uniform(color: glm::Vec3, vertex_count: usize) -> Self {
        ColorData {
            rgb_colors: vec![color; vertex_count],
        }
    }
}

impl VertexColors for ColorData {
    fn rgb_colors(&self) -> &[glm::Vec3] {
        &self.rgb_colors
    }

    fn rgb_colors_mut(&mut self) -> &mut [glm::Vec3] {
        &mut self.rgb_colors
    }
}

impl AttributeSet for ColorData {
    fn attributes(&self) -> AttributeFlags {
        AttributeFlags::COLOR
    }

    fn attribute_lengths(&self) -> Vec<(AttributeFlags, usize)> {
        vec![(AttributeFlags::COLOR, self.rgb_colors.len())]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextureData {
    texture_coordinates: Vec<glm::Vec2>,
    texture_path: String,
}

impl TextureData {
    pub fn new(texture_coordinates: Vec<glm::Vec2>, texture_path: impl Into<String>) -> Self {
        TextureData {
            texture_coordinates,
            texture_path: texture_path.into(),
        }
    }
}

impl Textured for TextureData {
    fn texture_coordinates(&self) -> &[glm::Vec2] {
        &self.texture_coordinates
    }

    fn texture_coordinates_mut(&mut self) -> &mut [glm::Vec2] {
        &mut self.texture_coordinates
    }

    fn texture_path(&self) -> &str {
        &self.texture_path
    }
}

impl AttributeSet for TextureData {
    fn attributes(&self) -> AttributeFlags {
        AttributeFlags::TEXTURE
    }

    fn attribute_lengths(&self) -> Vec<(AttributeFlags, usize)> {
        vec![(AttributeFlags::TEXTURE, self.texture_coordinates.len())]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackedTextureData {
    original_texture_coordinates: Vec<glm::Vec2>,
    packed_texture_coordinates: Vec<glm::Vec2>,
    packed_texture_index: i32,
    packed_texture_bounding_box_index: i32,
    texture_path: String,
}

impl PackedTextureData {
    pub fn new(
        original_texture_coordinates: Vec<glm::Vec2>,
        placement: AtlasPlacement,
        texture_path: impl Into<String>,
    ) -> Self {
        PackedTextureData {
            original_texture_coordinates,
            packed_texture_coordinates: placement.packed_texture_coordinates,
            packed_texture_index: placement.packed_texture_index,
            packed_texture_bounding_box_index: placement.packed_texture_bounding_box_index,
            texture_path: texture_path.into(),
        }
    }

    /// Not yet placed in any atlas: packed coordinates mirror the originals
    /// and both indices are -1.
    pub fn unpacked(
        original_texture_coordinates: Vec<glm::Vec2>,
        texture_path: impl Into<String>,
    ) -> Self {
        let placement = AtlasPlacement::unplaced(original_texture_coordinates.clone());
        Self::new(original_texture_coordinates, placement, texture_path)
    }
}

impl PackedTextured for PackedTextureData {
    fn original_texture_coordinates(&self) -> &[glm::Vec2] {
        &self.original_texture_coordinates
    }

    fn packed_texture_coordinates(&self) -> &[glm::Vec2] {
        &self.packed_texture_coordinates
    }

    fn packed_texture_index(&self) -> i32 {
        self.packed_texture_index
    }

    fn packed_texture_bounding_box_index(&self) -> i32 {
        self.packed_texture_bounding_box_index
    }

    fn packed_texture_path(&self) -> &str {
        &self.texture_path
    }

    fn set_placement(&mut self, placement: AtlasPlacement) {
        debug_assert_eq!(
            placement.packed_texture_coordinates.len(),
            self.original_texture_coordinates.len(),
            "packed coordinates must stay parallel to the originals"
        );
        self.packed_texture_coordinates = placement.packed_texture_coordinates;
        self.packed_texture_index = placement.packed_texture_index;
        self.packed_texture_bounding_box_index = placement.packed_texture_bounding_box_index;
    }
}

impl AttributeSet for PackedTextureData {
    fn attributes(&self) -> AttributeFlags {
        AttributeFlags::PACKED_TEXTURE
    }

    // both coordinate arrays are per-vertex
    fn attribute_lengths(&self) -> Vec<(AttributeFlags, usize)> {
        vec![
            (
                AttributeFlags::PACKED_TEXTURE,
                self.original_texture_coordinates.len(),
            ),
            (
                AttributeFlags::PACKED_TEXTURE,
                self.packed_texture_coordinates.len(),
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoneData {
    bone_data: Vec<VertexBoneData>,
}

impl BoneData {
    pub fn new(bone_data: Vec<VertexBoneData>) -> Self {
        BoneData { bone_data }
    }
}

impl Rigged for BoneData {
    fn bone_data(&self) -> &[VertexBoneData] {
        &self.bone_data
    }

    fn bone_data_mut(&mut self) -> &mut [VertexBoneData] {
        &mut self.bone_data
    }
}

impl AttributeSet for BoneData {
    fn attributes(&self) -> AttributeFlags {
        AttributeFlags::BONES
    }

    fn attribute_lengths(&self) -> Vec<(AttributeFlags, usize)> {
        vec![(AttributeFlags::BONES, self.bone_data.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_color() {
        let colors = ColorData::uniform(glm::vec3(1.0, 0.0, 0.0), 3);
        assert_eq!(colors.rgb_colors().len(), 3);
        assert!(colors
            .rgb_colors()
            .iter()
            .all(|c| *c == glm::vec3(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_unpacked_mirrors_originals() {
        let uvs = vec![glm::vec2(0.0, 0.0), glm::vec2(1.0, 0.5)];
        let packed = PackedTextureData::unpacked(uvs.clone(), "brick.png");
        assert_eq!(packed.packed_texture_coordinates(), &uvs[..]);
        assert_eq!(packed.packed_texture_index(), -1);
        assert_eq!(packed.packed_texture_bounding_box_index(), -1);
        assert_eq!(packed.packed_texture_path(), "brick.png");
    }

    #[test]
    fn test_set_placement_keeps_originals() {
        let uvs = vec![glm::vec2(0.0, 0.0), glm::vec2(1.0, 1.0)];
        let mut packed = PackedTextureData::unpacked(uvs.clone(), "brick.png");
        packed.set_placement(AtlasPlacement {
            packed_texture_coordinates: vec![glm::vec2(0.5, 0.5), glm::vec2(0.75, 0.75)],
            packed_texture_index: 2,
            packed_texture_bounding_box_index: 7,
        });

        assert_eq!(packed.original_texture_coordinates(), &uvs[..]);
        assert_eq!(packed.packed_texture_coordinates()[1], glm::vec2(0.75, 0.75));
        assert_eq!(packed.packed_texture_index(), 2);
        assert_eq!(packed.packed_texture_bounding_box_index(), 7);
    }
}
