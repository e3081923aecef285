//! Seam to the device-buffer uploader.
//!
//! The uploader owns device memory; this side decides when a copy is needed
//! and keeps each mesh's tracker in step with what the uploader did.

use crate::common::{BufferState, MeshId};
use crate::mesh::validate;
use crate::mesh::{
    AttributeFlags, AttributeSet, IndexedGeometry, Mesh, MeshKind, VertexBoneData,
};
use anyhow::Context;
use std::mem::size_of;

pub trait DeviceUploader {
    /// Copies one mesh into device memory, replacing whatever `id` held.
    fn upload(
        &mut self,
        id: MeshId,
        layout: VertexLayout,
        vertices: &[u8],
        indices: &[u32],
    ) -> anyhow::Result<()>;

    fn release(&mut self, id: MeshId);
}

/// Interleaved per-vertex layout: position, then each present attribute in
/// flag order. Packed meshes upload their packed coordinates only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: AttributeFlags,
}

impl VertexLayout {
    pub fn new(attributes: AttributeFlags) -> Self {
        VertexLayout { attributes }
    }

    pub fn for_kind(kind: MeshKind) -> Self {
        Self::new(kind.attributes())
    }

    pub fn attributes(&self) -> AttributeFlags {
        self.attributes
    }

    /// Bytes per vertex.
    pub fn stride(&self) -> usize {
        let mut stride = 12; // position: f32x3

        if self.attributes.contains(AttributeFlags::NORMAL) {
            stride += 12;
        }
        if self.attributes.contains(AttributeFlags::COLOR) {
            stride += 12;
        }
        if self.attributes.contains(AttributeFlags::TEXTURE) {
            stride += 8;
        }
        if self.attributes.contains(AttributeFlags::PACKED_TEXTURE) {
            stride += 8;
        }
        if self.attributes.contains(AttributeFlags::BONES) {
            stride += size_of::<VertexBoneData>();
        }

        stride
    }
}

fn push_vec3(bytes: &mut Vec<u8>, v: &glm::Vec3) {
    bytes.extend_from_slice(bytemuck::cast_slice(&[v.x, v.y, v.z]));
}

fn push_vec2(bytes: &mut Vec<u8>, v: &glm::Vec2) {
    bytes.extend_from_slice(bytemuck::cast_slice(&[v.x, v.y]));
}

/// Packs the mesh's vertex arrays into one buffer laid out as
/// [`VertexLayout::new(mesh.attributes())`](VertexLayout).
pub fn interleave(mesh: &Mesh) -> Vec<u8> {
    let layout = VertexLayout::new(mesh.attributes());
    let mut bytes = Vec::with_capacity(layout.stride() * mesh.positions().len());

    for (i, p) in mesh.positions().iter().enumerate() {
        push_vec3(&mut bytes, p);
        if let Some(normals) = mesh.normals() {
            push_vec3(&mut bytes, &normals[i]);
        }
        if let Some(colors) = mesh.rgb_colors() {
            push_vec3(&mut bytes, &colors[i]);
        }
        if let Some(uvs) = mesh.texture_coordinates() {
            push_vec2(&mut bytes, &uvs[i]);
        }
        if let Some(uvs) = mesh.packed_texture_coordinates() {
            push_vec2(&mut bytes, &uvs[i]);
        }
        if let Some(bones) = mesh.bone_data() {
            bytes.extend_from_slice(bytemuck::bytes_of(&bones[i]));
        }
    }

    bytes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    validate: bool,
}

impl SyncOptions {
    pub fn new() -> Self {
        SyncOptions {
            validate: cfg!(debug_assertions),
        }
    }

    /// Run length and index checks before every upload.
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn validates(&self) -> bool {
        self.validate
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Uploaded,
    Reuploaded,
    Skipped,
}

/// Uploads `mesh` if the device has no copy or a stale one, then marks it
/// buffered. A failed upload leaves the tracker as it was.
pub fn sync<U>(
    log: &slog::Logger,
    uploader: &mut U,
    mesh: &mut Mesh,
    options: &SyncOptions,
) -> anyhow::Result<SyncOutcome>
where
    U: DeviceUploader + ?Sized,
{
    let log = log.new(o!("module" => "upload", "mesh" => mesh.id()));

    let outcome = match mesh.tracker().state() {
        BufferState::BufferedClean => {
            trace!(log, "device copy is current");
            return Ok(SyncOutcome::Skipped);
        }
        BufferState::NoBuffer => SyncOutcome::Uploaded,
        BufferState::BufferedDirty => SyncOutcome::Reuploaded,
    };

    if options.validate {
        if let Err(e) = validate::validate(&*mesh) {
            warn!(log, "refusing to upload invalid mesh: {}", e);
            return Err(e.context(format!("validating mesh {}", mesh.id())));
        }
    }

    let layout = VertexLayout::new(mesh.attributes());
    let vertices = interleave(mesh);
    uploader
        .upload(mesh.id(), layout, &vertices, mesh.indices())
        .with_context(|| format!("uploading mesh {}", mesh.id()))?;
    mesh.tracker_mut().mark_buffered();

    debug!(
        log,
        "{:?} {} vertices ({} bytes), {} indices",
        outcome,
        mesh.positions().len(),
        vertices.len(),
        mesh.indices().len()
    );

    Ok(outcome)
}

/// Frees the device copy if there is one. Returns whether anything was freed.
pub fn release<U>(log: &slog::Logger, uploader: &mut U, mesh: &mut Mesh) -> bool
where
    U: DeviceUploader + ?Sized,
{
    if !mesh.tracker().is_resident() {
        return false;
    }

    uploader.release(mesh.id());
    mesh.tracker_mut().mark_freed();
    debug!(log, "released mesh {}", mesh.id(); "module" => "upload");

    true
}
