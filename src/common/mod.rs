pub mod id;
pub mod math;
pub mod tracker;
pub mod transform;

pub use id::{IdGenerator, Identity, MeshId};
pub use tracker::{BufferState, ModificationTracker};
pub use transform::{SpatialTransform, Transform};

/// Vertices per primitive; every index buffer is a triangle list.
pub const PRIMITIVE_SIZE: usize = 3;
