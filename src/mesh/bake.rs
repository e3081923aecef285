//! Folding the pending transform into vertex positions.
//!
//! Each bake reads one component, applies it to every position, resets that
//! component to identity and marks the mesh modified. Calling a bake again
//! without touching the transform is a geometric no-op but still marks the
//! mesh modified.
//!
//! `bake_transform` uses the composed matrix in one pass. When translation,
//! rotation and scale are all pending this is not the same as baking them one
//! after another.

use super::IndexedGeometry;
use crate::common::math::{scale_points, transform_points, translate_points};
use crate::common::transform::SpatialTransform;

pub trait Bake: IndexedGeometry {
    fn bake_translation(&mut self) {
        let translation = self.transform().translation();
        translate_points(&translation, self.positions_mut());
        self.transform_mut().reset_translation();
        self.tracker_mut().mark_modified();
    }

    fn bake_rotation(&mut self) {
        let rotation = self.transform().rotation_matrix();
        transform_points(&rotation, self.positions_mut());
        self.transform_mut().reset_rotation();
        self.tracker_mut().mark_modified();
    }

    fn bake_scale(&mut self) {
        let scale = self.transform().scale();
        scale_points(&scale, self.positions_mut());
        self.transform_mut().reset_scale();
        self.tracker_mut().mark_modified();
    }

    fn bake_transform(&mut self) {
        let m = self.transform().matrix();
        transform_points(&m, self.positions_mut());
        self.transform_mut().reset();
        self.tracker_mut().mark_modified();
    }
}

impl<G: IndexedGeometry + ?Sized> Bake for G {}
