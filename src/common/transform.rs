use std::fmt;

/// What the bake protocol needs from a pending transform: every component can
/// be read and independently reset to its identity value.
pub trait SpatialTransform {
    fn translation(&self) -> glm::Vec3;
    fn reset_translation(&mut self);

    fn rotation_matrix(&self) -> glm::Mat4;
    fn reset_rotation(&mut self);

    fn scale(&self) -> glm::Vec3;
    fn reset_scale(&mut self);

    /// Translation, rotation and scale composed into one matrix.
    fn matrix(&self) -> glm::Mat4;
    fn reset(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    translation: glm::Vec3,
    rotation: na::UnitQuaternion<f32>,
    scale: glm::Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Transform {
            translation: glm::Vec3::zeros(),
            rotation: na::UnitQuaternion::identity(),
            scale: glm::vec3(1.0, 1.0, 1.0),
        }
    }

    pub fn from_parts(
        translation: glm::Vec3,
        rotation: na::UnitQuaternion<f32>,
        scale: glm::Vec3,
    ) -> Self {
        Transform {
            translation,
            rotation,
            scale,
        }
    }

    pub fn rotation(&self) -> na::UnitQuaternion<f32> {
        self.rotation
    }

    pub fn set_translation(&mut self, translation: glm::Vec3) {
        self.translation = translation;
    }

    pub fn translate(&mut self, delta: &glm::Vec3) {
        self.translation += delta;
    }

    pub fn set_rotation(&mut self, rotation: na::UnitQuaternion<f32>) {
        self.rotation = rotation;
    }

    pub fn rotate_axis_angle(&mut self, axis: &glm::Vec3, angle: f32) {
        let delta = na::UnitQuaternion::from_axis_angle(&na::Unit::new_normalize(*axis), angle);
        self.rotation = delta * self.rotation;
    }

    pub fn set_scale(&mut self, scale: glm::Vec3) {
        self.scale = scale;
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform::identity()
    }
}

impl SpatialTransform for Transform {
    fn translation(&self) -> glm::Vec3 {
        self.translation
    }

    fn reset_translation(&mut self) {
        self.translation = glm::Vec3::zeros();
    }

    fn rotation_matrix(&self) -> glm::Mat4 {
        self.rotation.to_homogeneous()
    }

    fn reset_rotation(&mut self) {
        self.rotation = na::UnitQuaternion::identity();
    }

    fn scale(&self) -> glm::Vec3 {
        self.scale
    }

    fn reset_scale(&mut self) {
        self.scale = glm::vec3(1.0, 1.0, 1.0);
    }

    fn matrix(&self) -> glm::Mat4 {
        let t = glm::translation(&self.translation);
        let r = self.rotation.to_homogeneous();
        let s = glm::scaling(&self.scale);

        t * r * s
    }

    fn reset(&mut self) {
        *self = Transform::identity();
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (roll, pitch, yaw) = self.rotation.euler_angles();
        write!(
            f,
            "Transform(translation=({}, {}, {}), rotation=({}, {}, {}), scale=({}, {}, {}))",
            self.translation.x,
            self.translation.y,
            self.translation.z,
            roll,
            pitch,
            yaw,
            self.scale.x,
            self.scale.y,
            self.scale.z
        )
    }
}
