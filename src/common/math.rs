/// Multiplies `p` as a homogeneous point (w = 1) and keeps xyz, without a
/// perspective divide.
pub fn transform_point(m: &glm::Mat4, p: &glm::Vec3) -> glm::Vec3 {
    (m * glm::vec4(p.x, p.y, p.z, 1.0)).xyz()
}

pub fn transform_points(m: &glm::Mat4, points: &mut [glm::Vec3]) {
    for p in points.iter_mut() {
        *p = transform_point(m, p);
    }
}

pub fn translate_points(t: &glm::Vec3, points: &mut [glm::Vec3]) {
    for p in points.iter_mut() {
        *p += t;
    }
}

pub fn scale_points(s: &glm::Vec3, points: &mut [glm::Vec3]) {
    for p in points.iter_mut() {
        *p = p.component_mul(s);
    }
}
