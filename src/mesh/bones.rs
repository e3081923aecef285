pub const MAX_BONE_INFLUENCES: usize = 4;

/// The bones influencing one vertex. Unused slots hold `(0, 0.0)`.
///
/// A slot counts as free when its weight is exactly zero, so a zero-weight
/// influence is indistinguishable from an empty slot and gets overwritten by
/// the next call. Weights summing to one is left to the producer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexBoneData {
    pub bone_ids: [u32; MAX_BONE_INFLUENCES],
    pub weights: [f32; MAX_BONE_INFLUENCES],
}

unsafe impl bytemuck::Zeroable for VertexBoneData {}

unsafe impl bytemuck::Pod for VertexBoneData {}

impl VertexBoneData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the influence in the first free slot. Once all four slots hold a
    /// weight the call is dropped; returns whether it was stored.
    pub fn add_influence(&mut self, bone_id: u32, weight: f32) -> bool {
        for i in 0..MAX_BONE_INFLUENCES {
            if self.weights[i] == 0.0 {
                self.bone_ids[i] = bone_id;
                self.weights[i] = weight;
                return true;
            }
        }

        false
    }

    pub fn influences(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.bone_ids
            .iter()
            .zip(self.weights.iter())
            .filter(|&(_, &w)| w != 0.0)
            .map(|(&id, &w)| (id, w))
    }

    pub fn is_full(&self) -> bool {
        self.weights.iter().all(|&w| w != 0.0)
    }

    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().sum()
    }
}

/// Skeleton-side data for one bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneInfo {
    /// Takes a vertex from mesh-local space into the bone's space in bind pose.
    pub bind_pose_inverse: glm::Mat4,
    /// Animated local-space transform up to this bone; zero until an animation
    /// system fills it in.
    pub animated_transform: glm::Mat4,
}

impl BoneInfo {
    pub fn new(bind_pose_inverse: glm::Mat4) -> Self {
        BoneInfo {
            bind_pose_inverse,
            animated_transform: glm::Mat4::zeros(),
        }
    }
}

/// One `(vertex, bone, weight)` triple as an importer reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneWeight {
    pub vertex: u32,
    pub bone_id: u32,
    pub weight: f32,
}

/// Builds one record per vertex from importer triples, in the order given.
pub fn collect_influences(
    log: &slog::Logger,
    vertex_count: usize,
    weights: &[BoneWeight],
) -> Vec<VertexBoneData> {
    let log = log.new(o!("module" => "bones"));
    let mut bone_data = vec![VertexBoneData::new(); vertex_count];
    let mut dropped = 0usize;

    for w in weights {
        let vertex = w.vertex as usize;
        debug_assert!(
            vertex < vertex_count,
            "bone weight for vertex {} out of range",
            vertex
        );
        if !bone_data[vertex].add_influence(w.bone_id, w.weight) {
            trace!(
                log,
                "vertex {} already has {} influences, dropping bone {}",
                vertex,
                MAX_BONE_INFLUENCES,
                w.bone_id
            );
            dropped += 1;
        }
    }

    if dropped > 0 {
        warn!(
            log,
            "dropped {} bone influences beyond {} per vertex", dropped, MAX_BONE_INFLUENCES
        );
    }

    bone_data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discard() -> slog::Logger {
        slog::Logger::root(slog::Discard, o!())
    }

    #[test]
    fn test_fills_slots_in_call_order() {
        let mut data = VertexBoneData::new();
        assert!(data.add_influence(3, 0.4));
        assert!(data.add_influence(1, 0.3));
        assert!(data.add_influence(7, 0.2));
        assert!(data.add_influence(2, 0.1));

        assert_eq!(data.bone_ids, [3, 1, 7, 2]);
        assert_eq!(data.weights, [0.4, 0.3, 0.2, 0.1]);
        assert!(data.is_full());
    }

    #[test]
    fn test_fifth_influence_is_dropped() {
        let mut data = VertexBoneData::new();
        for (bone, weight) in [(3, 0.4), (1, 0.3), (7, 0.2), (2, 0.1)].iter() {
            data.add_influence(*bone, *weight);
        }
        let before = data;

        // silent drop on overflow is the documented behavior
        assert!(!data.add_influence(9, 0.5));
        assert_eq!(data, before);
    }

    #[test]
    fn test_zero_weight_slot_is_overwritten() {
        let mut data = VertexBoneData::new();
        data.add_influence(5, 0.0);
        assert_eq!(data.bone_ids[0], 5);

        // the zero-weight slot still reads as free
        data.add_influence(6, 0.75);
        assert_eq!(data.bone_ids, [6, 0, 0, 0]);
        assert_eq!(data.weights, [0.75, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_no_bone_id_deduplication() {
        let mut data = VertexBoneData::new();
        data.add_influence(4, 0.5);
        data.add_influence(4, 0.5);
        assert_eq!(data.influences().collect::<Vec<_>>(), vec![(4, 0.5), (4, 0.5)]);
        approx::assert_relative_eq!(data.weight_sum(), 1.0);
    }

    #[test]
    fn test_bone_info_starts_unanimated() {
        let info = BoneInfo::new(glm::translation(&glm::vec3(0.0, -1.0, 0.0)));
        assert_eq!(info.animated_transform, glm::Mat4::zeros());
        assert_eq!(info.bind_pose_inverse[(1, 3)], -1.0);
    }

    #[test]
    fn test_collect_influences() {
        let weights = vec![
            BoneWeight { vertex: 0, bone_id: 0, weight: 1.0 },
            BoneWeight { vertex: 1, bone_id: 0, weight: 0.5 },
            BoneWeight { vertex: 1, bone_id: 1, weight: 0.5 },
        ];
        let data = collect_influences(&discard(), 3, &weights);

        assert_eq!(data.len(), 3);
        assert_eq!(data[0].influences().collect::<Vec<_>>(), vec![(0, 1.0)]);
        assert_eq!(data[1].influences().collect::<Vec<_>>(), vec![(0, 0.5), (1, 0.5)]);
        assert_eq!(data[2], VertexBoneData::new());
    }

    #[test]
    fn test_collect_influences_drops_overflow() {
        let weights = (0..6)
            .map(|bone_id| BoneWeight {
                vertex: 0,
                bone_id,
                weight: 0.1,
            })
            .collect::<Vec<_>>();
        let data = collect_influences(&discard(), 1, &weights);
        assert_eq!(data[0].bone_ids, [0, 1, 2, 3]);
    }
}
