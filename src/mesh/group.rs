use super::bake::Bake;
use super::variants::{IndexedPositions, PackedTexturedMesh, RiggedPackedTexturedMesh};
use super::IndexedGeometry;
use crate::common::id::{IdGenerator, MeshId};
use crate::common::math::transform_points;
use crate::common::transform::{SpatialTransform, Transform};

/// Meshes of one kind that move together under an outer transform. Each
/// member keeps its own pending transform, applied before the outer one.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGroup<M> {
    id: MeshId,
    members: Vec<M>,
    transform: Transform,
}

pub type PositionsGroup = MeshGroup<IndexedPositions>;
pub type PackedTexturedGroup = MeshGroup<PackedTexturedMesh>;
pub type RiggedPackedTexturedGroup = MeshGroup<RiggedPackedTexturedMesh>;

impl<M: IndexedGeometry> MeshGroup<M> {
    pub fn new(ids: &IdGenerator, members: Vec<M>) -> Self {
        MeshGroup {
            id: ids.next_id(),
            members,
            transform: Transform::identity(),
        }
    }

    pub fn id(&self) -> MeshId {
        self.id
    }

    pub fn push(&mut self, member: M) {
        self.members.push(member);
    }

    pub fn members(&self) -> &[M] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut [M] {
        &mut self.members
    }

    pub fn into_members(self) -> Vec<M> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Outer transform composed with member `i`'s own.
    pub fn world_matrix(&self, i: usize) -> Option<glm::Mat4> {
        self.members
            .get(i)
            .map(|member| self.transform.matrix() * member.transform().matrix())
    }

    /// Gives the group a new id from `group_ids` and every member a new id
    /// from `member_ids`, in member order.
    pub fn regenerate_identities(&mut self, group_ids: &IdGenerator, member_ids: &IdGenerator) {
        self.id = group_ids.next_id();
        for member in self.members.iter_mut() {
            member.set_id(member_ids.next_id());
        }
    }

    /// Folds each member's transform and then the outer transform into member
    /// positions. Every member is marked modified, and both levels of
    /// transform end up at identity.
    pub fn bake_into_members(&mut self) {
        let outer = self.transform.matrix();
        for member in self.members.iter_mut() {
            member.bake_transform();
            transform_points(&outer, member.positions_mut());
        }
        self.transform.reset();
    }
}

impl<M: IndexedGeometry + Clone> MeshGroup<M> {
    /// A copy that shares no identities with `self`. The copy has never been
    /// uploaded, so its members start without device buffers.
    pub fn clone_with_fresh_identities(
        &self,
        group_ids: &IdGenerator,
        member_ids: &IdGenerator,
    ) -> Self {
        let mut group = self.clone();
        group.regenerate_identities(group_ids, member_ids);
        for member in group.members.iter_mut() {
            member.tracker_mut().mark_freed();
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::math::transform_point;
    use crate::common::BufferState;
    use approx::assert_relative_eq;
    use itertools::Itertools;
    use std::collections::HashSet;

    fn unit_points(ids: &IdGenerator, n: usize) -> Vec<IndexedPositions> {
        (0..n)
            .map(|_| IndexedPositions::new(ids, vec![], vec![glm::vec3(1.0, 0.0, 0.0)]))
            .collect()
    }

    #[test]
    fn test_regenerate_identities_no_collisions() {
        let group_ids = IdGenerator::new();
        let member_ids = IdGenerator::new();

        let mut group = MeshGroup::new(&group_ids, unit_points(&member_ids, 3));
        let mut seen_groups = HashSet::new();
        seen_groups.insert(group.id());
        let mut seen_members = group
            .members()
            .iter()
            .map(|m| m.id())
            .collect::<HashSet<_>>();

        group.regenerate_identities(&group_ids, &member_ids);

        assert!(!seen_groups.contains(&group.id()));
        for member in group.members() {
            assert!(seen_members.insert(member.id()));
        }
        assert_eq!(
            group.members().iter().map(|m| m.id()).collect_vec(),
            vec![3, 4, 5]
        );
        assert_eq!(group.id(), 1);
    }

    #[test]
    fn test_bake_into_members_applies_member_then_outer() {
        let ids = IdGenerator::new();
        let mut group = MeshGroup::new(&ids, unit_points(&ids, 2));
        group.members_mut()[0]
            .transform_mut()
            .set_scale(glm::vec3(2.0, 2.0, 2.0));
        group
            .transform_mut()
            .set_translation(glm::vec3(0.0, 0.0, 5.0));

        let expected = group.world_matrix(0).unwrap();
        group.bake_into_members();

        let p = group.members()[0].positions()[0];
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.z, 5.0);
        assert_eq!(p, transform_point(&expected, &glm::vec3(1.0, 0.0, 0.0)));
        assert_eq!(group.members()[1].positions()[0], glm::vec3(1.0, 0.0, 5.0));
        assert!(group.transform().is_identity());
        assert!(group.members().iter().all(|m| m.transform().is_identity()));
    }

    #[test]
    fn test_clone_with_fresh_identities() {
        let ids = IdGenerator::new();
        let mut group = MeshGroup::new(&ids, unit_points(&ids, 2));
        for member in group.members_mut() {
            member.tracker_mut().mark_buffered();
        }

        let copy = group.clone_with_fresh_identities(&ids, &ids);
        assert_ne!(copy.id(), group.id());
        for (a, b) in group.members().iter().zip_eq(copy.members()) {
            assert_ne!(a.id(), b.id());
            assert_eq!(a.positions(), b.positions());
            assert_eq!(b.tracker().state(), BufferState::NoBuffer);
            assert_eq!(a.tracker().state(), BufferState::BufferedClean);
        }
    }

    #[test]
    fn test_world_matrix_out_of_range() {
        let ids = IdGenerator::new();
        let group: PositionsGroup = MeshGroup::new(&ids, vec![]);
        assert!(group.is_empty());
        assert_eq!(group.world_matrix(0), None);
    }
}
