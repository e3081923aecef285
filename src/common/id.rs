use std::sync::atomic::{AtomicU64, Ordering};

pub type MeshId = u64;

/// Monotonic identity source.
///
/// Every constructor takes the generator it draws from, so a test can hand in
/// a fresh one and get a deterministic sequence. Ids are never reclaimed.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

static GLOBAL_IDS: IdGenerator = IdGenerator::new();

impl IdGenerator {
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    pub const fn starting_at(first: MeshId) -> Self {
        IdGenerator {
            next: AtomicU64::new(first),
        }
    }

    /// Process-wide generator shared by producers that have no reason to own one.
    pub fn global() -> &'static IdGenerator {
        &GLOBAL_IDS
    }

    pub fn next_id(&self) -> MeshId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// The id the next call to `next_id` would hand out.
    pub fn peek(&self) -> MeshId {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity policy when one variant is built out of another.
#[derive(Debug, Clone, Copy)]
pub enum Identity<'a> {
    Fresh(&'a IdGenerator),
    Preserve,
}

impl<'a> Identity<'a> {
    pub fn resolve(self, current: MeshId) -> MeshId {
        match self {
            Identity::Fresh(ids) => ids.next_id(),
            Identity::Preserve => current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_ids_are_sequential() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next_id(), 0);
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.peek(), 2);

        let offset = IdGenerator::starting_at(100);
        assert_eq!(offset.next_id(), 100);
    }

    #[test]
    fn test_identity_policy() {
        let ids = IdGenerator::starting_at(7);
        assert_eq!(Identity::Preserve.resolve(3), 3);
        assert_eq!(Identity::Fresh(&ids).resolve(3), 7);
        assert_eq!(ids.peek(), 8);
    }

    #[test]
    fn test_ids_unique_across_threads() {
        let ids = Arc::new(IdGenerator::new());
        let handles = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect::<Vec<_>>();

        let mut all = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect::<Vec<_>>();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 1000);
        assert_eq!(ids.peek(), 1000);
    }
}
