use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    NoBuffer,
    BufferedClean,
    BufferedDirty,
}

/// Tracks whether host-side mesh data diverges from what the device holds.
///
/// A mesh that was never uploaded is never dirty: there is nothing to be
/// stale relative to until a first upload happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModificationTracker {
    state: BufferState,
}

impl ModificationTracker {
    pub fn new() -> Self {
        ModificationTracker {
            state: BufferState::NoBuffer,
        }
    }

    pub fn state(&self) -> BufferState {
        self.state
    }

    /// No-op while nothing is resident.
    pub fn mark_modified(&mut self) {
        if self.state != BufferState::NoBuffer {
            self.state = BufferState::BufferedDirty;
        }
    }

    pub fn mark_buffered(&mut self) {
        self.state = BufferState::BufferedClean;
    }

    pub fn mark_freed(&mut self) {
        self.state = BufferState::NoBuffer;
    }

    pub fn is_resident(&self) -> bool {
        matches!(
            self.state,
            BufferState::BufferedClean | BufferState::BufferedDirty
        )
    }

    pub fn needs_reupload(&self) -> bool {
        self.state == BufferState::BufferedDirty
    }
}

impl Default for ModificationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModificationTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ModificationTracker {{ resident = {}, needs_reupload = {} }}",
            self.is_resident(),
            self.needs_reupload()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modified_without_buffer_is_noop() {
        let mut tracker = ModificationTracker::new();
        for _ in 0..5 {
            tracker.mark_modified();
        }
        assert_eq!(tracker.state(), BufferState::NoBuffer);
        assert!(!tracker.needs_reupload());
        assert!(!tracker.is_resident());
    }

    #[test]
    fn test_buffer_modify_rebuffer() {
        let mut tracker = ModificationTracker::new();
        tracker.mark_buffered();
        assert!(tracker.is_resident());
        assert!(!tracker.needs_reupload());

        tracker.mark_modified();
        assert!(tracker.needs_reupload());
        tracker.mark_modified();
        assert_eq!(tracker.state(), BufferState::BufferedDirty);

        tracker.mark_buffered();
        assert!(!tracker.needs_reupload());
        assert!(tracker.is_resident());
    }

    #[test]
    fn test_freed_from_any_state() {
        let mut clean = ModificationTracker::new();
        clean.mark_buffered();

        let mut dirty = clean;
        dirty.mark_modified();

        for mut tracker in vec![ModificationTracker::new(), clean, dirty] {
            tracker.mark_freed();
            assert_eq!(tracker.state(), BufferState::NoBuffer);
            assert!(!tracker.is_resident());
            assert!(!tracker.needs_reupload());
        }
    }

    #[test]
    fn test_display() {
        let mut tracker = ModificationTracker::new();
        tracker.mark_buffered();
        tracker.mark_modified();
        assert_eq!(
            tracker.to_string(),
            "ModificationTracker { resident = true, needs_reupload = true }"
        );
    }
}
