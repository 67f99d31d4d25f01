use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Tracks which widget owns the terminal's current line.
///
/// Clones share the same flag. A running spinner holds the claim until it
/// is terminated or dropped.
#[derive(Debug, Clone, Default)]
pub struct LineGuard(Arc<AtomicBool>);

impl LineGuard {
    /// Claims the line. Returns false if it is already claimed.
    #[must_use]
    pub fn try_claim(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
