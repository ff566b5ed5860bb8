//! Cooperative cancellation for long searches.
//!
//! A [`CancelToken`] is a cloneable handle around a shared flag. The solver
//! checks it once per iteration; setting it from any thread stops the run
//! at the next iteration boundary with the best candidate found so far.
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Clones share the flag, so a caller can keep one handle and pass the
    // other into the configuration.
    fn clones_observe_cancellation() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!handle.is_cancelled());

        token.cancel();

        assert!(handle.is_cancelled());
    }

    #[test]
    fn cancel_from_another_thread_is_visible() {
        let token = CancelToken::new();
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(token.is_cancelled());
    }
}
