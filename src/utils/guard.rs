/// Runs a cleanup closure when dropped.
///
/// Used to hand the terminal back to the shell however the event loop ends:
/// normal return, `?` on an error, or a panic unwinding through `main`.
///
/// ```
/// use shist::utils::guard::RestoreGuard;
///
/// let _guard = RestoreGuard::with(|| println!("terminal restored"));
/// ```
pub struct RestoreGuard<F: FnOnce()> {
    on_drop: Option<F>,
}

impl<F: FnOnce()> RestoreGuard<F> {
    pub fn with(f: F) -> Self {
        Self { on_drop: Some(f) }
    }
}

impl<F: FnOnce()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(f) = self.on_drop.take() {
            f()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_runs_once_on_drop() {
        let calls = Cell::new(0);
        {
            let _guard = RestoreGuard::with(|| calls.set(calls.get() + 1));
            assert_eq!(calls.get(), 0);
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_runs_during_panic() {
        let calls = Cell::new(0);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = RestoreGuard::with(|| calls.set(calls.get() + 1));
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }
}
