//! # Error Scope
//!
//! Marks an error as "being handled" on the current thread. While an
//! [`ErrorScope`] guard is alive, records with the `DEBUG` label carry the
//! error's report (message, causes and the backtrace if one was captured).
//! Outside any scope the traceback section is simply absent.

use std::cell::RefCell;
use std::marker::PhantomData;

thread_local! {
    static ACTIVE_ERRORS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Guard returned by [`error_scope`]. Dropping it ends the scope.
#[must_use = "the error is only active while the guard is alive"]
#[derive(Debug)]
pub struct ErrorScope {
    depth: usize,
    // the stack is thread-local; keep the guard on its thread
    _not_send: PhantomData<*const ()>,
}

/// Makes `error` the active error for the current thread.
///
/// ```
/// use semantic_log::{error_scope, Logger};
///
/// let logger = Logger::new("scope-doc");
/// let err = anyhow::anyhow!("division by zero");
/// let _scope = error_scope(&err);
/// logger.error(format!("Failure: {}", err));
/// logger.debug("ZeroDivisionError test");
/// ```
pub fn error_scope(error: &anyhow::Error) -> ErrorScope {
    // {:?} on anyhow::Error prints the cause chain and any captured backtrace
    let report = format!("{:?}", error);
    ACTIVE_ERRORS.with(|errors| {
        let mut errors = errors.borrow_mut();
        let depth = errors.len();
        errors.push(report);
        ErrorScope {
            depth,
            _not_send: PhantomData,
        }
    })
}

/// Report of the innermost active error on this thread.
pub fn active_error() -> Option<String> {
    ACTIVE_ERRORS.with(|errors| errors.borrow().last().cloned())
}

impl Drop for ErrorScope {
    fn drop(&mut self) {
        ACTIVE_ERRORS.with(|errors| errors.borrow_mut().truncate(self.depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_no_scope_no_error() {
        assert!(active_error().is_none());
    }

    #[test]
    fn test_scope_sets_and_clears() {
        let err = anyhow::anyhow!("disk full");
        {
            let _scope = error_scope(&err);
            assert!(active_error().unwrap().starts_with("disk full"));
        }
        assert!(active_error().is_none());
    }

    #[test]
    fn test_nested_scopes() {
        let outer = anyhow::anyhow!("outer");
        let inner = anyhow::anyhow!("inner");

        let outer_scope = error_scope(&outer);
        {
            let _inner_scope = error_scope(&inner);
            assert!(active_error().unwrap().starts_with("inner"));
        }
        assert!(active_error().unwrap().starts_with("outer"));
        drop(outer_scope);
        assert!(active_error().is_none());
    }

    #[test]
    fn test_report_includes_causes() {
        let err = std::fs::read_to_string("/definitely/not/here")
            .context("Failed to read dataset")
            .unwrap_err();
        let _scope = error_scope(&err);
        let report = active_error().unwrap();
        assert!(report.starts_with("Failed to read dataset"));
        assert!(report.contains("Caused by"));
    }

    #[test]
    fn test_scope_is_per_thread() {
        let err = anyhow::anyhow!("main thread only");
        let _scope = error_scope(&err);
        let seen = std::thread::spawn(active_error).join().unwrap();
        assert!(seen.is_none());
    }
}
