//! Component trace: names of the render scopes active on this thread.
//!
//! Guarded widgets call [`enter`] at the top of their `render` so that a
//! fault raised further down reports which nested element failed.

use std::cell::RefCell;
use std::marker::PhantomData;

thread_local! {
    static STACK: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

/// Guard returned by [`enter`]; the scope ends when it is dropped.
#[must_use = "the component scope ends as soon as the guard is dropped"]
pub struct TraceScope {
    depth: usize,
    // Scopes are tied to the thread whose stack they pushed onto.
    _not_send: PhantomData<*const ()>,
}

/// Push `name` onto this thread's component trace.
pub fn enter(name: &'static str) -> TraceScope {
    let depth = STACK.with_borrow_mut(|stack| {
        stack.push(name);
        stack.len()
    });
    TraceScope {
        depth,
        _not_send: PhantomData,
    }
}

/// The active component names, innermost first.
#[must_use]
pub fn snapshot() -> Vec<&'static str> {
    STACK
        .try_with(|stack| {
            stack
                .try_borrow()
                .map(|stack| stack.iter().rev().copied().collect())
                .unwrap_or_default()
        })
        .unwrap_or_default()
}

impl Drop for TraceScope {
    fn drop(&mut self) {
        // Runs during unwinding, so it must not panic.
        let _ = STACK.try_with(|stack| {
            if let Ok(mut stack) = stack.try_borrow_mut() {
                stack.truncate(self.depth.saturating_sub(1));
            }
        });
    }
}
