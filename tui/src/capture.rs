//! Panic hook and per-thread capture slot used by [`FaultBoundary`].
//!
//! The hook runs before unwinding starts, which is the only point where the
//! panic location and the full component trace are still observable. While a
//! boundary on the current thread is rendering guarded content the hook
//! stores them in a thread-local slot and stays silent; the default hook
//! would print to stderr and corrupt the terminal. Panics raised anywhere
//! else go to the previously installed hook unchanged.
//!
//! [`FaultBoundary`]: crate::FaultBoundary

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::panic::{self, PanicHookInfo};
use std::sync::Once;

use ward_types::FaultContext;

use crate::trace;

static INSTALL: Once = Once::new();

thread_local! {
    static GUARD_DEPTH: Cell<usize> = const { Cell::new(0) };
    static LAST_PANIC: RefCell<Option<PanicRecord>> = const { RefCell::new(None) };
}

/// What the hook saw for the most recent guarded panic on this thread.
#[derive(Debug)]
struct PanicRecord {
    location: Option<String>,
    components: Vec<&'static str>,
}

/// Install the capture hook. Idempotent; later calls are no-ops.
pub fn install_panic_hook() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !record_guarded_panic(info) {
                previous(info);
            }
        }));
    });
}

fn record_guarded_panic(info: &PanicHookInfo<'_>) -> bool {
    let guarded = GUARD_DEPTH.try_with(Cell::get).unwrap_or(0) > 0;
    if !guarded {
        return false;
    }

    let record = PanicRecord {
        location: info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column())),
        components: trace::snapshot(),
    };
    // A panic inside the hook aborts the process; never borrow unchecked here.
    let _ = LAST_PANIC.try_with(|slot| {
        if let Ok(mut slot) = slot.try_borrow_mut() {
            *slot = Some(record);
        }
    });
    true
}

/// Marks the current thread as rendering guarded content.
pub(crate) struct CaptureGuard {
    _not_send: PhantomData<*const ()>,
}

impl CaptureGuard {
    /// Clears any record left by an earlier capture so a context can never
    /// outlive the event it belongs to.
    pub(crate) fn arm() -> Self {
        let _ = LAST_PANIC.try_with(|slot| {
            if let Ok(mut slot) = slot.try_borrow_mut() {
                *slot = None;
            }
        });
        let _ = GUARD_DEPTH.try_with(|depth| depth.set(depth.get() + 1));
        Self {
            _not_send: PhantomData,
        }
    }

    /// Take the context recorded for the panic this guard observed.
    pub(crate) fn take_context(&self) -> Option<FaultContext> {
        let record = LAST_PANIC
            .try_with(|slot| slot.try_borrow_mut().ok().and_then(|mut slot| slot.take()))
            .ok()
            .flatten()?;
        FaultContext::new(record.location.as_deref(), record.components)
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        let _ = GUARD_DEPTH.try_with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}
