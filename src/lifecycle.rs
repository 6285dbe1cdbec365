//! Activity lifecycle seam and the lifecycle-tracing decorator.
//!
//! `NativeActivity` cannot be subclassed from Rust, so the create/destroy
//! hooks are modelled as a stack of [`ActivityCallbacks`] decorators that end
//! in the base behaviour `()`.

use std::sync::{PoisonError, RwLock};

use crate::error::{Result, ShellError};

/// Hooks invoked by the platform's lifecycle dispatcher.
pub trait ActivityCallbacks {
    /// The activity was created. `saved_state` is opaque to the shell.
    fn on_create(&mut self, _saved_state: Option<&[u8]>) {}

    fn on_destroy(&mut self) {}
}

/// Base behaviour: the glue has already done everything the platform needs.
impl ActivityCallbacks for () {}

impl<T: ActivityCallbacks + ?Sized> ActivityCallbacks for Box<T> {
    fn on_create(&mut self, saved_state: Option<&[u8]>) {
        (**self).on_create(saved_state)
    }

    fn on_destroy(&mut self) {
        (**self).on_destroy()
    }
}

/// Platform primitive used to tear the activity down.
pub trait ActivityHost {
    /// Finish the activity and remove it from the recent-tasks list.
    fn finish_and_remove_task(&self) -> Result<()>;
}

/// Traces create/destroy transitions, then hands over to `base`.
#[derive(Debug, Clone)]
pub struct LifecycleLogger<D = ()> {
    target: &'static str,
    activity: &'static str,
    base: D,
}

impl<D: ActivityCallbacks> LifecycleLogger<D> {
    pub fn new(target: &'static str, activity: &'static str, base: D) -> Self {
        Self {
            target,
            activity,
            base,
        }
    }
}

impl<D> LifecycleLogger<D> {
    /// Called from native code to quit the app.
    ///
    /// Unconditional and fire-and-forget: a failure is logged, never returned.
    pub fn native_finish<H: ActivityHost + ?Sized>(&self, host: &H) {
        log::debug!(target: self.target, "{} finish called from native app.", self.activity);
        if let Err(e) = host.finish_and_remove_task() {
            log::warn!(target: self.target, "finishAndRemoveTask failed: {e}");
        }
    }
}

impl<D: ActivityCallbacks> ActivityCallbacks for LifecycleLogger<D> {
    fn on_create(&mut self, saved_state: Option<&[u8]>) {
        log::debug!(target: self.target, "{}.onCreate() called", self.activity);
        self.base.on_create(saved_state);
    }

    fn on_destroy(&mut self) {
        log::debug!(target: self.target, "{}.onDestroy() called", self.activity);
        self.base.on_destroy();
    }
}

struct Registered<H> {
    host: H,
    logger: LifecycleLogger,
}

/// Where native code finds the activity to finish.
///
/// A `NativeActivity` may be recreated inside a live process, so the slot is
/// filled on create and emptied on destroy rather than set once.
pub struct QuitSlot<H> {
    running: RwLock<Option<Registered<H>>>,
}

impl<H> Default for QuitSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> QuitSlot<H> {
    pub const fn new() -> Self {
        Self {
            running: RwLock::new(None),
        }
    }
}

impl<H: ActivityHost> QuitSlot<H> {
    pub fn register(&self, host: H, logger: LifecycleLogger) {
        *self.running.write().unwrap_or_else(PoisonError::into_inner) =
            Some(Registered { host, logger });
    }

    pub fn clear(&self) {
        *self.running.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Finish the registered activity, or report that none is running.
    pub fn finish(&self) -> Result<()> {
        let slot = self.running.read().unwrap_or_else(PoisonError::into_inner);
        let running = slot.as_ref().ok_or(ShellError::NotRunning)?;
        running.logger.native_finish(&running.host);
        Ok(())
    }
}
