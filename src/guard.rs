use crate::RegisterOutcome;
use crate::provider::{ExtensionProvider, ExtensionToken};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Background-execution guard APIs.
///
/// One registration is outstanding at a time. The caller is responsible for
/// not invoking `register` concurrently on the same instance (one call per
/// background transition); `release` and the provider's expiration callback
/// may race freely, the underlying token is still ended exactly once.
#[derive(Clone, Debug)]
pub struct Guard {
    inner: Arc<crate::Inner>,
}

impl Guard {
    pub(crate) fn new(inner: Arc<crate::Inner>) -> Self {
        Self { inner }
    }

    /// Request an execution extension for the pending work.
    ///
    /// Single attempt, best effort: a denied request leaves the guard inactive
    /// and is not an error. A call while a previous extension is still live is
    /// a no-op (`RegisterOutcome::AlreadyActive`).
    pub fn register(&self) -> RegisterOutcome {
        if !self.inner.opts.enabled {
            #[cfg(feature = "tracing")]
            tracing::debug!("background mode disabled; skipping extension request");
            return RegisterOutcome::Disabled;
        }

        {
            let current = self.lock_registration();
            if let Some(reg) = current.as_ref() {
                if reg.is_live() {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("extension already active; register is a no-op");
                    return RegisterOutcome::AlreadyActive;
                }
            }
        }

        let reg = Arc::new(Registration::new(self.inner.provider.clone()));
        let weak = Arc::downgrade(&reg);
        let token = self.inner.provider.request(Box::new(move || {
            if let Some(reg) = weak.upgrade() {
                reg.expire();
            }
        }));

        let active = reg.attach(token);
        *self.lock_registration() = Some(reg);

        if active {
            #[cfg(feature = "tracing")]
            tracing::info!(token = token.raw(), "background extension granted");
            RegisterOutcome::Granted
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("background extension denied by host");
            RegisterOutcome::Denied
        }
    }

    /// End the active extension.
    ///
    /// Returns `true` only when this call performed the physical end; a
    /// redundant release (already released, expired, or never granted) is a
    /// no-op returning `false`.
    pub fn release(&self) -> bool {
        let reg = self.lock_registration().clone();
        let Some(reg) = reg else {
            #[cfg(feature = "tracing")]
            tracing::debug!("release with no registration; no-op");
            return false;
        };

        let ended = reg.release();
        #[cfg(feature = "tracing")]
        if ended {
            tracing::debug!("background extension released");
        } else {
            tracing::debug!("release was a no-op; extension already inactive");
        }
        ended
    }

    /// Whether an extension is currently active.
    pub fn is_active(&self) -> bool {
        self.lock_registration()
            .as_ref()
            .is_some_and(|reg| reg.is_active())
    }

    /// Handle the guarded work uses to signal completion.
    ///
    /// The handle is cloneable and cheap; `finish` releases the extension from
    /// whichever thread the work completes on.
    pub fn completion(&self) -> CompletionHandle {
        CompletionHandle {
            guard: self.clone(),
        }
    }

    fn lock_registration(&self) -> MutexGuard<'_, Option<Arc<Registration>>> {
        self.inner
            .registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Completion signal for the guarded work.
#[derive(Clone, Debug)]
pub struct CompletionHandle {
    guard: Guard,
}

impl CompletionHandle {
    /// Signal that the guarded work finished; releases the extension.
    ///
    /// Returns `true` when this call performed the release.
    pub fn finish(&self) -> bool {
        self.guard.release()
    }
}

/// One acquisition of a background extension.
///
/// The state cell is the single point of mutual exclusion between the
/// registering thread, the completion path, and the host's expiration
/// callback: whichever transition reaches `Done` first owns the physical
/// `end` call.
#[derive(Debug)]
pub(crate) struct Registration {
    provider: Arc<dyn ExtensionProvider>,
    state: Mutex<RegState>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RegState {
    /// Requested; the token has not been stored yet.
    Pending,
    /// Granted and not yet released.
    Active(ExtensionToken),
    /// Released, expired, or denied. Terminal.
    Done,
}

impl Registration {
    fn new(provider: Arc<dyn ExtensionProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(RegState::Pending),
        }
    }

    fn is_live(&self) -> bool {
        matches!(*self.lock_state(), RegState::Pending | RegState::Active(_))
    }

    fn is_active(&self) -> bool {
        matches!(*self.lock_state(), RegState::Active(_))
    }

    /// Store the token returned by the provider. Returns whether the
    /// registration is active afterwards.
    fn attach(&self, token: ExtensionToken) -> bool {
        let mut st = self.lock_state();
        match *st {
            RegState::Pending => {
                if token.is_valid() {
                    *st = RegState::Active(token);
                    true
                } else {
                    *st = RegState::Done;
                    false
                }
            }
            // Expiration or release beat the requesting thread here; the
            // late-arriving token must still be returned to the host.
            RegState::Active(_) | RegState::Done => {
                *st = RegState::Done;
                drop(st);
                if token.is_valid() {
                    self.provider.end(token);
                }
                false
            }
        }
    }

    fn release(&self) -> bool {
        let mut st = self.lock_state();
        match std::mem::replace(&mut *st, RegState::Done) {
            RegState::Active(token) => {
                drop(st);
                self.provider.end(token);
                true
            }
            // Pending: completion won the race against the grant; attach will
            // end the token when it arrives.
            RegState::Pending | RegState::Done => false,
        }
    }

    fn expire(&self) {
        let mut st = self.lock_state();
        match std::mem::replace(&mut *st, RegState::Done) {
            RegState::Active(token) => {
                drop(st);
                #[cfg(feature = "tracing")]
                tracing::debug!(token = token.raw(), "background extension expiring; releasing");
                self.provider.end(token);
            }
            RegState::Pending | RegState::Done => {}
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, RegState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        let st = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let RegState::Active(token) = std::mem::replace(st, RegState::Done) {
            self.provider.end(token);
        }
    }
}
